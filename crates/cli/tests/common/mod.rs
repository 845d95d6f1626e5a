#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub const DATASET: &str = r#"{
  "materials": [
    {
      "id": "1",
      "name": "High-Density Polyethylene",
      "shortName": "HDPE",
      "type": "Polymer",
      "designation": "PE-HD",
      "properties": {
        "density": "0.95 g/cm³",
        "uts": "30 MPa",
        "costPerKg": "£1.20"
      }
    },
    {
      "id": "2",
      "name": "Aluminium 6061",
      "shortName": "Al6061",
      "type": "Metal",
      "designation": "T6",
      "properties": {
        "density": "2.70 g/cm³",
        "uts": "310 MPa",
        "thermalConductivity": "167 W/m·K"
      }
    },
    {
      "id": "3",
      "name": "Polypropylene",
      "shortName": "PP",
      "type": "Polymer",
      "properties": {
        "density": "0.90 g/cm³",
        "uts": "35 MPa"
      }
    },
    {
      "id": "4",
      "name": "Stainless Steel 304",
      "shortName": "SS304",
      "type": "Metal",
      "properties": {
        "density": "8.00 g/cm³",
        "uts": "515 MPa"
      }
    }
  ]
}"#;

pub fn write_dataset(dir: &Path) {
    fs::write(dir.join("data.json"), DATASET).unwrap();
}

/// `materials` binary running in `workdir` with the env override cleared
#[allow(deprecated)]
pub fn materials(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("materials").expect("binary");
    cmd.current_dir(workdir).env_remove("MATERIALS_DATASET");
    cmd
}
