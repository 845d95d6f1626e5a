use crate::label::format_label;
use crate::material::Material;
use std::fmt::Write;

/// Plain-text card summary, as copied by the card's "Copy All" action.
pub fn summary_text(material: &Material) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", material.name, material.short_name);
    let _ = writeln!(out, "Type: {}", material.material_type);
    let _ = writeln!(out, "Designation: {}", material.designation);
    out.push('\n');
    out.push_str("Properties:\n");
    for (key, value) in material.properties.iter() {
        let _ = writeln!(out, "{}: {}", format_label(key), value.raw());
    }
    out
}
