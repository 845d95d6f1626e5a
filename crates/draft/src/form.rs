use crate::error::{DraftError, Result};
use materials_protocol::{Material, PropertyBag};
use serde::{Deserialize, Serialize};

/// Standard property fields, in form order
pub const STANDARD_PROPERTIES: [&str; 18] = [
    "hardness",
    "density",
    "youngsModulus",
    "uts",
    "frictionCoef",
    "waterAbsorption",
    "electricalResistance",
    "resistivity",
    "flexuralMod",
    "impactCharpy",
    "notchedImpactCharpy",
    "meltingTemp",
    "specificHeatCap",
    "thermalConductivity",
    "costPerKg",
    "recyclability",
    "biocompatible",
    "application",
];

/// Storage key for a free-text property label: `"Glass Transition Temperature"`
/// becomes `"glassTransitionTemperature"`.
pub fn custom_property_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    for (index, word) in label.split_whitespace().enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if index == 0 {
                key.extend(first.to_lowercase());
            } else {
                key.extend(first.to_uppercase());
            }
            key.push_str(chars.as_str());
        }
    }
    key
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum TypeChoice {
    /// One of the types already present in the dataset
    Existing(String),
    /// A new type name typed by the contributor
    Custom(String),
}

impl Default for TypeChoice {
    fn default() -> Self {
        TypeChoice::Existing(String::new())
    }
}

impl TypeChoice {
    pub fn resolved(&self) -> &str {
        match self {
            TypeChoice::Existing(name) | TypeChoice::Custom(name) => name.trim(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomProperty {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Add-material form state
#[derive(Debug, Clone)]
pub struct DraftForm {
    pub name: String,
    pub short_name: String,
    pub material_type: TypeChoice,
    pub designation: String,
    standard: Vec<(&'static str, String)>,
    custom: Vec<CustomProperty>,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            short_name: String::new(),
            material_type: TypeChoice::default(),
            designation: String::new(),
            standard: STANDARD_PROPERTIES
                .iter()
                .map(|key| (*key, String::new()))
                .collect(),
            custom: Vec::new(),
        }
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let slot = self
            .standard
            .iter_mut()
            .find(|(candidate, _)| *candidate == key)
            .ok_or_else(|| DraftError::UnknownProperty(key.to_string()))?;
        slot.1 = value.into();
        Ok(())
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.standard
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value.as_str())
    }

    /// Both parts are trimmed and must be non-empty.
    pub fn add_custom_property(&mut self, label: &str, value: &str) -> Result<&CustomProperty> {
        let label = label.trim();
        let value = value.trim();
        if label.is_empty() || value.is_empty() {
            return Err(DraftError::IncompleteCustomProperty);
        }
        self.custom.push(CustomProperty {
            key: custom_property_key(label),
            label: label.to_string(),
            value: value.to_string(),
        });
        Ok(&self.custom[self.custom.len() - 1])
    }

    pub fn remove_custom_property(&mut self, index: usize) -> Result<CustomProperty> {
        if index >= self.custom.len() {
            return Err(DraftError::NoSuchCustomProperty(index));
        }
        Ok(self.custom.remove(index))
    }

    pub fn custom_properties(&self) -> &[CustomProperty] {
        &self.custom
    }

    /// Normalize into a canonical record without an id.
    ///
    /// Blank standard values are dropped. Custom properties follow the
    /// standard ones; a custom key equal to an earlier key overwrites its
    /// value in place.
    pub fn build(&self) -> Result<Material> {
        let name = required("name", &self.name)?;
        let short_name = required("shortName", &self.short_name)?;
        let material_type = required("type", self.material_type.resolved())?;

        let mut properties = PropertyBag::new();
        for (key, value) in &self.standard {
            let value = value.trim();
            if !value.is_empty() {
                properties.insert(*key, value);
            }
        }
        for custom in &self.custom {
            if properties.insert(custom.key.as_str(), custom.value.as_str()).is_some() {
                log::warn!(
                    "Custom property {:?} overwrites existing key {:?}",
                    custom.label,
                    custom.key
                );
            }
        }

        Ok(Material {
            id: String::new(),
            name: name.to_string(),
            short_name: short_name.to_string(),
            material_type: material_type.to_string(),
            designation: self.designation.trim().to_string(),
            properties,
        })
    }

    /// Pretty-printed contribution artifact
    pub fn to_json(&self) -> Result<String> {
        let draft = self.build()?;
        Ok(serde_json::to_string_pretty(&draft)?)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> DraftForm {
        let mut form = DraftForm::new();
        form.name = "High-Density Polyethylene".to_string();
        form.short_name = "HDPE".to_string();
        form.material_type = TypeChoice::Existing("Polymer".to_string());
        form.designation = "Type III".to_string();
        form
    }

    #[test]
    fn custom_keys_are_camel_cased() {
        assert_eq!(custom_property_key("Glass Transition Temperature"), "glassTransitionTemperature");
        assert_eq!(custom_property_key("  UV   resistance "), "uVResistance");
        assert_eq!(custom_property_key("Elongation"), "elongation");
        assert_eq!(custom_property_key(""), "");
    }

    #[test]
    fn blank_standard_values_are_dropped() {
        let mut form = filled();
        form.set_property("density", " 0.95 g/cm³ ").unwrap();
        form.set_property("uts", "   ").unwrap();
        let material = form.build().unwrap();
        assert_eq!(material.properties.keys().collect::<Vec<_>>(), vec!["density"]);
        assert_eq!(material.property("density").map(|v| v.raw()), Some("0.95 g/cm³"));
    }

    #[test]
    fn standard_properties_keep_form_order() {
        let mut form = filled();
        form.set_property("application", "Pipes").unwrap();
        form.set_property("hardness", "D65 Shore").unwrap();
        form.add_custom_property("Glass Transition Temperature", "105°C").unwrap();
        let material = form.build().unwrap();
        assert_eq!(
            material.properties.keys().collect::<Vec<_>>(),
            vec!["hardness", "application", "glassTransitionTemperature"]
        );
    }

    #[test]
    fn colliding_custom_keys_are_last_write_wins() {
        let mut form = filled();
        form.set_property("density", "0.95 g/cm³").unwrap();
        form.add_custom_property("Flash point", "340°C").unwrap();
        form.add_custom_property("flash  Point", "350°C").unwrap();
        form.add_custom_property("Density", "0.96 g/cm³").unwrap();
        let material = form.build().unwrap();
        assert_eq!(
            material
                .properties
                .iter()
                .map(|(k, v)| (k, v.raw()))
                .collect::<Vec<_>>(),
            vec![("density", "0.96 g/cm³"), ("flashPoint", "350°C")]
        );
    }

    #[test]
    fn incomplete_custom_property_is_rejected() {
        let mut form = filled();
        assert!(matches!(
            form.add_custom_property("  ", "1"),
            Err(DraftError::IncompleteCustomProperty)
        ));
        assert!(form.add_custom_property("Colour", "").is_err());
        assert!(form.custom_properties().is_empty());
    }

    #[test]
    fn custom_properties_can_be_removed() {
        let mut form = filled();
        form.add_custom_property("Colour", "White").unwrap();
        form.add_custom_property("Odour", "None").unwrap();
        let removed = form.remove_custom_property(0).unwrap();
        assert_eq!(removed.key, "colour");
        assert_eq!(form.custom_properties().len(), 1);
        assert!(form.remove_custom_property(5).is_err());
    }

    #[test]
    fn unknown_standard_property_is_rejected() {
        let mut form = filled();
        assert!(matches!(
            form.set_property("colour", "white"),
            Err(DraftError::UnknownProperty(_))
        ));
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut form = filled();
        form.short_name = " ".to_string();
        assert!(matches!(form.build(), Err(DraftError::MissingField("shortName"))));

        let mut form = filled();
        form.material_type = TypeChoice::Custom(String::new());
        assert!(matches!(form.build(), Err(DraftError::MissingField("type"))));
    }

    #[test]
    fn custom_type_is_used_verbatim() {
        let mut form = filled();
        form.material_type = TypeChoice::Custom(" Composite ".to_string());
        assert_eq!(form.build().unwrap().material_type, "Composite");
    }

    #[test]
    fn json_artifact_is_pretty_and_has_no_id() {
        let mut form = filled();
        form.set_property("density", "0.95 g/cm³").unwrap();
        let expected = r#"{
  "name": "High-Density Polyethylene",
  "shortName": "HDPE",
  "type": "Polymer",
  "designation": "Type III",
  "properties": {
    "density": "0.95 g/cm³"
  }
}"#;
        assert_eq!(form.to_json().unwrap(), expected);
    }
}
