use crate::error::{DraftError, Result};
use crate::form::{DraftForm, TypeChoice};
use serde::Deserialize;
use std::collections::BTreeMap;

/// `type` value that selects the free-text `customType` instead
pub const NEW_TYPE_SENTINEL: &str = "custom";

#[derive(Debug, Clone, Deserialize)]
pub struct CustomPropertyInput {
    #[serde(alias = "name")]
    pub label: String,
    pub value: String,
}

/// Serialized form submission, as read from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftInput {
    pub name: String,
    pub short_name: String,
    #[serde(rename = "type")]
    pub material_type: String,
    pub custom_type: String,
    pub designation: String,
    pub properties: BTreeMap<String, String>,
    pub custom_properties: Vec<CustomPropertyInput>,
}

impl DraftInput {
    fn type_choice(&self) -> TypeChoice {
        if self.material_type == NEW_TYPE_SENTINEL
            || (self.material_type.trim().is_empty() && !self.custom_type.trim().is_empty())
        {
            TypeChoice::Custom(self.custom_type.clone())
        } else {
            TypeChoice::Existing(self.material_type.clone())
        }
    }
}

impl TryFrom<DraftInput> for DraftForm {
    type Error = DraftError;

    fn try_from(input: DraftInput) -> Result<Self> {
        let mut form = DraftForm::new();
        form.material_type = input.type_choice();
        form.name = input.name;
        form.short_name = input.short_name;
        form.designation = input.designation;
        for (key, value) in input.properties {
            form.set_property(&key, value)?;
        }
        for custom in input.custom_properties {
            form.add_custom_property(&custom.label, &custom.value)?;
        }
        Ok(form)
    }
}
