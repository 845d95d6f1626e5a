use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Rendered in place of a missing or empty property value
pub const ABSENT_PLACEHOLDER: &str = "-";

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?").expect("leading number regex"));

/// Extract the leading numeric magnitude of a free-text value.
///
/// Only an optional sign, digits and an optional decimal portion at the very
/// start of the text count: `"1.2 GPa"` yields `1.2`, while `"<0.01%"` and
/// `"No break"` yield `None`.
pub fn leading_number(text: &str) -> Option<f64> {
    let matched = LEADING_NUMBER.find(text)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// One property value: the raw text plus its parsed leading magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    raw: String,
    numeric: Option<f64>,
}

impl PropertyValue {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let numeric = leading_number(&raw);
        Self { raw, numeric }
    }

    /// Coerce an arbitrary JSON value to property text.
    pub fn from_json(value: &Value) -> Self {
        Self::new(json_text(value))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Leading numeric magnitude, if the value is numeric-comparable
    pub fn numeric(&self) -> Option<f64> {
        if self.is_present() {
            self.numeric
        } else {
            None
        }
    }

    /// Empty text counts as absent
    pub fn is_present(&self) -> bool {
        !self.raw.is_empty()
    }

    pub fn display(&self) -> &str {
        if self.is_present() {
            &self.raw
        } else {
            ABSENT_PLACEHOLDER
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PropertyValue {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Ordered property mapping; keys keep their declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

impl Serialize for PropertyBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropertyBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BagVisitor;

        impl<'de> Visitor<'de> for BagVisitor {
            type Value = PropertyBag;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of property values")
            }

            fn visit_unit<E>(self) -> Result<PropertyBag, E> {
                Ok(PropertyBag::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PropertyBag, A::Error> {
                let mut bag = PropertyBag::default();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    bag.insert(key, PropertyValue::from_json(&value));
                }
                Ok(bag)
            }
        }

        deserializer.deserialize_any(BagVisitor)
    }
}

/// One material record of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Empty until the store assigns the positional id
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub short_name: String,
    #[serde(rename = "type")]
    pub material_type: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub designation: String,
    #[serde(default)]
    pub properties: PropertyBag,
}

impl Material {
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        material_type: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            short_name: short_name.into(),
            material_type: material_type.into(),
            designation: String::new(),
            properties: PropertyBag::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Column heading used by the comparison view
    pub fn heading(&self) -> String {
        format!("{} ({})", self.name, self.short_name)
    }
}

fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(json_text).unwrap_or_default())
}

/// The static dataset document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub materials: Vec<Material>,
}
