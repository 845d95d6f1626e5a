use crate::error::Result;
use crate::source::DatasetSource;
use materials_protocol::{Dataset, Material};
use std::collections::HashSet;
use std::sync::Arc;

/// The loaded, immutable material collection.
///
/// Cloning is cheap: clones share the same record slice, so consumers can
/// detect a changed collection with [`Arc::ptr_eq`].
#[derive(Debug, Clone)]
pub struct MaterialStore {
    materials: Arc<[Material]>,
}

impl Default for MaterialStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl MaterialStore {
    pub fn empty() -> Self {
        Self {
            materials: Arc::from(Vec::new()),
        }
    }

    /// Load the dataset; any failure is logged and yields an empty store.
    pub async fn load(source: &DatasetSource) -> Self {
        match Self::try_load(source).await {
            Ok(store) => store,
            Err(err) => {
                log::error!("Error loading materials from {source}: {err}");
                Self::empty()
            }
        }
    }

    pub async fn try_load(source: &DatasetSource) -> Result<Self> {
        let text = source.read().await?;
        let store = Self::from_json(&text)?;
        log::debug!("Loaded {} materials from {source}", store.len());
        Ok(store)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(text)?;
        Ok(Self::from_dataset(dataset))
    }

    /// Missing ids become the 1-based position, in load order.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let materials = assign_ids(dataset.materials);
        Self {
            materials: Arc::from(materials),
        }
    }

    pub fn materials(&self) -> &Arc<[Material]> {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.id == id)
    }

    pub fn distinct_types(&self) -> Vec<String> {
        distinct_types(&self.materials)
    }

    /// Exact type match, load order
    pub fn materials_of_type(&self, material_type: &str) -> Vec<&Material> {
        self.materials
            .iter()
            .filter(|material| material.material_type == material_type)
            .collect()
    }

    pub fn type_counts(&self) -> Vec<(String, usize)> {
        self.distinct_types()
            .into_iter()
            .map(|material_type| {
                let count = self
                    .materials
                    .iter()
                    .filter(|material| material.material_type == material_type)
                    .count();
                (material_type, count)
            })
            .collect()
    }
}

/// Distinct `type` values in first-seen order.
pub fn distinct_types(materials: &[Material]) -> Vec<String> {
    let mut seen = HashSet::new();
    materials
        .iter()
        .filter(|material| seen.insert(material.material_type.as_str()))
        .map(|material| material.material_type.clone())
        .collect()
}

fn assign_ids(materials: Vec<Material>) -> Vec<Material> {
    let mut seen: HashSet<String> = HashSet::with_capacity(materials.len());
    materials
        .into_iter()
        .enumerate()
        .map(|(index, mut material)| {
            if material.id.is_empty() {
                material.id = (index + 1).to_string();
            }
            if seen.contains(&material.id) {
                let original = material.id.clone();
                let mut suffix = 2usize;
                while seen.contains(&format!("{original}-{suffix}")) {
                    suffix += 1;
                }
                material.id = format!("{original}-{suffix}");
                log::warn!(
                    "Duplicate material id {original:?} at position {}; using {:?}",
                    index + 1,
                    material.id
                );
            }
            seen.insert(material.id.clone());
            material
        })
        .collect()
}
