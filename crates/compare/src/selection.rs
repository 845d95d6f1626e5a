use crate::table::{build_table, ComparisonTable};
use materials_protocol::{compare_href, parse_compare_param, Material};

pub const DEFAULT_CAPACITY: usize = 3;

/// Outcome of a [`Selection::select`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    /// Already selected, so toggled off
    Removed,
    /// Selection was full; the oldest entry made room
    Replaced { evicted: String },
}

/// Fixed-size, FIFO-evicting window of materials staged for comparison.
#[derive(Debug, Clone)]
pub struct Selection {
    capacity: usize,
    materials: Vec<Material>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Capacity is at least one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            materials: Vec::with_capacity(capacity),
        }
    }

    pub fn select(&mut self, material: Material) -> SelectionChange {
        if let Some(position) = self.position(&material.id) {
            self.materials.remove(position);
            return SelectionChange::Removed;
        }

        let change = if self.materials.len() >= self.capacity {
            let evicted = self.materials.remove(0);
            SelectionChange::Replaced { evicted: evicted.id }
        } else {
            SelectionChange::Added
        };
        self.materials.push(material);
        change
    }

    pub fn clear(&mut self) {
        self.materials.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn ids(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Comparison view address reflecting this selection
    pub fn href(&self) -> String {
        compare_href(&self.ids())
    }

    /// Replace the selection with the materials a deep link names.
    ///
    /// Listed materials are taken in collection order and pushed through
    /// [`Selection::select`], so the capacity bound still holds. Returns how
    /// many ids named no material.
    pub fn restore_from_link(&mut self, materials: &[Material], link: &str) -> usize {
        let ids = parse_compare_param(link);
        self.clear();
        for material in materials.iter().filter(|m| ids.contains(&m.id)) {
            if !self.is_selected(&material.id) {
                self.select(material.clone());
            }
        }

        ids.iter()
            .filter(|id| !materials.iter().any(|m| &m.id == *id))
            .inspect(|id| log::debug!("Compare link names unknown material id {id:?}"))
            .count()
    }

    pub fn schema(&self) -> Vec<String> {
        crate::classify::compute_schema(&self.materials)
    }

    pub fn table(&self) -> ComparisonTable {
        build_table(&self.materials)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.id == id)
    }
}
