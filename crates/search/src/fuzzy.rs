use crate::approx::{fold, substring_distance};
use crate::error::{Result, SearchError};
use materials_protocol::Material;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};
use std::cmp::Ordering;
use std::sync::Arc;

/// Fairly permissive: tolerates typos and partial tokens
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Record text fields the index covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    ShortName,
    Type,
    Designation,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Name,
        SearchField::ShortName,
        SearchField::Type,
        SearchField::Designation,
    ];

    fn text(self, material: &Material) -> &str {
        match self {
            SearchField::Name => &material.name,
            SearchField::ShortName => &material.short_name,
            SearchField::Type => &material.material_type,
            SearchField::Designation => &material.designation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// 0.0 accepts exact substrings only, 1.0 accepts anything
    pub threshold: f64,
    pub fields: Vec<SearchField>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fields: SearchField::ALL.to_vec(),
        }
    }
}

impl SearchOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::InvalidThreshold(self.threshold));
        }
        if self.fields.is_empty() {
            return Err(SearchError::NoFields);
        }
        Ok(())
    }
}

/// A ranked match: position in the indexed collection and its score
/// (0.0 = exact, higher = worse).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub position: usize,
    pub score: f64,
}

struct FieldText {
    folded: Vec<char>,
    utf32: Utf32String,
}

/// Approximate-match index over a fixed material collection.
///
/// Acceptance uses the edit distance between the query and the closest
/// substring of each field, relative to the query length. Accepted hits are
/// ordered by that score, then by nucleo's subsequence score, then by load order.
pub struct FuzzySearch {
    materials: Arc<[Material]>,
    options: SearchOptions,
    fields: Vec<Vec<FieldText>>,
    matcher: Matcher,
}

impl FuzzySearch {
    pub fn new(materials: Arc<[Material]>, options: SearchOptions) -> Result<Self> {
        options.validate()?;
        let fields = materials
            .iter()
            .map(|material| {
                options
                    .fields
                    .iter()
                    .map(|field| {
                        let text = field.text(material);
                        FieldText {
                            folded: fold(text),
                            utf32: Utf32String::from(text),
                        }
                    })
                    .collect()
            })
            .collect();
        log::debug!("Built search index over {} materials", materials.len());
        Ok(Self {
            materials,
            options,
            fields,
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        })
    }

    pub fn materials(&self) -> &Arc<[Material]> {
        &self.materials
    }

    /// Whether this index was built over exactly this collection
    pub fn is_built_for(&self, materials: &Arc<[Material]>) -> bool {
        Arc::ptr_eq(&self.materials, materials)
    }

    /// Ranked hits. A blank query returns every position in load order.
    pub fn search(&mut self, query: &str) -> Vec<SearchHit> {
        if query.trim().is_empty() {
            return (0..self.materials.len())
                .map(|position| SearchHit {
                    position,
                    score: 0.0,
                })
                .collect();
        }

        let needle = fold(query);
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let threshold = self.options.threshold;

        let mut scored: Vec<(SearchHit, u32)> = Vec::new();
        for (position, fields) in self.fields.iter().enumerate() {
            let best = fields
                .iter()
                .map(|field| substring_distance(&needle, &field.folded) as f64 / needle.len() as f64)
                .fold(f64::INFINITY, f64::min);
            if best > threshold {
                continue;
            }

            let subsequence = fields
                .iter()
                .filter_map(|field| pattern.score(field.utf32.slice(..), &mut self.matcher))
                .max()
                .unwrap_or(0);

            scored.push((SearchHit { position, score: best }, subsequence));
        }

        scored.sort_by(|(a, a_sub), (b, b_sub)| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b_sub.cmp(a_sub))
                .then_with(|| a.position.cmp(&b.position))
        });

        scored.into_iter().map(|(hit, _)| hit).collect()
    }

    /// Matching materials in rank order; a blank query returns the collection unchanged.
    pub fn matching(&mut self, query: &str) -> Vec<Material> {
        self.search(query)
            .into_iter()
            .map(|hit| self.materials[hit.position].clone())
            .collect()
    }
}

/// Search bound to whatever collection is current.
///
/// The index is rebuilt only when the collection reference changes, and is
/// not built at all while the collection is empty.
pub struct LiveSearch {
    options: SearchOptions,
    materials: Arc<[Material]>,
    index: Option<FuzzySearch>,
}

impl LiveSearch {
    pub fn new(options: SearchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            materials: Arc::from(Vec::new()),
            index: None,
        })
    }

    /// Point at a collection; returns whether the index was rebuilt.
    pub fn sync(&mut self, materials: &Arc<[Material]>) -> Result<bool> {
        if Arc::ptr_eq(&self.materials, materials) {
            return Ok(false);
        }
        self.materials = Arc::clone(materials);
        if materials.is_empty() {
            self.index = None;
            return Ok(false);
        }
        self.index = Some(FuzzySearch::new(Arc::clone(materials), self.options.clone())?);
        Ok(true)
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    pub fn search(&mut self, query: &str) -> Vec<Material> {
        if query.trim().is_empty() {
            return self.materials.to_vec();
        }
        match self.index.as_mut() {
            Some(index) => index.matching(query),
            None => Vec::new(),
        }
    }
}
