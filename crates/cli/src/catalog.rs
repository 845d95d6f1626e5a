use crate::browse::{Pager, ViewportWatcher};
use crate::command::domain::{
    CompareOutput, ComparePayload, DraftOutput, InfoOutput, ListOutput, ListPayload, SearchOutput,
    SearchPayload, ShowOutput, ShowPayload, TypeCount, TypesOutput,
};
use crate::config::CatalogConfig;
use anyhow::{bail, Context, Result};
use materials_compare::Selection;
use materials_draft::{contribution_steps, DraftForm, DraftInput};
use materials_protocol::{parse_compare_param, summary_text, Material};
use materials_search::{LiveSearch, SearchOptions};
use materials_store::{DatasetSource, MaterialStore};
use std::cell::RefCell;
use std::rc::Rc;

/// Loaded dataset plus the search index over it
pub struct Catalog {
    config: CatalogConfig,
    store: MaterialStore,
    search: LiveSearch,
}

impl Catalog {
    /// Never fails on a bad dataset; the store comes back empty instead.
    pub async fn open(config: CatalogConfig) -> Result<Self> {
        let source = DatasetSource::parse(&config.dataset.source);
        log::debug!("Loading dataset from {source}");
        let store = MaterialStore::load(&source).await;
        Self::with_store(config, store)
    }

    pub fn with_store(config: CatalogConfig, store: MaterialStore) -> Result<Self> {
        let mut search = LiveSearch::new(SearchOptions::with_threshold(config.search.threshold))
            .context("Invalid search options")?;
        search.sync(store.materials())?;
        Ok(Self {
            config,
            store,
            search,
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn store(&self) -> &MaterialStore {
        &self.store
    }

    pub fn list(&mut self, payload: ListPayload) -> ListOutput {
        let query = payload.query.as_deref().unwrap_or_default();
        let found: Vec<Material> = match payload.material_type.as_deref() {
            Some(material_type) if query.trim().is_empty() => self
                .store
                .materials_of_type(material_type)
                .into_iter()
                .cloned()
                .collect(),
            Some(material_type) => {
                let mut found = self.search.search(query);
                found.retain(|material| material.material_type == material_type);
                found
            }
            None => self.search.search(query),
        };

        let mut pager = self.pager_for(payload.width);
        pager.show_more_times(payload.more, found.len());

        ListOutput {
            viewport: pager.viewport(),
            page_size: pager.page_size(),
            total: found.len(),
            remaining: pager.remaining(found.len()),
            can_show_less: pager.can_show_less(found.len()),
            materials: pager.visible(&found).to_vec(),
        }
    }

    fn pager_for(&self, width: Option<u32>) -> Pager {
        let pager = Rc::new(RefCell::new(Pager::new(&self.config.browse)));
        if let Some(width) = width {
            let mut watcher = ViewportWatcher::new(self.config.browse.mobile_breakpoint);
            let target = Rc::clone(&pager);
            watcher.subscribe(move |class| {
                target.borrow_mut().set_viewport(class);
            });
            watcher.resize(width);
        }
        Rc::try_unwrap(pager)
            .map(RefCell::into_inner)
            .unwrap_or_else(|shared| shared.borrow().clone())
    }

    pub fn types(&self) -> TypesOutput {
        TypesOutput {
            types: self
                .store
                .type_counts()
                .into_iter()
                .map(|(name, count)| TypeCount { name, count })
                .collect(),
        }
    }

    pub fn show(&self, payload: ShowPayload) -> Result<ShowOutput> {
        let Some(material) = self.store.get(&payload.id) else {
            bail!("No material with id {:?}", payload.id);
        };
        Ok(ShowOutput {
            summary: summary_text(material),
            material: material.clone(),
        })
    }

    pub fn search(&mut self, payload: SearchPayload) -> SearchOutput {
        let materials = self.search.search(&payload.query);
        SearchOutput {
            total: materials.len(),
            query: payload.query,
            materials,
        }
    }

    /// `ids` and `link` are mutually exclusive.
    pub fn compare(&self, payload: ComparePayload) -> Result<CompareOutput> {
        if payload.link.is_some() && !payload.ids.is_empty() {
            bail!("Pass either ids or link to compare, not both");
        }

        let mut selection = Selection::with_capacity(self.config.compare.capacity);
        let mut unknown = Vec::new();

        if let Some(link) = payload.link.as_deref() {
            let missing = selection.restore_from_link(self.store.materials(), link);
            if missing > 0 {
                unknown = parse_compare_param(link)
                    .into_iter()
                    .filter(|id| self.store.get(id).is_none())
                    .collect();
            }
        } else {
            for id in &payload.ids {
                match self.store.get(id) {
                    Some(material) if !selection.is_selected(id) => {
                        selection.select(material.clone());
                    }
                    Some(_) => {}
                    None => unknown.push(id.clone()),
                }
            }
        }

        if !unknown.is_empty() {
            log::warn!("Ignoring unknown material ids: {}", unknown.join(", "));
        }

        Ok(CompareOutput {
            href: selection.href(),
            ids: selection.ids().into_iter().map(str::to_string).collect(),
            unknown,
            table: selection.table(),
        })
    }

    pub fn draft(&self, input: DraftInput) -> Result<DraftOutput> {
        let form = DraftForm::try_from(input)?;
        let material = form.build()?;
        let json = form.to_json()?;
        Ok(DraftOutput {
            material,
            json,
            instructions: contribution_steps(&self.config.repository.url),
        })
    }

    pub fn info(&self) -> InfoOutput {
        InfoOutput {
            name: self.config.app.name.clone(),
            version: self.config.app.version.clone(),
            repository: self.config.repository.url.clone(),
            dataset: self.config.dataset.source.clone(),
            materials: self.store.len(),
            types: self.store.distinct_types().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DATA: &str = r#"{"materials": [
        {"id": "1", "name": "Polyethylene", "shortName": "PE", "type": "Polymer",
         "properties": {"density": "0.95 g/cm³", "uts": "30 MPa"}},
        {"id": "2", "name": "Aluminium 6061", "shortName": "Al6061", "type": "Metal",
         "properties": {"density": "2.70 g/cm³", "uts": "310 MPa"}},
        {"id": "3", "name": "Polypropylene", "shortName": "PP", "type": "Polymer",
         "properties": {"density": "0.90 g/cm³", "uts": "35 MPa"}},
        {"id": "4", "name": "Titanium", "shortName": "Ti", "type": "Metal"}
    ]}"#;

    fn catalog() -> Catalog {
        let store = MaterialStore::from_json(DATA).unwrap();
        Catalog::with_store(CatalogConfig::default(), store).unwrap()
    }

    fn ids(materials: &[Material]) -> Vec<&str> {
        materials.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn list_by_type_keeps_load_order() {
        let mut catalog = catalog();
        let out = catalog.list(ListPayload {
            material_type: Some("Metal".to_string()),
            ..Default::default()
        });
        assert_eq!(ids(&out.materials), vec!["2", "4"]);
        assert_eq!(out.remaining, 0);
    }

    #[test]
    fn list_pages_with_viewport() {
        let mut config = CatalogConfig::default();
        config.browse.mobile_page_size = 1;
        config.browse.desktop_page_size = 3;
        let store = MaterialStore::from_json(DATA).unwrap();
        let mut catalog = Catalog::with_store(config, store).unwrap();

        let desktop = catalog.list(ListPayload::default());
        assert_eq!(desktop.materials.len(), 3);
        assert_eq!(desktop.remaining, 1);

        let mobile = catalog.list(ListPayload {
            width: Some(400),
            more: 1,
            ..Default::default()
        });
        assert_eq!(mobile.page_size, 1);
        assert_eq!(ids(&mobile.materials), vec!["1", "2"]);
        assert!(mobile.can_show_less);
    }

    #[test]
    fn compare_ids_apply_in_argument_order() {
        let catalog = catalog();
        let out = catalog.compare(ComparePayload {
            ids: vec!["3".into(), "1".into(), "9".into()],
            link: None,
        })
        .unwrap();
        assert_eq!(out.ids, vec!["3", "1"]);
        assert_eq!(out.unknown, vec!["9"]);
        assert_eq!(out.href, "/compare?compare=3,1");
    }

    #[test]
    fn compare_link_restores_in_store_order() {
        let catalog = catalog();
        let out = catalog.compare(ComparePayload {
            ids: Vec::new(),
            link: Some("/compare?compare=3,1,x".to_string()),
        })
        .unwrap();
        assert_eq!(out.ids, vec!["1", "3"]);
        assert_eq!(out.unknown, vec!["x"]);
        assert_eq!(out.table.columns.len(), 2);
    }

    #[test]
    fn compare_rejects_ids_together_with_link() {
        let catalog = catalog();
        let err = catalog
            .compare(ComparePayload {
                ids: vec!["2".into()],
                link: Some("/compare?compare=1".to_string()),
            })
            .unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn list_more_saturates_with_huge_page_size() {
        let mut config = CatalogConfig::default();
        config.browse.desktop_page_size = usize::MAX / 2 + 1;
        config.validate().unwrap();
        let store = MaterialStore::from_json(DATA).unwrap();
        let mut catalog = Catalog::with_store(config, store).unwrap();

        let out = catalog.list(ListPayload {
            more: 1,
            ..Default::default()
        });
        assert_eq!(out.materials.len(), 4);
        assert_eq!(out.remaining, 0);
    }

    #[test]
    fn list_more_beyond_last_page_is_clamped() {
        let mut config = CatalogConfig::default();
        config.browse.desktop_page_size = 1;
        let store = MaterialStore::from_json(DATA).unwrap();
        let mut catalog = Catalog::with_store(config, store).unwrap();

        let out = catalog.list(ListPayload {
            more: usize::MAX,
            ..Default::default()
        });
        assert_eq!(out.materials.len(), 4);
        assert_eq!(out.remaining, 0);
        assert!(out.can_show_less);
    }

    #[test]
    fn show_unknown_id_is_an_error() {
        let catalog = catalog();
        assert!(catalog.show(ShowPayload { id: "42".into() }).is_err());
        let shown = catalog.show(ShowPayload { id: "4".into() }).unwrap();
        assert!(shown.summary.starts_with("Titanium (Ti)\n"));
    }

    #[test]
    fn info_counts_materials_and_types() {
        let info = catalog().info();
        assert_eq!((info.materials, info.types), (4, 2));
    }
}
