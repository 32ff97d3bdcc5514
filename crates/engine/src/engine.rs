use std::collections::HashSet;

use taxon_gallery::{Gallery, GalleryView, ImageProjector};
use taxon_indexer::{
    CompletenessAnalyzer, CompletenessReport, CompletenessRow, PathIndex, PathIndexer,
};
use taxon_query::{
    Filter, FilterMode, FilterSet, FilterUpdate, SearchIndex, SearchOptions, SearchResults,
};
use taxon_value::{Collection, RecordId, Value};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Views derived from a collection; recomputed only when it changes
struct Derived {
    path_index: PathIndex,
    completeness: CompletenessReport,
    gallery: Gallery,
}

impl Derived {
    fn compute(collection: &Collection, config: &EngineConfig) -> Result<Self> {
        let path_index = PathIndexer::new(config.max_depth).index(collection)?;
        let completeness = CompletenessAnalyzer::analyze(collection, &path_index.all_paths);
        let gallery = ImageProjector::new(config.images.clone(), config.max_depth)?
            .with_label_key(config.label_key.clone())
            .project(collection)?;
        Ok(Self {
            path_index,
            completeness,
            gallery,
        })
    }
}

/// Owns one collection snapshot, its derived views and the filter list.
///
/// The collection is never mutated. Filter changes re-evaluate every record
/// and the gallery view follows the filtered ids by membership.
pub struct Engine {
    config: EngineConfig,
    collection: Collection,
    derived: Derived,
    filters: FilterSet,
    filtered: Vec<RecordId>,
}

impl Engine {
    /// Index a freshly loaded collection
    pub fn load(collection: Collection, config: EngineConfig) -> Result<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        let derived = Derived::compute(&collection, &config)?;
        let filters = FilterSet::new();
        let filtered = filters.apply(&collection);

        log::info!(
            "Loaded {} records: {} paths, {} value paths, {} images",
            collection.len(),
            derived.path_index.all_paths.len(),
            derived.path_index.value_paths.len(),
            derived.gallery.len()
        );

        Ok(Self {
            config,
            collection,
            derived,
            filters,
            filtered,
        })
    }

    /// Swap in a new collection and rebuild every derived view.
    ///
    /// Filters are kept and re-applied; a filter whose path left its mode's
    /// vocabulary has the path cleared. On error the previous snapshot stays.
    pub fn reload(&mut self, collection: Collection) -> Result<()> {
        let derived = Derived::compute(&collection, &self.config)?;
        self.collection = collection;
        self.derived = derived;
        self.drop_stale_paths()?;
        self.refilter();
        log::info!("Reloaded {} records", self.collection.len());
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&Value> {
        self.collection.get(id)
    }

    /// Display label of a record, when a label key is configured
    #[must_use]
    pub fn label(&self, id: RecordId) -> Option<String> {
        self.config
            .label_key
            .as_deref()
            .and_then(|key| self.collection.label(id, key))
    }

    #[must_use]
    pub fn path_index(&self) -> &PathIndex {
        &self.derived.path_index
    }

    #[must_use]
    pub fn value_options(&self, path: &str) -> &[String] {
        self.derived.path_index.options(path)
    }

    #[must_use]
    pub fn completeness(&self) -> &CompletenessReport {
        &self.derived.completeness
    }

    /// The configured number of most complete paths
    #[must_use]
    pub fn top_completeness(&self) -> &[CompletenessRow] {
        self.derived
            .completeness
            .top(self.config.completeness.top_k)
    }

    /// Completeness over a caller-chosen subset of paths
    #[must_use]
    pub fn completeness_for(&self, paths: &[String]) -> CompletenessReport {
        CompletenessAnalyzer::analyze(&self.collection, paths)
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        self.filters.filters()
    }

    /// Append a filter; a non-empty path must belong to its mode's vocabulary
    pub fn add_filter(&mut self, filter: Filter) -> Result<usize> {
        self.check_path(filter.mode(), filter.path())?;
        let index = self.filters.add(filter);
        self.refilter();
        Ok(index)
    }

    pub fn remove_filter(&mut self, index: usize) -> Result<Filter> {
        let removed = self.filters.remove(index)?;
        self.refilter();
        Ok(removed)
    }

    pub fn toggle_filter(&mut self, index: usize) -> Result<bool> {
        let enabled = self.filters.toggle(index)?;
        self.refilter();
        Ok(enabled)
    }

    /// Change one field of a filter.
    ///
    /// Mode and path changes clear the value. Switching mode also clears a
    /// path that the new mode cannot use.
    pub fn update_filter(&mut self, index: usize, update: FilterUpdate) -> Result<()> {
        let current = self
            .filters
            .get(index)
            .map(Filter::mode)
            .ok_or(taxon_query::QueryError::FilterIndexOutOfRange {
                index,
                len: self.filters.len(),
            })?;

        match update {
            FilterUpdate::Path(ref path) => self.check_path(current, path)?,
            FilterUpdate::Mode(mode) => {
                let stale = self
                    .filters
                    .get(index)
                    .is_some_and(|f| self.check_path(mode, f.path()).is_err());
                if stale {
                    log::debug!("Clearing filter {index} path no longer valid for {mode:?}");
                    self.filters.update(index, FilterUpdate::Path(String::new()))?;
                }
            }
            FilterUpdate::Value(_) | FilterUpdate::Enabled(_) => {}
        }

        self.filters.update(index, update)?;
        self.refilter();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refilter();
    }

    /// Ids of records passing the current filters, in collection order
    #[must_use]
    pub fn filtered_ids(&self) -> &[RecordId] {
        &self.filtered
    }

    pub fn filtered_records(&self) -> impl Iterator<Item = (RecordId, &Value)> + '_ {
        self.filtered
            .iter()
            .filter_map(|&id| self.collection.get(id).map(|record| (id, record)))
    }

    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        &self.derived.gallery
    }

    /// Images of the records passing the current filters
    #[must_use]
    pub fn gallery_view(&self) -> GalleryView<'_> {
        let ids: HashSet<RecordId> = self.filtered.iter().copied().collect();
        self.derived.gallery.filter(&ids)
    }

    /// Search with the configured defaults
    pub fn search(&self, term: &str) -> Result<SearchResults> {
        let defaults = &self.config.search;
        self.search_with(term, defaults.options(), defaults.max_results)
    }

    pub fn search_with(
        &self,
        term: &str,
        options: SearchOptions,
        max_results: usize,
    ) -> Result<SearchResults> {
        let results = SearchIndex::new(self.config.max_depth)
            .with_label_key(self.config.label_key.clone())
            .search(&self.collection, term, options, max_results)?;
        Ok(results)
    }

    fn refilter(&mut self) {
        self.filtered = self.filters.apply(&self.collection);
    }

    fn drop_stale_paths(&mut self) -> Result<()> {
        for index in 0..self.filters.len() {
            let stale = self
                .filters
                .get(index)
                .is_some_and(|f| self.check_path(f.mode(), f.path()).is_err());
            if stale {
                log::debug!("Clearing filter {index} path missing after reload");
                self.filters.update(index, FilterUpdate::Path(String::new()))?;
            }
        }
        Ok(())
    }

    fn check_path(&self, mode: FilterMode, path: &str) -> Result<()> {
        if path.is_empty() {
            return Ok(());
        }
        let index = &self.derived.path_index;
        let known = match mode {
            FilterMode::PathExists => index.contains_path(path),
            FilterMode::PathEqualsValue => index.is_value_path(path),
        };
        if known {
            Ok(())
        } else {
            Err(EngineError::UnknownPath {
                path: path.to_string(),
                mode,
            })
        }
    }
}
