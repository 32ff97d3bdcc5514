use serde::{Deserialize, Serialize};
use taxon_value::{Collection, RecordId, Value};

use crate::compare::value_matches;
use crate::error::{QueryError, Result};

/// What a filter checks at its path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// The path resolves, whatever the value (Null included)
    #[default]
    PathExists,
    /// The resolved value loosely equals the filter value
    PathEqualsValue,
}

/// A single predicate in the filter list.
///
/// Fields are only changed through [`FilterUpdate`] so that a value can never
/// outlive the mode or path it was chosen for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    mode: FilterMode,
    path: String,
    value: String,
    enabled: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            mode: FilterMode::PathExists,
            path: String::new(),
            value: String::new(),
            enabled: true,
        }
    }
}

/// A change to one field of a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FilterUpdate {
    /// Clears the value
    Mode(FilterMode),
    /// Clears the value
    Path(String),
    Value(String),
    Enabled(bool),
}

impl Filter {
    #[must_use]
    pub fn exists(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn equals(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            mode: FilterMode::PathEqualsValue,
            path: path.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Builder: set the enabled flag
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> FilterMode {
        self.mode
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Has everything its mode needs: a path, and a value for equality
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self.mode {
            FilterMode::PathExists => !self.path.is_empty(),
            FilterMode::PathEqualsValue => !self.path.is_empty() && !self.value.is_empty(),
        }
    }

    /// Takes part in evaluation: enabled and complete
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && self.is_complete()
    }

    pub fn apply_update(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Mode(mode) => {
                self.mode = mode;
                self.value.clear();
            }
            FilterUpdate::Path(path) => {
                self.path = path;
                self.value.clear();
            }
            FilterUpdate::Value(value) => self.value = value,
            FilterUpdate::Enabled(enabled) => self.enabled = enabled,
        }
    }

    /// Test one record against this predicate, ignoring `enabled`
    #[must_use]
    pub fn matches(&self, record: &Value) -> bool {
        let resolved = record.resolve(&self.path);
        match self.mode {
            FilterMode::PathExists => !resolved.is_empty(),
            FilterMode::PathEqualsValue => resolved
                .into_iter()
                .any(|value| value_matches(value, &self.value)),
        }
    }
}

/// Logical AND over the active filters; no active filter matches everything
#[must_use]
pub fn evaluate(record: &Value, filters: &[Filter]) -> bool {
    filters
        .iter()
        .filter(|filter| filter.is_active())
        .all(|filter| filter.matches(record))
}

/// Ids of matching records, in collection order.
///
/// Every record is re-evaluated; nothing is cached between calls.
#[must_use]
pub fn apply(collection: &Collection, filters: &[Filter]) -> Vec<RecordId> {
    collection
        .iter()
        .filter(|(_, record)| evaluate(record, filters))
        .map(|(id, _)| id)
        .collect()
}

/// Ordered, caller-owned list of filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Filter> {
        self.filters.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Append a filter, returning its index
    pub fn add(&mut self, filter: Filter) -> usize {
        self.filters.push(filter);
        self.filters.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<Filter> {
        self.check(index)?;
        Ok(self.filters.remove(index))
    }

    /// Flip `enabled`, returning the new state
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let filter = self.slot(index)?;
        filter.enabled = !filter.enabled;
        Ok(filter.enabled)
    }

    pub fn update(&mut self, index: usize, update: FilterUpdate) -> Result<()> {
        self.slot(index)?.apply_update(update);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn active(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(|filter| filter.is_active())
    }

    #[must_use]
    pub fn evaluate(&self, record: &Value) -> bool {
        evaluate(record, &self.filters)
    }

    #[must_use]
    pub fn apply(&self, collection: &Collection) -> Vec<RecordId> {
        let ids = apply(collection, &self.filters);
        log::debug!(
            "{} active filters kept {}/{} records",
            self.active().count(),
            ids.len(),
            collection.len()
        );
        ids
    }

    /// Matching records with their ids, in collection order
    pub fn matching<'a>(
        &'a self,
        collection: &'a Collection,
    ) -> impl Iterator<Item = (RecordId, &'a Value)> + 'a {
        collection
            .iter()
            .filter(move |(_, record)| self.evaluate(record))
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.filters.len() {
            return Err(QueryError::FilterIndexOutOfRange {
                index,
                len: self.filters.len(),
            });
        }
        Ok(())
    }

    fn slot(&mut self, index: usize) -> Result<&mut Filter> {
        self.check(index)?;
        Ok(&mut self.filters[index])
    }
}
