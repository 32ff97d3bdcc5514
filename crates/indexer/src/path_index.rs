use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use taxon_value::{parse_finite_number, path, Collection, RecordId, Value};

use crate::error::{IndexerError, Result};

/// Default nesting limit for record walks
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// A value-bearing path and the distinct primitive values seen under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePath {
    pub path: String,

    /// Distinct values as text, numerically ordered when all are numbers
    pub options: Vec<String>,

    /// Number of records in which the path carried at least one value
    pub presence_count: usize,
}

/// The two path vocabularies of a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathIndex {
    /// Every reachable object-key path, sorted and deduplicated
    pub all_paths: Vec<String>,

    /// Paths that carry primitive values, sorted by path
    pub value_paths: Vec<ValuePath>,
}

impl PathIndex {
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.all_paths
            .binary_search_by(|candidate| candidate.as_str().cmp(path))
            .is_ok()
    }

    #[must_use]
    pub fn value_path(&self, path: &str) -> Option<&ValuePath> {
        self.value_paths
            .binary_search_by(|entry| entry.path.as_str().cmp(path))
            .ok()
            .map(|idx| &self.value_paths[idx])
    }

    #[must_use]
    pub fn is_value_path(&self, path: &str) -> bool {
        self.value_path(path).is_some()
    }

    /// Distinct values offered for a path; empty when the path carries none
    #[must_use]
    pub fn options(&self, path: &str) -> &[String] {
        self.value_path(path)
            .map(|entry| entry.options.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct ValueAccumulator {
    values: BTreeSet<String>,
    presence_count: usize,
    last_record: Option<RecordId>,
}

/// Enumerates field paths over a heterogeneous collection.
///
/// Arrays never produce indexed sub-paths: scalar elements fold into the
/// array's own path and object elements are walked under that same path.
pub struct PathIndexer {
    max_depth: usize,
}

impl PathIndexer {
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn index(&self, collection: &Collection) -> Result<PathIndex> {
        let mut walk = Walk {
            max_depth: self.max_depth,
            record: 0,
            all_paths: BTreeSet::new(),
            values: BTreeMap::new(),
        };

        for (id, record) in collection.iter() {
            walk.record = id;
            match record {
                Value::Object(_) => walk.object(record, "", 0)?,
                other => log::debug!(
                    "Skipping record {id}: top-level {:?} is not an object",
                    other.kind()
                ),
            }
        }

        let index = walk.finish();
        log::debug!(
            "Indexed {} records: {} paths, {} value paths",
            collection.len(),
            index.all_paths.len(),
            index.value_paths.len()
        );
        Ok(index)
    }
}

impl Default for PathIndexer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

struct Walk {
    max_depth: usize,
    record: RecordId,
    all_paths: BTreeSet<String>,
    values: BTreeMap<String, ValueAccumulator>,
}

impl Walk {
    fn guard(&self, depth: usize, at: &str) -> Result<()> {
        if depth > self.max_depth {
            return Err(IndexerError::DepthExceeded {
                record: self.record,
                limit: self.max_depth,
                path: at.to_string(),
            });
        }
        Ok(())
    }

    fn object(&mut self, value: &Value, prefix: &str, depth: usize) -> Result<()> {
        self.guard(depth, prefix)?;
        let Value::Object(map) = value else {
            return Ok(());
        };

        for (key, child) in map {
            let child_path = path::join_key(prefix, key);
            self.all_paths.insert(child_path.clone());
            self.child(child, &child_path, depth + 1)?;
        }
        Ok(())
    }

    fn child(&mut self, child: &Value, at: &str, depth: usize) -> Result<()> {
        match child {
            Value::Object(_) => self.object(child, at, depth),
            Value::Array(items) => self.fold_array(items, at, depth),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                self.add_value(at, child);
                Ok(())
            }
            Value::Null => Ok(()),
        }
    }

    fn fold_array(&mut self, items: &[Value], at: &str, depth: usize) -> Result<()> {
        self.guard(depth, at)?;
        for item in items {
            self.child(item, at, depth + 1)?;
        }
        Ok(())
    }

    fn add_value(&mut self, at: &str, value: &Value) {
        if !value.is_indexable_scalar() {
            return;
        }
        let Some(text) = value.scalar_text() else {
            return;
        };

        let entry = self.values.entry(at.to_string()).or_default();
        entry.values.insert(text);
        if entry.last_record != Some(self.record) {
            entry.last_record = Some(self.record);
            entry.presence_count += 1;
        }
    }

    fn finish(self) -> PathIndex {
        let value_paths = self
            .values
            .into_iter()
            .filter(|(_, acc)| !acc.values.is_empty())
            .map(|(path, acc)| ValuePath {
                path,
                options: sort_options(acc.values),
                presence_count: acc.presence_count,
            })
            .collect();

        PathIndex {
            all_paths: self.all_paths.into_iter().collect(),
            value_paths,
        }
    }
}

/// Numeric order when every option is a finite number, else lexicographic
fn sort_options(values: BTreeSet<String>) -> Vec<String> {
    let parsed: Option<Vec<(f64, String)>> = values
        .iter()
        .map(|text| parse_finite_number(text).map(|n| (n, text.clone())))
        .collect();

    match parsed {
        Some(mut numeric) => {
            numeric.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.1.cmp(&b.1))
            });
            numeric.into_iter().map(|(_, text)| text).collect()
        }
        // BTreeSet iteration is already lexicographic
        None => values.into_iter().collect(),
    }
}
