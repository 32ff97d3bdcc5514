use serde::{Deserialize, Serialize};
use taxon_value::{path, Collection, RecordId, Value};

use crate::error::{QueryError, Result};

/// Which parts of a record a search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub search_keys: bool,
    pub search_values: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            search_keys: true,
            search_values: true,
        }
    }
}

/// What matched at a hit's path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum MatchedText {
    /// The key name itself contains the term
    Key,
    /// A string value containing the term
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub record_id: RecordId,

    /// Dotted path with `[i]` marking array elements; informative only
    pub path: String,

    pub matched: MatchedText,

    /// Display label of the owning record, when a label key is configured
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,

    /// Hit count before truncation
    pub total: usize,
}

impl SearchResults {
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.total > self.hits.len()
    }
}

/// Case-insensitive substring search over record keys and string values.
///
/// Every record is walked in full before the hit list is cut to
/// `max_results`, so the hits kept are always the first ones in collection
/// order regardless of the cap.
pub struct SearchIndex {
    max_depth: usize,
    label_key: Option<String>,
}

impl SearchIndex {
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            label_key: None,
        }
    }

    /// Builder: attach record labels read from a top-level key
    #[must_use]
    pub fn with_label_key(mut self, key: Option<String>) -> Self {
        self.label_key = key;
        self
    }

    pub fn search(
        &self,
        collection: &Collection,
        term: &str,
        options: SearchOptions,
        max_results: usize,
    ) -> Result<SearchResults> {
        if term.is_empty() || !(options.search_keys || options.search_values) {
            return Ok(SearchResults::default());
        }

        let mut walk = SearchWalk {
            needle: term.to_lowercase(),
            options,
            max_depth: self.max_depth,
            record: 0,
            hits: Vec::new(),
        };

        for (id, record) in collection.iter() {
            walk.record = id;
            let before = walk.hits.len();
            walk.visit(record, "", 0)?;

            if let Some(key) = &self.label_key {
                let label = collection.label(id, key);
                for hit in &mut walk.hits[before..] {
                    hit.label.clone_from(&label);
                }
            }
        }

        let total = walk.hits.len();
        let mut hits = walk.hits;
        hits.truncate(max_results);
        log::debug!(
            "Search '{term}' found {total} hits, returning {}",
            hits.len()
        );
        Ok(SearchResults { hits, total })
    }
}

struct SearchWalk {
    needle: String,
    options: SearchOptions,
    max_depth: usize,
    record: RecordId,
    hits: Vec<SearchHit>,
}

impl SearchWalk {
    fn visit(&mut self, value: &Value, at: &str, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(QueryError::DepthExceeded {
                record: self.record,
                limit: self.max_depth,
                path: at.to_string(),
            });
        }

        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = path::join_key(at, key);
                    if self.options.search_keys && self.contains(key) {
                        self.push(&child_path, MatchedText::Key);
                    }
                    self.leaf_or_descend(child, &child_path, depth)?;
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = path::join_index(at, i);
                    self.leaf_or_descend(item, &item_path, depth)?;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
        Ok(())
    }

    fn leaf_or_descend(&mut self, child: &Value, at: &str, depth: usize) -> Result<()> {
        match child {
            Value::String(text) => {
                if self.options.search_values && self.contains(text) {
                    self.push(at, MatchedText::Value(text.clone()));
                }
                Ok(())
            }
            Value::Object(_) | Value::Array(_) => self.visit(child, at, depth + 1),
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(()),
        }
    }

    fn contains(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }

    fn push(&mut self, at: &str, matched: MatchedText) {
        self.hits.push(SearchHit {
            record_id: self.record,
            path: at.to_string(),
            matched,
            label: None,
        });
    }
}
