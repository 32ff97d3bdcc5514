use serde::{Deserialize, Serialize};
use taxon_value::{Collection, Value};

/// Presence statistics for one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessRow {
    pub path: String,
    pub has: usize,
    pub missing: usize,
}

impl CompletenessRow {
    /// Fraction of records carrying a value, 0.0 for an empty collection
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let total = self.has + self.missing;
        if total == 0 {
            0.0
        } else {
            self.has as f64 / total as f64
        }
    }
}

/// Paths ranked by how many records carry a value for them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// Number of records analysed
    pub total: usize,

    /// Rows ordered by `has` descending, then by path
    pub rows: Vec<CompletenessRow>,
}

impl CompletenessReport {
    /// The `k` most complete paths
    #[must_use]
    pub fn top(&self, k: usize) -> &[CompletenessRow] {
        &self.rows[..k.min(self.rows.len())]
    }

    #[must_use]
    pub fn row(&self, path: &str) -> Option<&CompletenessRow> {
        self.rows.iter().find(|row| row.path == path)
    }
}

pub struct CompletenessAnalyzer;

impl CompletenessAnalyzer {
    /// Count, per path, the records where it resolves to a non-empty value.
    ///
    /// Null, `{}` and `[]` count as missing, as does an unresolvable path.
    #[must_use]
    pub fn analyze(collection: &Collection, paths: &[String]) -> CompletenessReport {
        let total = collection.len();
        let mut rows: Vec<CompletenessRow> = paths
            .iter()
            .map(|path| {
                let has = collection
                    .records()
                    .iter()
                    .filter(|record| has_value(record, path))
                    .count();
                CompletenessRow {
                    path: path.clone(),
                    has,
                    missing: total - has,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.has.cmp(&a.has).then_with(|| a.path.cmp(&b.path)));

        log::debug!(
            "Completeness over {} records for {} paths",
            total,
            rows.len()
        );
        CompletenessReport { total, rows }
    }
}

fn has_value(record: &Value, path: &str) -> bool {
    record
        .resolve(path)
        .into_iter()
        .any(|value| !value.is_empty_like())
}
