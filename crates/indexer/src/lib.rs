//! # Taxon Indexer
//!
//! Schema discovery over collections whose record shapes are not known ahead
//! of time.
//!
//! ## Pipeline
//!
//! ```text
//! Collection
//!     │
//!     ├──> PathIndexer (collapse policy for arrays)
//!     │      ├─> all_paths   (every object-key path)
//!     │      └─> value_paths (path → distinct primitive values)
//!     │
//!     └──> CompletenessAnalyzer
//!            └─> rows ranked by records carrying a value
//! ```
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use taxon_indexer::{CompletenessAnalyzer, PathIndexer};
//! use taxon_value::Collection;
//!
//! let collection = Collection::from_json(json!([
//!     {"species": "a", "habitat": {"type": "forest"}},
//!     {"species": "b"},
//! ]))
//! .unwrap();
//!
//! let index = PathIndexer::default().index(&collection).unwrap();
//! assert_eq!(index.options("habitat.type"), ["forest"]);
//!
//! let report = CompletenessAnalyzer::analyze(&collection, &index.all_paths);
//! assert_eq!(report.row("habitat.type").unwrap().missing, 1);
//! ```

mod completeness;
mod error;
mod path_index;

pub use completeness::{CompletenessAnalyzer, CompletenessReport, CompletenessRow};
pub use error::{IndexerError, Result};
pub use path_index::{PathIndex, PathIndexer, ValuePath, DEFAULT_MAX_DEPTH};
