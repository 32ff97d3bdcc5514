//! # Taxon Engine
//!
//! Schema discovery and querying for collections of heterogeneous, deeply
//! nested taxon records.
//!
//! ## Architecture
//!
//! ```text
//! Collection (decoded once, immutable)
//!     │
//!     ├──> PathIndexer ──────────> PathIndex (all paths, value paths)
//!     ├──> CompletenessAnalyzer ─> CompletenessReport
//!     ├──> ImageProjector ───────> Gallery (single extraction pass)
//!     │
//!     ├──> FilterSet (caller-owned, mutable)
//!     │      └─> filtered ids ──> Gallery view (membership only)
//!     │
//!     └──> SearchIndex (ad hoc, independent of filters)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use taxon_engine::{Engine, EngineConfig};
//! use taxon_query::Filter;
//! use taxon_value::Collection;
//!
//! let collection = Collection::from_json(json!([
//!     {"species": "a", "habitat": {"type": "forest"}},
//!     {"species": "b", "habitat": {"type": "desert"}},
//!     {"species": "c"},
//! ]))
//! .unwrap();
//!
//! let mut engine = Engine::load(collection, EngineConfig::default()).unwrap();
//! engine.add_filter(Filter::equals("habitat.type", "forest")).unwrap();
//! assert_eq!(engine.filtered_ids(), &[0]);
//! ```

mod config;
mod engine;
mod error;
pub mod logging;

pub use config::{CompletenessDefaults, EngineConfig, SearchDefaults};
pub use engine::Engine;
pub use error::{EngineError, Result};
