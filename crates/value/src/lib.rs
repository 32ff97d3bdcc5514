//! # Taxon Value
//!
//! The closed value model shared by every component of the engine.
//!
//! ```text
//! decoded JSON (serde_json::Value)
//!     │
//!     └──> Value (Null | Bool | Number | String | Array | Object)
//!            └─> Collection (ordered records, id = position)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use taxon_value::Collection;
//!
//! let collection = Collection::from_json(json!([
//!     {"species": "a", "habitat": {"type": "forest"}},
//! ]))
//! .unwrap();
//!
//! let record = collection.get(0).unwrap();
//! assert_eq!(record.resolve("habitat.type").len(), 1);
//! ```

mod collection;
mod error;
pub mod path;
mod value;

pub use collection::{Collection, RecordId};
pub use error::{Result, ValueError};
pub use value::{parse_finite_number, Map, Value, ValueKind};
