//! # Taxon Query
//!
//! Record selection over an immutable collection.
//!
//! - **Filters** - an ordered list of `PathExists` / `PathEqualsValue`
//!   predicates combined with AND; numeric fields match string filter values
//!   and list fields match when any element does.
//! - **Search** - case-insensitive substring search over keys and string
//!   values, independent of the filters.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use taxon_query::{Filter, FilterSet};
//! use taxon_value::Collection;
//!
//! let collection = Collection::from_json(json!([
//!     {"species": "a", "elevation": 100},
//!     {"species": "b", "elevation": 250},
//! ]))
//! .unwrap();
//!
//! let mut filters = FilterSet::new();
//! filters.add(Filter::equals("elevation", "100"));
//! assert_eq!(filters.apply(&collection), vec![0]);
//! ```

mod compare;
mod error;
mod filter;
mod search;

pub use compare::{scalar_equals, value_matches};
pub use error::{QueryError, Result};
pub use filter::{apply, evaluate, Filter, FilterMode, FilterSet, FilterUpdate};
pub use search::{MatchedText, SearchHit, SearchIndex, SearchOptions, SearchResults};
