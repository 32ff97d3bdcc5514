//! # Taxon Gallery
//!
//! Image galleries that stay consistent with the filtered record view.
//!
//! ```text
//! Collection
//!     │
//!     └──> ImageProjector::project (one full pass at load time)
//!            └─> Gallery (images tagged with owner record ids)
//!                   │
//!     filtered ids ─┴──> Gallery::filter (membership test, no re-walk)
//!                          └─> GalleryView
//! ```

mod error;
mod extract;
mod gallery;

pub use error::{GalleryError, Result};
pub use extract::{ImageKeys, ImageProjector, ImageRef, ROOT_PATH};
pub use gallery::{filter_images, Gallery, GalleryView, Image};
