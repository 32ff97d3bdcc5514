use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use taxon_value::RecordId;

/// An image reference tagged with the record it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub path: String,
    pub url: String,
    pub legend: Option<String>,
    pub owner: RecordId,
    pub label: Option<String>,
}

/// Every image of a collection, extracted once, in record order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallery {
    images: Vec<Image>,
}

impl Gallery {
    #[must_use]
    pub fn new(images: Vec<Image>) -> Self {
        Self { images }
    }

    #[must_use]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Images owned by records in `ids`, in gallery order.
    ///
    /// Membership test only; record trees are not walked again.
    #[must_use]
    pub fn filter(&self, ids: &HashSet<RecordId>) -> GalleryView<'_> {
        GalleryView {
            images: self
                .images
                .iter()
                .filter(|image| ids.contains(&image.owner))
                .collect(),
        }
    }

    /// Images of a single record
    #[must_use]
    pub fn for_record(&self, id: RecordId) -> GalleryView<'_> {
        GalleryView {
            images: self.images.iter().filter(|image| image.owner == id).collect(),
        }
    }

    /// Unfiltered view over the whole gallery
    #[must_use]
    pub fn view(&self) -> GalleryView<'_> {
        GalleryView {
            images: self.images.iter().collect(),
        }
    }
}

/// Filter a gallery by owner membership
#[must_use]
pub fn filter_images<'a>(gallery: &'a Gallery, ids: &HashSet<RecordId>) -> GalleryView<'a> {
    gallery.filter(ids)
}

/// A borrowed, ordered subsequence of a gallery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GalleryView<'a> {
    images: Vec<&'a Image>,
}

impl<'a> GalleryView<'a> {
    #[must_use]
    pub fn images(&self) -> &[&'a Image] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a Image> {
        self.images.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Image> + '_ {
        self.images.iter().copied()
    }

    /// Position after `current`, wrapping to the first image
    #[must_use]
    pub fn next_index(&self, current: usize) -> Option<usize> {
        match self.images.len() {
            0 => None,
            len if current + 1 >= len => Some(0),
            _ => Some(current + 1),
        }
    }

    /// Position before `current`, wrapping to the last image
    #[must_use]
    pub fn prev_index(&self, current: usize) -> Option<usize> {
        match self.images.len() {
            0 => None,
            len if current == 0 || current >= len => Some(len - 1),
            _ => Some(current - 1),
        }
    }
}
