use serde::{Deserialize, Serialize};
use taxon_value::{path, Collection, Value};

use crate::error::{GalleryError, Result};
use crate::gallery::{Gallery, Image};

/// Path reported for an image found on the record root
pub const ROOT_PATH: &str = "root";

/// Keys that mark an object as an image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageKeys {
    /// Key holding the image URL
    pub url_key: String,

    /// Sibling key holding the optional caption
    pub legend_key: String,
}

impl Default for ImageKeys {
    fn default() -> Self {
        Self {
            url_key: "imageUrl".to_string(),
            legend_key: "imageUrlLegend".to_string(),
        }
    }
}

impl ImageKeys {
    pub fn validate(&self) -> Result<()> {
        if self.url_key.is_empty() {
            return Err(GalleryError::invalid_config("url_key must not be empty"));
        }
        if self.legend_key.is_empty() {
            return Err(GalleryError::invalid_config("legend_key must not be empty"));
        }
        if self.url_key == self.legend_key {
            return Err(GalleryError::invalid_config(format!(
                "url_key and legend_key are both '{}'",
                self.url_key
            )));
        }
        Ok(())
    }
}

/// An image reference found inside one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub path: String,
    pub url: String,
    pub legend: Option<String>,
}

/// Finds embedded image references in records
pub struct ImageProjector {
    keys: ImageKeys,
    max_depth: usize,
    label_key: Option<String>,
}

impl ImageProjector {
    pub fn new(keys: ImageKeys, max_depth: usize) -> Result<Self> {
        keys.validate()?;
        Ok(Self {
            keys,
            max_depth,
            label_key: None,
        })
    }

    /// Builder: tag gallery images with a label read from a top-level key
    #[must_use]
    pub fn with_label_key(mut self, key: Option<String>) -> Self {
        self.label_key = key;
        self
    }

    /// All image references in a record, in document order.
    ///
    /// An object whose URL key holds a non-empty string yields one image at
    /// the object's path; its URL and caption keys are not walked further,
    /// every other key is.
    pub fn extract(&self, record: &Value) -> Result<Vec<ImageRef>> {
        let mut out = Vec::new();
        self.visit(record, "", 0, &mut out)?;
        Ok(out)
    }

    /// Single extraction pass over the whole collection.
    ///
    /// Images keep record order; filtering later works on owner ids only.
    pub fn project(&self, collection: &Collection) -> Result<Gallery> {
        let mut images = Vec::new();
        for (id, record) in collection.iter() {
            let label = self
                .label_key
                .as_deref()
                .and_then(|key| collection.label(id, key));
            let found = self.extract(record).inspect_err(|e| {
                log::warn!("Image extraction failed for record {id}: {e}");
            })?;
            images.extend(found.into_iter().map(|image| Image {
                path: image.path,
                url: image.url,
                legend: image.legend,
                owner: id,
                label: label.clone(),
            }));
        }

        log::debug!(
            "Extracted {} images from {} records",
            images.len(),
            collection.len()
        );
        Ok(Gallery::new(images))
    }

    fn visit(&self, value: &Value, at: &str, depth: usize, out: &mut Vec<ImageRef>) -> Result<()> {
        if depth > self.max_depth {
            return Err(GalleryError::DepthExceeded {
                limit: self.max_depth,
                path: at.to_string(),
            });
        }

        match value {
            Value::Object(map) => {
                let url = map
                    .get(&self.keys.url_key)
                    .and_then(Value::as_str)
                    .filter(|url| !url.trim().is_empty());

                if let Some(url) = url {
                    let legend = map
                        .get(&self.keys.legend_key)
                        .and_then(Value::as_str)
                        .filter(|legend| !legend.trim().is_empty())
                        .map(str::to_string);
                    out.push(ImageRef {
                        path: display_path(at),
                        url: url.to_string(),
                        legend,
                    });
                }

                for (key, child) in map {
                    let image_key = *key == self.keys.url_key || *key == self.keys.legend_key;
                    if url.is_some() && image_key {
                        continue;
                    }
                    self.descend(child, &path::join_key(at, key), depth, out)?;
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.descend(item, &path::join_index(at, i), depth, out)?;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
        Ok(())
    }

    fn descend(
        &self,
        child: &Value,
        at: &str,
        depth: usize,
        out: &mut Vec<ImageRef>,
    ) -> Result<()> {
        match child {
            Value::Object(_) | Value::Array(_) => self.visit(child, at, depth + 1, out),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
        }
    }
}

fn display_path(at: &str) -> String {
    if at.is_empty() {
        ROOT_PATH.to_string()
    } else {
        at.to_string()
    }
}
