//! Resort catalog and per-resort metadata records
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when the resort catalog cannot be used.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("resort catalog is empty")]
    Empty,
    #[error("catalog parse error: {0}")]
    Parse(String),
}

/// A single resort identity. The slug doubles as the asset folder name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resort {
    pub slug: String,
}

/// Ordered, immutable list of every resort in the game.
///
/// Loaded once at startup; the order is part of the daily-rotation contract
/// and must not change between releases without accepting a rotation reshuffle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortCatalog {
    resorts: Vec<Resort>,
}

impl ResortCatalog {
    /// Build a catalog from an ordered list of resorts.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] when the list has no entries; nothing
    /// downstream (daily selection, shuffling) can proceed without resorts.
    pub fn new(resorts: Vec<Resort>) -> Result<Self, CatalogError> {
        if resorts.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { resorts })
    }

    /// Load the catalog from its JSON index document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the catalog is empty.
    pub fn from_json(json_str: &str) -> Result<Self, CatalogError> {
        #[derive(Deserialize)]
        struct Index {
            resorts: Vec<Resort>,
        }
        let index: Index =
            serde_json::from_str(json_str).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(index.resorts)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resorts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resorts.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Resort> {
        self.resorts.get(index)
    }

    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.resorts.iter().any(|r| r.slug == slug)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resort> {
        self.resorts.iter()
    }

    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        self.resorts.iter().map(|r| r.slug.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ResortCatalog {
    type Item = &'a Resort;
    type IntoIter = std::slice::Iter<'a, Resort>;

    fn into_iter(self) -> Self::IntoIter {
        self.resorts.iter()
    }
}

/// Descriptive record for one resort.
///
/// Every field beyond the display name is optional: comparisons against an
/// absent field produce an Unknown verdict rather than a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortMetadata {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub parent_company: Option<String>,
    #[serde(default)]
    pub skiable_acreage: Option<f64>,
    #[serde(default)]
    pub lifts: Option<u32>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Marked bounding boxes on the trail map. Carried for the renderer;
    /// never consulted by scoring.
    #[serde(default)]
    pub boxes: Vec<Vec<f64>>,
}

impl ResortMetadata {
    /// Parse a single resort's metadata document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the document is malformed.
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Both coordinates present, as a (latitude, longitude) pair.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// URL of the full (unredacted) trail map image for a resort.
#[must_use]
pub fn full_map_url(slug: &str) -> String {
    format!("/ski-images/{slug}/ski_map_original.png")
}

/// URL of the redacted trail map image shown while the puzzle is unsolved.
#[must_use]
pub fn redacted_map_url(slug: &str) -> String {
    format!("/ski-images/{slug}/ski_map_redacted.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_is_fatal() {
        assert_eq!(ResortCatalog::new(Vec::new()), Err(CatalogError::Empty));
        assert!(matches!(
            ResortCatalog::from_json(r#"{"resorts": []}"#),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn catalog_preserves_order() {
        let catalog = ResortCatalog::from_json(
            r#"{"resorts": [{"slug": "alta"}, {"slug": "brighton"}, {"slug": "snowbird"}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(1).unwrap().slug, "brighton");
        assert!(catalog.contains("snowbird"));
        assert!(!catalog.contains("vail"));
    }

    #[test]
    fn metadata_tolerates_sparse_documents() {
        let meta = ResortMetadata::from_json(r#"{"name": "Alta"}"#).unwrap();
        assert_eq!(meta.name, "Alta");
        assert!(meta.country.is_none());
        assert!(meta.lifts.is_none());
        assert!(meta.coordinates().is_none());
        assert!(meta.boxes.is_empty());
    }

    #[test]
    fn metadata_reads_full_documents() {
        let meta = ResortMetadata::from_json(
            r#"{
                "name": "Alta",
                "country": "United States",
                "region": "Utah",
                "continent": "North America",
                "parent_company": "Independent",
                "skiable_acreage": 2614.0,
                "lifts": 6,
                "latitude": 40.5883,
                "longitude": -111.6358,
                "boxes": [[10.0, 20.0, 30.0, 40.0]]
            }"#,
        )
        .unwrap();
        assert_eq!(meta.coordinates(), Some((40.5883, -111.6358)));
        assert_eq!(meta.lifts, Some(6));
        assert_eq!(meta.boxes.len(), 1);
    }

    #[test]
    fn image_urls_template_the_slug() {
        assert_eq!(full_map_url("alta"), "/ski-images/alta/ski_map_original.png");
        assert_eq!(
            redacted_map_url("alta"),
            "/ski-images/alta/ski_map_redacted.png"
        );
    }
}
