//! Static exhibit catalog
//!
//! Maps exhibit identifiers to the media shown for them. The catalog is built
//! once at startup, either from the built-in table or from a JSON file, and is
//! read-only afterwards so it can be shared freely behind an `Arc`.

mod language;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use language::LanguageTag;

const MAX_EXHIBIT_ID_LEN: usize = 64;

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid exhibit id '{id}': {reason}")]
    InvalidExhibitId { id: String, reason: &'static str },

    #[error("Malformed catalog: {reason}")]
    Malformed { reason: String },

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable identifier of one physical exhibit.
///
/// Never contains `-`, which separates the language suffix in route
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExhibitId(String);

impl ExhibitId {
    /// Validates and wraps an exhibit identifier.
    ///
    /// # Errors
    /// - `CatalogError::InvalidExhibitId` - Empty, too long, or contains characters other than ASCII alphanumerics and `_`
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let reason = if raw.is_empty() {
            Some("must not be empty")
        } else if raw.len() > MAX_EXHIBIT_ID_LEN {
            Some("must be at most 64 characters")
        } else if raw.contains('-') {
            Some("must not contain '-'")
        } else if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Some("only letters, digits and '_' are allowed")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CatalogError::InvalidExhibitId {
                id: raw.to_string(),
                reason,
            }),
            None => Ok(Self(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ExhibitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExhibitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque token handed to the video host's embed endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaReferenceId(String);

impl MediaReferenceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank references count as missing media.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for MediaReferenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Media and display metadata for one exhibit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaDescriptor {
    pub default_media_ref: MediaReferenceId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub by_language: BTreeMap<LanguageTag, MediaReferenceId>,
}

impl MediaDescriptor {
    pub fn new(default_media_ref: impl Into<String>) -> Self {
        Self {
            default_media_ref: MediaReferenceId::new(default_media_ref),
            title: None,
            description: None,
            by_language: BTreeMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_language(mut self, tag: LanguageTag, media_ref: impl Into<String>) -> Self {
        self.by_language.insert(tag, MediaReferenceId::new(media_ref));
        self
    }

    /// Non-empty reference for `tag`, if one is configured.
    pub fn language_media(&self, tag: LanguageTag) -> Option<&MediaReferenceId> {
        self.by_language.get(&tag).filter(|media| !media.is_empty())
    }
}

/// Entry as it appears in a catalog JSON file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFileEntry {
    #[serde(default)]
    youtube_id: String,
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    languages: HashMap<String, String>,
}

/// Read-only mapping from exhibit id to media descriptor.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<ExhibitId, MediaDescriptor>,
}

impl Catalog {
    /// Builds a catalog from already validated entries.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ExhibitId, MediaDescriptor)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The exhibits shipped with the guide.
    pub fn builtin() -> Self {
        let entries = [
            (
                "sample",
                MediaDescriptor::new("dQw4w9WgXcQ")
                    .with_title("The Grand Hall")
                    .with_description("Discover the ornate details of the main reception hall"),
            ),
            (
                "dining",
                MediaDescriptor::new("wuQEFQ7oZzk")
                    .with_title("The Dining Chamber")
                    .with_description(
                        "Where elegant feasts were once served to distinguished guests",
                    ),
            ),
            (
                "garden",
                MediaDescriptor::new("FtutLA63Cp8")
                    .with_title("The Palace Gardens")
                    .with_description("Explore the beautiful gardens surrounding the palace"),
            ),
            (
                "library",
                MediaDescriptor::new("QH2-TGUlwu4")
                    .with_title("The Ancient Library")
                    .with_description(
                        "Home to thousands of rare manuscripts and historical documents",
                    ),
            ),
            (
                "exhibit01",
                MediaDescriptor::new("M7lc1UVf-VE")
                    .with_title("The Courtyard Fountain")
                    .with_description("The marble fountain at the heart of the palace")
                    .with_language(LanguageTag::En, "M7lc1UVf-VE")
                    .with_language(LanguageTag::Fr, "UnSwaiO-w3I"),
            ),
        ];

        Self::from_entries(entries.into_iter().filter_map(|(id, descriptor)| {
            ExhibitId::parse(id).ok().map(|id| (id, descriptor))
        }))
    }

    /// Parses a catalog from JSON text.
    ///
    /// Language keys outside the supported set are skipped with a warning.
    ///
    /// # Errors
    /// - `CatalogError::Malformed` - Text is not a JSON object of catalog entries
    /// - `CatalogError::InvalidExhibitId` - A key is not a valid exhibit id
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, CatalogFileEntry> =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed {
                reason: e.to_string(),
            })?;

        let mut entries = BTreeMap::new();
        for (id, entry) in raw {
            let exhibit_id = ExhibitId::parse(&id)?;

            let mut by_language = BTreeMap::new();
            for (code, media_ref) in entry.languages {
                match LanguageTag::from_code(&code) {
                    Some(tag) => {
                        by_language.insert(tag, MediaReferenceId::new(media_ref));
                    }
                    None => {
                        tracing::warn!(exhibit = %exhibit_id, language = %code, "Skipping unsupported catalog language");
                    }
                }
            }

            entries.insert(
                exhibit_id,
                MediaDescriptor {
                    default_media_ref: MediaReferenceId::new(entry.youtube_id),
                    title: entry.title,
                    description: entry.description,
                    by_language,
                },
            );
        }

        Ok(Self { entries })
    }

    /// Loads a catalog JSON file.
    ///
    /// # Errors
    /// - `CatalogError::Io` - File could not be read
    /// - `CatalogError::Malformed` / `CatalogError::InvalidExhibitId` - See [`Catalog::from_json_str`]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            "Loaded {} exhibits from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Looks up an exhibit by its raw id without validating it first.
    pub fn get(&self, exhibit_id: &str) -> Option<(&ExhibitId, &MediaDescriptor)> {
        self.entries.get_key_value(exhibit_id)
    }

    /// Iterates exhibits in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ExhibitId, &MediaDescriptor)> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ExhibitId> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_exhibit_id_validation() {
        assert!(ExhibitId::parse("exhibit01").is_ok());
        assert!(ExhibitId::parse("grand_hall").is_ok());
        assert!(ExhibitId::parse("").is_err());
        assert!(ExhibitId::parse("grand-hall").is_err());
        assert!(ExhibitId::parse("hall 2").is_err());
        assert!(ExhibitId::parse(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);

        let (_, garden) = catalog.get("garden").unwrap();
        assert_eq!(garden.default_media_ref.as_str(), "FtutLA63Cp8");
        assert_eq!(garden.title.as_deref(), Some("The Palace Gardens"));

        let (_, exhibit) = catalog.get("exhibit01").unwrap();
        assert_eq!(
            exhibit.language_media(LanguageTag::Fr).map(|m| m.as_str()),
            Some("UnSwaiO-w3I")
        );
        assert_eq!(exhibit.language_media(LanguageTag::Ar), None);
    }

    #[test]
    fn test_iteration_is_sorted_by_id() {
        let ids: Vec<_> = Catalog::builtin().ids().map(|id| id.to_string()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_from_json_skips_unknown_languages() {
        let json = r#"{
            "hall": {
                "youtubeId": "abc",
                "title": "Hall",
                "languages": { "fr": "def", "de": "ghi", "ar": "" }
            },
            "empty": {}
        }"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        let (_, hall) = catalog.get("hall").unwrap();
        assert_eq!(hall.by_language.len(), 2);
        assert_eq!(hall.language_media(LanguageTag::Fr).unwrap().as_str(), "def");
        assert_eq!(hall.language_media(LanguageTag::Ar), None);

        let (_, empty) = catalog.get("empty").unwrap();
        assert!(empty.default_media_ref.is_empty());
        assert!(empty.title.is_none());
    }

    #[test]
    fn test_from_json_rejects_invalid_ids() {
        let err = Catalog::from_json_str(r#"{ "grand-hall": { "youtubeId": "x" } }"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidExhibitId { .. }));

        let err = Catalog::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "crypt": {{ "youtubeId": "zzz", "title": "The Crypt" }} }}"#).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("crypt").is_some());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
