//! Route identifier resolution
//!
//! Turns the identifier from `/v/{route}` into the exhibit and the concrete
//! media reference to embed. Unknown or unconfigured language suffixes fall
//! back to the exhibit's default media instead of failing.

use serde::Serialize;
use thiserror::Error;

use crate::ErrorKind;
use crate::catalog::{Catalog, ExhibitId, LanguageTag, MediaDescriptor, MediaReferenceId};

/// Resolution failures. Both are terminal for a player instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Exhibit '{exhibit_id}' not found")]
    NotFound { exhibit_id: String },

    #[error("Exhibit '{exhibit_id}' has no playable media")]
    MediaUnavailable { exhibit_id: String },
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::NotFound { .. } => ErrorKind::NotFound,
            ResolveError::MediaUnavailable { .. } => ErrorKind::MediaUnavailable,
        }
    }
}

/// A route identifier split into its exhibit and optional suffix parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteIdentifier<'a> {
    pub exhibit: &'a str,
    pub suffix: Option<&'a str>,
}

impl<'a> RouteIdentifier<'a> {
    /// Splits on the first `-`. Later dashes stay in the suffix.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('-') {
            Some((exhibit, suffix)) => Self {
                exhibit,
                suffix: Some(suffix),
            },
            None => Self {
                exhibit: raw,
                suffix: None,
            },
        }
    }
}

/// Successful resolution of a route identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub exhibit_id: ExhibitId,
    /// Recognized language from the suffix, if any
    pub language_tag: Option<LanguageTag>,
    /// Raw suffix as it appeared in the route
    pub requested_suffix: Option<String>,
    pub descriptor: MediaDescriptor,
    pub media_ref: MediaReferenceId,
}

impl Resolution {
    /// True only when the route carried no suffix at all. An unrecognized
    /// suffix plays the default media instead.
    pub fn needs_language_selection(&self) -> bool {
        self.requested_suffix.is_none()
    }

    /// Display title, falling back to the exhibit id.
    pub fn title(&self) -> &str {
        self.descriptor
            .title
            .as_deref()
            .unwrap_or(self.exhibit_id.as_str())
    }
}

/// Resolves `route` against `catalog`.
///
/// # Errors
/// - `ResolveError::NotFound` - The exhibit part is not in the catalog
/// - `ResolveError::MediaUnavailable` - The exhibit exists but no non-empty reference remains after fallback
pub fn resolve(route: &str, catalog: &Catalog) -> Result<Resolution, ResolveError> {
    let route = RouteIdentifier::parse(route);

    let (exhibit_id, descriptor) = catalog
        .get(route.exhibit)
        .ok_or_else(|| ResolveError::NotFound {
            exhibit_id: route.exhibit.to_string(),
        })?;

    let language_tag = route.suffix.and_then(LanguageTag::from_code);

    let media_ref = language_tag
        .and_then(|tag| descriptor.language_media(tag))
        .unwrap_or(&descriptor.default_media_ref);

    if media_ref.is_empty() {
        return Err(ResolveError::MediaUnavailable {
            exhibit_id: exhibit_id.to_string(),
        });
    }

    if route.suffix.is_some() && language_tag.is_none() {
        tracing::debug!(
            exhibit = %exhibit_id,
            suffix = ?route.suffix,
            "Unrecognized language suffix, using default media"
        );
    }

    Ok(Resolution {
        exhibit_id: exhibit_id.clone(),
        language_tag,
        requested_suffix: route.suffix.map(str::to_string),
        descriptor: descriptor.clone(),
        media_ref: media_ref.clone(),
    })
}
