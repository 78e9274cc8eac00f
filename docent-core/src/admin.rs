//! Exhibit registration and QR link export for administrators
//!
//! Produces the shareable `{base}/v/{exhibit}` URLs that the printing and
//! archiving tools turn into QR codes. Rendering those images is not done
//! here.

use serde::Serialize;
use url::Url;

use crate::catalog::{Catalog, CatalogError, ExhibitId};

/// Errors from editing an admin workspace.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AdminError {
    #[error("Invalid exhibit id '{id}': {reason}")]
    InvalidExhibitId { id: String, reason: &'static str },

    #[error("Exhibit '{id}' is already registered")]
    DuplicateExhibit { id: String },

    #[error("Exhibit '{id}' is not registered")]
    UnknownExhibit { id: String },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: &'static str },

    #[error("Add at least one exhibit before generating links")]
    NoExhibits,
}

/// Absolute http(s) URL that QR links are built on. Never ends in `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Validates and normalizes a base URL.
    ///
    /// # Errors
    /// - `AdminError::InvalidBaseUrl` - Not an absolute http or https URL, or carries a query or fragment
    pub fn parse(raw: &str) -> Result<Self, AdminError> {
        let trimmed = raw.trim();
        let invalid = |reason| AdminError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason,
        };

        let url = Url::parse(trimmed).map_err(|_| invalid("not an absolute URL"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed"));
        }

        Ok(Self(url.as_str().trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scheme, host and port only, as sent in the embed `origin` parameter.
    pub fn origin(&self) -> String {
        Url::parse(&self.0)
            .map(|url| url.origin().ascii_serialization())
            .unwrap_or_else(|_| self.0.clone())
    }

    /// Viewer URL for one exhibit.
    pub fn exhibit_url(&self, exhibit_id: &ExhibitId) -> String {
        format!("{}/v/{}", self.0, exhibit_id)
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data encoded into one QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrLink {
    pub exhibit_id: String,
    pub title: String,
    pub url: String,
}

impl QrLink {
    fn new(exhibit_id: &ExhibitId, catalog: &Catalog, base: &BaseUrl) -> Self {
        let title = catalog
            .get(exhibit_id.as_str())
            .and_then(|(_, descriptor)| descriptor.title.clone())
            .unwrap_or_else(|| format!("Exhibit: {exhibit_id}"));

        Self {
            exhibit_id: exhibit_id.to_string(),
            title,
            url: base.exhibit_url(exhibit_id),
        }
    }
}

/// Links for every exhibit in the catalog, in id order.
pub fn catalog_links(catalog: &Catalog, base: &BaseUrl) -> Vec<QrLink> {
    catalog
        .ids()
        .map(|id| QrLink::new(id, catalog, base))
        .collect()
}

/// One administrator's list of exhibits to print plus their base URL.
///
/// Ids need not exist in the catalog; a QR code may be printed before its
/// video is configured.
#[derive(Debug, Clone)]
pub struct AdminWorkspace {
    exhibits: Vec<ExhibitId>,
    base_url: BaseUrl,
}

impl AdminWorkspace {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            exhibits: Vec::new(),
            base_url,
        }
    }

    pub fn exhibits(&self) -> &[ExhibitId] {
        &self.exhibits
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Registers an exhibit id, keeping insertion order.
    ///
    /// # Errors
    /// - `AdminError::InvalidExhibitId` - Id fails exhibit id validation
    /// - `AdminError::DuplicateExhibit` - Id already registered
    pub fn add_exhibit(&mut self, raw: &str) -> Result<&ExhibitId, AdminError> {
        let raw = raw.trim();
        let exhibit_id = ExhibitId::parse(raw).map_err(|e| match e {
            CatalogError::InvalidExhibitId { id, reason } => {
                AdminError::InvalidExhibitId { id, reason }
            }
            _ => AdminError::InvalidExhibitId {
                id: raw.to_string(),
                reason: "invalid",
            },
        })?;

        if self.exhibits.contains(&exhibit_id) {
            return Err(AdminError::DuplicateExhibit {
                id: exhibit_id.to_string(),
            });
        }

        self.exhibits.push(exhibit_id);
        Ok(&self.exhibits[self.exhibits.len() - 1])
    }

    /// Removes a registered exhibit.
    ///
    /// # Errors
    /// - `AdminError::UnknownExhibit` - Id is not registered
    pub fn remove_exhibit(&mut self, id: &str) -> Result<ExhibitId, AdminError> {
        let index = self
            .exhibits
            .iter()
            .position(|exhibit| exhibit.as_str() == id)
            .ok_or_else(|| AdminError::UnknownExhibit { id: id.to_string() })?;

        Ok(self.exhibits.remove(index))
    }

    /// Replaces the base URL.
    ///
    /// # Errors
    /// - `AdminError::InvalidBaseUrl` - See [`BaseUrl::parse`]
    pub fn set_base_url(&mut self, raw: &str) -> Result<&BaseUrl, AdminError> {
        self.base_url = BaseUrl::parse(raw)?;
        Ok(&self.base_url)
    }

    /// Generates one link per registered exhibit.
    ///
    /// # Errors
    /// - `AdminError::NoExhibits` - Nothing registered yet
    pub fn generate_links(&self, catalog: &Catalog) -> Result<Vec<QrLink>, AdminError> {
        if self.exhibits.is_empty() {
            return Err(AdminError::NoExhibits);
        }

        let links: Vec<QrLink> = self
            .exhibits
            .iter()
            .map(|id| QrLink::new(id, catalog, &self.base_url))
            .collect();
        tracing::info!(
            "Generated {} QR links using base URL {}",
            links.len(),
            self.base_url
        );
        Ok(links)
    }
}
