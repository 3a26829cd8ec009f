//! Rendered resource documents supplied by the caller.
//!
//! Rendering is out of scope for this crate: the caller hands over an
//! already-rendered JSON:API primary resource together with the related
//! resources its renderer supports. The set of renderable relationship
//! names is the allowed-include set; checkout rejects any requested name
//! outside it.

use crate::error::{LicenseFileError, LicenseFileResult};
use serde_json::Value;

/// A rendered JSON:API resource document.
///
/// `data` is the primary resource representation. Relationships are kept
/// in render order; [`CheckoutRequest::include`] selects a subset of them
/// for the envelope's `included` list, preserving the request order.
///
/// [`CheckoutRequest::include`]: crate::CheckoutRequest::include
#[derive(Debug, Clone)]
pub struct ResourceDocument {
    data: Value,
    relationships: Vec<(String, Value)>,
}

impl ResourceDocument {
    /// Creates a document from a rendered primary resource.
    pub fn new(data: Value) -> Self {
        Self {
            data,
            relationships: Vec::new(),
        }
    }

    /// Adds a renderable relationship, e.g. `"product"` or `"policy"`.
    #[must_use]
    pub fn with_relationship(mut self, name: impl Into<String>, resource: Value) -> Self {
        self.relationships.push((name.into(), resource));
        self
    }

    /// Returns the primary resource representation.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the names of relationships this document can include.
    pub fn relationship_names(&self) -> impl Iterator<Item = &str> {
        self.relationships.iter().map(|(name, _)| name.as_str())
    }

    /// Selects the related resources for the requested include names, in
    /// request order.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseFileError::InvalidInclude`] if any requested name
    /// is not a renderable relationship of this document.
    pub(crate) fn select_included(&self, include: &[String]) -> LicenseFileResult<Vec<Value>> {
        include
            .iter()
            .map(|name| {
                self.relationships
                    .iter()
                    .find(|(candidate, _)| candidate == name)
                    .map(|(_, resource)| resource.clone())
                    .ok_or_else(|| LicenseFileError::InvalidInclude(name.clone()))
            })
            .collect()
    }

    /// Consumes the document, returning the primary resource.
    pub(crate) fn into_data(self) -> Value {
        self.data
    }
}
