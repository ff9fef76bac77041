use serde::{Deserialize, Serialize};
use std::fmt;

/// A government department listed in the static directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
    /// Names of the services this department offers
    #[serde(default)]
    pub services: Vec<String>,
}

impl DepartmentRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            contact: contact.into(),
            services: Vec::new(),
        }
    }

    pub fn with_services(mut self, services: Vec<impl Into<String>>) -> Self {
        self.services = services.into_iter().map(|s| s.into()).collect();
        self
    }
}

/// A citizen service entry (helpline, portal link) from the static directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub action: ActionRef,
}

impl ServiceRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        action: ActionRef,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            action,
        }
    }
}

/// URI-like reference the UI opens when a service is selected.
///
/// Dial strings use the `tel:` scheme, e.g. `tel:1076`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionRef(String);

const TEL_SCHEME: &str = "tel:";

impl ActionRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Build a dial string for a phone number
    pub fn tel(number: impl AsRef<str>) -> Self {
        Self(format!("{}{}", TEL_SCHEME, number.as_ref().trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number to dial, if this reference is a non-empty dial string
    pub fn dial_number(&self) -> Option<&str> {
        let scheme = self.0.get(..TEL_SCHEME.len())?;
        if !scheme.eq_ignore_ascii_case(TEL_SCHEME) {
            return None;
        }
        let number = self.0[TEL_SCHEME.len()..].trim();
        (!number.is_empty()).then_some(number)
    }

    pub fn is_dial(&self) -> bool {
        self.dial_number().is_some()
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
