//! Resource naming: the single user-supplied token and every identifier
//! derived from it.
//!
//! | Identifier    | `product`  | `bus`  | `orderItem`  |
//! |---------------|------------|--------|--------------|
//! | name          | product    | bus    | orderItem    |
//! | class         | Product    | Bus    | OrderItem    |
//! | plural        | products   | bus    | orderItems   |
//! | table         | products   | bus    | orderitems   |
//! | class plural  | Products   | Bus    | OrderItems   |
//!
//! Pluralisation is deliberately naive: a trailing `s` is the only rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Append `s` unless `name` already ends with an ASCII `s`.
///
/// Case-sensitive: `"BUS"` becomes `"BUSs"`.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        name.to_string()
    } else {
        format!("{name}s")
    }
}

/// Uppercase the first character and leave the rest untouched.
pub fn classify(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A validated resource name such as `product`.
///
/// Validation happens at the boundary so every later interpolation is safe:
/// the name is ASCII, starts with a letter and contains only letters,
/// digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceName(String);

impl ResourceName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let reject = |reason: &str| DomainError::InvalidResourceName {
            name: raw.clone(),
            reason: reason.into(),
        };

        let Some(first) = raw.chars().next() else {
            return Err(reject("name cannot be empty"));
        };
        if !first.is_ascii_alphabetic() {
            return Err(reject("name must start with an ASCII letter"));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(reject(&format!("character '{bad}' is not allowed")));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive every identifier the templates need.
    pub fn derive(&self) -> ResourceNames {
        ResourceNames::derive(self)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ResourceName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ResourceName> for String {
    fn from(value: ResourceName) -> Self {
        value.0
    }
}

impl std::str::FromStr for ResourceName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// All identifiers derived from one [`ResourceName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub name: String,
    pub class_name: String,
    pub plural_name: String,
    pub table_name: String,
    pub class_plural: String,
}

impl ResourceNames {
    pub fn derive(resource: &ResourceName) -> Self {
        let name = resource.as_str();
        let class_name = classify(name);
        Self {
            name: name.to_string(),
            plural_name: pluralize(name),
            table_name: pluralize(&name.to_ascii_lowercase()),
            class_plural: pluralize(&class_name),
            class_name,
        }
    }

    pub fn model_file(&self) -> String {
        format!("{}Model", self.name)
    }

    pub fn controller_file(&self) -> String {
        format!("{}Controller", self.name)
    }

    pub fn routes_file(&self) -> String {
        format!("{}Routes", self.name)
    }
}
