//! XML name datatypes: NCName, ID and QName
//!
//! Names are matched against the character classes in [`crate::chars`]; the
//! NCName regex is generated from those tables so both stay in sync.

use crate::chars;
use crate::datatypes::{AnyUri, Datatype};
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

static NCNAME: Lazy<Regex> = Lazy::new(|| Regex::new(&chars::ncname_pattern()).unwrap());

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

/// A non-colonized XML name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NCName(String);

impl Datatype for NCName {
    const VALIDATOR_NAME: &'static str = "NCNameType";
}

impl NCName {
    /// Validate `value` as an NCName
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if is_valid_ncname(&value) {
            Ok(Self(value))
        } else {
            Err(Self::invalid(value))
        }
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the name, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NCName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NCName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for NCName {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// An `xs:ID` value: NCName grammar, distinct identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Datatype for Id {
    const VALIDATOR_NAME: &'static str = "IDType";
}

impl Id {
    /// Validate `value` as an ID
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if is_valid_ncname(&value) {
            Ok(Self(value))
        } else {
            Err(Self::invalid(value))
        }
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Qualified name: a validated local part plus an optional resolved namespace
///
/// Splitting `prefix:local` text and resolving the prefix is the job of
/// [`crate::namespaces::NamespaceContext`]; a `QName` only holds the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QName {
    local_part: NCName,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<AnyUri>,
}

impl Datatype for QName {
    const VALIDATOR_NAME: &'static str = "QNameType";
}

impl QName {
    /// Create a QName from an already validated local part
    pub fn new(local_part: NCName, namespace: Option<AnyUri>) -> Self {
        Self {
            local_part,
            namespace,
        }
    }

    /// Validate `local_part` as an NCName and build the QName
    pub fn from_parts(local_part: &str, namespace: Option<AnyUri>) -> Result<Self> {
        Ok(Self::new(NCName::new(local_part)?, namespace))
    }

    /// The local part
    pub fn local_part(&self) -> &NCName {
        &self.local_part
    }

    /// The namespace, if any
    pub fn namespace(&self) -> Option<&AnyUri> {
        self.namespace.as_ref()
    }

    /// Whether a namespace is attached
    pub fn has_namespace(&self) -> bool {
        self.namespace.is_some()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_part),
            None => write!(f, "{}", self.local_part),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ncnames() {
        for name in ["_foo", "A", "foo.bar-baz_qux", "élan", "x\u{0301}", "a\u{00B7}b", "\u{4E00}"] {
            let ncname = NCName::new(name).unwrap();
            assert_eq!(ncname.as_str(), name);
        }
    }

    #[test]
    fn test_invalid_ncnames() {
        for name in ["", "1abc", "-abc", ".abc", "a:b", "a b", "αβ", "foo\u{0346}"] {
            assert!(NCName::new(name).is_err(), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_ncname_error_message() {
        let err = NCName::new("1abc").unwrap_err();
        assert_eq!(err.to_string(), "\"1abc\" is an invalid NCName.");
    }

    #[test]
    fn test_id() {
        assert_eq!(Id::new("id-1").unwrap().as_str(), "id-1");
        let err = Id::new("1id").unwrap_err();
        assert_eq!(err.to_string(), "\"1id\" is an invalid ID.");
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("element"), (None, "element"));
        assert_eq!(split_qname("xs:element"), (Some("xs"), "element"));
    }

    #[test]
    fn test_qname() {
        let qname = QName::from_parts("element", None).unwrap();
        assert!(!qname.has_namespace());
        assert_eq!(qname.to_string(), "element");

        let ns = AnyUri::new("http://www.w3.org/2001/XMLSchema").unwrap();
        let qname = QName::from_parts("element", Some(ns)).unwrap();
        assert!(qname.has_namespace());
        assert_eq!(qname.local_part().as_str(), "element");
        assert_eq!(
            qname.to_string(),
            "{http://www.w3.org/2001/XMLSchema}element"
        );
    }

    #[test]
    fn test_qname_rejects_bad_local_part() {
        let err = QName::from_parts("x:y", None).unwrap_err();
        assert_eq!(err.to_string(), "\"x:y\" is an invalid NCName.");
    }
}
