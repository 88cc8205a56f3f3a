//! Registry of the built-in XSD datatypes implemented by this crate
//!
//! Each entry pairs the type's `whiteSpace` facet with its validator, so a raw
//! attribute string can be normalized and validated in one call.

use crate::datatypes::{
    AnyUri, Language, NonNegativeInteger, PositiveInteger, StringType, TokenType, WhiteSpace,
};
use crate::error::Result;
use crate::names::{Id, NCName, QName};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// XSD anyURI type name
pub const XSD_ANY_URI: &str = "anyURI";
/// XSD NCName type name
pub const XSD_NCNAME: &str = "NCName";
/// XSD ID type name
pub const XSD_ID: &str = "ID";
/// XSD language type name
pub const XSD_LANGUAGE: &str = "language";
/// XSD nonNegativeInteger type name
pub const XSD_NON_NEGATIVE_INTEGER: &str = "nonNegativeInteger";
/// XSD positiveInteger type name
pub const XSD_POSITIVE_INTEGER: &str = "positiveInteger";
/// XSD string type name
pub const XSD_STRING: &str = "string";
/// XSD token type name
pub const XSD_TOKEN: &str = "token";
/// XSD QName type name (needs a namespace context, see [`crate::namespaces`])
pub const XSD_QNAME: &str = "QName";

/// A typed, validated XSD value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum XsdValue {
    /// `xs:anyURI`
    #[serde(rename = "anyURI")]
    AnyUri(AnyUri),
    /// `xs:NCName`
    #[serde(rename = "NCName")]
    NCName(NCName),
    /// `xs:ID`
    #[serde(rename = "ID")]
    Id(Id),
    /// `xs:QName`
    #[serde(rename = "QName")]
    QName(QName),
    /// `xs:language`
    #[serde(rename = "language")]
    Language(Language),
    /// `xs:nonNegativeInteger`
    #[serde(rename = "nonNegativeInteger")]
    NonNegativeInteger(NonNegativeInteger),
    /// `xs:positiveInteger`
    #[serde(rename = "positiveInteger")]
    PositiveInteger(PositiveInteger),
    /// `xs:string`
    #[serde(rename = "string")]
    String(StringType),
    /// `xs:token`
    #[serde(rename = "token")]
    Token(TokenType),
}

impl fmt::Display for XsdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XsdValue::AnyUri(v) => write!(f, "{}", v),
            XsdValue::NCName(v) => write!(f, "{}", v),
            XsdValue::Id(v) => write!(f, "{}", v),
            XsdValue::QName(v) => write!(f, "{}", v),
            XsdValue::Language(v) => write!(f, "{}", v),
            XsdValue::NonNegativeInteger(v) => write!(f, "{}", v),
            XsdValue::PositiveInteger(v) => write!(f, "{}", v),
            XsdValue::String(v) => write!(f, "{}", v),
            XsdValue::Token(v) => write!(f, "{}", v),
        }
    }
}

/// Definition of a built-in XSD type
#[derive(Debug, Clone)]
pub struct BuiltinType {
    /// Type name (local name without namespace)
    pub name: &'static str,
    /// White space handling applied before validation
    pub white_space: WhiteSpace,
    validator: fn(&str) -> Result<XsdValue>,
}

impl BuiltinType {
    /// Normalize `value` with the type's whiteSpace facet and validate it
    pub fn validate(&self, value: &str) -> Result<XsdValue> {
        let normalized = self.white_space.normalize(value);
        (self.validator)(&normalized)
    }
}

fn any_uri(value: &str) -> Result<XsdValue> {
    AnyUri::new(value).map(XsdValue::AnyUri)
}

fn ncname(value: &str) -> Result<XsdValue> {
    NCName::new(value).map(XsdValue::NCName)
}

fn id(value: &str) -> Result<XsdValue> {
    Id::new(value).map(XsdValue::Id)
}

fn language(value: &str) -> Result<XsdValue> {
    Language::parse(value).map(XsdValue::Language)
}

fn non_negative_integer(value: &str) -> Result<XsdValue> {
    value.parse().map(XsdValue::NonNegativeInteger)
}

fn positive_integer(value: &str) -> Result<XsdValue> {
    value.parse().map(XsdValue::PositiveInteger)
}

fn string(value: &str) -> Result<XsdValue> {
    StringType::new(value).map(XsdValue::String)
}

fn token(value: &str) -> Result<XsdValue> {
    TokenType::new(value).map(XsdValue::Token)
}

fn builtin(
    name: &'static str,
    white_space: WhiteSpace,
    validator: fn(&str) -> Result<XsdValue>,
) -> (&'static str, BuiltinType) {
    (
        name,
        BuiltinType {
            name,
            white_space,
            validator,
        },
    )
}

lazy_static::lazy_static! {
    static ref BUILTINS: IndexMap<&'static str, BuiltinType> = IndexMap::from([
        builtin(XSD_ANY_URI, WhiteSpace::Collapse, any_uri),
        builtin(XSD_NCNAME, WhiteSpace::Collapse, ncname),
        builtin(XSD_ID, WhiteSpace::Collapse, id),
        builtin(XSD_LANGUAGE, WhiteSpace::Collapse, language),
        builtin(XSD_NON_NEGATIVE_INTEGER, WhiteSpace::Collapse, non_negative_integer),
        builtin(XSD_POSITIVE_INTEGER, WhiteSpace::Collapse, positive_integer),
        builtin(XSD_STRING, WhiteSpace::Preserve, string),
        builtin(XSD_TOKEN, WhiteSpace::Collapse, token),
    ]);
}

/// Look up a built-in type by its XSD local name
pub fn lookup(name: &str) -> Option<&'static BuiltinType> {
    BUILTINS.get(name)
}

/// Names of all registered built-in types, in registration order
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("anyURI").unwrap().name, XSD_ANY_URI);
        assert_eq!(lookup("string").unwrap().white_space, WhiteSpace::Preserve);
        assert!(lookup("QName").is_none());
        assert!(lookup("dateTime").is_none());
    }

    #[test]
    fn test_names_in_order() {
        let all: Vec<&str> = names().collect();
        assert_eq!(all.first(), Some(&"anyURI"));
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn test_validate_applies_white_space() {
        let token = lookup("token").unwrap().validate("  a \t b ").unwrap();
        assert_eq!(token.to_string(), "a b");

        let count = lookup("positiveInteger").unwrap().validate("\n 42 ").unwrap();
        assert!(matches!(count, XsdValue::PositiveInteger(_)));

        let raw = lookup("string").unwrap().validate(" keep\t").unwrap();
        assert_eq!(raw.to_string(), " keep\t");
    }

    #[test]
    fn test_validate_errors() {
        let err = lookup("NCName").unwrap().validate("1x").unwrap_err();
        assert_eq!(err.to_string(), "\"1x\" is an invalid NCName.");
        assert!(lookup("language").unwrap().validate("en-").is_err());
        assert!(lookup("nonNegativeInteger").unwrap().validate("-1").is_err());
    }

    #[test]
    fn test_serialize_value() {
        let value = lookup("language").unwrap().validate("en-GB").unwrap();
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], "language");
        assert_eq!(json["value"]["primary_subtag"], "en");
        assert_eq!(json["value"]["subtags"][0], "GB");
    }
}
