//! Datatype integration tests
//!
//! Exercise the public datatype API the way a schema processor uses it:
//! raw attribute text goes through the built-in registry, QNames through a
//! namespace context.

use pretty_assertions::assert_eq;
use xmlschema_core::datatypes::builtins::{self, XsdValue};
use xmlschema_core::datatypes::{AnyUri, Datatype, Language, NonNegativeInteger, PositiveInteger};
use xmlschema_core::names::{Id, NCName, QName};
use xmlschema_core::namespaces::NamespaceContext;
use xmlschema_core::{Error, XSD_NAMESPACE};

// ============================================================================
// Short names
// ============================================================================

#[test]
fn test_short_names() {
    assert_eq!(NCName::short_name(), "NCName");
    assert_eq!(Id::short_name(), "ID");
    assert_eq!(QName::short_name(), "QName");
    assert_eq!(AnyUri::short_name(), "AnyURI");
    assert_eq!(Language::short_name(), "Language");
    assert_eq!(NonNegativeInteger::short_name(), "NonNegativeInteger");
    assert_eq!(PositiveInteger::short_name(), "PositiveInteger");
}

// ============================================================================
// anyURI
// ============================================================================

#[test]
fn test_uri_scenario() {
    let uri = AnyUri::new("foo://example.com:8080/a/b?x=1#frag").unwrap();
    assert_eq!(uri.scheme(), Some("foo"));
    assert_eq!(uri.host(), Some("example.com"));
    assert_eq!(uri.port(), Some("8080"));
    assert_eq!(uri.path(), "/a/b");
    assert_eq!(uri.query(), Some("x=1"));
    assert_eq!(uri.fragment(), Some("frag"));
    assert_eq!(uri.to_string(), "foo://example.com:8080/a/b?x=1#frag");
}

#[test]
fn test_uri_resolution() {
    let base = AnyUri::new("http://example.com/schemas/main.xsd").unwrap();
    let include = AnyUri::new("types/common.xsd").unwrap();
    assert_eq!(
        include.resolve(&base).unwrap().as_str(),
        "http://example.com/schemas/types/common.xsd"
    );

    let relative_base = AnyUri::new("schemas/main.xsd").unwrap();
    assert!(matches!(
        include.resolve(&relative_base),
        Err(Error::InvalidOperation(_))
    ));
}

#[test]
fn test_uri_serialization_skips_missing_components() {
    let uri = AnyUri::new("urn:example:a").unwrap();
    let json = serde_json::to_value(&uri).unwrap();
    assert_eq!(json, serde_json::json!({ "scheme": "urn", "path": "example:a" }));
}

// ============================================================================
// Built-in registry
// ============================================================================

#[test]
fn test_builtin_collapse_before_validation() {
    let uri = builtins::lookup("anyURI")
        .unwrap()
        .validate("  http://example.com/x  ")
        .unwrap();
    assert_eq!(uri.to_string(), "http://example.com/x");

    let name = builtins::lookup("NCName").unwrap().validate("\tfoo\n").unwrap();
    assert_eq!(name, XsdValue::NCName(NCName::new("foo").unwrap()));
}

#[test]
fn test_builtin_reports_normalized_value() {
    let err = builtins::lookup("positiveInteger")
        .unwrap()
        .validate("  0 ")
        .unwrap_err();
    assert_eq!(err.to_string(), "\"0\" is an invalid PositiveInteger.");
}

#[test]
fn test_builtin_large_integers() {
    let big = "123456789012345678901234567890";
    let value = builtins::lookup("nonNegativeInteger")
        .unwrap()
        .validate(big)
        .unwrap();
    assert_eq!(value.to_string(), big);

    let value: NonNegativeInteger = "+42".parse().unwrap();
    assert_eq!(value.to_u64(), Some(42));
    assert!("4.2".parse::<NonNegativeInteger>().is_err());
    assert!("".parse::<PositiveInteger>().is_err());
}

#[test]
fn test_builtin_token() {
    let token = builtins::lookup("token")
        .unwrap()
        .validate(" a\n\n b\tc ")
        .unwrap();
    assert_eq!(token.to_string(), "a b c");

    let err = builtins::lookup("token").unwrap().validate("a\u{1}").unwrap_err();
    assert!(err.is_invalid_value());
}

#[test]
fn test_builtin_json_value() {
    let value = builtins::lookup("positiveInteger")
        .unwrap()
        .validate("7")
        .unwrap();
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        serde_json::json!({ "type": "positiveInteger", "value": "7" })
    );
}

// ============================================================================
// QName resolution
// ============================================================================

#[test]
fn test_qname_through_namespace_context() {
    let mut ctx = NamespaceContext::new();
    ctx.add_prefix("xs", XSD_NAMESPACE).unwrap();

    let qname = ctx.resolve_qname("xs:complexType").unwrap();
    assert_eq!(
        qname.to_string(),
        "{http://www.w3.org/2001/XMLSchema}complexType"
    );

    let json = serde_json::to_value(XsdValue::QName(qname)).unwrap();
    assert_eq!(json["type"], "QName");
    assert_eq!(json["value"]["local_part"], "complexType");
}

#[test]
fn test_qname_without_namespace() {
    let qname = QName::from_parts("local", None).unwrap();
    assert_eq!(qname.namespace(), None);
    assert_eq!(qname.to_string(), "local");
}
