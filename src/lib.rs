//! # xmlschema-core
//!
//! Core building blocks of an XML Schema (XSD 1.0) processor.
//!
//! ## Features
//!
//! - A deterministic finite automaton for element content models
//! - Context grammars (transition tables) loaded from JSON
//! - Strongly typed XSD datatypes: `anyURI`, `NCName`, `ID`, `QName`,
//!   `language`, `nonNegativeInteger`, `positiveInteger`, `string`, `token`
//! - XML 1.0 character classes used by the name datatypes
//! - Namespace-aware QName resolution
//! - A walker validating a parsed XML tree against the context grammars
//!
//! ## Example
//!
//! ```rust
//! use xmlschema_core::datatypes::AnyUri;
//! use xmlschema_core::Dfa;
//!
//! let uri = AnyUri::new("foo://example.com:8080/a/b?x=1#frag").unwrap();
//! assert_eq!(uri.port(), Some("8080"));
//! assert_eq!(uri.uri(), "foo://example.com:8080/a/b?x=1#frag");
//!
//! let mut dfa = Dfa::new(0);
//! dfa.add_transition(0, 1, 1);
//! dfa.add_final_state(1);
//! dfa.add_symbol(1);
//! assert!(dfa.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod chars;
pub mod error;

// Datatypes
pub mod datatypes;
pub mod names;
pub mod namespaces;

// Content models
pub mod dfa;
pub mod grammar;

// Documents and validation
pub mod documents;
pub mod walker;

// Re-exports for convenience
pub use dfa::Dfa;
pub use error::{Error, Result, ValidationError};
pub use grammar::{ContextGrammar, GrammarSet};
pub use walker::{Report, Walker};

/// Version of the xmlschema-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD 1.0 namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";
