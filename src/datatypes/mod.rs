//! XSD lexical datatypes
//!
//! Every value type here is validated once, in its constructor, and is
//! immutable afterwards. Construction either yields the value or an
//! [`Error::InvalidValue`] naming the offending input.

pub mod builtins;
pub mod facets;
pub mod language;
pub mod numeric;
pub mod string;
pub mod uri;

use crate::error::Error;

pub use builtins::{lookup, BuiltinType, XsdValue};
pub use facets::WhiteSpace;
pub use language::Language;
pub use numeric::{NonNegativeInteger, PositiveInteger};
pub use string::{StringType, TokenType};
pub use uri::AnyUri;

/// Common identity of the datatype validators
pub trait Datatype {
    /// Name of the concrete validator, e.g. `"NCNameType"`
    const VALIDATOR_NAME: &'static str;

    /// Short datatype name used in messages: the validator name without its
    /// trailing `"Type"`
    fn short_name() -> &'static str {
        Self::VALIDATOR_NAME
            .strip_suffix("Type")
            .unwrap_or(Self::VALIDATOR_NAME)
    }

    /// Error for a value outside this datatype's lexical space
    fn invalid(value: impl Into<String>) -> Error {
        Error::invalid_value(value, Self::short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{Id, NCName, QName};

    struct Plain;

    impl Datatype for Plain {
        const VALIDATOR_NAME: &'static str = "Plain";
    }

    #[test]
    fn test_short_names() {
        assert_eq!(NCName::short_name(), "NCName");
        assert_eq!(Id::short_name(), "ID");
        assert_eq!(QName::short_name(), "QName");
        assert_eq!(AnyUri::short_name(), "AnyURI");
        assert_eq!(Language::short_name(), "Language");
        assert_eq!(NonNegativeInteger::short_name(), "NonNegativeInteger");
        assert_eq!(PositiveInteger::short_name(), "PositiveInteger");
        assert_eq!(StringType::short_name(), "String");
        assert_eq!(TokenType::short_name(), "Token");
    }

    #[test]
    fn test_short_name_without_suffix() {
        assert_eq!(Plain::short_name(), "Plain");
        assert_eq!(Plain::invalid("x").to_string(), "\"x\" is an invalid Plain.");
    }
}
