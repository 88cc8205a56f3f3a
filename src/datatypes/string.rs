//! `xs:string` and `xs:token`

use crate::chars::is_xml_char;
use crate::datatypes::{Datatype, WhiteSpace};
use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// Any sequence of XML `Char` code points
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StringType(String);

impl Datatype for StringType {
    const VALIDATOR_NAME: &'static str = "StringType";
}

impl StringType {
    /// Reject values containing code points outside XML `Char`
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.chars().all(is_xml_char) {
            Ok(Self(value))
        } else {
            Err(Self::invalid(value))
        }
    }

    /// The string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A whitespace-collapsed string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TokenType(String);

impl Datatype for TokenType {
    const VALIDATOR_NAME: &'static str = "TokenType";
}

/// Characters allowed inside a token word
fn is_token_char(c: char) -> bool {
    is_xml_char(c) && !matches!(c, ' ' | '\t' | '\n' | '\r')
}

impl TokenType {
    /// Validate an already collapsed value: `Char+ (' ' Char+)*` or empty
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let collapsed = value
            .split(' ')
            .all(|word| !word.is_empty() && word.chars().all(is_token_char));
        if value.is_empty() || collapsed {
            Ok(Self(value))
        } else {
            Err(Self::invalid(value))
        }
    }

    /// Collapse whitespace in a raw value, then validate it
    pub fn collapse(raw: &str) -> Result<Self> {
        Self::new(WhiteSpace::Collapse.normalize(raw))
    }

    /// The token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
