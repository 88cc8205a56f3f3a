//! The `whiteSpace` constraining facet

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const XML_WHITESPACE: [char; 3] = ['\t', '\n', '\r'];

/// White space handling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhiteSpace {
    /// Preserve all white space
    Preserve,
    /// Replace tabs and newlines with spaces
    Replace,
    /// Replace, then collapse runs of spaces and trim
    Collapse,
}

impl WhiteSpace {
    /// Normalize a string according to this white space mode
    pub fn normalize(&self, s: &str) -> String {
        match self {
            WhiteSpace::Preserve => s.to_string(),
            WhiteSpace::Replace => s.replace(XML_WHITESPACE, " "),
            WhiteSpace::Collapse => {
                let mut result = String::with_capacity(s.len());
                let mut prev_space = true; // drops leading spaces

                for c in s.chars() {
                    if c == ' ' || XML_WHITESPACE.contains(&c) {
                        if !prev_space {
                            result.push(' ');
                            prev_space = true;
                        }
                    } else {
                        result.push(c);
                        prev_space = false;
                    }
                }

                if result.ends_with(' ') {
                    result.pop();
                }
                result
            }
        }
    }

    /// Whether `value` is already normalized for this mode
    pub fn is_normalized(&self, value: &str) -> bool {
        match self {
            WhiteSpace::Preserve => true,
            WhiteSpace::Replace => !value.contains(XML_WHITESPACE),
            WhiteSpace::Collapse => self.normalize(value) == value,
        }
    }
}

impl fmt::Display for WhiteSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WhiteSpace::Preserve => "preserve",
            WhiteSpace::Replace => "replace",
            WhiteSpace::Collapse => "collapse",
        };
        f.write_str(name)
    }
}

impl FromStr for WhiteSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "preserve" => Ok(WhiteSpace::Preserve),
            "replace" => Ok(WhiteSpace::Replace),
            "collapse" => Ok(WhiteSpace::Collapse),
            _ => Err(Error::invalid_value(s, "whiteSpace")),
        }
    }
}
