//! `xs:language` tags (RFC 3066)

use crate::datatypes::Datatype;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

static PRIMARY_SUBTAG: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Za-z]{1,8}$").unwrap());
static SUBTAG: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Za-z0-9]{1,8}$").unwrap());

/// A language tag: primary subtag plus ordered subtags
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    primary_subtag: String,
    subtags: Vec<String>,
}

impl Datatype for Language {
    const VALIDATOR_NAME: &'static str = "LanguageType";
}

impl Language {
    /// Validate the primary subtag, then each subtag in order
    pub fn new<I, S>(primary_subtag: impl Into<String>, subtags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let primary_subtag = primary_subtag.into();
        if !PRIMARY_SUBTAG.is_match(&primary_subtag) {
            return Err(Self::invalid(primary_subtag));
        }

        let subtags = subtags
            .into_iter()
            .map(|subtag| {
                let subtag = subtag.into();
                if SUBTAG.is_match(&subtag) {
                    Ok(subtag)
                } else {
                    Err(Self::invalid(subtag))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            primary_subtag,
            subtags,
        })
    }

    /// Parse a hyphen-separated tag such as `en-US`
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.split('-');
        let primary = parts.next().unwrap_or_default();
        Self::new(primary, parts)
    }

    /// The primary subtag
    pub fn primary_subtag(&self) -> &str {
        &self.primary_subtag
    }

    /// The subtags following the primary one
    pub fn subtags(&self) -> &[String] {
        &self.subtags
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary_subtag)?;
        for subtag in &self.subtags {
            write!(f, "-{}", subtag)?;
        }
        Ok(())
    }
}

impl FromStr for Language {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtag_order() {
        let lang = Language::new("foo", ["bar1", "baz2", "qux3"]).unwrap();
        assert_eq!(lang.primary_subtag(), "foo");
        assert_eq!(lang.subtags(), ["bar1", "baz2", "qux3"]);
    }

    #[test]
    fn test_no_subtags() {
        let lang = Language::new("en", Vec::<String>::new()).unwrap();
        assert!(lang.subtags().is_empty());
        assert_eq!(lang.to_string(), "en");
    }

    #[test]
    fn test_repeated_subtags() {
        let lang = Language::new("x", ["a", "a"]).unwrap();
        assert_eq!(lang.subtags(), ["a", "a"]);
    }

    #[test]
    fn test_invalid_primary() {
        for primary in ["", "abcdefghi", "e1", "en_US"] {
            assert!(Language::new(primary, ["US"]).is_err(), "{:?}", primary);
        }
    }

    #[test]
    fn test_invalid_subtag() {
        let err = Language::new("en", ["US", "toolongtag"]).unwrap_err();
        assert_eq!(err.to_string(), "\"toolongtag\" is an invalid Language.");
        assert!(Language::new("en", [""]).is_err());
    }

    #[test]
    fn test_primary_error_wins() {
        let err = Language::new("1", ["!!"]).unwrap_err();
        assert_eq!(err.to_string(), "\"1\" is an invalid Language.");
    }

    #[test]
    fn test_parse() {
        let lang = Language::parse("en-GB-oed").unwrap();
        assert_eq!(lang.primary_subtag(), "en");
        assert_eq!(lang.subtags(), ["GB", "oed"]);
        assert_eq!(lang.to_string(), "en-GB-oed");

        assert!(Language::parse("").is_err());
        assert!(Language::parse("en-").is_err());
        assert!(Language::parse("i-klingon").is_ok());
    }
}
