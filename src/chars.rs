//! Unicode character classes from the XML 1.0 (2nd edition) productions
//!
//! The tables are plain sorted range slices; nothing here is ever mutated, so
//! they can be shared freely between threads.
//!
//! `BaseChar` only covers the Latin and IPA ranges and `CombiningChar` only
//! the combining diacritical marks block. Names using characters outside those
//! ranges are rejected.

use std::cmp::Ordering;

/// A named set of inclusive code-point ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClass {
    name: &'static str,
    ranges: &'static [(char, char)],
}

impl CharClass {
    /// Create a character class from sorted, non-overlapping ranges
    pub const fn new(name: &'static str, ranges: &'static [(char, char)]) -> Self {
        Self { name, ranges }
    }

    /// Name of the production this class implements
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The inclusive ranges of this class
    pub fn ranges(&self) -> &'static [(char, char)] {
        self.ranges
    }

    /// Check whether `c` belongs to this class
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if hi < c {
                    Ordering::Less
                } else if lo > c {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Render the ranges as the body of a regex bracket expression
    pub fn regex_class(&self) -> String {
        let mut out = String::new();
        for &(lo, hi) in self.ranges {
            if lo == hi {
                out.push_str(&format!("\\x{{{:X}}}", lo as u32));
            } else {
                out.push_str(&format!("\\x{{{:X}}}-\\x{{{:X}}}", lo as u32, hi as u32));
            }
        }
        out
    }
}

/// `BaseChar`, Latin subset
pub const BASE_CHAR: CharClass = CharClass::new(
    "BaseChar",
    &[
        ('\u{0041}', '\u{005A}'),
        ('\u{0061}', '\u{007A}'),
        ('\u{00C0}', '\u{00D6}'),
        ('\u{00D8}', '\u{00F6}'),
        ('\u{00F8}', '\u{00FF}'),
        ('\u{0100}', '\u{0131}'),
        ('\u{0134}', '\u{013E}'),
        ('\u{0141}', '\u{0148}'),
        ('\u{014A}', '\u{017E}'),
        ('\u{0180}', '\u{01C3}'),
        ('\u{01CD}', '\u{01F0}'),
        ('\u{01F4}', '\u{01F5}'),
        ('\u{01FA}', '\u{0217}'),
        ('\u{0250}', '\u{02A8}'),
        ('\u{02BB}', '\u{02C1}'),
    ],
);

/// `Ideographic`
pub const IDEOGRAPHIC: CharClass = CharClass::new(
    "Ideographic",
    &[
        ('\u{3007}', '\u{3007}'),
        ('\u{3021}', '\u{3029}'),
        ('\u{4E00}', '\u{9FA5}'),
    ],
);

/// `Digit`
pub const DIGIT: CharClass = CharClass::new(
    "Digit",
    &[
        ('\u{0030}', '\u{0039}'),
        ('\u{0660}', '\u{0669}'),
        ('\u{06F0}', '\u{06F9}'),
        ('\u{0966}', '\u{096F}'),
        ('\u{09E6}', '\u{09EF}'),
        ('\u{0A66}', '\u{0A6F}'),
        ('\u{0AE6}', '\u{0AEF}'),
        ('\u{0B66}', '\u{0B6F}'),
        ('\u{0BE7}', '\u{0BEF}'),
        ('\u{0C66}', '\u{0C6F}'),
        ('\u{0CE6}', '\u{0CEF}'),
        ('\u{0D66}', '\u{0D6F}'),
        ('\u{0E50}', '\u{0E59}'),
        ('\u{0ED0}', '\u{0ED9}'),
        ('\u{0F20}', '\u{0F29}'),
    ],
);

/// `CombiningChar`, combining diacritical marks only
pub const COMBINING_CHAR: CharClass = CharClass::new(
    "CombiningChar",
    &[('\u{0300}', '\u{0345}'), ('\u{0360}', '\u{0361}')],
);

/// `Extender`
pub const EXTENDER: CharClass = CharClass::new(
    "Extender",
    &[
        ('\u{00B7}', '\u{00B7}'),
        ('\u{02D0}', '\u{02D1}'),
        ('\u{0387}', '\u{0387}'),
        ('\u{0640}', '\u{0640}'),
        ('\u{0E46}', '\u{0E46}'),
        ('\u{0EC6}', '\u{0EC6}'),
        ('\u{3005}', '\u{3005}'),
        ('\u{3031}', '\u{3035}'),
        ('\u{309D}', '\u{309E}'),
        ('\u{30FC}', '\u{30FE}'),
    ],
);

/// XML `Char`
pub const XML_CHAR: CharClass = CharClass::new(
    "Char",
    &[
        ('\u{0009}', '\u{000A}'),
        ('\u{000D}', '\u{000D}'),
        ('\u{0020}', '\u{D7FF}'),
        ('\u{E000}', '\u{FFFD}'),
        ('\u{10000}', '\u{10FFFF}'),
    ],
);

/// `Letter ::= BaseChar | Ideographic`
pub fn is_letter(c: char) -> bool {
    BASE_CHAR.contains(c) || IDEOGRAPHIC.contains(c)
}

/// First character of an NCName: `Letter | '_'`
pub fn is_ncname_start_char(c: char) -> bool {
    c == '_' || is_letter(c)
}

/// `NCNameChar ::= Letter | Digit | '.' | '-' | '_' | CombiningChar | Extender`
pub fn is_ncname_char(c: char) -> bool {
    matches!(c, '.' | '-' | '_')
        || is_letter(c)
        || DIGIT.contains(c)
        || COMBINING_CHAR.contains(c)
        || EXTENDER.contains(c)
}

/// XML `Char`
pub fn is_xml_char(c: char) -> bool {
    XML_CHAR.contains(c)
}

/// Anchored regex matching exactly the NCName production over these tables
pub fn ncname_pattern() -> String {
    let letter = format!("{}{}", BASE_CHAR.regex_class(), IDEOGRAPHIC.regex_class());
    format!(
        r"^[_{letter}][{letter}{digit}\x{{2E}}\x{{2D}}_{combining}{extender}]*$",
        letter = letter,
        digit = DIGIT.regex_class(),
        combining = COMBINING_CHAR.regex_class(),
        extender = EXTENDER.regex_class(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(class: &CharClass) {
        for pair in class.ranges().windows(2) {
            assert!(pair[0].1 < pair[1].0, "{} ranges overlap", class.name());
        }
        for &(lo, hi) in class.ranges() {
            assert!(lo <= hi, "{} has an inverted range", class.name());
        }
    }

    #[test]
    fn test_tables_are_sorted() {
        for class in [BASE_CHAR, IDEOGRAPHIC, DIGIT, COMBINING_CHAR, EXTENDER, XML_CHAR] {
            assert_sorted(&class);
        }
    }

    #[test]
    fn test_base_char_is_latin_only() {
        assert!(BASE_CHAR.contains('A'));
        assert!(BASE_CHAR.contains('z'));
        assert!(BASE_CHAR.contains('é'));
        assert!(BASE_CHAR.contains('\u{0250}'));
        assert!(!BASE_CHAR.contains('\u{00D7}'));
        // Greek and Cyrillic are valid XML letters but outside this table
        assert!(!BASE_CHAR.contains('α'));
        assert!(!BASE_CHAR.contains('ж'));
    }

    #[test]
    fn test_letter() {
        assert!(is_letter('Q'));
        assert!(is_letter('\u{4E00}'));
        assert!(is_letter('\u{3007}'));
        assert!(!is_letter('_'));
        assert!(!is_letter('1'));
    }

    #[test]
    fn test_ncname_chars() {
        assert!(is_ncname_start_char('_'));
        assert!(!is_ncname_start_char('-'));
        assert!(!is_ncname_start_char('5'));
        for c in ['.', '-', '_', '7', '\u{0661}', '\u{0301}', '\u{00B7}'] {
            assert!(is_ncname_char(c), "{:?} should be an NCNameChar", c);
        }
        assert!(!is_ncname_char(':'));
        assert!(!is_ncname_char(' '));
        assert!(!is_ncname_char('\u{0346}'));
    }

    #[test]
    fn test_xml_char() {
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('\n'));
        assert!(is_xml_char('\r'));
        assert!(is_xml_char(' '));
        assert!(is_xml_char('\u{10FFFF}'));
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{B}'));
        assert!(!is_xml_char('\u{FFFE}'));
        assert!(!is_xml_char('\u{FFFF}'));
    }

    #[test]
    fn test_regex_class_rendering() {
        assert_eq!(COMBINING_CHAR.regex_class(), r"\x{300}-\x{345}\x{360}-\x{361}");
        assert!(EXTENDER.regex_class().starts_with(r"\x{B7}\x{2D0}-\x{2D1}\x{387}"));
        assert!(ncname_pattern().starts_with(r"^[_\x{41}-\x{5A}"));
    }
}
