//! Table-driven validation of an element tree
//!
//! Every element whose local name has a grammar in the [`GrammarSet`] opens a
//! context. The context owns a private [`Dfa`] fed with the symbol of each
//! child element, and its attributes are checked against the built-in
//! datatypes. Elements without a grammar are only descended into.

use crate::datatypes::builtins::{self, XsdValue, XSD_QNAME};
use crate::datatypes::WhiteSpace;
use crate::dfa::Dfa;
use crate::documents::{Document, Element};
use crate::error::{Error, Result, ValidationError};
use crate::grammar::{expected_list, ContextGrammar, GrammarSet, UNMATCHED_SYMBOL};
use log::{debug, trace};
use std::collections::HashMap;

/// One open schema context
#[derive(Debug)]
pub struct ContextCursor<'g> {
    grammar: &'g ContextGrammar,
    dfa: Dfa,
    path: String,
    closed: bool,
    errors: Vec<ValidationError>,
}

impl<'g> ContextCursor<'g> {
    /// Open a context at `path` with a fresh automaton from `grammar`
    pub fn open(grammar: &'g ContextGrammar, path: impl Into<String>) -> Self {
        let path = path.into();
        debug!("opening context {}", path);
        Self {
            grammar,
            dfa: grammar.start(),
            path,
            closed: false,
            errors: Vec::new(),
        }
    }

    /// Feed the child element `name`
    ///
    /// Only the first rejected child produces a diagnostic; the automaton stays
    /// invalidated for the rest of the context.
    pub fn push(&mut self, name: &str) -> Result<()> {
        if self.closed {
            return Err(Error::InvalidOperation(format!(
                "context {} is closed, cannot add '{}'",
                self.path, name
            )));
        }

        let symbol = self.grammar.symbol_for(name).unwrap_or(UNMATCHED_SYMBOL);
        trace!("context {}: child '{}' as symbol {}", self.path, name, symbol);
        if !self.dfa.is_invalidated() && !self.dfa.accept_symbol(symbol) {
            let expected = self.grammar.expected_names(&self.dfa);
            self.errors.push(
                ValidationError::new(format!("Unexpected element '{}'.", name))
                    .with_expected(expected_list(&expected))
                    .with_path(self.path.clone()),
            );
        }
        self.dfa.add_symbol(symbol);
        Ok(())
    }

    /// Close the context and return its diagnostics
    pub fn close(&mut self) -> Result<Vec<ValidationError>> {
        if self.closed {
            return Err(Error::InvalidOperation(format!(
                "context {} is already closed",
                self.path
            )));
        }
        self.closed = true;

        if !self.dfa.is_invalidated() && !self.dfa.is_valid() {
            let expected = self.grammar.expected_names(&self.dfa);
            self.errors.push(
                ValidationError::new("Incomplete content.")
                    .with_expected(expected_list(&expected))
                    .with_path(self.path.clone()),
            );
        }
        Ok(std::mem::take(&mut self.errors))
    }

    /// The automaton of this context
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Whether [`ContextCursor::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// A validated attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedAttribute {
    /// Path of the owning element
    pub path: String,
    /// Attribute name as written
    pub name: String,
    /// The typed value
    pub value: XsdValue,
}

/// Outcome of walking an element tree
#[derive(Debug, Default)]
pub struct Report {
    /// Structural and datatype diagnostics, in document order
    pub errors: Vec<ValidationError>,
    /// Attribute values that passed validation, in document order
    pub values: Vec<TypedAttribute>,
}

impl Report {
    /// Whether no diagnostics were produced
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Walks element trees with a set of context grammars
#[derive(Debug, Clone, Copy)]
pub struct Walker<'g> {
    grammars: &'g GrammarSet,
}

impl<'g> Walker<'g> {
    /// Create a walker over `grammars`
    pub fn new(grammars: &'g GrammarSet) -> Self {
        Self { grammars }
    }

    /// Validate the root element of `document`
    pub fn validate_document(&self, document: &Document) -> Result<Report> {
        let root = document
            .root()
            .ok_or_else(|| Error::Xml("Document has no root element".to_string()))?;
        self.validate(root)
    }

    /// Validate `element` and all of its descendants
    pub fn validate(&self, element: &Element) -> Result<Report> {
        let mut report = Report::default();
        self.walk(element, format!("/{}", element.name), &mut report)?;
        Ok(report)
    }

    fn walk(&self, element: &Element, path: String, report: &mut Report) -> Result<()> {
        if let Some(grammar) = self.grammars.get(element.local_name()) {
            Self::check_attributes(grammar, element, &path, report);

            let mut cursor = ContextCursor::open(grammar, path.clone());
            for child in &element.children {
                cursor.push(child.local_name())?;
            }
            report.errors.extend(cursor.close()?);
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for child in &element.children {
            let position = seen.entry(child.name.as_str()).or_insert(0);
            *position += 1;
            let child_path = format!("{}/{}[{}]", path, child.name, position);
            self.walk(child, child_path, report)?;
        }
        Ok(())
    }

    fn check_attributes(
        grammar: &ContextGrammar,
        element: &Element,
        path: &str,
        report: &mut Report,
    ) {
        for (name, raw) in &element.attributes {
            let Some(type_name) = grammar.attributes.get(name) else {
                // qualified attributes from other vocabularies are always allowed
                if !name.contains(':') {
                    report.errors.push(
                        ValidationError::new(format!("Unexpected attribute '{}'.", name))
                            .with_path(path),
                    );
                }
                continue;
            };

            match Self::typed_value(type_name, raw, element) {
                Ok(value) => report.values.push(TypedAttribute {
                    path: path.to_string(),
                    name: name.clone(),
                    value,
                }),
                Err(e) => report.errors.push(
                    ValidationError::new(format!("Invalid value for attribute '{}'.", name))
                        .with_reason(e.to_string())
                        .with_path(path),
                ),
            }
        }
    }

    fn typed_value(type_name: &str, raw: &str, element: &Element) -> Result<XsdValue> {
        if type_name == XSD_QNAME {
            let text = WhiteSpace::Collapse.normalize(raw);
            return element.namespaces.resolve_qname(&text).map(XsdValue::QName);
        }
        let builtin = builtins::lookup(type_name)
            .ok_or_else(|| Error::invalid_value(type_name, "attribute type"))?;
        builtin.validate(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice() -> ContextGrammar {
        // (a | b) c
        ContextGrammar::new(0)
            .with_element("a", 1)
            .with_element("b", 2)
            .with_element("c", 3)
            .with_transition(0, 1, 1)
            .with_transition(0, 2, 1)
            .with_transition(1, 3, 2)
            .with_final(2)
    }

    #[test]
    fn test_cursor_accepts_valid_sequence() {
        let grammar = choice();
        let mut cursor = ContextCursor::open(&grammar, "/root");
        cursor.push("b").unwrap();
        cursor.push("c").unwrap();
        assert!(cursor.dfa().is_valid());
        assert!(cursor.close().unwrap().is_empty());
    }

    #[test]
    fn test_cursor_reports_first_unexpected_element() {
        let grammar = choice();
        let mut cursor = ContextCursor::open(&grammar, "/root");
        cursor.push("c").unwrap();
        cursor.push("a").unwrap();
        let errors = cursor.close().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Unexpected element 'c'.");
        assert_eq!(errors[0].expected.as_deref(), Some("'a' or 'b'"));
        assert_eq!(errors[0].path.as_deref(), Some("/root"));
    }

    #[test]
    fn test_cursor_unknown_element() {
        let grammar = choice();
        let mut cursor = ContextCursor::open(&grammar, "/root");
        cursor.push("a").unwrap();
        cursor.push("zzz").unwrap();
        assert!(cursor.dfa().current_state().is_none());
        let errors = cursor.close().unwrap();
        assert_eq!(errors[0].message, "Unexpected element 'zzz'.");
        assert_eq!(errors[0].expected.as_deref(), Some("'c'"));
    }

    #[test]
    fn test_cursor_incomplete_content() {
        let grammar = choice();
        let mut cursor = ContextCursor::open(&grammar, "/root");
        cursor.push("a").unwrap();
        let errors = cursor.close().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Incomplete content.");
        assert_eq!(errors[0].expected.as_deref(), Some("'c'"));
    }

    #[test]
    fn test_closed_cursor_is_invalid_operation() {
        let grammar = choice();
        let mut cursor = ContextCursor::open(&grammar, "/root");
        cursor.close().unwrap();
        assert!(cursor.is_closed());
        assert!(matches!(cursor.push("a"), Err(Error::InvalidOperation(_))));
        assert!(matches!(cursor.close(), Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_empty_expected_set() {
        let grammar = ContextGrammar::new(0).with_final(0);
        let mut cursor = ContextCursor::open(&grammar, "/leaf");
        cursor.push("x").unwrap();
        let errors = cursor.close().unwrap();
        assert_eq!(errors[0].expected.as_deref(), Some("none"));
    }

    #[test]
    fn test_walker_checks_attributes() {
        let mut grammars = GrammarSet::new();
        grammars.insert(
            "item",
            ContextGrammar::new(0)
                .with_final(0)
                .with_attribute("count", "positiveInteger")
                .with_attribute("lang", "language"),
        );

        let mut item = Element::new("item");
        item.attributes.insert("count".to_string(), " 3 ".to_string());
        item.attributes.insert("lang".to_string(), "en-".to_string());
        item.attributes.insert("other".to_string(), "x".to_string());
        item.attributes.insert("xml:space".to_string(), "preserve".to_string());

        let report = Walker::new(&grammars).validate(&item).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.values.len(), 1);
        assert_eq!(report.values[0].name, "count");
        assert_eq!(report.values[0].value.to_string(), "3");

        let messages: Vec<&str> = report.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            ["Invalid value for attribute 'lang'.", "Unexpected attribute 'other'."]
        );
        assert_eq!(
            report.errors[0].reason.as_deref(),
            Some("\"\" is an invalid Language.")
        );
    }
}
