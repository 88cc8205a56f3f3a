//! Externally supplied context grammars
//!
//! A [`ContextGrammar`] is the data needed to validate one kind of schema
//! context: its transition table, its final states, the symbol code of every
//! child element it recognizes and the datatype of every attribute it allows.
//! Grammars are plain data and are usually loaded from JSON:
//!
//! ```json
//! {
//!   "sequence": {
//!     "initial": 0,
//!     "transitions": [[0, 1, 1], [1, 1, 1]],
//!     "finals": [0, 1],
//!     "elements": { "element": 1 },
//!     "attributes": { "id": "ID", "minOccurs": "nonNegativeInteger" }
//!   }
//! }
//! ```

use crate::datatypes::builtins::{self, XSD_QNAME};
use crate::dfa::{Dfa, State, Symbol};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Symbol fed for child names the grammar does not know; never has a transition
pub const UNMATCHED_SYMBOL: Symbol = Symbol::MAX;

/// Transition table and attribute types of one schema context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextGrammar {
    /// Initial state
    #[serde(default)]
    pub initial: State,
    /// `(state, symbol, next_state)` triples
    #[serde(default)]
    pub transitions: Vec<(State, Symbol, State)>,
    /// Accepting states
    #[serde(default)]
    pub finals: Vec<State>,
    /// Child element local name -> symbol
    #[serde(default)]
    pub elements: IndexMap<String, Symbol>,
    /// Attribute name -> built-in type name
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl ContextGrammar {
    /// Create an empty grammar starting in `initial`
    pub fn new(initial: State) -> Self {
        Self {
            initial,
            ..Self::default()
        }
    }

    /// Assign `symbol` to child elements named `name`
    pub fn with_element(mut self, name: impl Into<String>, symbol: Symbol) -> Self {
        self.elements.insert(name.into(), symbol);
        self
    }

    /// Add a transition
    pub fn with_transition(mut self, state: State, symbol: Symbol, next_state: State) -> Self {
        self.transitions.push((state, symbol, next_state));
        self
    }

    /// Add an accepting state
    pub fn with_final(mut self, state: State) -> Self {
        self.finals.push(state);
        self
    }

    /// Allow attribute `name` with built-in type `type_name`
    pub fn with_attribute(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), type_name.into());
        self
    }

    /// Build a fresh automaton for one run over this grammar
    pub fn start(&self) -> Dfa {
        let mut dfa = Dfa::new(self.initial);
        for &(state, symbol, next_state) in &self.transitions {
            dfa.add_transition(state, symbol, next_state);
        }
        for &state in &self.finals {
            dfa.add_final_state(state);
        }
        dfa
    }

    /// Symbol of a child element name
    pub fn symbol_for(&self, name: &str) -> Option<Symbol> {
        self.elements.get(name).copied()
    }

    /// First element name mapped to `symbol`
    pub fn symbol_name(&self, symbol: Symbol) -> Option<&str> {
        self.elements
            .iter()
            .find(|(_, &s)| s == symbol)
            .map(|(name, _)| name.as_str())
    }

    /// Names of the elements the automaton would accept next
    pub fn expected_names(&self, dfa: &Dfa) -> Vec<&str> {
        dfa.accepted_symbols()
            .into_iter()
            .filter_map(|symbol| self.symbol_name(symbol))
            .collect()
    }

    /// Check that the grammar only refers to known datatypes and symbols
    pub fn check(&self) -> Result<()> {
        if let Some((name, _)) = self.elements.iter().find(|(_, &s)| s == UNMATCHED_SYMBOL) {
            return Err(Error::invalid_value(name.as_str(), "element symbol"));
        }
        for type_name in self.attributes.values() {
            if type_name != XSD_QNAME && builtins::lookup(type_name).is_none() {
                return Err(Error::invalid_value(type_name.as_str(), "attribute type"));
            }
        }
        Ok(())
    }
}

/// Context grammars keyed by the local name of the element that opens them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrammarSet {
    contexts: IndexMap<String, ContextGrammar>,
}

impl GrammarSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the grammar for elements named `name`
    pub fn insert(&mut self, name: impl Into<String>, grammar: ContextGrammar) {
        self.contexts.insert(name.into(), grammar);
    }

    /// Grammar for elements named `name`
    pub fn get(&self, name: &str) -> Option<&ContextGrammar> {
        self.contexts.get(name)
    }

    /// Number of contexts
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Parse and check a JSON grammar set
    pub fn from_json(json: &str) -> Result<Self> {
        let set: GrammarSet = serde_json::from_str(json)?;
        for grammar in set.contexts.values() {
            grammar.check()?;
        }
        Ok(set)
    }

    /// Load a JSON grammar set from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Render names for diagnostics: `'a', 'b' or 'c'`, or `none`
pub fn expected_list<S: AsRef<str>>(names: &[S]) -> String {
    let quote = |name: &S| format!("'{}'", name.as_ref());
    match names {
        [] => "none".to_string(),
        [only] => quote(only),
        [init @ .., last] => format!(
            "{} or {}",
            init.iter().map(quote).collect::<Vec<_>>().join(", "),
            quote(last)
        ),
    }
}
