//! Deterministic finite automaton for content-model validation
//!
//! A [`Dfa`] tracks a single path through a transition table. It knows nothing
//! about schemas: states and symbols are plain integers whose meaning is owned
//! by whoever supplies the table (see [`crate::grammar`]).
//!
//! Feeding a symbol that has no transition from the current state invalidates
//! the automaton for good. The automaton never fails; callers inspect
//! [`Dfa::current_state`], [`Dfa::accepted_symbols`] and [`Dfa::is_valid`] to
//! build diagnostics, even after a rejection.

use indexmap::{IndexMap, IndexSet};
use log::trace;

/// Automaton state identifier
pub type State = u32;

/// Input symbol identifier
pub type Symbol = u32;

/// A single in-progress run over a transition table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    current_state: Option<State>,
    transitions: IndexMap<(State, Symbol), State>,
    final_states: IndexSet<State>,
}

impl Dfa {
    /// Create an automaton positioned at `initial_state` with an empty table
    pub fn new(initial_state: State) -> Self {
        Self {
            current_state: Some(initial_state),
            transitions: IndexMap::new(),
            final_states: IndexSet::new(),
        }
    }

    /// Map `(state, symbol)` to `next_state`, replacing any previous target
    pub fn add_transition(&mut self, state: State, symbol: Symbol, next_state: State) {
        self.transitions.insert((state, symbol), next_state);
    }

    /// Mark `state` as accepting
    pub fn add_final_state(&mut self, state: State) {
        self.final_states.insert(state);
    }

    /// Whether `symbol` has a transition from the current state
    pub fn accept_symbol(&self, symbol: Symbol) -> bool {
        self.next_state(symbol).is_some()
    }

    /// Advance on `symbol`, or invalidate the automaton if it is not accepted
    pub fn add_symbol(&mut self, symbol: Symbol) {
        let next = self.next_state(symbol);
        if next.is_none() {
            if let Some(state) = self.current_state {
                trace!("symbol {} rejected in state {}, automaton invalidated", symbol, state);
            }
        }
        self.current_state = next;
    }

    /// Symbols with a transition from the current state, in table order
    pub fn accepted_symbols(&self) -> IndexSet<Symbol> {
        match self.current_state {
            Some(current) => self
                .transitions
                .keys()
                .filter(|(state, _)| *state == current)
                .map(|&(_, symbol)| symbol)
                .collect(),
            None => IndexSet::new(),
        }
    }

    /// The current state, `None` once invalidated
    pub fn current_state(&self) -> Option<State> {
        self.current_state
    }

    /// Whether the current state exists and is accepting
    pub fn is_valid(&self) -> bool {
        self.current_state
            .map(|state| self.final_states.contains(&state))
            .unwrap_or(false)
    }

    /// Whether a rejected symbol has invalidated this run
    pub fn is_invalidated(&self) -> bool {
        self.current_state.is_none()
    }

    fn next_state(&self, symbol: Symbol) -> Option<State> {
        let state = self.current_state?;
        self.transitions.get(&(state, symbol)).copied()
    }
}
