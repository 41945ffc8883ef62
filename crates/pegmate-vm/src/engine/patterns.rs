//! Compiled pattern table.
//!
//! Each distinct `(pattern, repeat)` pair is compiled once into an anchored
//! dense DFA matching `(?:pattern){repeat}`. Searches run leftmost-first, so
//! the reported end is the one a backtracking regex engine would pick.

use std::collections::HashMap;

use pegmate_program::Program;
use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::{Anchored, Input};

use super::RuntimeError;

#[derive(Debug)]
struct PatternEntry {
    pattern: String,
    repeat: u32,
    dfa: dense::DFA<Vec<u32>>,
}

#[derive(Debug, Default)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
    lookup: HashMap<(String, u32), usize>,
}

impl PatternTable {
    /// Compile the given patterns; duplicates share one entry.
    pub fn new<'a>(
        patterns: impl IntoIterator<Item = (&'a str, u32)>,
    ) -> Result<Self, RuntimeError> {
        let mut table = Self::default();
        for (pattern, repeat) in patterns {
            table.intern(pattern, repeat)?;
        }
        Ok(table)
    }

    /// Compile every pattern a program uses.
    pub fn for_program(program: &Program) -> Result<Self, RuntimeError> {
        Self::new(program.patterns())
    }

    /// Add a pattern, returning its index.
    pub fn intern(&mut self, pattern: &str, repeat: u32) -> Result<usize, RuntimeError> {
        let key = (pattern.to_string(), repeat);
        if let Some(&id) = self.lookup.get(&key) {
            return Ok(id);
        }

        let source = if repeat == 1 {
            pattern.to_string()
        } else {
            format!("(?:{pattern}){{{repeat}}}")
        };
        let dfa = dense::DFA::builder()
            .configure(
                dense::DFA::config()
                    .start_kind(StartKind::Anchored)
                    .unicode_word_boundary(true),
            )
            .build(&source)
            .map_err(|e| RuntimeError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        let id = self.entries.len();
        self.entries.push(PatternEntry {
            pattern: pattern.to_string(),
            repeat,
            dfa,
        });
        self.lookup.insert(key, id);
        Ok(id)
    }

    pub fn index_of(&self, pattern: &str, repeat: u32) -> Option<usize> {
        self.lookup.get(&(pattern.to_string(), repeat)).copied()
    }

    /// Source pattern of an entry, without the repeat wrapper.
    pub fn pattern(&self, id: usize) -> Option<&str> {
        self.entries.get(id).map(|e| e.pattern.as_str())
    }

    pub fn repeat(&self, id: usize) -> Option<u32> {
        self.entries.get(id).map(|e| e.repeat)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End offset of the match anchored at `start`, if any.
    pub fn match_at(
        &self,
        id: usize,
        haystack: &str,
        start: usize,
    ) -> Result<Option<usize>, RuntimeError> {
        let entry = self
            .entries
            .get(id)
            .ok_or(RuntimeError::UnknownPatternId(id))?;
        let input = Input::new(haystack)
            .range(start..)
            .anchored(Anchored::Yes);
        entry
            .dfa
            .try_search_fwd(&input)
            .map(|m| m.map(|half| half.offset()))
            .map_err(|e| RuntimeError::PatternSearch {
                pattern: entry.pattern.clone(),
                message: e.to_string(),
            })
    }
}
