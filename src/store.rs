//! In-memory mapping from component identifiers to their current beliefs.
//!
//! Identifiers that were never stored implicitly hold the default belief.
//! Writers go through [`RatingStore::lock`], which holds the single writer lock
//! for as long as the guard lives; that is what makes a match update atomic.

use crate::systems::SkillBelief;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type BeliefsByName = HashMap<String, SkillBelief>;

#[derive(Debug)]
pub struct RatingStore {
    default_belief: SkillBelief,
    beliefs: RwLock<BeliefsByName>,
}

impl RatingStore {
    pub fn new(default_belief: SkillBelief) -> Self {
        Self {
            default_belief,
            beliefs: RwLock::new(HashMap::new()),
        }
    }

    pub fn default_belief(&self) -> SkillBelief {
        self.default_belief
    }

    // Updates never panic between their reads and writes, so a poisoned map is still consistent
    fn read(&self) -> RwLockReadGuard<'_, BeliefsByName> {
        self.beliefs.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes the writer lock. Reads and writes through the guard are atomic with respect
    /// to every other reader and writer of this store.
    pub fn lock(&self) -> StoreGuard<'_> {
        StoreGuard {
            default_belief: self.default_belief,
            beliefs: self.beliefs.write().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Returns the stored belief, first storing the default if `id` is new.
    pub fn get(&self, id: &str) -> SkillBelief {
        if let Some(&belief) = self.read().get(id) {
            return belief;
        }
        self.lock().get(id)
    }

    /// Returns the stored belief, or the default if `id` is new, without storing anything.
    pub fn peek(&self, id: &str) -> SkillBelief {
        self.read().get(id).copied().unwrap_or(self.default_belief)
    }

    /// Like two calls to [`Self::peek`], but both beliefs are read from the same state.
    pub fn peek_pair(&self, a: &str, b: &str) -> (SkillBelief, SkillBelief) {
        let beliefs = self.read();
        let lookup = |id: &str| beliefs.get(id).copied().unwrap_or(self.default_belief);
        (lookup(a), lookup(b))
    }

    /// Beliefs of every id in order, all read from the same state.
    pub fn peek_many<S: AsRef<str>>(&self, ids: &[S]) -> Vec<SkillBelief> {
        let beliefs = self.read();
        ids.iter()
            .map(|id| beliefs.get(id.as_ref()).copied().unwrap_or(self.default_belief))
            .collect()
    }

    pub fn set(&self, id: impl Into<String>, belief: SkillBelief) {
        self.lock().set(id, belief);
    }

    pub fn snapshot(&self) -> RatingSnapshot {
        RatingSnapshot {
            default_belief: self.default_belief,
            beliefs: self.read().clone(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

/// Exclusive access to a [`RatingStore`] for the lifetime of the guard.
pub struct StoreGuard<'a> {
    default_belief: SkillBelief,
    beliefs: RwLockWriteGuard<'a, BeliefsByName>,
}

impl StoreGuard<'_> {
    pub fn get(&mut self, id: &str) -> SkillBelief {
        if let Some(&belief) = self.beliefs.get(id) {
            return belief;
        }
        self.beliefs.insert(id.to_owned(), self.default_belief);
        self.default_belief
    }

    pub fn set(&mut self, id: impl Into<String>, belief: SkillBelief) {
        self.beliefs.insert(id.into(), belief);
    }
}

/// A point-in-time copy of a [`RatingStore`].
#[derive(Clone, Debug, PartialEq)]
pub struct RatingSnapshot {
    default_belief: SkillBelief,
    beliefs: BeliefsByName,
}

impl RatingSnapshot {
    pub fn get(&self, id: &str) -> SkillBelief {
        self.beliefs.get(id).copied().unwrap_or(self.default_belief)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillBelief)> {
        self.beliefs.iter().map(|(id, belief)| (id.as_str(), belief))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.beliefs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }
}
