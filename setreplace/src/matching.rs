//! Pattern matching.
//!
//! The inputs of a rule are matched one after the other,
//! in the order given by [`Rule::order`].
//! Every input is tried against candidate expressions in increasing ID order.
//! Once some atoms are known (because they are literals or
//! because variables were bound by previous inputs),
//! candidates are taken from the [`AtomIndex`] entry of a known atom,
//! so that only expressions sharing an atom with the partial match are tried.
//!
//! The search is an explicit stack of frames, one per matched input,
//! together with a trail of bound variables that is unwound on backtracking.

use crate::pattern::{PatternAtom, Var};
use crate::{Atom, AtomIndex, ExpressionId, Generation, Rule, Store};
use alloc::{vec, vec::Vec};
use im::{ordset, OrdSet};

/// Variable bindings of a rule together with the consumed expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// consumed expressions, one per rule input, in declaration order
    pub inputs: Vec<ExpressionId>,
    bindings: Vec<Option<Atom>>,
}

impl Match {
    /// Return the atom bound to a variable.
    pub fn get(&self, v: Var) -> Option<Atom> {
        self.bindings.get(v).copied().flatten()
    }

    /// Return the bindings of all variable slots of the rule.
    pub fn bindings(&self) -> &[Option<Atom>] {
        &self.bindings
    }
}

/// Search state for one rule input.
struct Frame<'a> {
    /// expressions that may match the input and were not tried yet
    candidates: Option<ordset::Iter<'a, ExpressionId>>,
    /// length of the trail before any variable of this input was bound
    trail: usize,
    /// candidate matched by the input
    chosen: Option<ExpressionId>,
}

/// Lazy sequence of matches of a rule, in deterministic order.
///
/// The sequence reflects the state of the store and index at creation;
/// both are borrowed, so they cannot change during the search.
pub struct Matches<'a> {
    rule: &'a Rule,
    store: &'a Store,
    index: &'a AtomIndex,
    max_generation: Option<Generation>,
    bindings: Vec<Option<Atom>>,
    /// variables in the order they were bound
    trail: Vec<Var>,
    frames: Vec<Frame<'a>>,
    /// number of candidates tried so far
    tried: usize,
    started: bool,
}

impl<'a> Matches<'a> {
    pub fn new(rule: &'a Rule, store: &'a Store, index: &'a AtomIndex) -> Self {
        Self {
            rule,
            store,
            index,
            max_generation: None,
            bindings: vec![None; rule.vars()],
            trail: Vec::new(),
            frames: Vec::with_capacity(rule.inputs().len()),
            tried: 0,
            started: false,
        }
    }

    /// Ignore expressions whose generation is at least the given one.
    pub fn max_generation(mut self, generation: Option<Generation>) -> Self {
        self.max_generation = generation;
        self
    }

    /// Return the number of candidate expressions tried so far.
    ///
    /// Candidates are enumerated lazily, so finding a match does not
    /// require visiting all expressions that might match.
    pub fn tried(&self) -> usize {
        self.tried
    }

    /// Create the frame for the input at the given search depth.
    fn frame(&self, depth: usize) -> Frame<'a> {
        let index: &'a AtomIndex = self.index;
        let input = self.rule.order()[depth];
        let pattern = &self.rule.inputs()[input];

        // atoms that every candidate has to contain
        let known = pattern.iter().filter_map(|pa| match pa {
            PatternAtom::Atom(a) => Some(*a),
            PatternAtom::Var(v) => self.bindings[*v],
        });

        let mut smallest: Option<&'a OrdSet<ExpressionId>> = None;
        let mut empty = false;
        for atom in known {
            match index.containing(atom) {
                Some(ids) if smallest.map_or(true, |s| ids.len() < s.len()) => smallest = Some(ids),
                Some(_) => (),
                None => {
                    // no active expression contains the atom
                    empty = true;
                    break;
                }
            }
        }

        let ids = smallest.or_else(|| index.with_arity(pattern.len()));
        let ids = ids.filter(|_| !empty);
        trace!("input {} has {} candidates", input, ids.map_or(0, |ids| ids.len()));

        Frame {
            candidates: ids.map(|ids| ids.iter()),
            trail: self.trail.len(),
            chosen: None,
        }
    }

    /// Unbind all variables bound after the trail had the given length.
    fn undo(&mut self, len: usize) {
        for v in self.trail.drain(len..) {
            self.bindings[v] = None
        }
    }

    /// Try to match a pattern with an expression, extending the bindings.
    ///
    /// On failure, bindings may be partially extended;
    /// the caller is responsible for undoing them.
    fn unify(&mut self, pattern: &[PatternAtom], id: ExpressionId) -> bool {
        // no expression may be consumed twice in one match
        if self.frames.iter().any(|frame| frame.chosen == Some(id)) {
            return false;
        }
        let expr = match self.store.get(id) {
            Some(expr) => expr,
            None => return false,
        };
        if self.max_generation.map_or(false, |max| expr.generation >= max) {
            return false;
        }
        if expr.atoms.len() != pattern.len() {
            return false;
        }

        let (bindings, trail) = (&mut self.bindings, &mut self.trail);
        pattern.iter().zip(&expr.atoms).all(|(pa, atom)| match pa {
            PatternAtom::Atom(a) => a == atom,
            PatternAtom::Var(v) => match bindings[*v] {
                Some(bound) => bound == *atom,
                None => {
                    bindings[*v] = Some(*atom);
                    trail.push(*v);
                    true
                }
            },
        })
    }

    /// Return the match corresponding to a complete stack of frames.
    fn current(&self) -> Match {
        let mut inputs = vec![0; self.frames.len()];
        let order = self.rule.order();
        for (frame, input) in self.frames.iter().zip(order) {
            inputs[*input] = frame.chosen.unwrap_or_default();
        }
        Match {
            inputs,
            bindings: self.bindings.clone(),
        }
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = Match;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            let frame = self.frame(0);
            self.frames.push(frame);
        }

        let rule = self.rule;
        // on every iteration, the top frame advances to its next candidate
        while let Some(mut frame) = self.frames.pop() {
            let pattern = &rule.inputs()[rule.order()[self.frames.len()]];
            self.undo(frame.trail);

            let mut found = None;
            while let Some(id) = frame.candidates.as_mut().and_then(|c| c.next()).copied() {
                self.tried += 1;
                if self.unify(pattern, id) {
                    found = Some(id);
                    break;
                }
                self.undo(frame.trail);
            }

            // on exhaustion, the frame is dropped and we backtrack
            if let Some(id) = found {
                frame.chosen = Some(id);
                self.frames.push(frame);
                if self.frames.len() == rule.inputs().len() {
                    return Some(self.current());
                }
                let next = self.frame(self.frames.len());
                self.frames.push(next);
            }
        }
        None
    }
}

impl Rule {
    /// Return the matches of the rule with the active expressions.
    ///
    /// ~~~
    /// # use setreplace::{AtomIndex, Rule, Store, PatternAtom::Var};
    /// let mut store = Store::new();
    /// let mut index = AtomIndex::new();
    /// for atoms in [vec![1, 2], vec![2, 3], vec![2, 4]] {
    ///     let id = store.add(atoms, 0, 0);
    ///     index.add(id, &store[id].atoms);
    /// }
    ///
    /// // {x, y}, {y, z} -> {x, z}
    /// let (x, y, z) = (Var(0), Var(1), Var(2));
    /// let rule = Rule::new(vec![vec![x, y], vec![y, z]], vec![vec![x, z]]).unwrap();
    /// let matches: Vec<_> = rule.matches(&store, &index).map(|m| m.inputs).collect();
    /// assert_eq!(matches, [[0, 1], [0, 2]]);
    /// ~~~
    pub fn matches<'a>(&'a self, store: &'a Store, index: &'a AtomIndex) -> Matches<'a> {
        Matches::new(self, store, index)
    }
}
