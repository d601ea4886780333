//! Application of rewrite events.

use crate::{Allocator, Atom, AtomIndex, Config, Match, Matches, Rule, Store};
use crate::{EventId, Expression, ExpressionId, Generation, INITIAL_EVENT};
use alloc::vec::Vec;
use im::Vector;

/// Record of one rule application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// sequence number, starting from 1
    pub id: EventId,
    /// index of the applied rule
    pub rule: usize,
    /// consumed expressions, in order of the rule inputs
    pub inputs: Vec<ExpressionId>,
    /// created expressions, in order of the rule outputs
    pub outputs: Vec<ExpressionId>,
    pub generation: Generation,
}

/// State of an evolution: all expressions, their index, and all events.
///
/// The evolution changes only by committing complete events,
/// so matching never observes a partially applied event.
#[derive(Clone, Debug)]
pub struct Evolution {
    store: Store,
    index: AtomIndex,
    atoms: Allocator,
    events: Vector<Event>,
}

impl Evolution {
    /// Create an evolution from initial expressions.
    ///
    /// Fresh atoms are guaranteed to differ from
    /// all atoms in the initial expressions and in the rules.
    pub fn new<I>(rules: &[Rule], initial: I) -> Self
    where
        I: IntoIterator<Item = Vec<Atom>>,
    {
        let mut evolution = Self {
            store: Store::new(),
            index: AtomIndex::new(),
            atoms: Allocator::default(),
            events: Vector::new(),
        };
        for atoms in initial {
            evolution.insert(atoms, INITIAL_EVENT, 0);
        }

        let existing = evolution.store.iter().flat_map(|(_, e)| e.atoms.iter());
        let literals = rules.iter().flat_map(|rule| rule.literals());
        evolution.atoms = Allocator::seeded(existing.chain(literals));
        evolution
    }

    fn insert(&mut self, atoms: Vec<Atom>, event: EventId, generation: Generation) -> ExpressionId {
        let id = self.store.add(atoms, event, generation);
        self.index.add(id, &self.store[id].atoms);
        id
    }

    fn remove(&mut self, id: ExpressionId, event: EventId) {
        if let Err(e) = self.store.deactivate(id, event) {
            panic!("event {} consumes inactive expression: {:?}", event, e)
        }
        self.index.remove(id, &self.store[id].atoms);
    }

    /// Return the matches of a rule with respect to the configuration.
    pub fn matches<'a>(&'a self, rule: &'a Rule, config: &Config) -> Matches<'a> {
        Matches::new(rule, &self.store, &self.index).max_generation(config.max_generation)
    }

    /// Return the first match of the first rule that matches.
    ///
    /// With parallel matching, the first matches of all rules are
    /// searched concurrently, yielding the same result as sequential matching.
    pub fn first_match(&self, rules: &[Rule], config: &Config) -> Option<(usize, Match)> {
        if config.parallel {
            self.par_first_match(rules, config)
        } else {
            self.seq_first_match(rules, config)
        }
    }

    fn seq_first_match(&self, rules: &[Rule], config: &Config) -> Option<(usize, Match)> {
        let mut rules = rules.iter().enumerate();
        rules.find_map(|(i, rule)| Some((i, self.matches(rule, config).next()?)))
    }

    #[cfg(feature = "rayon")]
    fn par_first_match(&self, rules: &[Rule], config: &Config) -> Option<(usize, Match)> {
        use rayon::prelude::*;
        let rules = rules.par_iter().enumerate();
        rules.find_map_first(|(i, rule)| Some((i, self.matches(rule, config).next()?)))
    }

    #[cfg(not(feature = "rayon"))]
    fn par_first_match(&self, rules: &[Rule], config: &Config) -> Option<(usize, Match)> {
        self.seq_first_match(rules, config)
    }

    /// Apply the first match of the first rule that matches.
    ///
    /// Return false if no rule matches.
    pub fn apply_one_event(&mut self, rules: &[Rule], config: &Config) -> bool {
        match self.first_match(rules, config) {
            Some((i, m)) => {
                self.commit(i, &rules[i], &m);
                true
            }
            None => false,
        }
    }

    /// Replace the inputs of a match by the instantiated outputs of its rule.
    ///
    /// The match must have been obtained from the rule for the current state.
    pub fn commit(&mut self, rule_id: usize, rule: &Rule, m: &Match) -> EventId {
        let id = self.events.len() + 1;

        let mut bindings = m.bindings().to_vec();
        for v in rule.fresh() {
            bindings[*v] = Some(self.atoms.fresh())
        }
        let outputs = match rule.instantiate(&bindings) {
            Some(outputs) => outputs,
            None => panic!("rule {} has unbound output variable", rule_id),
        };

        let generation = m.inputs.iter().map(|i| self.store[*i].generation);
        let generation = generation.max().unwrap_or(0) + 1;

        m.inputs.iter().for_each(|input| self.remove(*input, id));
        let outputs = outputs
            .into_iter()
            .map(|atoms| self.insert(atoms, id, generation))
            .collect();

        let event = Event {
            id,
            rule: rule_id,
            inputs: m.inputs.clone(),
            outputs,
            generation,
        };
        debug!(
            "event {}: rule {} consumes {:?}, creates {:?}",
            id, rule_id, event.inputs, event.outputs
        );
        self.events.push_back(event);
        id
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn index(&self) -> &AtomIndex {
        &self.index
    }

    /// Return the greatest atom allocated or present so far.
    pub fn last_atom(&self) -> Atom {
        self.atoms.last()
    }

    /// Return all events in order of application.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Return the event with the given sequence number.
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.checked_sub(1)?)
    }

    /// Return the expression with the given ID.
    pub fn expression(&self, id: ExpressionId) -> Option<&Expression> {
        self.store.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternAtom::{Atom as Lit, Var as V};
    use alloc::vec;

    fn active(evolution: &Evolution) -> Vec<Vec<Atom>> {
        let store = evolution.store();
        store.active_ids().map(|id| store[id].atoms.clone()).collect()
    }

    #[test]
    fn commit() {
        // {x, y}, {y, z} -> {x, z}, {z, w}
        let (x, y, z, w) = (V(0), V(1), V(2), V(3));
        let rule = Rule::new(vec![vec![x, y], vec![y, z]], vec![vec![x, z], vec![z, w]]);
        let rules = [rule.unwrap()];
        let mut evolution = Evolution::new(&rules, vec![vec![1, 2], vec![2, 3]]);
        let config = Config::default();

        assert!(evolution.apply_one_event(&rules, &config));
        assert_eq!(active(&evolution), [[1, 3], [3, 4]]);

        let event = evolution.event(1).unwrap();
        assert_eq!(event.inputs, [0, 1]);
        assert_eq!(event.outputs, [2, 3]);
        assert_eq!(event.generation, 1);
        assert_eq!(evolution.store()[0].destroyed_by, Some(1));
        assert_eq!(evolution.store()[2].created_by, 1);
        assert!(evolution.event(0).is_none());
    }

    #[test]
    fn fresh_atoms_avoid_literals() {
        // {x} -> {x, 10}, {w}
        let rule = Rule::new(vec![vec![V(0)]], vec![vec![V(0), Lit(10)], vec![V(1)]]);
        let rules = [rule.unwrap()];
        let mut evolution = Evolution::new(&rules, vec![vec![1]]);
        assert_eq!(evolution.last_atom(), 10);

        assert!(evolution.apply_one_event(&rules, &Config::default()));
        assert_eq!(active(&evolution), [vec![1, 10], vec![11]]);
    }

    #[test]
    fn shared_fresh_atom() {
        // {x} -> {x, w}, {w, w}
        let (x, w) = (V(0), V(1));
        let rules = [Rule::new(vec![vec![x]], vec![vec![x, w], vec![w, w]]).unwrap()];
        let mut evolution = Evolution::new(&rules, vec![vec![5]]);
        assert!(evolution.apply_one_event(&rules, &Config::default()));
        assert_eq!(active(&evolution), [[5, 6], [6, 6]]);
    }

    #[test]
    fn rule_priority() {
        let rules = [
            Rule::new(vec![vec![V(0), V(0)]], vec![vec![Lit(0)]]).unwrap(),
            Rule::new(vec![vec![V(0)]], vec![]).unwrap(),
        ];
        let mut evolution = Evolution::new(&rules, vec![vec![1], vec![2, 2]]);
        let config = Config::default();

        // the second rule matches an earlier expression,
        // but the first rule takes precedence
        assert_eq!(evolution.first_match(&rules, &config).map(|(i, _)| i), Some(0));
        assert!(evolution.apply_one_event(&rules, &config));
        assert!(evolution.apply_one_event(&rules, &config));
        assert_eq!(evolution.event(2).map(|e| e.rule), Some(1));
        assert_eq!(active(&evolution), [[0]]);
    }

    #[test]
    fn generations() {
        // {x} -> {x}
        let rules = [Rule::new(vec![vec![V(0)]], vec![vec![V(0)]]).unwrap()];
        let mut evolution = Evolution::new(&rules, vec![vec![1]]);
        let config = Config {
            max_generation: Some(3),
            ..Config::default()
        };
        while evolution.apply_one_event(&rules, &config) {}
        assert_eq!(evolution.events().count(), 3);
        let last = evolution.store().active_ids().next().unwrap();
        assert_eq!(evolution.store()[last].generation, 3);
    }

    #[test]
    #[should_panic]
    fn double_consumption() {
        let rules = [Rule::new(vec![vec![V(0)]], vec![]).unwrap()];
        let mut evolution = Evolution::new(&rules, vec![vec![1]]);
        let m = evolution.first_match(&rules, &Config::default()).unwrap().1;
        evolution.commit(0, &rules[0], &m);
        evolution.commit(0, &rules[0], &m);
    }
}
