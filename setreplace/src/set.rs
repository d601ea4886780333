//! Hypergraph evolution by repeated rule application.

use crate::{Atom, Config, Event, EventId, Evolution, Expression, ExpressionId, Rule};
use alloc::vec::Vec;

/// Set of expressions evolved by rewrite rules.
///
/// ~~~
/// # use setreplace::{Rule, Set, PatternAtom::Var};
/// // {x, y}, {y, z} -> {x, z}, {z, w}
/// let (x, y, z, w) = (Var(0), Var(1), Var(2), Var(3));
/// let rule = Rule::new(vec![vec![x, y], vec![y, z]], vec![vec![x, z], vec![z, w]]).unwrap();
/// let mut set = Set::new(vec![rule], vec![vec![1, 2], vec![2, 3]]);
///
/// assert_eq!(set.replace(), 1);
/// assert_eq!(set.expressions(), [[1, 3], [3, 4]]);
///
/// assert_eq!(set.replace_n(2), 2);
/// assert_eq!(set.expressions(), [[1, 5], [5, 6]]);
/// ~~~
#[derive(Clone, Debug)]
pub struct Set {
    rules: Vec<Rule>,
    evolution: Evolution,
    config: Config,
}

impl Set {
    /// Construct a set with the default configuration.
    pub fn new(rules: Vec<Rule>, initial: Vec<Vec<Atom>>) -> Self {
        Self::with_config(rules, initial, Config::default())
    }

    pub fn with_config(rules: Vec<Rule>, initial: Vec<Vec<Atom>>, config: Config) -> Self {
        let evolution = Evolution::new(&rules, initial);
        Self {
            rules,
            evolution,
            config,
        }
    }

    /// Apply at most one event and return the number of applied events.
    pub fn replace(&mut self) -> usize {
        self.evolution.apply_one_event(&self.rules, &self.config) as usize
    }

    /// Apply events until either `steps` events were applied or
    /// no rule matches anymore, and return the number of applied events.
    pub fn replace_n(&mut self, steps: usize) -> usize {
        let applied = (0..steps).take_while(|_| self.replace() == 1).count();
        if applied < steps {
            info!("fixed point reached after {} events", self.evolution.events().count());
        }
        applied
    }

    /// Return the atoms of all active expressions in order of creation.
    pub fn expressions(&self) -> Vec<Vec<Atom>> {
        let store = self.evolution.store();
        store.active_ids().map(|id| store[id].atoms.clone()).collect()
    }

    /// Return all expressions ever created, including inactive ones.
    pub fn history(&self) -> impl Iterator<Item = (ExpressionId, &Expression)> {
        self.evolution.store().iter()
    }

    pub fn expression(&self, id: ExpressionId) -> Option<&Expression> {
        self.evolution.expression(id)
    }

    /// Return all events in order of application.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.evolution.events()
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.evolution.event(id)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn evolution(&self) -> &Evolution {
        &self.evolution
    }
}
