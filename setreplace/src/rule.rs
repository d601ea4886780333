//! Rewrite rules.

use crate::pattern::{self, Pattern, PatternAtom, Var};
use crate::Atom;
use alloc::{vec, vec::Vec};
use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// a rule without inputs would match unconditionally
    NoInputs,
}

/// Rewrite rule.
///
/// Variables that occur only in the outputs are *fresh*:
/// every application of the rule binds them to newly allocated atoms.
#[derive(Clone, Debug)]
pub struct Rule {
    inputs: Vec<Pattern>,
    outputs: Vec<Pattern>,
    /// number of variable slots (greatest variable plus one)
    vars: usize,
    /// output-only variables, in order of first occurrence
    fresh: Vec<Var>,
    /// order in which inputs are matched
    order: Vec<usize>,
}

impl Rule {
    /// Construct a rule that replaces `inputs` by `outputs`.
    ///
    /// ~~~
    /// # use setreplace::{Rule, PatternAtom::Var};
    /// // {x, y}, {y, z} -> {x, z}, {z, w}
    /// let (x, y, z, w) = (Var(0), Var(1), Var(2), Var(3));
    /// let rule = Rule::new(vec![vec![x, y], vec![y, z]], vec![vec![x, z], vec![z, w]]).unwrap();
    /// assert_eq!(rule.fresh(), &[3]);
    /// assert_eq!(rule.to_string(), "{v0, v1}, {v1, v2} -> {v0, v2}, {v2, v3}");
    /// ~~~
    pub fn new(inputs: Vec<Pattern>, outputs: Vec<Pattern>) -> Result<Self, Error> {
        if inputs.is_empty() {
            return Err(Error::NoInputs);
        }

        let all = inputs.iter().chain(outputs.iter());
        let vars = all.flat_map(|p| pattern::vars(p)).max().map_or(0, |v| v + 1);

        let mut bound = vec![false; vars];
        inputs
            .iter()
            .flat_map(|p| pattern::vars(p))
            .for_each(|v| bound[v] = true);

        let mut fresh = Vec::new();
        for v in outputs.iter().flat_map(|p| pattern::vars(p)) {
            if !bound[v] && !fresh.contains(&v) {
                fresh.push(v)
            }
        }

        let order = order(&inputs, vars);
        Ok(Self {
            inputs,
            outputs,
            vars,
            fresh,
            order,
        })
    }

    pub fn inputs(&self) -> &[Pattern] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Pattern] {
        &self.outputs
    }

    /// Return the number of variable slots required to match the rule.
    pub fn vars(&self) -> usize {
        self.vars
    }

    /// Return the variables that occur in outputs, but not in inputs.
    pub fn fresh(&self) -> &[Var] {
        &self.fresh
    }

    /// Return the indices of the inputs in the order they are matched.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Return the literal atoms occurring anywhere in the rule.
    pub fn literals(&self) -> impl Iterator<Item = &Atom> {
        let all = self.inputs.iter().chain(self.outputs.iter());
        all.flatten().filter_map(|pa| match pa {
            PatternAtom::Atom(a) => Some(a),
            PatternAtom::Var(_) => None,
        })
    }

    /// Substitute variables in the outputs.
    ///
    /// Return `None` if an output variable is not bound.
    pub fn instantiate(&self, bindings: &[Option<Atom>]) -> Option<Vec<Vec<Atom>>> {
        let atom = |pa: &PatternAtom| match pa {
            PatternAtom::Atom(a) => Some(*a),
            PatternAtom::Var(v) => *bindings.get(*v)?,
        };
        let output = |p: &Pattern| p.iter().map(atom).collect::<Option<Vec<_>>>();
        self.outputs.iter().map(output).collect()
    }
}

/// Order inputs such that every input shares a variable with
/// some input before it, whenever possible.
///
/// Among several candidates, the input with the lowest index is taken.
/// If no remaining input shares a variable with the inputs so far,
/// the remaining input with the lowest index starts a new component.
fn order(inputs: &[Pattern], vars: usize) -> Vec<usize> {
    let mut placed = vec![false; inputs.len()];
    let mut bound = vec![false; vars];
    let mut order = Vec::with_capacity(inputs.len());

    while order.len() < inputs.len() {
        let connected = |i: &usize| pattern::vars(&inputs[*i]).any(|v| bound[v]);
        let unplaced = || (0..inputs.len()).filter(|i| !placed[*i]);
        let next = unplaced().find(connected).or_else(|| unplaced().next());
        // there is always an unplaced input while the order is incomplete
        let next = match next {
            Some(next) => next,
            None => break,
        };
        placed[next] = true;
        pattern::vars(&inputs[next]).for_each(|v| bound[v] = true);
        order.push(next);
    }
    order
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        setreplace_parse::cmd::format(&self.inputs, f)?;
        write!(f, " -> ")?;
        setreplace_parse::cmd::format(&self.outputs, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PatternAtom::{Atom, Var};

    #[test]
    fn no_inputs() {
        assert_eq!(Rule::new(vec![], vec![vec![Atom(1)]]).unwrap_err(), Error::NoInputs);
    }

    #[test]
    fn fresh_in_order_of_occurrence() {
        let inputs = vec![vec![Var(1), Var(4)]];
        let outputs = vec![vec![Var(3), Var(1)], vec![Var(0), Var(3), Atom(9)]];
        let rule = Rule::new(inputs, outputs).unwrap();
        assert_eq!(rule.vars(), 5);
        assert_eq!(rule.fresh(), &[3, 0]);
        assert_eq!(rule.literals().copied().collect::<Vec<_>>(), [9]);
    }

    #[test]
    fn connected_order() {
        // {a, b}, {c, d}, {b, c}: the last input connects the first two
        let inputs = vec![
            vec![Var(0), Var(1)],
            vec![Var(2), Var(3)],
            vec![Var(1), Var(2)],
        ];
        let rule = Rule::new(inputs, vec![]).unwrap();
        assert_eq!(rule.order(), &[0, 2, 1]);
    }

    #[test]
    fn disconnected_order() {
        // {a}, {b}, {a, 1}, {b, 2}
        let inputs = vec![
            vec![Var(0)],
            vec![Var(1)],
            vec![Var(0), Atom(1)],
            vec![Var(1), Atom(2)],
        ];
        let rule = Rule::new(inputs, vec![]).unwrap();
        assert_eq!(rule.order(), &[0, 2, 1, 3]);
    }

    #[test]
    fn instantiate() {
        let inputs = vec![vec![Var(0), Var(1)]];
        let outputs = vec![vec![Var(1), Var(2), Atom(7)], vec![]];
        let rule = Rule::new(inputs, outputs).unwrap();
        let bindings = [Some(1), Some(2), Some(5)];
        assert_eq!(rule.instantiate(&bindings), Some(vec![vec![2, 5, 7], vec![]]));
        assert_eq!(rule.instantiate(&bindings[..2]), None);
        assert_eq!(rule.instantiate(&[Some(1), Some(2), None]), None);
    }
}
