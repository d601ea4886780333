//! Conversion of parsed commands to rules and initial expressions.

use crate::rule::Error as RuleError;
use crate::{Atom, Config, PatternAtom, Rule, Set};
use alloc::vec::Vec;
use core::convert::TryFrom;
use setreplace_parse::{Command, Elem};

/// Rules and initial expressions from which an evolution starts.
#[derive(Clone, Debug, Default)]
pub struct Problem {
    pub rules: Vec<Rule>,
    pub initial: Vec<Vec<Atom>>,
}

impl<S: PartialEq> TryFrom<setreplace_parse::Rule<S>> for Rule {
    type Error = RuleError;

    /// Number the variables of a parsed rule in order of their first occurrence.
    fn try_from(rule: setreplace_parse::Rule<S>) -> Result<Self, Self::Error> {
        let mut vars: Vec<S> = Vec::new();
        let mut scope = |tuple: Vec<Elem<S>>| -> Vec<PatternAtom> {
            let elem = |elem: Elem<S>| match elem {
                Elem::Atom(a) => PatternAtom::Atom(a),
                Elem::Var(v) => match vars.iter().position(|w| *w == v) {
                    Some(i) => PatternAtom::Var(i),
                    None => {
                        vars.push(v);
                        PatternAtom::Var(vars.len() - 1)
                    }
                },
            };
            tuple.into_iter().map(elem).collect()
        };
        let inputs = rule.lhs.into_iter().map(&mut scope).collect();
        let outputs = rule.rhs.into_iter().map(&mut scope).collect();
        Rule::new(inputs, outputs)
    }
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule after all previous rules or
    /// add initial expressions after all previous ones.
    pub fn add<S: PartialEq>(&mut self, cmd: Command<S>) -> Result<(), RuleError> {
        match cmd {
            Command::Rule(rule) => self.rules.push(Rule::try_from(rule)?),
            Command::Init(tuples) => self.initial.extend(tuples),
        }
        Ok(())
    }

    /// Construct a problem from a sequence of commands.
    ///
    /// ~~~
    /// # use setreplace::{scope::Problem, Error};
    /// use setreplace_parse::CmdIter;
    /// let cmds = "rule {x, y}, {y, z} -> {x, z}, {z, w}. init {1, 2}, {2, 3}.";
    /// let cmds = CmdIter::new(cmds).map(|cmd| cmd.unwrap());
    /// let mut set = Problem::from_commands(cmds)?.into_set(Default::default());
    /// assert_eq!(set.replace(), 1);
    /// assert_eq!(set.expressions(), [[1, 3], [3, 4]]);
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn from_commands<S, I>(cmds: I) -> Result<Self, RuleError>
    where
        S: PartialEq,
        I: IntoIterator<Item = Command<S>>,
    {
        let mut problem = Self::new();
        cmds.into_iter().try_for_each(|cmd| problem.add(cmd))?;
        Ok(problem)
    }

    pub fn into_set(self, config: Config) -> Set {
        Set::with_config(self.rules, self.initial, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use setreplace_parse::CmdIter;
    use PatternAtom::{Atom as Lit, Var as V};

    fn rule(s: &str) -> Result<Rule, RuleError> {
        match Command::parse_str(s) {
            Ok(Command::Rule(rule)) => Rule::try_from(rule),
            _ => panic!("rule expected"),
        }
    }

    #[test]
    fn variables_by_first_occurrence() {
        let r = rule("rule {b, a}, {a, 3} -> {c, b}, {c}.").unwrap();
        assert_eq!(r.inputs(), [vec![V(0), V(1)], vec![V(1), Lit(3)]]);
        assert_eq!(r.outputs(), [vec![V(2), V(0)], vec![V(2)]]);
        assert_eq!(r.fresh(), &[2]);
    }

    #[test]
    fn rules_in_order() {
        let src = "init {1}. rule {x} -> {x, x}. init {2, 3}. rule {x, y} -> .";
        let cmds = CmdIter::new(src).map(|cmd| cmd.unwrap());
        let problem = Problem::from_commands(cmds).unwrap();
        assert_eq!(problem.rules.len(), 2);
        assert_eq!(problem.rules[1].outputs().len(), 0);
        assert_eq!(problem.initial, [vec![1], vec![2, 3]]);
    }

    #[test]
    fn scopes_are_rule_local() {
        let src = "rule {x} -> {x, y}. rule {y} -> {y}.";
        let cmds = CmdIter::new(src).map(|cmd| cmd.unwrap());
        let problem = Problem::from_commands(cmds).unwrap();
        assert_eq!(problem.rules[1].inputs(), [vec![V(0)]]);
        assert!(problem.rules[1].fresh().is_empty());
    }
}
