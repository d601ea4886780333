//! Sequential processing of files and evolution.

use crate::{Error, Opt, PathRead, Stage};
use setreplace::scope::Problem;
use setreplace::{Config, ExpressionId, Set};
use setreplace_parse::CmdIter;
use std::io::Write;

/// Parse and scope the commands of all files into one problem.
///
/// Return `None` if scoping is omitted.
pub fn problem<I>(files: I, opt: &Opt) -> Result<Option<Problem>, Error>
where
    I: Iterator<Item = Result<PathRead, Error>>,
{
    let mut problem = Problem::new();
    for file in files {
        let file = file?;
        if opt.omits(Stage::Parse) {
            continue;
        }
        for cmd in CmdIter::new(&file.read) {
            let cmd = cmd.map_err(|e| Error::Parse(file.path.clone(), e))?;
            crate::log_cmd(&cmd);
            if !opt.omits(Stage::Scope) {
                problem.add(cmd)?
            }
        }
    }
    Ok((!opt.omits(Stage::Scope)).then(|| problem))
}

fn tuples(set: &Set, ids: &[ExpressionId]) -> String {
    let exprs = ids.iter().filter_map(|id| set.expression(*id));
    let exprs: Vec<_> = exprs.map(|e| e.to_string()).collect();
    exprs.join(", ")
}

/// Print the state of an evolution as requested by the options.
pub fn print(set: &Set, opt: &Opt, out: &mut impl Write) -> Result<(), Error> {
    if opt.events {
        for event in set.events() {
            let (inputs, outputs) = (tuples(set, &event.inputs), tuples(set, &event.outputs));
            writeln!(out, "event {} (rule {}): {} -> {}", event.id, event.rule, inputs, outputs)?
        }
    }

    if opt.history {
        for (id, expr) in set.history() {
            let destroyed = expr.destroyed_by.map_or("-".to_string(), |e| e.to_string());
            writeln!(out, "{}: {} [{} {}]", id, expr, expr.created_by, destroyed)?
        }
    } else {
        let active = set.history().filter(|(_, expr)| expr.is_active());
        for (_, expr) in active {
            writeln!(out, "{}", expr)?
        }
    }
    Ok(())
}

pub fn consume<I>(files: I, opt: &Opt, out: &mut impl Write) -> Result<(), Error>
where
    I: Iterator<Item = Result<PathRead, Error>>,
{
    let problem = match problem(files, opt)? {
        Some(problem) => problem,
        None => return Ok(()),
    };
    log::info!(
        "{} rules, {} initial expressions",
        problem.rules.len(),
        problem.initial.len()
    );

    let config = Config {
        max_generation: opt.max_generation,
        parallel: opt.jobs.is_some(),
    };
    let mut set = problem.into_set(config);

    if !opt.omits(Stage::Evolve) {
        let applied = set.replace_n(opt.steps.unwrap_or(usize::MAX));
        log::info!("Applied {} events", applied);
    }

    print(&set, opt, out)
}

pub fn run(opt: &Opt, out: &mut impl Write) -> Result<(), Error> {
    let files = opt.files.iter().map(|file| PathRead::try_from(file).map_err(Error::from));
    consume(files, opt, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn output(src: &str, args: &[&str]) -> Result<String, Error> {
        let args = ["srevolve"].iter().chain(args).chain(&["test.sr"]);
        let opt = Opt::try_parse_from(args).unwrap();
        let file = PathRead {
            path: "test.sr".to_string(),
            read: src.to_string(),
        };
        let mut out = Vec::new();
        consume(std::iter::once(Ok(file)), &opt, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    const CHAIN: &str = "rule {x, y}, {y, z} -> {x, z}, {z, w}. init {1, 2}, {2, 3}.";

    #[test]
    fn steps() -> Result<(), Error> {
        assert_eq!(output(CHAIN, &["--steps", "1"])?, "{1, 3}\n{3, 4}\n");
        assert_eq!(output(CHAIN, &["--steps", "2"])?, "{1, 4}\n{4, 5}\n");
        Ok(())
    }

    #[test]
    fn fixed_point() -> Result<(), Error> {
        let src = "rule {x, y}, {y, z} -> {x, z}.\ninit {1, 2}, {2, 3}, {3, 4}.";
        assert_eq!(output(src, &[])?, "{1, 4}\n");
        Ok(())
    }

    #[test]
    fn events() -> Result<(), Error> {
        let out = output(CHAIN, &["--steps", "1", "--events"])?;
        assert_eq!(out, "event 1 (rule 0): {1, 2}, {2, 3} -> {1, 3}, {3, 4}\n{1, 3}\n{3, 4}\n");
        Ok(())
    }

    #[test]
    fn history() -> Result<(), Error> {
        let out = output(CHAIN, &["--steps", "1", "--history"])?;
        let expected = "0: {1, 2} [0 1]\n1: {2, 3} [0 1]\n2: {1, 3} [1 -]\n3: {3, 4} [1 -]\n";
        assert_eq!(out, expected);
        Ok(())
    }

    #[test]
    fn omit() -> Result<(), Error> {
        assert_eq!(output(CHAIN, &["--omit", "evolve"])?, "{1, 2}\n{2, 3}\n");
        assert_eq!(output(CHAIN, &["--omit", "scope"])?, "");
        // parse errors are not detected when parsing is omitted
        assert_eq!(output("rule.", &["--omit", "parse"])?, "");
        Ok(())
    }

    #[test]
    fn parse_error() {
        match output("rule {x} {y}.", &[]) {
            Err(Error::Parse(path, setreplace_parse::Error::ExpectedCommaOrArrow)) => {
                assert_eq!(path, "test.sr")
            }
            _ => panic!("parse error expected"),
        }
    }

    #[test]
    fn max_generation() -> Result<(), Error> {
        let src = "rule {x} -> {x}. init {1}.";
        assert_eq!(output(src, &["--max-generation", "3", "--history"])?.lines().count(), 4);
        Ok(())
    }
}
