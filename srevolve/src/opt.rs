use crate::Stage;
use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
/// Evolve hypergraphs by set rewriting
pub struct Opt {
    /// Apply at most the given number of events
    ///
    /// If this option is omitted, events are applied until no rule matches.
    /// Note that this does not terminate for rules that always match!
    #[arg(long)]
    pub steps: Option<usize>,

    /// Do not match expressions of the given generation or later
    ///
    /// Initial expressions have generation 0, and
    /// the outputs of an event have one generation more than
    /// the latest generation among its inputs.
    #[arg(long)]
    pub max_generation: Option<usize>,

    /// Print every event
    #[arg(long)]
    pub events: bool,

    /// Print all expressions ever created, instead of only the active ones
    #[arg(long)]
    pub history: bool,

    /// Perform only operations until (excluding) the given stage.
    ///
    /// Possible values are: parse, scope, evolve.
    #[arg(long)]
    pub omit: Option<Stage>,

    /// Match rules concurrently
    ///
    /// If this option is used, the first matches of all rules are
    /// searched in parallel before every event.
    /// If this option is given with a number n, then
    /// maximally n threads are used for matching.
    /// If this option is given without an extra argument, then
    /// the number of threads is determined automatically from the number of CPUs.
    ///
    /// The resulting evolution is the same as without this option.
    #[arg(long, short = 'j')]
    pub jobs: Option<Option<usize>>,

    /// Files to process (cumulative)
    ///
    /// Rules and initial expressions from all files are combined in order.
    /// To read from standard input, use "-" as file name.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

impl Opt {
    pub fn omits(&self, stage: Stage) -> bool {
        self.omit.map_or(false, |omit| omit <= stage)
    }
}

#[test]
fn omit_later_stages() {
    let opt = Opt::try_parse_from(["srevolve", "--omit", "scope", "rules.sr"]).unwrap();
    assert!(!opt.omits(Stage::Parse));
    assert!(opt.omits(Stage::Scope));
    assert!(opt.omits(Stage::Evolve));
    assert!(Opt::try_parse_from(["srevolve", "--omit", "check", "rules.sr"]).is_err());
}

#[test]
fn jobs() {
    let opt = Opt::try_parse_from(["srevolve", "rules.sr", "-j"]).unwrap();
    assert_eq!(opt.jobs, Some(None));
    let opt = Opt::try_parse_from(["srevolve", "-j4", "rules.sr"]).unwrap();
    assert_eq!(opt.jobs, Some(Some(4)));
    let opt = Opt::try_parse_from(["srevolve", "rules.sr"]).unwrap();
    assert_eq!(opt.jobs, None);
}
