/// A stage in the processing of files.
///
/// This is useful to omit certain parts of processing.
/// Omitting one stage also omits all stages after it,
/// i.e. all stages greater than the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Parsing of commands
    Parse,
    /// Conversion of commands to rules and initial expressions
    Scope,
    /// Application of events
    Evolve,
}

impl core::str::FromStr for Stage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parse" => Ok(Self::Parse),
            "scope" => Ok(Self::Scope),
            "evolve" => Ok(Self::Evolve),
            _ => Err("unknown stage: ".to_owned() + s),
        }
    }
}
