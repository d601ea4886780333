use crate::Generation;

/// Settings of an evolution.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Do not match expressions of this generation or later.
    ///
    /// Consequently, no expression beyond this generation is created.
    pub max_generation: Option<Generation>,
    /// Search the first matches of all rules concurrently.
    ///
    /// This has an effect only if the `rayon` feature is enabled.
    pub parallel: bool,
}
