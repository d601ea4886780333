mod error;
pub mod evolve;
mod opt;
mod path_read;
mod stage;

pub use error::Error;
pub use evolve::run;
pub use opt::Opt;
pub use path_read::PathRead;
pub use stage::Stage;

use setreplace_parse::Command;

pub fn log_cmd<S: core::fmt::Display>(cmd: &Command<S>) {
    match cmd {
        Command::Rule(rule) => log::info!("Add rule {}", rule),
        Command::Init(tuples) => log::info!("Add {} initial expressions", tuples.len()),
    }
}
