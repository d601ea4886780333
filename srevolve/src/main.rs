//! Evolve hypergraphs by set rewriting.

use clap::Parser;
use srevolve::{Error, Opt};
use std::io::{self, Write};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Opt::parse();

    // if a precise number of parallel jobs has been given
    if let Some(Some(jobs)) = opt.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()?;
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    srevolve::run(&opt, &mut out)?;
    Ok(out.flush()?)
}
