use std::{fs, io, path::Path, str::FromStr};

use anyhow::Context;
use census::{Catalog, FileSink, ReportSink, Simulation, SystemClock, WriterSink};
use clap::Parser;

use crate::{config::Cli, driver::Driver, seed::Seed};

mod config;
mod driver;
mod random;
mod seed;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let catalog = Catalog::standard().context("built-in pattern catalog is invalid")?;
    if cli.list_templates {
        for template in catalog.templates() {
            println!("{template}");
        }
        return Ok(());
    }

    let text = fs::read_to_string(&cli.seed)
        .with_context(|| format!("failed to read seed file {}", cli.seed.display()))?;
    let seed = Seed::from_str(&text)
        .with_context(|| format!("invalid seed file {}", cli.seed.display()))?;
    let grid = cli.initial_grid(&seed, catalog)?;
    let limit = cli.generations.unwrap_or(seed.generations);
    let mut sim = Simulation::new(grid, catalog, limit)?;

    let mut sink: Box<dyn ReportSink> = if cli.output == Path::new("-") {
        Box::new(WriterSink(io::stdout()))
    } else {
        Box::new(FileSink::new(&cli.output))
    };
    let summary = Driver {
        sink: sink.as_mut(),
        interval: cli.interval(),
        show: cli.show,
    }
    .run(&mut sim, &SystemClock)?;
    if summary.skipped > 0 {
        log::warn!(
            "{} of {} reports could not be written",
            summary.skipped,
            summary.generations
        );
    }
    Ok(())
}
