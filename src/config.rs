use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use census::{Catalog, ConfigError, Grid};
use clap::Parser;

use crate::{random, seed::Seed};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Runs Conway's Game of Life and appends a census of known shapes for every generation"
)]
pub struct Cli {
    /// Seed file: `W H`, then the generation limit, then `x y` pairs of live cells
    #[arg(long, default_value = "input.txt")]
    pub seed: PathBuf,

    /// Report file, appended to; `-` writes to standard output
    #[arg(long, default_value = "output.txt")]
    pub output: PathBuf,

    /// Overrides the generation limit from the seed file
    #[arg(long)]
    pub generations: Option<usize>,

    /// Milliseconds between generations
    #[arg(long, default_value_t = 50)]
    pub interval: u64,

    /// Fill the grid at random before applying the seed cells, each cell
    /// alive with the given probability
    #[arg(
        long,
        value_name = "DENSITY",
        num_args = 0..=1,
        default_missing_value = "0.2",
        value_parser = parse_density
    )]
    pub random: Option<f64>,

    /// Seed for --random; defaults to the current time
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Place a catalog template with its top left corner at ROW,COL (repeatable)
    #[arg(long = "place", value_name = "NAME@ROW,COL")]
    pub placements: Vec<Placement>,

    /// Print every generation to stderr
    #[arg(long)]
    pub show: bool,

    /// List the catalog templates and exit
    #[arg(long)]
    pub list_templates: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval)
    }

    /// Random fill, then the seed's cells, then the placements, later steps
    /// overwriting earlier ones.
    pub fn initial_grid(&self, seed: &Seed, catalog: &Catalog) -> anyhow::Result<Grid> {
        let mut grid = Grid::new(seed.width, seed.height)?;
        if let Some(density) = self.random {
            let rng_seed = self.rng_seed.unwrap_or_else(time_seed);
            log::info!("random fill with density {density}, rng seed {rng_seed}");
            random::fill(&mut grid, density, rng_seed)?;
        }
        seed.plant(&mut grid).context("seed cells")?;
        for placement in &self.placements {
            placement
                .apply(&mut grid, catalog)
                .with_context(|| format!("placement {placement}"))?;
        }
        Ok(grid)
    }
}

fn time_seed() -> u64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}

fn parse_density(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(d) if (0.0..=1.0).contains(&d) => Ok(d),
        _ => Err(format!("density must be a number between 0 and 1, got {s:?}")),
    }
}

/// A named catalog template and where to put it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    pub origin: (usize, usize),
}

impl Placement {
    pub fn apply(&self, grid: &mut Grid, catalog: &Catalog) -> Result<(), ConfigError> {
        let template = catalog
            .get(&self.name)
            .ok_or_else(|| ConfigError::UnknownTemplate(self.name.clone()))?;
        grid.place(self.origin, template)
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || format!("expected NAME@ROW,COL, got {s:?}");
        let (name, origin) = s.split_once('@').ok_or_else(malformed)?;
        let (row, col) = origin.split_once(',').ok_or_else(malformed)?;
        let row = row.trim().parse().map_err(|_| malformed())?;
        let col = col.trim().parse().map_err(|_| malformed())?;
        if name.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            name: name.to_owned(),
            origin: (row, col),
        })
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{},{}", self.name, self.origin.0, self.origin.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("life-census").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.seed, PathBuf::from("input.txt"));
        assert_eq!(cli.output, PathBuf::from("output.txt"));
        assert_eq!(cli.interval(), Duration::from_millis(50));
        assert_eq!(cli.random, None);
        assert!(cli.placements.is_empty());
    }

    #[test]
    fn test_random_flag() {
        assert_eq!(cli(&["--random"]).random, Some(0.2));
        assert_eq!(cli(&["--random", "0.5"]).random, Some(0.5));
        assert!(Cli::try_parse_from(["life-census", "--random", "1.5"]).is_err());
    }

    #[test]
    fn test_placements() {
        let cli = cli(&["--place", "glider-1@4,4", "--place", "block@14, 2"]);
        assert_eq!(
            cli.placements,
            [
                Placement {
                    name: "glider-1".into(),
                    origin: (4, 4)
                },
                Placement {
                    name: "block".into(),
                    origin: (14, 2)
                },
            ]
        );
        assert!(Placement::from_str("glider-1").is_err());
        assert!(Placement::from_str("@1,2").is_err());
        assert!(Placement::from_str("block@1").is_err());
        assert!(Placement::from_str("block@1,x").is_err());
    }

    #[test]
    fn test_initial_grid() {
        let catalog = Catalog::standard().unwrap();
        let seed = Seed::from_str("20 12\n10\n0 0 19 11").unwrap();
        let cli = cli(&["--place", "block@2,3"]);
        let grid = cli.initial_grid(&seed, catalog).unwrap();
        assert!(grid.is_alive(0, 0));
        assert!(grid.is_alive(11, 19));
        assert!(grid.is_alive(3, 4) && grid.is_alive(4, 5));
        assert_eq!(grid.population(), 6);
    }

    #[test]
    fn test_bad_placements() {
        let catalog = Catalog::standard().unwrap();
        let seed = Seed::from_str("10 10\n10").unwrap();
        let unknown = cli(&["--place", "pulsar@0,0"]).initial_grid(&seed, catalog);
        assert!(unknown.is_err());
        let outside = cli(&["--place", "glider-1@8,8"]).initial_grid(&seed, catalog);
        let err = outside.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::PlacementOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_random_then_seed_cells() {
        let catalog = Catalog::standard().unwrap();
        let seed = Seed::from_str("10 10\n10\n5 5").unwrap();
        let grid = cli(&["--random", "0", "--rng-seed", "3"])
            .initial_grid(&seed, catalog)
            .unwrap();
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_seed_cell_errors() {
        let catalog = Catalog::standard().unwrap();
        let outside = Seed::from_str("10 10\n10\n10 0").unwrap();
        let err = cli(&[]).initial_grid(&outside, catalog).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::CellOutOfBounds { row: 0, col: 10, .. })
        ));
        let huge = Seed::from_str("4294967296 4294967296\n5").unwrap();
        let err = cli(&[]).initial_grid(&huge, catalog).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidDimensions { .. })
        ));
    }
}
