use crate::{
    catalog::Catalog,
    error::ConfigError,
    grid::Grid,
    report::{Clock, ReportRecord},
    scan::scan,
};

/// Whether the owning loop should keep ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Halted,
}

/// A grid, the catalog it is scanned against and a generation counter.
///
/// Each [`tick`](Simulation::tick) steps the grid once, scans the new
/// generation and returns its report record. Once the generation limit is
/// reached the simulation is halted and ticks do nothing.
#[derive(Clone, Debug)]
pub struct Simulation<'c> {
    grid: Grid,
    catalog: &'c Catalog,
    generation: usize,
    limit: usize,
}

impl<'c> Simulation<'c> {
    /// Fails if any template in `catalog` is larger than `grid`.
    pub fn new(grid: Grid, catalog: &'c Catalog, limit: usize) -> Result<Self, ConfigError> {
        catalog.check_fits(grid.width(), grid.height())?;
        Ok(Self {
            grid,
            catalog,
            generation: 0,
            limit,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn state(&self) -> LoopState {
        if self.generation >= self.limit {
            LoopState::Halted
        } else {
            LoopState::Running
        }
    }

    pub fn tick(&mut self, clock: &dyn Clock) -> Result<Option<ReportRecord>, ConfigError> {
        if self.state() == LoopState::Halted {
            return Ok(None);
        }
        self.grid = self.grid.step();
        let counts = scan(&self.grid, self.catalog)?;
        log::debug!(
            "generation {}: population {}, {} occurrences",
            self.generation + 1,
            self.grid.population(),
            counts.total()
        );
        let record = ReportRecord::new(counts, self.grid.dims(), self.generation, clock);
        self.generation += 1;
        Ok(Some(record))
    }

    /// Ticks until halted, handing every record to `observer`.
    pub fn run(
        &mut self,
        clock: &dyn Clock,
        mut observer: impl FnMut(&Grid, &ReportRecord),
    ) -> Result<(), ConfigError> {
        while let Some(record) = self.tick(clock)? {
            observer(&self.grid, &record);
        }
        Ok(())
    }
}
