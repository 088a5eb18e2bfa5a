use std::{thread, time::Duration};

use census::{Clock, ConfigError, ReportSink, Simulation, emit};
use log::{info, warn};

/// How a run ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub generations: usize,
    /// Reports that could not be written.
    pub skipped: usize,
}

pub struct Driver<'s> {
    pub sink: &'s mut dyn ReportSink,
    pub interval: Duration,
    pub show: bool,
}

impl Driver<'_> {
    /// Ticks `sim` until it halts, appending each report to the sink and
    /// sleeping `interval` between generations. A report that cannot be
    /// written is logged and skipped.
    pub fn run(&mut self, sim: &mut Simulation, clock: &dyn Clock) -> Result<Summary, ConfigError> {
        info!(
            "running {} generations on a {} x {} grid",
            sim.limit(),
            sim.grid().width(),
            sim.grid().height()
        );
        let mut summary = Summary::default();
        sim.run(clock, |grid, record| {
            if let Err(err) = emit(record, self.sink) {
                warn!("skipping report for generation {}: {err}", record.generation + 1);
                summary.skipped += 1;
            }
            if self.show {
                eprintln!("{grid}\n");
            }
            summary.generations += 1;
            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        })?;
        info!("halted after {} generations", summary.generations);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use census::{Catalog, Grid, SinkError, SystemClock};
    use chrono::DateTime;

    struct Flaky {
        calls: usize,
        written: String,
    }

    impl ReportSink for Flaky {
        // Every other append fails.
        fn append(&mut self, text: &str) -> Result<(), SinkError> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                return Err(std::io::Error::other("sink unavailable").into());
            }
            self.written.push_str(text);
            Ok(())
        }
    }

    fn blinker_sim(limit: usize) -> Simulation<'static> {
        let catalog = Catalog::standard().unwrap();
        let mut grid = Grid::new(12, 12).unwrap();
        grid.place((4, 4), catalog.get("blinker-horizontal").unwrap())
            .unwrap();
        Simulation::new(grid, catalog, limit).unwrap()
    }

    #[test]
    fn test_reports_every_generation() {
        let mut sim = blinker_sim(4);
        let mut sink = String::new();
        let summary = Driver {
            sink: &mut sink,
            interval: Duration::ZERO,
            show: false,
        }
        .run(&mut sim, &DateTime::UNIX_EPOCH.fixed_offset())
        .unwrap();
        assert_eq!(
            summary,
            Summary {
                generations: 4,
                skipped: 0
            }
        );
        assert_eq!(sink.matches("Simulation: at ").count(), 4);
        assert_eq!(sink.matches("Blinkers     |     1     |     100.00%").count(), 4);
        assert!(sink.contains("Iteration:    4\n"));
        assert!(sink.starts_with("Simulation: at 1970-01-01 00:00:00.000000\n"));
    }

    #[test]
    fn test_failed_reports_are_skipped() {
        let mut sim = blinker_sim(5);
        let mut sink = Flaky {
            calls: 0,
            written: String::new(),
        };
        let summary = Driver {
            sink: &mut sink,
            interval: Duration::ZERO,
            show: false,
        }
        .run(&mut sim, &SystemClock)
        .unwrap();
        assert_eq!(summary.generations, 5);
        assert_eq!(summary.skipped, 2);
        assert_eq!(sink.written.matches("Iteration:").count(), 3);
        assert!(sink.written.contains("Iteration:    5\n"));
        assert!(!sink.written.contains("Iteration:    4\n"));
    }
}
