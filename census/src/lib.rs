//! Conway's Game of Life on a wrapped grid, with a census of the still
//! lifes, oscillators and spaceships present in each generation.

pub mod catalog;
pub mod error;
pub mod grid;
pub mod report;
pub mod scan;
pub mod simulation;
mod step;


pub use crate::{
    catalog::{Catalog, Category, Template},
    error::{CatalogError, ConfigError, SinkError},
    grid::{Cell, Grid},
    report::{Clock, FileSink, ReportRecord, ReportSink, SystemClock, Timestamp, WriterSink, emit},
    scan::{Match, OccurrenceCounts, matches, scan},
    simulation::{LoopState, Simulation},
    step::step,
};
