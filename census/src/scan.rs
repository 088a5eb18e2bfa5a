use std::ops::Index;

use itertools::Itertools;

use crate::{
    catalog::{Catalog, Category, Template},
    error::ConfigError,
    grid::Grid,
};

/// Per-category match counts for one generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OccurrenceCounts([usize; Category::COUNT]);

impl OccurrenceCounts {
    pub fn get(&self, category: Category) -> usize {
        self.0[category.index()]
    }

    pub fn increment(&mut self, category: Category) {
        self.0[category.index()] += 1;
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Counts in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Index<Category> for OccurrenceCounts {
    type Output = usize;

    fn index(&self, category: Category) -> &usize {
        &self.0[category.index()]
    }
}

impl FromIterator<(Category, usize)> for OccurrenceCounts {
    fn from_iter<T: IntoIterator<Item = (Category, usize)>>(iter: T) -> Self {
        let mut counts = Self::default();
        for (category, n) in iter {
            counts.0[category.index()] += n;
        }
        counts
    }
}

/// A template found at `origin` (its top left corner).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match<'c> {
    pub template: &'c Template,
    pub origin: (usize, usize),
}

impl Match<'_> {
    pub fn category(&self) -> Category {
        self.template.category()
    }
}

/// Every exact match of every template in `catalog`, template by template.
///
/// Origins never wrap: a shape crossing the grid edge is not found, even
/// though it evolves across the edge. Overlapping matches are all reported.
pub fn matches<'c>(grid: &Grid, catalog: &'c Catalog) -> Result<Vec<Match<'c>>, ConfigError> {
    catalog.check_fits(grid.width(), grid.height())?;
    Ok(match_iter(grid, catalog).collect())
}

/// Counts the matches of every template in `catalog`, per category.
pub fn scan(grid: &Grid, catalog: &Catalog) -> Result<OccurrenceCounts, ConfigError> {
    catalog.check_fits(grid.width(), grid.height())?;
    let mut counts = OccurrenceCounts::default();
    for m in match_iter(grid, catalog) {
        log::trace!("{} at {:?}", m.template.name(), m.origin);
        counts.increment(m.category());
    }
    Ok(counts)
}

fn match_iter<'a, 'c: 'a>(
    grid: &'a Grid,
    catalog: &'c Catalog,
) -> impl Iterator<Item = Match<'c>> + 'a {
    catalog.templates().iter().flat_map(move |template| {
        let rows = 0..=grid.height() - template.height();
        let cols = 0..=grid.width() - template.width();
        rows.cartesian_product(cols)
            .filter(move |&origin| template.matches_at(grid, origin))
            .map(move |origin| Match { template, origin })
    })
}
