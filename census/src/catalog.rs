//! The catalog of recognisable shapes.
//!
//! Every template is a small text-art matrix (`o` alive, `.` dead) with a
//! one-cell dead margin; the margin takes part in matching, so a shape only
//! counts when it is isolated from its surroundings.

use std::{collections::HashSet, fmt::Display, str::FromStr, sync::OnceLock};

use crate::{
    error::{CatalogError, ConfigError},
    grid::{Cell, CellRows, CellRowsError, Grid},
};

/// The shape families counted in a report, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Block,
    Beehive,
    Loaf,
    Boat,
    Tub,
    Blinker,
    Toad,
    Beacon,
    Glider,
    LightweightSpaceship,
}

impl Category {
    pub const COUNT: usize = 10;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Block,
        Category::Beehive,
        Category::Loaf,
        Category::Boat,
        Category::Tub,
        Category::Blinker,
        Category::Toad,
        Category::Beacon,
        Category::Glider,
        Category::LightweightSpaceship,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Row label in the statistics table.
    pub fn label(self) -> &'static str {
        match self {
            Category::Block => "Blocks",
            Category::Beehive => "Beehives",
            Category::Loaf => "Loafs",
            Category::Boat => "Boats",
            Category::Tub => "Tubs",
            Category::Blinker => "Blinkers",
            Category::Toad => "Toads",
            Category::Beacon => "Beacons",
            Category::Glider => "Gliders",
            Category::LightweightSpaceship => "Lw spaceships",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::Block => "block",
            Category::Beehive => "beehive",
            Category::Loaf => "loaf",
            Category::Boat => "boat",
            Category::Tub => "tub",
            Category::Blinker => "blinker",
            Category::Toad => "toad",
            Category::Beacon => "beacon",
            Category::Glider => "glider",
            Category::LightweightSpaceship => "lightweight-spaceship",
        })
    }
}

/// One orientation or phase of a shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    name: String,
    category: Category,
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Template {
    pub fn parse(
        name: impl Into<String>,
        category: Category,
        art: &str,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        match CellRows::from_str(art) {
            Ok(CellRows {
                height,
                width,
                cells,
            }) => Ok(Self {
                name,
                category,
                height,
                width,
                cells,
            }),
            Err(CellRowsError::Empty) => Err(CatalogError::Empty(name)),
            Err(CellRowsError::Ragged { row, got, expected }) => Err(CatalogError::RaggedRow {
                name,
                row,
                got,
                expected,
            }),
            Err(CellRowsError::Invalid(found)) => Err(CatalogError::InvalidCell { name, found }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.height <= height && self.width <= width
    }

    /// Whether the window of `grid` with its top left corner at `origin`
    /// equals this template cell for cell. The window must lie inside the
    /// grid; nothing wraps.
    pub fn matches_at(&self, grid: &Grid, (row, col): (usize, usize)) -> bool {
        if !grid.contains_window((row, col), (self.height, self.width)) {
            return false;
        }
        self.cells.chunks(self.width).enumerate().all(|(dy, line)| {
            line.iter()
                .enumerate()
                .all(|(dx, &c)| grid.cell(row + dy, col + dx) == c)
        })
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {} x {})", self.name, self.category, self.height, self.width)
    }
}

/// An ordered, validated set of templates.
#[derive(Clone, Debug)]
pub struct Catalog {
    templates: Vec<Template>,
}

impl Catalog {
    pub fn new(templates: Vec<Template>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        for t in &templates {
            if !names.insert(t.name.as_str()) {
                return Err(CatalogError::DuplicateName(t.name.clone()));
            }
        }
        Ok(Self { templates })
    }

    /// The built-in catalog, built and validated on first use.
    pub fn standard() -> Result<&'static Catalog, CatalogError> {
        static STANDARD: OnceLock<Result<Catalog, CatalogError>> = OnceLock::new();
        STANDARD
            .get_or_init(|| {
                let catalog = STANDARD_TEMPLATES
                    .iter()
                    .map(|&(name, category, art)| Template::parse(name, category, art))
                    .collect::<Result<Vec<_>, _>>()
                    .and_then(Catalog::new);
                if let Ok(catalog) = &catalog {
                    log::debug!(
                        "built standard catalog with {} templates",
                        catalog.templates.len()
                    );
                }
                catalog
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// Fails on the first template larger than a `width` x `height` grid.
    pub fn check_fits(&self, width: usize, height: usize) -> Result<(), ConfigError> {
        match self.templates.iter().find(|t| !t.fits(width, height)) {
            Some(t) => Err(ConfigError::TemplateExceedsGrid {
                name: t.name.clone(),
                h: t.height,
                w: t.width,
                width,
                height,
            }),
            None => Ok(()),
        }
    }
}

const STANDARD_TEMPLATES: &[(&str, Category, &str)] = &[
    (
        "block",
        Category::Block,
        "
        ....
        .oo.
        .oo.
        ....",
    ),
    (
        "beehive",
        Category::Beehive,
        "
        ......
        ..oo..
        .o..o.
        ..oo..
        ......",
    ),
    (
        "loaf",
        Category::Loaf,
        "
        ......
        ..oo..
        .o..o.
        ..o.o.
        ...o..
        ......",
    ),
    (
        "boat",
        Category::Boat,
        "
        .....
        .oo..
        .o.o.
        ..o..
        .....",
    ),
    (
        "tub",
        Category::Tub,
        "
        .....
        ..o..
        .o.o.
        ..o..
        .....",
    ),
    (
        "blinker-vertical",
        Category::Blinker,
        "
        ...
        .o.
        .o.
        .o.
        ...",
    ),
    (
        "blinker-horizontal",
        Category::Blinker,
        "
        .....
        .ooo.
        .....",
    ),
    (
        "toad-1",
        Category::Toad,
        "
        ......
        ...o..
        .o..o.
        .o..o.
        ..o...
        ......",
    ),
    (
        "toad-2",
        Category::Toad,
        "
        ......
        ..ooo.
        .ooo..
        ......",
    ),
    (
        "beacon-1",
        Category::Beacon,
        "
        ......
        .oo...
        .oo...
        ...oo.
        ...oo.
        ......",
    ),
    (
        "beacon-2",
        Category::Beacon,
        "
        ......
        .oo...
        .o....
        ....o.
        ...oo.
        ......",
    ),
    (
        "glider-1",
        Category::Glider,
        "
        .......
        ...o...
        ....o..
        ..ooo..
        .......",
    ),
    (
        "glider-2",
        Category::Glider,
        "
        .....
        .o.o.
        ..oo.
        ..o..
        .....",
    ),
    (
        "glider-3",
        Category::Glider,
        "
        .....
        ...o.
        .o.o.
        ..oo.
        .....",
    ),
    (
        "glider-4",
        Category::Glider,
        "
        .....
        .o...
        ..oo.
        .oo..
        .....",
    ),
    (
        "lwss-1",
        Category::LightweightSpaceship,
        "
        .......
        .o..o..
        .....o.
        .o...o.
        ..oooo.
        .......",
    ),
    (
        "lwss-2",
        Category::LightweightSpaceship,
        "
        .......
        ...oo..
        .oo.oo.
        .oooo..
        ..oo...
        .......",
    ),
    (
        "lwss-3",
        Category::LightweightSpaceship,
        "
        .......
        ..oooo.
        .o...o.
        .....o.
        .o..o..
        .......",
    ),
    (
        "lwss-4",
        Category::LightweightSpaceship,
        "
        .......
        ..oo...
        .oooo..
        .oo.oo.
        ...oo..
        .......",
    ),
];
