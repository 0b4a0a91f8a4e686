use std::{fs, io, path::Path};

use ndarray::Array2;
use thiserror::Error;

use crate::variables::{GridValue, Position};

// data computed by the build script (build.rs):

macro_rules! include_generated {
    ($filename:literal) => {
        include!(concat!(env!("OUT_DIR"), "/", $filename))
    };
}

/// The bundled layouts, keyed by name.
pub static LAYOUTS: phf::Map<&'static str, &'static str> = include_generated!("LAYOUTS.rs");

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    #[error("layout row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown layout character {ch:?} at ({x}, {y})")]
    UnknownCell { ch: char, x: usize, y: usize },
    #[error("layout has no Pacman start position")]
    MissingPacman,
    #[error("layout has more than one Pacman start position")]
    MultiplePacmen,
    #[error("no bundled layout named {0:?}")]
    UnknownLayout(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A parsed maze: static cells plus the agents' starting positions.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Cells indexed by `[x, y]`, with `y = 0` at the bottom.
    pub cells: Array2<GridValue>,
    pub pacman_start: Position,
    /// Ghost starting positions, in agent-index order (agent `i + 1` starts at `ghost_starts[i]`).
    pub ghost_starts: Vec<Position>,
}

impl Layout {
    /// Parses the text layout format:
    /// `%` wall, `.` food, `o` capsule, `P` Pacman, `G` or `1`-`4` ghost, space empty.
    ///
    /// The first text row is the top of the maze. Ghosts are ordered by their
    /// digit (`G` counts as 1), then bottom row first and left to right.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Array2::from_elem((width, height), GridValue::Empty);
        let mut pacman_start = None;
        let mut ghosts: Vec<(u32, Position)> = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LayoutError::Ragged {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            let y = height - 1 - row_index;
            for (x, &ch) in row.iter().enumerate() {
                cells[(x, y)] = match ch {
                    '%' => GridValue::Wall,
                    '.' => GridValue::Food,
                    'o' => GridValue::Capsule,
                    ' ' => GridValue::Empty,
                    'P' => {
                        if pacman_start.replace((x, y)).is_some() {
                            return Err(LayoutError::MultiplePacmen);
                        }
                        GridValue::Empty
                    }
                    'G' => {
                        ghosts.push((1, (x, y)));
                        GridValue::Empty
                    }
                    '1'..='4' => {
                        ghosts.push((ch.to_digit(10).unwrap_or(1), (x, y)));
                        GridValue::Empty
                    }
                    _ => return Err(LayoutError::UnknownCell { ch, x, y }),
                };
            }
        }

        ghosts.sort_by_key(|&(number, (x, y))| (number, y, x));
        Ok(Self {
            cells,
            pacman_start: pacman_start.ok_or(LayoutError::MissingPacman)?,
            ghost_starts: ghosts.into_iter().map(|(_, pos)| pos).collect(),
        })
    }

    /// Returns the bundled layout with the given name (with or without a `.lay` suffix).
    pub fn named(name: &str) -> Result<Self, LayoutError> {
        let key = name.strip_suffix(".lay").unwrap_or(name);
        let text = LAYOUTS
            .get(key)
            .ok_or_else(|| LayoutError::UnknownLayout(name.to_owned()))?;
        Self::parse(text)
    }

    /// Reads and parses a layout file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Loads `name_or_path` as a file if one exists there, otherwise as a bundled layout name.
    pub fn load(name_or_path: &str) -> Result<Self, LayoutError> {
        if Path::new(name_or_path).is_file() {
            Self::from_file(name_or_path)
        } else {
            Self::named(name_or_path)
        }
    }

    pub fn width(&self) -> usize {
        self.cells.dim().0
    }

    pub fn height(&self) -> usize {
        self.cells.dim().1
    }

    /// Returns the number of agents (Pacman plus ghosts) in this layout.
    pub fn num_agents(&self) -> usize {
        1 + self.ghost_starts.len()
    }

    /// Returns true if `pos` is a wall or outside the maze.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.cells.get(pos).map_or(true, |&cell| cell == GridValue::Wall)
    }

    pub fn walls(&self) -> Array2<bool> {
        self.cells.mapv(|cell| cell == GridValue::Wall)
    }

    pub fn food(&self) -> Array2<bool> {
        self.cells.mapv(|cell| cell == GridValue::Food)
    }

    /// Returns the capsule positions in scan order (bottom row first).
    pub fn capsules(&self) -> Vec<Position> {
        let mut capsules: Vec<Position> = self
            .cells
            .indexed_iter()
            .filter(|&(_, &cell)| cell == GridValue::Capsule)
            .map(|(pos, _)| pos)
            .collect();
        capsules.sort_by_key(|&(x, y)| (y, x));
        capsules
    }
}
