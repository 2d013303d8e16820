use std::path::{Path, PathBuf};

use glam::IVec2;

use crate::error::{GameError, Result};

/// Cell value meaning "nothing here" in every layer.
pub const EMPTY_CELL: i32 = -1;

/// One non-empty cell of a layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub value: i32,
}

impl Cell {
    /// Top-left pixel of this cell.
    pub fn pixel_pos(&self, tile_size: i32) -> IVec2 {
        IVec2::new(self.col as i32 * tile_size, self.row as i32 * tile_size)
    }
}

/// A rectangular grid of integers describing one map layer.
///
/// Rows are validated to share one length at construction, so `cols()` is
/// meaningful for every row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<i32>>,
}

impl Layout {
    /// Build from already-parsed rows. Fails on ragged rows.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        check_rectangular(&rows, Path::new("<memory>"), |i| i + 1)?;
        Ok(Self { rows })
    }

    /// Read and parse a comma-separated layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| GameError::missing(path, e))?;
        let layout = Self::parse(&source, path)?;
        log::debug!(
            "[layout] {}: {}x{} cells",
            path.display(),
            layout.cols(),
            layout.rows()
        );
        Ok(layout)
    }

    /// Parse layout text. `origin` is only used in error messages.
    pub fn parse(source: &str, origin: &Path) -> Result<Self> {
        let mut rows = Vec::new();
        let mut line_numbers = Vec::new();

        for (line_idx, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for (col_idx, cell) in line.split(',').enumerate() {
                let cell = cell.trim();
                let value = cell.parse::<i32>().map_err(|_| GameError::MalformedLayout {
                    path: origin.to_path_buf(),
                    line: line_idx + 1,
                    column: col_idx + 1,
                    cell: cell.to_string(),
                })?;
                row.push(value);
            }
            rows.push(row);
            line_numbers.push(line_idx + 1);
        }

        check_rectangular(&rows, origin, |i| line_numbers[i])?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn as_rows(&self) -> &[Vec<i32>] {
        &self.rows
    }

    /// Every cell that is not `EMPTY_CELL`, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|&(_, &value)| value != EMPTY_CELL)
                .map(move |(col, &value)| Cell { row, col, value })
        })
    }

    /// Pixel size of the whole layer.
    pub fn pixel_size(&self, tile_size: i32) -> IVec2 {
        IVec2::new(self.cols() as i32 * tile_size, self.rows() as i32 * tile_size)
    }
}

fn check_rectangular(
    rows: &[Vec<i32>],
    origin: &Path,
    line_of: impl Fn(usize) -> usize,
) -> Result<()> {
    let Some(expected) = rows.first().map(Vec::len) else { return Ok(()) };
    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.len() != expected {
            return Err(GameError::RaggedLayout {
                path: PathBuf::from(origin),
                line: line_of(i),
                expected,
                found: row.len(),
            });
        }
    }
    Ok(())
}
