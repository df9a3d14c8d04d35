use std::str::FromStr;

use glam::IVec2;

/// Texture code stored in every grid cell.
pub type TextureId = u8;

/// Empty, passable cell. Also reported by rays that leave the map.
pub const NO_TEXTURE: TextureId = 0;

/// Reserved code marking the level-exit trigger.
pub const EXIT_TRIGGER: TextureId = 5;

const SAMPLE: [[TextureId; 5]; 5] = [
    [1, 1, 1, 1, 1],
    [1, 0, 2, 0, 1],
    [1, 0, 0, 0, 1],
    [1, 0, 0, 0, 1],
    [1, 1, 1, 1, 1],
];

/// What a grid coordinate holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall(TextureId),
    Exit,
    OutOfBounds,
}

impl Cell {
    #[inline]
    pub fn is_passable(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Texture to draw when a ray stops here; out-of-bounds draws nothing.
    #[inline]
    pub fn texture(self) -> TextureId {
        match self {
            Cell::Empty | Cell::OutOfBounds => NO_TEXTURE,
            Cell::Wall(id) => id,
            Cell::Exit => EXIT_TRIGGER,
        }
    }
}

/// Things that can go wrong when building a grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    /// Row `row` does not have as many cells as row 0.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: `{token}` is not a texture code (0..=255)")]
    BadCell { line: usize, token: String },
}

/// Rectangular occupancy map, read-only once a level is running.
///
/// * `x` selects the row, `y` the column: `cell(x, y) == rows[x][y]`.
/// * Storage is one row-major buffer; every accessor is bounds-checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<TextureId>,
}

impl Grid {
    /// Build a grid from nested rows. Rejects empty and ragged input.
    pub fn new<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: AsRef<[TextureId]>,
    {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut n_rows = 0;

        for (i, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *cols.get_or_insert(row.len());
            if row.len() != expected {
                return Err(GridError::Ragged {
                    row: i,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
            n_rows += 1;
        }

        match cols {
            Some(cols) if cols > 0 => Ok(Self {
                rows: n_rows,
                cols,
                cells,
            }),
            _ => Err(GridError::Empty),
        }
    }

    /// The 5×5 demo map: walls all round, a blue block at (1, 2).
    pub fn sample() -> Self {
        Self {
            rows: SAMPLE.len(),
            cols: SAMPLE[0].len(),
            cells: SAMPLE.concat(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.rows && (y as usize) < self.cols
    }

    /// Raw texture code at `(x, y)`, `None` outside the map.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<TextureId> {
        if self.contains(x, y) {
            Some(self.cells[x as usize * self.cols + y as usize])
        } else {
            None
        }
    }

    pub fn cell(&self, x: i32, y: i32) -> Cell {
        match self.get(x, y) {
            None => Cell::OutOfBounds,
            Some(NO_TEXTURE) => Cell::Empty,
            Some(EXIT_TRIGGER) => Cell::Exit,
            Some(id) => Cell::Wall(id),
        }
    }

    #[inline]
    pub fn cell_at(&self, c: IVec2) -> Cell {
        self.cell(c.x, c.y)
    }

    /// Iterate rows as slices, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[TextureId]> {
        self.cells.chunks_exact(self.cols)
    }
}

/// Plain-text map: one row per line, cells split by whitespace or commas,
/// `#` starts a comment.
///
/// ```text
/// # sample
/// 1 1 1
/// 1 0 1
/// 1 1 1
/// ```
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<TextureId>> = Vec::new();

        for (n, line) in s.lines().enumerate() {
            let line = line.split('#').next().unwrap_or_default();
            let row = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(|t| {
                    t.parse::<TextureId>().map_err(|_| GridError::BadCell {
                        line: n + 1,
                        token: t.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !row.is_empty() {
                rows.push(row);
            }
        }

        Grid::new(rows)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_cells() {
        let g = Grid::new([[0u8, 1, 5], [7, 0, 0]]).unwrap();
        assert_eq!((g.rows(), g.cols()), (2, 3));
        assert_eq!(g.cell(0, 0), Cell::Empty);
        assert_eq!(g.cell(0, 1), Cell::Wall(1));
        assert_eq!(g.cell(0, 2), Cell::Exit);
        assert_eq!(g.cell(1, 0), Cell::Wall(7));
        assert_eq!(g.cell(2, 0), Cell::OutOfBounds);
        assert_eq!(g.cell(-1, 0), Cell::OutOfBounds);
        assert_eq!(g.cell(0, 3), Cell::OutOfBounds);
    }

    #[test]
    fn x_selects_row() {
        let g = Grid::sample();
        // rows[1][2] is the blue block
        assert_eq!(g.get(1, 2), Some(2));
        assert_eq!(g.get(2, 1), Some(0));
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 0], vec![1, 1, 1]];
        assert_eq!(
            Grid::new(rows).unwrap_err(),
            GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn empty_rejected() {
        let none: Vec<Vec<u8>> = Vec::new();
        assert_eq!(Grid::new(none).unwrap_err(), GridError::Empty);
        let blank: Vec<Vec<u8>> = vec![vec![], vec![]];
        assert_eq!(Grid::new(blank).unwrap_err(), GridError::Empty);
    }

    #[test]
    fn parse_text_map() {
        let text = "# border\n1, 1, 1\n1 0 1   # middle\n\n1,1,1\n";
        let g: Grid = text.parse().unwrap();
        assert_eq!((g.rows(), g.cols()), (3, 3));
        assert_eq!(g.cell(1, 1), Cell::Empty);
        assert_eq!(g.iter_rows().count(), 3);
    }

    #[test]
    fn bundled_maze_loads() {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("maps")
            .join("maze.txt");
        let g: Grid = std::fs::read_to_string(path).unwrap().parse().unwrap();
        assert_eq!((g.rows(), g.cols()), (8, 10));
        assert_eq!(g.cell(1, 1), Cell::Empty);
        assert_eq!(g.cell(7, 8), Cell::Exit);
    }

    #[test]
    fn parse_reports_bad_token() {
        let err = "1 1\n1 x\n".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            GridError::BadCell {
                line: 2,
                token: "x".into()
            }
        );
        assert!(matches!(
            "1 300".parse::<Grid>(),
            Err(GridError::BadCell { .. })
        ));
    }
}
