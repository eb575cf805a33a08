// Static tile map the rays are cast against.

/// Rectangular grid of cell codes, row-major, fixed at construction.
///
/// Code `0` is walkable; code `v > 0` is a wall drawn with texture index
/// `v - 1`. The playable area must be enclosed by nonzero border cells —
/// the caster reports a frame error when a ray leaves the grid instead.
#[derive(Debug)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    max_code: u8,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map dimensions must be nonzero, got {width}x{height}")]
    Empty { width: usize, height: usize },

    #[error("{got} cells do not fill a {width}x{height} map")]
    WrongCellCount {
        width: usize,
        height: usize,
        got: usize,
    },
}

impl GridMap {
    /// Build a map from row-major cells (`cells[y * width + x]`).
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty { width, height });
        }
        if cells.len() != width * height {
            return Err(MapError::WrongCellCount {
                width,
                height,
                got: cells.len(),
            });
        }
        let max_code = cells.iter().copied().max().unwrap_or(0);
        Ok(Self {
            width,
            height,
            cells,
            max_code,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell code at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// `true` when `(x, y)` is inside the grid and walkable.
    /// This is the whole collision model; callers gate movement on it.
    #[inline]
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) == Some(0)
    }

    /// Largest cell code present; lets the renderer validate the texture
    /// library against a map once per frame instead of per cell.
    #[inline]
    pub fn max_code(&self) -> u8 {
        self.max_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates_dimensions() {
        assert_eq!(
            GridMap::new(0, 4, vec![]).unwrap_err(),
            MapError::Empty { width: 0, height: 4 }
        );
        assert_eq!(
            GridMap::new(3, 3, vec![0; 8]).unwrap_err(),
            MapError::WrongCellCount {
                width: 3,
                height: 3,
                got: 8
            }
        );
    }

    #[test]
    fn lookup_is_row_major_and_bounded() {
        #[rustfmt::skip]
        let map = GridMap::new(3, 2, vec![
            1, 2, 3,
            4, 0, 6,
        ])
        .unwrap();
        assert_eq!(map.cell(2, 0), Some(3));
        assert_eq!(map.cell(0, 1), Some(4));
        assert_eq!(map.cell(3, 0), None);
        assert_eq!(map.cell(0, 2), None);
        assert_eq!(map.cell(-1, 0), None);
        assert!(map.is_open(1, 1));
        assert!(!map.is_open(1, 0));
        assert!(!map.is_open(-1, -1));
        assert_eq!(map.max_code(), 6);
    }
}
