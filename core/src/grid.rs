use core::fmt;
use core::ops::Index;

use ndarray::Array2;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size board of tiles. `None` marks a cell emptied by a removal; it
/// only survives until the next [`Grid::settle`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Option<Tile>>,
}

impl Grid {
    /// An all-empty grid, to be filled by [`Grid::refill`].
    pub fn empty(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        Ok(Self {
            cells: Array2::from_elem(size.to_nd_index(), None),
        })
    }

    /// A freshly generated, settled grid.
    pub fn generate<M>(size: Coord2, mode: &M, rng: &mut dyn RngCore) -> Result<Self>
    where
        M: GameMode + ?Sized,
    {
        let mut grid = Self::empty(size)?;
        grid.refill(mode, rng);
        Ok(grid)
    }

    /// Builds a grid from rows of tile values, top row first.
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let height: Coord = rows.len().try_into().map_err(|_| GameError::InvalidSize)?;
        let width: Coord = rows
            .first()
            .map_or(0, |row| row.len())
            .try_into()
            .map_err(|_| GameError::InvalidSize)?;
        let mut grid = Self::empty((height, width))?;

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != usize::from(width) {
                return Err(GameError::InvalidSize);
            }
            for (col_index, &value) in row.iter().enumerate() {
                grid.cells[[row_index, col_index]] = Some(Tile::new(value));
            }
        }

        Ok(grid)
    }

    pub(crate) fn from_cells(cells: Array2<Option<Tile>>) -> Self {
        Self { cells }
    }

    /// `(rows, columns)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // constructors only accept u8-sized dimensions
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Option<Tile>> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub(crate) fn set(&mut self, coords: Coord2, tile: Option<Tile>) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()] = tile;
        Ok(())
    }

    pub fn cells(&self) -> &Array2<Option<Tile>> {
        &self.cells
    }

    /// Empties every cell.
    pub(crate) fn clear(&mut self) {
        self.cells.fill(None);
    }

    #[cfg(test)]
    pub(crate) fn empty_count(&self) -> CellCount {
        // bounded by total_cells, which fits
        self.cells.iter().filter(|cell| cell.is_none()).count() as CellCount
    }

    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterates every position in row-major order together with its tile.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Option<Tile>)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &tile)| ((row as Coord, col as Coord), tile))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Moves every tile of each column down as far as it goes, keeping the
    /// column's order. Empty cells end up at the top.
    pub fn apply_gravity(&mut self) {
        let (rows, cols) = self.cells.dim();
        for col in 0..cols {
            let mut column = self.cells.column_mut(col);
            let mut write = rows;
            for row in (0..rows).rev() {
                if let Some(tile) = column[row] {
                    write -= 1;
                    column[row] = None;
                    column[write] = Some(tile);
                }
            }
        }
    }

    /// Fills every empty cell with a tile from `mode`, column by column. Each
    /// column fills from its lowest empty cell upwards, so new tiles stack in
    /// the order they would fall in from above.
    ///
    /// Returns how many tiles were generated.
    pub fn refill<M>(&mut self, mode: &M, rng: &mut dyn RngCore) -> CellCount
    where
        M: GameMode + ?Sized,
    {
        let (rows, cols) = self.cells.dim();
        let mut generated: CellCount = 0;
        for col in 0..cols {
            for row in (0..rows).rev() {
                let cell = &mut self.cells[[row, col]];
                if cell.is_none() {
                    *cell = Some(mode.generate_tile(rng));
                    generated += 1;
                }
            }
        }
        generated
    }

    /// Gravity followed by refill, leaving the grid settled.
    pub(crate) fn settle<M>(&mut self, mode: &M, rng: &mut dyn RngCore) -> CellCount
    where
        M: GameMode + ?Sized,
    {
        self.apply_gravity();
        let generated = self.refill(mode, rng);
        debug_assert!(self.is_settled());
        generated
    }
}

impl Index<Coord2> for Grid {
    type Output = Option<Tile>;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let mut first = true;
            for cell in row {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                match cell {
                    Some(tile) => write!(f, "{:>2}", tile)?,
                    None => f.write_str(" .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
