use core::slice;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for cell counts and group sizes.
pub type CellCount = u16;

/// Grid position as `(row, column)`. Row 0 is the top of the grid.
pub type Coord2 = (Coord, Coord);

/// Cumulative and per-move score.
pub type Score = u32;

/// Number of one-shot removals the player may still use.
pub type PowerCount = u16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

// up, left, right, down
const DISPLACEMENTS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Orthogonal neighbours of a cell that lie inside `bounds`, in a fixed order.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            deltas: DISPLACEMENTS.iter(),
        }
    }
}

fn offset((row, col): Coord2, (dr, dc): (i8, i8), (rows, cols): Coord2) -> Option<Coord2> {
    let row = row.checked_add_signed(dr).filter(|&row| row < rows)?;
    let col = col.checked_add_signed(dc).filter(|&col| col < cols)?;
    Some((row, col))
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.deltas.find_map(|&delta| offset(center, delta, bounds))
    }
}
