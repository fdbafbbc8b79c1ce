use alloc::collections::VecDeque;
use alloc::vec::Vec;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Connected set of at least two positions whose neighbouring tiles match
/// under a mode's rule. Tiles are recorded as they were when the group was
/// found, in discovery order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    cells: Vec<(Coord2, Tile)>,
}

impl Group {
    pub const MIN_SIZE: usize = 2;

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position the search started from.
    pub fn origin(&self) -> Coord2 {
        self.cells[0].0
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.iter().any(|&(pos, _)| pos == coords)
    }

    pub fn positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells.iter().map(|&(pos, _)| pos)
    }

    pub fn into_positions(self) -> impl Iterator<Item = Coord2> {
        self.cells.into_iter().map(|(pos, _)| pos)
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().map(|&(_, tile)| tile)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.cells.iter().copied()
    }
}

/// Lazily yields every group on `grid`, scanning seeds in row-major order.
/// Each call starts a fresh search.
pub fn find_groups<'a, M>(grid: &'a Grid, mode: &'a M) -> Groups<'a, M>
where
    M: GameMode + ?Sized,
{
    Groups {
        grid,
        mode,
        visited: Array2::from_elem(grid.size().to_nd_index(), false),
        cursor: 0,
    }
}

/// The group that includes `coords`, if the tile there has any matching
/// neighbour.
pub fn find_group_containing<M>(grid: &Grid, mode: &M, coords: Coord2) -> Result<Option<Group>>
where
    M: GameMode + ?Sized,
{
    let coords = grid.validate_coords(coords)?;
    let mut visited = Array2::from_elem(grid.size().to_nd_index(), false);
    Ok(flood(grid, mode, coords, &mut visited))
}

pub fn has_any_group<M>(grid: &Grid, mode: &M) -> bool
where
    M: GameMode + ?Sized,
{
    find_groups(grid, mode).next().is_some()
}

pub struct Groups<'a, M: ?Sized> {
    grid: &'a Grid,
    mode: &'a M,
    visited: Array2<bool>,
    cursor: usize,
}

impl<M> Iterator for Groups<'_, M>
where
    M: GameMode + ?Sized,
{
    type Item = Group;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, cols) = self.visited.dim();
        while self.cursor < self.visited.len() {
            let index = self.cursor;
            self.cursor += 1;

            let seed = ((index / cols) as Coord, (index % cols) as Coord);
            if self.visited[seed.to_nd_index()] {
                continue;
            }
            if let Some(group) = flood(self.grid, self.mode, seed, &mut self.visited) {
                return Some(group);
            }
        }
        None
    }
}

/// Breadth-first search over matching orthogonal neighbours starting at
/// `start`. Every reached cell is marked in `visited`.
fn flood<M>(grid: &Grid, mode: &M, start: Coord2, visited: &mut Array2<bool>) -> Option<Group>
where
    M: GameMode + ?Sized,
{
    let start_tile = grid[start]?;
    visited[start.to_nd_index()] = true;

    let mut cells = Vec::from([(start, start_tile)]);
    let mut to_visit = VecDeque::from([(start, start_tile)]);

    while let Some((coords, tile)) = to_visit.pop_front() {
        for neighbor in grid.iter_neighbors(coords) {
            if visited[neighbor.to_nd_index()] {
                continue;
            }
            let Some(neighbor_tile) = grid[neighbor] else {
                continue;
            };
            if !mode.matches(tile, neighbor_tile) {
                continue;
            }

            visited[neighbor.to_nd_index()] = true;
            cells.push((neighbor, neighbor_tile));
            to_visit.push_back((neighbor, neighbor_tile));
        }
    }

    (cells.len() >= Group::MIN_SIZE).then_some(Group { cells })
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    /// Every adjacent pair inside the group must be reachable through
    /// matching links from the origin.
    fn assert_connected<M: GameMode + ?Sized>(group: &Group, mode: &M) {
        let cells: Vec<_> = group.iter().collect();
        let mut reached = vec![false; cells.len()];
        reached[0] = true;
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..cells.len() {
                if !reached[i] {
                    continue;
                }
                for j in 0..cells.len() {
                    let ((r1, c1), t1) = cells[i];
                    let ((r2, c2), t2) = cells[j];
                    let adjacent = r1.abs_diff(r2) + c1.abs_diff(c2) == 1;
                    if !reached[j] && adjacent && mode.matches(t1, t2) {
                        reached[j] = true;
                        changed = true;
                    }
                }
            }
        }
        assert!(reached.iter().all(|&r| r), "group not connected: {group:?}");
    }

    #[test]
    fn finds_only_groups_of_two_or_more() {
        let mode = RegularMode::default();
        let grid = grid(&[&[1, 1, 2], &[3, 4, 2], &[5, 5, 5]]);

        let groups: Vec<_> = find_groups(&grid, &mode).collect();

        assert_eq!(groups.len(), 3);
        for group in &groups {
            assert!(group.len() >= Group::MIN_SIZE);
            assert_connected(group, &mode);
        }
        assert_eq!(groups[0].positions().collect::<Vec<_>>(), [(0, 0), (0, 1)]);
        assert_eq!(groups[1].positions().collect::<Vec<_>>(), [(0, 2), (1, 2)]);
        assert_eq!(groups[2].len(), 3);
    }

    #[test]
    fn search_is_deterministic_and_restartable() {
        let mode = RegularMode::default();
        let grid = grid(&[&[2, 2, 1], &[2, 1, 1], &[3, 3, 1]]);

        let first: Vec<_> = find_groups(&grid, &mode).collect();
        let second: Vec<_> = find_groups(&grid, &mode).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn diagonal_tiles_do_not_connect() {
        let mode = RegularMode::default();
        let grid = grid(&[&[1, 2], &[2, 1]]);

        assert_eq!(find_groups(&grid, &mode).count(), 0);
        assert!(!has_any_group(&grid, &mode));
    }

    #[test]
    fn group_containing_position() {
        let mode = RegularMode::default();
        let grid = grid(&[&[1, 1], &[2, 3]]);

        let group = find_group_containing(&grid, &mode, (0, 1)).unwrap().unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.contains((0, 0)));
        assert!(group.contains((0, 1)));
        assert_eq!(group.origin(), (0, 1));

        assert_eq!(find_group_containing(&grid, &mode, (1, 1)), Ok(None));
        assert_eq!(
            find_group_containing(&grid, &mode, (2, 0)),
            Err(GameError::OutOfBounds((2, 0)))
        );
    }

    #[test]
    fn empty_cells_never_join_a_group() {
        let mode = RegularMode::default();
        let mut grid = grid(&[&[1, 1, 1]]);
        grid.set((0, 1), None).unwrap();

        assert_eq!(find_group_containing(&grid, &mode, (0, 1)), Ok(None));
        assert_eq!(find_groups(&grid, &mode).count(), 0);
    }

    #[test]
    fn make_n_chains_complementary_pairs() {
        let mode = MakeNMode::new(13);
        let grid = grid(&[&[6, 7, 6], &[1, 1, 7]]);

        let groups: Vec<_> = find_groups(&grid, &mode).collect();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 4);
        assert_connected(&groups[0], &mode);
        assert!(!groups[0].contains((1, 0)));
    }

    #[test]
    fn lucky_wild_bridges_different_values() {
        let mode = LuckyMode::default();
        let grid = grid(&[&[1, 7, 2], &[3, 4, 5]]);

        let group = find_group_containing(&grid, &mode, (0, 0)).unwrap().unwrap();

        assert_eq!(group.len(), 4);
        assert!(group.contains((0, 2)));
        assert!(group.contains((1, 1)));
        assert_connected(&group, &mode);
    }
}
