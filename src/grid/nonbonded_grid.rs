//! `NonBondedGrid`: per-cell atom-index lists used for neighbor queries
//! during vdW/HHS scoring.
//!
//! Cells store `usize` indices into the owning `Model`'s atom list rather
//! than atom pointers/ids directly; `unique_atom_lists` sorts those indices
//! before returning them, so the result is identical regardless of the
//! order atoms were inserted in.

use std::collections::BTreeSet;

use crate::geometry::Coord;
use crate::grid::base::{Grid, GridIndex};
use crate::model::AtomId;

#[derive(Debug, Clone, Default)]
pub struct NonBondedGrid {
    pub grid: Option<Grid>,
    cells: Vec<Vec<AtomId>>,
}

impl NonBondedGrid {
    pub fn new(grid: Grid) -> Self {
        let n = grid.n_cells();
        NonBondedGrid {
            cells: vec![Vec::new(); n],
            grid: Some(grid),
        }
    }

    fn grid_ref(&self) -> &Grid {
        self.grid.as_ref().expect("NonBondedGrid used before initialization")
    }

    /// Appends `atom` to every cell within `radius` of `coord`.
    pub fn set_atom_lists(&mut self, atom: AtomId, coord: Coord, radius: f64) {
        let grid = self.grid_ref().clone();
        for idx in grid.sphere_indices(coord, radix_or_min_cell(&grid, radius)) {
            let flat = idx.flat(grid.nx, grid.ny);
            self.cells[flat].push(atom);
        }
    }

    /// All distinct atom indices across the cells touched by `indices`,
    /// sorted ascending (the open-question resolution: sorting by index
    /// rather than by insertion/pointer order makes the result
    /// reproducible no matter how the grid was populated).
    pub fn unique_atom_lists(&self, indices: &[GridIndex]) -> Vec<AtomId> {
        let grid = self.grid_ref();
        let mut unique: BTreeSet<AtomId> = BTreeSet::new();
        for idx in indices {
            if !grid.in_bounds(*idx) {
                continue;
            }
            let flat = idx.flat(grid.nx, grid.ny);
            unique.extend(self.cells[flat].iter().copied());
        }
        unique.into_iter().collect()
    }

    /// Convenience: atoms within `radius` of `center`, deterministically
    /// ordered.
    pub fn atoms_near(&self, center: Coord, radius: f64) -> Vec<AtomId> {
        let grid = self.grid_ref().clone();
        let indices = grid.sphere_indices(center, radius);
        self.unique_atom_lists(&indices)
    }
}

fn radix_or_min_cell(grid: &Grid, radius: f64) -> f64 {
    radius.max(grid.step * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_atom_lists_dedupes_and_sorts() {
        let grid = Grid::new(Coord::new(-3.0, -3.0, -3.0), 1.0, 7, 7, 7).unwrap();
        let mut nb = NonBondedGrid::new(grid.clone());
        nb.set_atom_lists(AtomId(3), Coord::ZERO, 1.0);
        nb.set_atom_lists(AtomId(1), Coord::ZERO, 1.0);
        nb.set_atom_lists(AtomId(1), Coord::ZERO, 1.0);

        let hits = nb.atoms_near(Coord::ZERO, 0.5);
        assert_eq!(hits, vec![AtomId(1), AtomId(3)]);
    }

    #[test]
    fn atoms_near_respects_radius() {
        let grid = Grid::new(Coord::new(-5.0, -5.0, -5.0), 1.0, 11, 11, 11).unwrap();
        let mut nb = NonBondedGrid::new(grid);
        nb.set_atom_lists(AtomId(1), Coord::new(3.0, 0.0, 0.0), 0.5);
        assert!(nb.atoms_near(Coord::ZERO, 1.0).is_empty());
        assert!(nb.atoms_near(Coord::ZERO, 4.0).contains(&AtomId(1)));
    }
}
