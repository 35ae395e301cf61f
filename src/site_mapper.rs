//! Site mappers:
//! build a [`DockingSite`] from either an explicit sphere or the volume
//! swept by a reference ligand, by flood-filling accessible grid cells and
//! handing each connected region to [`Cavity`].

use crate::cavity::Cavity;
use crate::constants::{DEFAULT_MIN_CAVITY_VOLUME, MAX_CAVITIES};
use crate::docking_site::DockingSite;
use crate::error::{CoreError, CoreResult};
use crate::geometry::Coord;
use crate::grid::base::{Grid, GridIndex};
use crate::model::Model;

const OCCUPIED: f64 = 1.0;
const EMPTY: f64 = 0.0;

/// Flood-fills 6-connected regions of `OCCUPIED` cells in `occupancy`,
/// returning one `Vec<GridIndex>` per region, largest first, capped at
/// `MAX_CAVITIES`.
fn flood_fill_regions(grid: &Grid, occupancy: &[f64]) -> Vec<Vec<GridIndex>> {
    let mut visited = vec![false; occupancy.len()];
    let mut regions = Vec::new();

    for iz in 0..grid.nz {
        for iy in 0..grid.ny {
            for ix in 0..grid.nx {
                let start = GridIndex::new(ix, iy, iz);
                let start_flat = start.flat(grid.nx, grid.ny);
                if visited[start_flat] || (occupancy[start_flat] - OCCUPIED).abs() > grid.tolerance {
                    continue;
                }
                let mut region = Vec::new();
                let mut stack = vec![start];
                visited[start_flat] = true;
                while let Some(idx) = stack.pop() {
                    region.push(idx);
                    for (dx, dy, dz) in [(-1, 0, 0), (1, 0, 0), (0, -1, 0), (0, 1, 0), (0, 0, -1), (0, 0, 1)] {
                        let n = GridIndex::new(idx.ix + dx, idx.iy + dy, idx.iz + dz);
                        if !grid.in_bounds(n) {
                            continue;
                        }
                        let flat = n.flat(grid.nx, grid.ny);
                        if !visited[flat] && (occupancy[flat] - OCCUPIED).abs() <= grid.tolerance {
                            visited[flat] = true;
                            stack.push(n);
                        }
                    }
                }
                regions.push(region);
            }
        }
    }

    regions.retain(|r| r.len() >= DEFAULT_MIN_CAVITY_VOLUME);
    regions.sort_by_key(|r| std::cmp::Reverse(r.len()));
    regions.truncate(MAX_CAVITIES);
    regions
}

fn regions_to_cavities(grid: &Grid, regions: Vec<Vec<GridIndex>>) -> Vec<Cavity> {
    regions
        .into_iter()
        .map(|region| {
            let coords = region.into_iter().map(|idx| grid.index_to_coord(idx)).collect();
            Cavity::new(coords, Coord::new(grid.step, grid.step, grid.step))
        })
        .collect()
}

/// Maps a docking site as every grid cell within `radius` of `center`.
pub struct SphereSiteMapper {
    pub center: Coord,
    pub radius: f64,
    pub step: f64,
    pub border: f64,
}

impl SphereSiteMapper {
    pub fn map(&self) -> CoreResult<DockingSite> {
        if self.radius <= 0.0 {
            return Err(CoreError::BadArgument(format!("sphere radius must be positive, got {}", self.radius)));
        }
        let half = self.radius + self.border;
        let n = ((2.0 * half / self.step).ceil() as i64).max(1) + 1;
        let min = self.center - Coord::new(half, half, half);
        let grid = Grid::new(min, self.step, n, n, n)?;

        let mut occupancy = vec![EMPTY; grid.n_cells()];
        for idx in grid.sphere_indices(self.center, self.radius) {
            occupancy[idx.flat(grid.nx, grid.ny)] = OCCUPIED;
        }

        let cavities = regions_to_cavities(&grid, flood_fill_regions(&grid, &occupancy));
        Ok(DockingSite::new(cavities, self.border))
    }
}

/// Maps a docking site as the volume swept by every atom of a reference
/// ligand model, each dilated by its own vdW radius.
pub struct LigandSiteMapper<'a> {
    pub reference: &'a Model,
    pub step: f64,
    pub border: f64,
    pub padding: f64,
}

impl<'a> LigandSiteMapper<'a> {
    pub fn map(&self) -> CoreResult<DockingSite> {
        if self.reference.atom_count() == 0 {
            return Err(CoreError::InvalidRequest("reference ligand model has no atoms".into()));
        }
        let mut min = Coord::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Coord::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for atom in self.reference.atoms() {
            min = min.min(&atom.coord);
            max = max.max(&atom.coord);
        }
        let pad = self.padding + self.border;
        min = min - Coord::new(pad, pad, pad);
        max = max + Coord::new(pad, pad, pad);

        let nx = (((max.x - min.x) / self.step).ceil() as i64).max(1) + 1;
        let ny = (((max.y - min.y) / self.step).ceil() as i64).max(1) + 1;
        let nz = (((max.z - min.z) / self.step).ceil() as i64).max(1) + 1;
        let grid = Grid::new(min, self.step, nx, ny, nz)?;

        let mut occupancy = vec![EMPTY; grid.n_cells()];
        for atom in self.reference.atoms() {
            let radius = if atom.vdw_radius > 0.0 { atom.vdw_radius } else { self.padding };
            for idx in grid.sphere_indices(atom.coord, radius + self.padding) {
                occupancy[idx.flat(grid.nx, grid.ny)] = OCCUPIED;
            }
        }

        let cavities = regions_to_cavities(&grid, flood_fill_regions(&grid, &occupancy));
        Ok(DockingSite::new(cavities, self.border))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_site_mapper_produces_one_cavity() {
        let mapper = SphereSiteMapper {
            center: Coord::ZERO,
            radius: 3.0,
            step: 0.5,
            border: 2.0,
        };
        let site = mapper.map().unwrap();
        assert_eq!(site.cavities.len(), 1);
        assert!(site.cavities[0].cell_count() > 0);
    }

    #[test]
    fn sphere_site_mapper_rejects_nonpositive_radius() {
        let mapper = SphereSiteMapper {
            center: Coord::ZERO,
            radius: 0.0,
            step: 0.5,
            border: 1.0,
        };
        assert!(mapper.map().is_err());
    }

    #[test]
    fn ligand_site_mapper_rejects_empty_reference() {
        let model = Model::new();
        let mapper = LigandSiteMapper {
            reference: &model,
            step: 0.5,
            border: 2.0,
            padding: 1.0,
        };
        assert!(mapper.map().is_err());
    }

    #[test]
    fn ligand_site_mapper_covers_atom_neighborhood() {
        let mut model = Model::new();
        model.add_atom(6, "C1", Coord::ZERO);
        let mapper = LigandSiteMapper {
            reference: &model,
            step: 0.5,
            border: 2.0,
            padding: 1.5,
        };
        let site = mapper.map().unwrap();
        assert!(!site.cavities.is_empty());
    }
}
