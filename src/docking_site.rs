//! `DockingSite`: the union of one or more
//! cavities plus a border margin, with a lazily-built nearest-cavity
//! distance field used to answer "how far is this atom from the site"
//! queries without rescanning every cavity each time.

use crate::cavity::Cavity;
use crate::error::{CoreError, CoreResult};
use crate::geometry::Coord;
use crate::grid::base::Grid;
use crate::grid::real_grid::RealGrid;
use crate::model::{AtomId, Model};

#[derive(Debug, Clone)]
pub struct DockingSite {
    pub cavities: Vec<Cavity>,
    pub border: f64,
    distance_field: Option<RealGrid>,
}

impl DockingSite {
    pub fn new(cavities: Vec<Cavity>, border: f64) -> Self {
        DockingSite {
            cavities,
            border,
            distance_field: None,
        }
    }

    /// Bounding box across every cavity, expanded by `border` on each side.
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        let mut iter = self.cavities.iter();
        let first = iter.next()?;
        let (mut min, mut max) = first.bounding_box();
        for cavity in iter {
            let (c_min, c_max) = cavity.bounding_box();
            min = min.min(&c_min);
            max = max.max(&c_max);
        }
        let pad = Coord::new(self.border, self.border, self.border);
        Some((min - pad, max + pad))
    }

    /// Builds (if not already built) a `RealGrid` holding, at each cell,
    /// the distance to the nearest cavity coordinate — brute-force over
    /// cavity cells, which is fine since this runs once per docking site,
    /// not once per scoring call.
    pub fn ensure_distance_field(&mut self, step: f64) -> CoreResult<&RealGrid> {
        if self.distance_field.is_none() {
            let (min, max) = self
                .bounds()
                .ok_or_else(|| CoreError::InvalidRequest("docking site has no cavities".into()))?;
            let nx = (((max.x - min.x) / step).ceil() as i64).max(1) + 1;
            let ny = (((max.y - min.y) / step).ceil() as i64).max(1) + 1;
            let nz = (((max.z - min.z) / step).ceil() as i64).max(1) + 1;
            let grid = Grid::new(min, step, nx, ny, nz)?;
            let mut field = RealGrid::new(grid.clone());

            let all_cavity_coords: Vec<Coord> = self.cavities.iter().flat_map(|c| c.coords.iter().copied()).collect();

            for iz in 0..grid.nz {
                for iy in 0..grid.ny {
                    for ix in 0..grid.nx {
                        let idx = crate::grid::base::GridIndex::new(ix, iy, iz);
                        let point = grid.index_to_coord(idx);
                        let nearest = all_cavity_coords
                            .iter()
                            .map(|c| point.distance(c))
                            .fold(f64::INFINITY, f64::min);
                        field.set(idx, nearest);
                    }
                }
            }
            self.distance_field = Some(field);
        }
        Ok(self.distance_field.as_ref().unwrap())
    }

    /// Every atom of `model` within `max_dist` of the cavity union. Rejects `max_dist > border`, since the distance
    /// field is only guaranteed accurate out to the border margin.
    pub fn atom_list(&self, model: &Model, max_dist: f64) -> CoreResult<Vec<AtomId>> {
        if max_dist > self.border {
            return Err(CoreError::BadArgument(format!(
                "max_dist {max_dist} exceeds docking site border {}",
                self.border
            )));
        }
        let all_cavity_coords: Vec<Coord> = self.cavities.iter().flat_map(|c| c.coords.iter().copied()).collect();
        let mut out = Vec::new();
        for atom in model.atoms() {
            let within = all_cavity_coords.iter().any(|c| atom.coord.distance(c) <= max_dist);
            if within {
                out.push(atom.id);
            }
        }
        out.sort_by_key(|a| a.0);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bond::FormalBondOrder;

    fn sample_site() -> DockingSite {
        let cavity = Cavity::new(vec![Coord::ZERO, Coord::new(1.0, 0.0, 0.0)], Coord::new(1.0, 1.0, 1.0));
        DockingSite::new(vec![cavity], 5.0)
    }

    #[test]
    fn atom_list_rejects_max_dist_beyond_border() {
        let site = sample_site();
        let model = Model::new();
        let err = site.atom_list(&model, 10.0).unwrap_err();
        assert!(matches!(err, CoreError::BadArgument(_)));
    }

    #[test]
    fn atom_list_includes_only_nearby_atoms() {
        let site = sample_site();
        let mut model = Model::new();
        let near = model.add_atom(6, "C1", Coord::new(0.5, 0.0, 0.0));
        let far = model.add_atom(6, "C2", Coord::new(50.0, 0.0, 0.0));
        let _ = model.construct_bond(near, far, FormalBondOrder::Single);
        let hits = site.atom_list(&model, 2.0).unwrap();
        assert!(hits.contains(&near));
        assert!(!hits.contains(&far));
    }

    #[test]
    fn distance_field_is_zero_at_cavity_cell() {
        let mut site = sample_site();
        let field = site.ensure_distance_field(0.5).unwrap();
        let nearest_idx = field.grid.coord_to_index(Coord::ZERO).unwrap();
        assert!(field.get(nearest_idx) < 0.5);
    }
}
