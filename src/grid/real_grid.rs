//! `RealGrid`: a scalar field over a [`Grid`].
//!
//! Used for distance-transform fields (cavity detection), smoothed
//! potential maps, and anything else that needs a trilinearly-interpolable
//! value at an arbitrary point, not just at grid nodes.

use std::io::{self, Read, Write};

use crate::error::{CoreError, CoreResult};
use crate::geometry::Coord;
use crate::grid::base::{Grid, GridIndex};

#[derive(Debug, Clone, PartialEq)]
pub struct RealGrid {
    pub grid: Grid,
    values: Vec<f64>,
}

impl RealGrid {
    pub fn new(grid: Grid) -> Self {
        let n = grid.n_cells();
        RealGrid { grid, values: vec![0.0; n] }
    }

    pub fn get(&self, index: GridIndex) -> f64 {
        if !self.grid.in_bounds(index) {
            return 0.0;
        }
        self.values[index.flat(self.grid.nx, self.grid.ny)]
    }

    pub fn set(&mut self, index: GridIndex, value: f64) {
        if self.grid.in_bounds(index) {
            let flat = index.flat(self.grid.nx, self.grid.ny);
            self.values[flat] = value;
        }
    }

    /// Sets every cell within `radius` of `center` to `value`.
    pub fn set_sphere(&mut self, center: Coord, radius: f64, value: f64) {
        for idx in self.grid.sphere_indices(center, radius) {
            self.set(idx, value);
        }
    }

    /// Marks the boundary cells of every region whose value is currently
    /// `inside_value` — a cell is a surface cell if it equals
    /// `inside_value` and has at least one 6-connected neighbor that
    /// doesn't.
    pub fn create_surface(&mut self, inside_value: f64, surface_value: f64) {
        let mut surface_cells = Vec::new();
        for iz in 0..self.grid.nz {
            for iy in 0..self.grid.ny {
                for ix in 0..self.grid.nx {
                    let idx = GridIndex::new(ix, iy, iz);
                    if (self.get(idx) - inside_value).abs() > self.grid.tolerance {
                        continue;
                    }
                    let is_surface = [(-1, 0, 0), (1, 0, 0), (0, -1, 0), (0, 1, 0), (0, 0, -1), (0, 0, 1)]
                        .iter()
                        .any(|(dx, dy, dz)| {
                            let n = GridIndex::new(ix + dx, iy + dy, iz + dz);
                            !self.grid.in_bounds(n) || (self.get(n) - inside_value).abs() > self.grid.tolerance
                        });
                    if is_surface {
                        surface_cells.push(idx);
                    }
                }
            }
        }
        for idx in surface_cells {
            self.set(idx, surface_value);
        }
    }

    /// Sets `accessible_value` on every cell within `probe_radius` of any
    /// cell already holding `occupied_value`.
    pub fn set_accessible(&mut self, occupied_value: f64, probe_radius: f64, accessible_value: f64) {
        let mut centers = Vec::new();
        for iz in 0..self.grid.nz {
            for iy in 0..self.grid.ny {
                for ix in 0..self.grid.nx {
                    let idx = GridIndex::new(ix, iy, iz);
                    if (self.get(idx) - occupied_value).abs() <= self.grid.tolerance {
                        centers.push(self.grid.index_to_coord(idx));
                    }
                }
            }
        }
        for center in centers {
            self.set_sphere(center, probe_radius, accessible_value);
        }
    }

    /// Local maxima strictly greater than all 26 neighbors and at least
    /// `min_value`.
    pub fn find_peaks(&self, min_value: f64) -> Vec<GridIndex> {
        let mut peaks = Vec::new();
        for iz in 0..self.grid.nz {
            for iy in 0..self.grid.ny {
                for ix in 0..self.grid.nx {
                    let idx = GridIndex::new(ix, iy, iz);
                    let v = self.get(idx);
                    if v < min_value {
                        continue;
                    }
                    let mut is_peak = true;
                    'neigh: for dz in -1..=1 {
                        for dy in -1..=1 {
                            for dx in -1..=1 {
                                if dx == 0 && dy == 0 && dz == 0 {
                                    continue;
                                }
                                let n = GridIndex::new(ix + dx, iy + dy, iz + dz);
                                if self.grid.in_bounds(n) && self.get(n) > v {
                                    is_peak = false;
                                    break 'neigh;
                                }
                            }
                        }
                    }
                    if is_peak {
                        peaks.push(idx);
                    }
                }
            }
        }
        peaks
    }

    /// Trilinearly-interpolated value at an arbitrary point. Falls back to 0.0 outside the grid.
    pub fn smoothed_value(&self, point: Coord) -> f64 {
        let fx = (point.x - self.grid.min.x) / self.grid.step;
        let fy = (point.y - self.grid.min.y) / self.grid.step;
        let fz = (point.z - self.grid.min.z) / self.grid.step;
        let x0 = fx.floor() as i64;
        let y0 = fy.floor() as i64;
        let z0 = fz.floor() as i64;
        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;
        let tz = fz - z0 as f64;

        let mut total = 0.0;
        for (dx, wx) in [(0, 1.0 - tx), (1, tx)] {
            for (dy, wy) in [(0, 1.0 - ty), (1, ty)] {
                for (dz, wz) in [(0, 1.0 - tz), (1, tz)] {
                    let idx = GridIndex::new(x0 + dx, y0 + dy, z0 + dz);
                    let w = wx * wy * wz;
                    if w > 0.0 && self.grid.in_bounds(idx) {
                        total += w * self.get(idx);
                    }
                }
            }
        }
        total
    }

    /// Binary layout: `nx, ny, nz` as little-endian `u32`, `step` and
    /// `min.{x,y,z}` as little-endian `f64`, then `nx*ny*nz` little-endian
    /// `f64` values in (z, y, x) row-major order.
    pub fn write_binary<W: Write>(&self, mut out: W) -> CoreResult<()> {
        out.write_all(&(self.grid.nx as u32).to_le_bytes())?;
        out.write_all(&(self.grid.ny as u32).to_le_bytes())?;
        out.write_all(&(self.grid.nz as u32).to_le_bytes())?;
        out.write_all(&self.grid.step.to_le_bytes())?;
        out.write_all(&self.grid.min.x.to_le_bytes())?;
        out.write_all(&self.grid.min.y.to_le_bytes())?;
        out.write_all(&self.grid.min.z.to_le_bytes())?;
        for v in &self.values {
            out.write_all(&v.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn read_binary<R: Read>(mut input: R) -> CoreResult<Self> {
        let mut u32_buf = [0u8; 4];
        let mut f64_buf = [0u8; 8];

        input.read_exact(&mut u32_buf)?;
        let nx = u32::from_le_bytes(u32_buf) as i64;
        input.read_exact(&mut u32_buf)?;
        let ny = u32::from_le_bytes(u32_buf) as i64;
        input.read_exact(&mut u32_buf)?;
        let nz = u32::from_le_bytes(u32_buf) as i64;

        input.read_exact(&mut f64_buf)?;
        let step = f64::from_le_bytes(f64_buf);
        input.read_exact(&mut f64_buf)?;
        let min_x = f64::from_le_bytes(f64_buf);
        input.read_exact(&mut f64_buf)?;
        let min_y = f64::from_le_bytes(f64_buf);
        input.read_exact(&mut f64_buf)?;
        let min_z = f64::from_le_bytes(f64_buf);

        let grid = Grid::new(Coord::new(min_x, min_y, min_z), step, nx, ny, nz)?;
        let mut values = Vec::with_capacity(grid.n_cells());
        for _ in 0..grid.n_cells() {
            match input.read_exact(&mut f64_buf) {
                Ok(()) => values.push(f64::from_le_bytes(f64_buf)),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(CoreError::BadArgument("grid binary truncated before all values were read".into()));
                }
                Err(e) => return Err(CoreError::FileRead(e)),
            }
        }
        Ok(RealGrid { grid, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> RealGrid {
        RealGrid::new(Grid::new(Coord::new(-2.0, -2.0, -2.0), 1.0, 5, 5, 5).unwrap())
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut grid = small_grid();
        let idx = grid.grid.coord_to_index(Coord::ZERO).unwrap();
        grid.set(idx, 42.0);
        assert_eq!(grid.get(idx), 42.0);
    }

    #[test]
    fn smoothed_value_interpolates_between_nodes() {
        let mut grid = small_grid();
        let a = grid.grid.coord_to_index(Coord::new(0.0, 0.0, 0.0)).unwrap();
        let b = grid.grid.coord_to_index(Coord::new(1.0, 0.0, 0.0)).unwrap();
        grid.set(a, 0.0);
        grid.set(b, 10.0);
        let mid = grid.smoothed_value(Coord::new(0.5, 0.0, 0.0));
        assert!((mid - 5.0).abs() < 1e-9);
    }

    #[test]
    fn find_peaks_identifies_single_local_maximum() {
        let mut grid = small_grid();
        let center = grid.grid.coord_to_index(Coord::ZERO).unwrap();
        grid.set(center, 5.0);
        let peaks = grid.find_peaks(1.0);
        assert_eq!(peaks, vec![center]);
    }

    #[test]
    fn binary_round_trip_preserves_values() {
        let mut grid = small_grid();
        let idx = grid.grid.coord_to_index(Coord::new(1.0, -1.0, 0.0)).unwrap();
        grid.set(idx, 7.5);

        let mut buf = Vec::new();
        grid.write_binary(&mut buf).unwrap();
        let restored = RealGrid::read_binary(&buf[..]).unwrap();
        assert_eq!(restored.get(idx), 7.5);
        assert_eq!(restored.grid.nx, grid.grid.nx);
    }

    #[test]
    fn read_binary_rejects_truncated_input() {
        let grid = small_grid();
        let mut buf = Vec::new();
        grid.write_binary(&mut buf).unwrap();
        buf.truncate(buf.len() - 4);
        assert!(RealGrid::read_binary(&buf[..]).is_err());
    }
}
