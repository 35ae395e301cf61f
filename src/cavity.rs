//! `Cavity`: one connected pocket of grid cells
//! found by a site mapper, reduced to the coordinate list, centroid,
//! axis-aligned bounding box and volume that scoring and site mapping
//! downstream need.

use crate::geometry::Coord;

#[derive(Debug, Clone)]
pub struct Cavity {
    pub coords: Vec<Coord>,
    pub grid_step: Coord,
}

impl Cavity {
    pub fn new(coords: Vec<Coord>, grid_step: Coord) -> Self {
        Cavity { coords, grid_step }
    }

    pub fn centroid(&self) -> Coord {
        if self.coords.is_empty() {
            return Coord::ZERO;
        }
        let mut sum = Coord::ZERO;
        for c in &self.coords {
            sum = sum + *c;
        }
        sum / self.coords.len() as f64
    }

    /// `(min, max)` axis-aligned bounding box.
    pub fn bounding_box(&self) -> (Coord, Coord) {
        let mut min = self.coords.first().copied().unwrap_or(Coord::ZERO);
        let mut max = min;
        for c in &self.coords {
            min = min.min(c);
            max = max.max(c);
        }
        (min, max)
    }

    /// Cell count times per-cell volume.
    pub fn volume(&self) -> f64 {
        self.coords.len() as f64 * self.grid_step.x * self.grid_step.y * self.grid_step.z
    }

    pub fn cell_count(&self) -> usize {
        self.coords.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_and_volume_of_two_cells() {
        let cavity = Cavity::new(
            vec![Coord::new(0.0, 0.0, 0.0), Coord::new(2.0, 0.0, 0.0)],
            Coord::new(1.0, 1.0, 1.0),
        );
        assert_eq!(cavity.centroid(), Coord::new(1.0, 0.0, 0.0));
        assert_eq!(cavity.volume(), 2.0);
    }

    #[test]
    fn bounding_box_spans_all_coords() {
        let cavity = Cavity::new(
            vec![Coord::new(-1.0, 2.0, 0.0), Coord::new(3.0, -2.0, 5.0)],
            Coord::new(1.0, 1.0, 1.0),
        );
        let (min, max) = cavity.bounding_box();
        assert_eq!(min, Coord::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Coord::new(3.0, 2.0, 5.0));
    }
}
