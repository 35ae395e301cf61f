//! `PseudoAtom`: a derived atom reporting the mean coordinate of a set of
//! constituent atoms.

use crate::geometry::Coord;
use crate::model::atom::{Atom, AtomId};

#[derive(Debug, Clone)]
pub struct PseudoAtom {
    pub atom: Atom,
    pub constituents: Vec<AtomId>,
}

impl PseudoAtom {
    pub fn new(atom: Atom, constituents: Vec<AtomId>) -> Self {
        PseudoAtom { atom, constituents }
    }

    /// Recompute `self.atom.coord` as the unweighted mean of the given
    /// constituent coordinates. Callers resolve `constituents` against the
    /// owning `Model` and pass the coordinates in, keeping this type free
    /// of a back-reference.
    pub fn update_coords(&mut self, constituent_coords: &[Coord]) {
        if constituent_coords.is_empty() {
            return;
        }
        let mut sum = Coord::ZERO;
        for c in constituent_coords {
            sum = sum + *c;
        }
        let n = constituent_coords.len() as f64;
        self.atom.set_coords(Coord::new(sum.x / n, sum.y / n, sum.z / n));
    }
}
