//! HHS (Hasel-Hendrickson-Still) solvation scoring: each atom is an
//! interaction center with an isolated solvent-accessible surface area
//! `S = 4*pi*(r + r_solvent)^2` and an exposed fraction `A` starting at
//! 1.0. Every overlapping neighbor multiplicatively shrinks that fraction,
//! `A <- A * (1 - (p/S)*p_ij*b_ij)`, clamped back into `[0, 1]` after each
//! update so interpenetrating atoms (common early in a GA run) can't drive
//! it negative. `p_ij` is a single connectivity correction scaled down for
//! graph-close pairs so bonded neighbors don't over-count their own
//! overlap; the per-atom-type `p` is unrelated to bond distance.

use std::f64::consts::PI;

use crate::constants::{DEFAULT_SOLVENT_RADIUS, HHS_P_12, HHS_P_13, HHS_P_14_PLUS};
use crate::error::CoreResult;
use crate::model::{AtomId, Model};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GraphDistance {
    Bonded,
    OneThree,
    FurtherOrDifferentModel,
}

impl GraphDistance {
    fn connectivity_scale(self) -> f64 {
        match self {
            GraphDistance::Bonded => HHS_P_12,
            GraphDistance::OneThree => HHS_P_13,
            GraphDistance::FurtherOrDifferentModel => HHS_P_14_PLUS,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct HhsAtomParams {
    pub radius: f64,
    /// Atom-type-dependent correction factor, `p_i` in the HHS paper.
    pub p: f64,
    /// Atomic solvation parameter (kcal/mol per Å²), positive for
    /// hydrophilic, negative for hydrophobic.
    pub sigma: f64,
}

fn isolated_surface_area(radius: f64, solvent_radius: f64) -> f64 {
    4.0 * PI * (radius + solvent_radius).powi(2)
}

/// One atom's exposed-fraction update from a single overlapping neighbor.
/// Returns `None` if the pair doesn't overlap at all (solvent shells don't
/// touch), in which case `A` is left untouched.
fn overlap_factor(p_over_s: f64, pi_r_plus_rs: f64, p_ij: f64, r_self: f64, r_other: f64, d: f64, solvent_radius: f64) -> Option<f64> {
    let ol = r_self + r_other + 2.0 * solvent_radius;
    if ol * ol < d * d {
        return None;
    }
    let recip_d = 1.0 / d;
    let ol_minus_d = ol - d;
    let r_diff_over_d = recip_d * (r_other - r_self);
    let b_ij = pi_r_plus_rs * ol_minus_d * (1.0 + r_diff_over_d);
    Some(1.0 - p_over_s * p_ij * b_ij)
}

/// Multiplies `a` by `factor`, clamping to `[0, 1]` the way the HHS paper's
/// reference implementation does: a non-positive factor zeroes `A`
/// outright, a factor `>= 1` leaves `A` unchanged (no "anti-overlap").
fn apply_factor(a: f64, factor: f64) -> f64 {
    if factor <= 0.0 {
        0.0
    } else if factor < 1.0 {
        a * factor
    } else {
        a
    }
}

pub struct HhsSolvationScore<'a> {
    pub solvent_radius: f64,
    pub atom_params: &'a dyn Fn(AtomId) -> HhsAtomParams,
    pub graph_distance: &'a dyn Fn(AtomId, AtomId) -> GraphDistance,
    /// Atoms "frozen" by a prior `save()` call: their own exposed fraction
    /// is held at its last-computed value instead of being rederived, but
    /// they still occlude every other atom's fraction normally.
    frozen: std::collections::BTreeMap<AtomId, f64>,
}

impl<'a> HhsSolvationScore<'a> {
    pub fn new(atom_params: &'a dyn Fn(AtomId) -> HhsAtomParams, graph_distance: &'a dyn Fn(AtomId, AtomId) -> GraphDistance) -> Self {
        HhsSolvationScore {
            solvent_radius: DEFAULT_SOLVENT_RADIUS,
            atom_params,
            graph_distance,
            frozen: std::collections::BTreeMap::new(),
        }
    }

    fn exposed_fraction(&self, atom: AtomId, receptor: &Model, ligand: &Model) -> f64 {
        let params = (self.atom_params)(atom);
        let s = isolated_surface_area(params.radius, self.solvent_radius);
        let p_over_s = params.p / s;
        let pi_r_plus_rs = PI * (params.radius + self.solvent_radius);
        let coord = receptor
            .atom(atom)
            .or_else(|| ligand.atom(atom))
            .map(|a| a.coord)
            .expect("atom must belong to receptor or ligand");

        let mut a = 1.0;
        for other in receptor.atoms().chain(ligand.atoms()) {
            if other.id == atom {
                continue;
            }
            let other_params = (self.atom_params)(other.id);
            let d = coord.distance(&other.coord);
            let p_ij = (self.graph_distance)(atom, other.id).connectivity_scale();
            if let Some(factor) = overlap_factor(p_over_s, pi_r_plus_rs, p_ij, params.radius, other_params.radius, d, self.solvent_radius) {
                a = apply_factor(a, factor);
            }
        }
        a
    }

    /// Freezes the given atoms' exposed fraction at its current value.
    pub fn save(&mut self, atoms: impl IntoIterator<Item = AtomId>, receptor: &Model, ligand: &Model) {
        for atom in atoms {
            let a = self.exposed_fraction(atom, receptor, ligand);
            self.frozen.insert(atom, a);
        }
    }

    /// Unfreezes every previously-saved atom.
    pub fn restore(&mut self) {
        self.frozen.clear();
    }

    pub fn score(&self, receptor: &Model, ligand: &Model) -> CoreResult<f64> {
        let mut total = 0.0;
        for atom in receptor.atoms().chain(ligand.atoms()) {
            let params = (self.atom_params)(atom.id);
            let s = isolated_surface_area(params.radius, self.solvent_radius);
            let a = match self.frozen.get(&atom.id) {
                Some(&frozen_a) => frozen_a,
                None => self.exposed_fraction(atom.id, receptor, ligand),
            };
            total += s * params.sigma * a;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    #[test]
    fn isolated_surface_area_matches_sphere_formula() {
        let area = isolated_surface_area(1.6, 1.4);
        assert!((area - 4.0 * PI * 3.0_f64.powi(2)).abs() < 1e-9);
    }

    #[test]
    fn distant_pair_has_no_overlap() {
        let factor = overlap_factor(1.0, PI * 3.0, 1.0, 1.6, 1.6, 100.0, 1.4);
        assert!(factor.is_none());
    }

    #[test]
    fn touching_pair_reduces_exposed_fraction_below_one() {
        let factor = overlap_factor(0.5 / (4.0 * PI * 9.0), PI * 3.0, HHS_P_14_PLUS, 1.6, 1.6, 2.0, 1.4).unwrap();
        assert!(factor < 1.0);
        assert_eq!(apply_factor(1.0, factor), factor.max(0.0));
    }

    #[test]
    fn apply_factor_clamps_non_positive_to_zero() {
        assert_eq!(apply_factor(1.0, -0.2), 0.0);
    }

    #[test]
    fn apply_factor_leaves_a_unchanged_when_factor_at_least_one() {
        assert_eq!(apply_factor(0.7, 1.0), 0.7);
    }

    #[test]
    fn score_is_finite_for_a_simple_pair() {
        let mut receptor = Model::new();
        receptor.add_atom(6, "C1", Coord::ZERO);
        let mut ligand = Model::new();
        ligand.add_atom(8, "O1", Coord::new(3.0, 0.0, 0.0));

        let atom_params = |_: AtomId| HhsAtomParams { radius: 1.6, p: 1.0, sigma: 0.01 };
        let graph_distance = |_: AtomId, _: AtomId| GraphDistance::FurtherOrDifferentModel;
        let scorer = HhsSolvationScore::new(&atom_params, &graph_distance);
        let score = scorer.score(&receptor, &ligand).unwrap();
        assert!(score.is_finite());
    }

    #[test]
    fn save_freezes_an_atoms_own_fraction_despite_later_geometry_changes() {
        let mut receptor = Model::new();
        let r1 = receptor.add_atom(6, "C1", Coord::ZERO);
        let mut ligand = Model::new();
        let l1 = ligand.add_atom(8, "O1", Coord::new(3.0, 0.0, 0.0));

        let atom_params = |_: AtomId| HhsAtomParams { radius: 1.6, p: 1.0, sigma: 0.01 };
        let graph_distance = |_: AtomId, _: AtomId| GraphDistance::FurtherOrDifferentModel;
        let mut scorer = HhsSolvationScore::new(&atom_params, &graph_distance);

        scorer.save([r1], &receptor, &ligand);
        let frozen_a = *scorer.frozen.get(&r1).unwrap();

        // Moving the ligand atom much closer would change r1's exposed
        // fraction if it weren't frozen.
        ligand.atom_mut(l1).unwrap().set_coords(Coord::new(1.8, 0.0, 0.0));
        let live_a = scorer.exposed_fraction(r1, &receptor, &ligand);
        assert!((live_a - frozen_a).abs() > 1e-6);

        scorer.restore();
        assert!(scorer.frozen.is_empty());
    }

    #[test]
    fn exposed_fraction_never_exceeds_one() {
        let mut receptor = Model::new();
        receptor.add_atom(6, "C1", Coord::ZERO);
        let mut ligand = Model::new();
        ligand.add_atom(6, "C2", Coord::new(50.0, 0.0, 0.0));

        let atom_params = |_: AtomId| HhsAtomParams { radius: 1.6, p: 1.0, sigma: 0.01 };
        let graph_distance = |_: AtomId, _: AtomId| GraphDistance::FurtherOrDifferentModel;
        let scorer = HhsSolvationScore::new(&atom_params, &graph_distance);
        let a = scorer.exposed_fraction(receptor.atoms().next().unwrap().id, &receptor, &ligand);
        assert!((0.0..=1.0).contains(&a));
    }
}
