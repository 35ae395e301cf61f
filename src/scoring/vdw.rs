//! Van der Waals scoring: a generalized Lennard-Jones term (4-8 for
//! hydrogen-bonding pairs, 6-12 otherwise) with a quadratic close-range cap
//! and a hard outer cutoff, parameterized by atom-type pair from a
//! [`ParamCatalog`].
//!
//! `kij`, the pair well depth, is chosen by one of three rules, in order:
//! zero for a donor/acceptor pair (hydrogen bonds are scored separately, not
//! as a vdW clash), `sqrt(Ki*Kj)` under Tripos combining rules or whenever
//! either type lacks an ionization potential, else the GOLD polarizability
//! formula. `A`/`B` and the close-range quadratic's `e0`/`slope` are derived
//! from `kij` and `rmin = Ri + Rj` once per type pair.

use crate::catalog::ParamCatalog;
use crate::constants::{VDW_E0_MULTIPLIER, VDW_ECUT, VDW_RMAX_MULTIPLIER};
use crate::error::CoreResult;
use crate::model::{AtomId, Model};
use crate::scoring::base::{Annotation, BaseSf};
use crate::typer::TriposType;

/// Per-type constants a pair's `kij` and `rmin` are derived from.
#[derive(Debug, Copy, Clone)]
pub struct VdwTypeParams {
    pub radius: f64,
    pub well_depth: f64,
    /// Ionization potential; `None` falls back to the Tripos combining rule
    /// regardless of `use_tripos`.
    pub ionization_potential: Option<f64>,
    pub polarizability: Option<f64>,
    pub is_hbond_donor: bool,
    pub is_hbond_acceptor: bool,
}

fn type_params(catalog: &ParamCatalog, ty: TriposType) -> VdwTypeParams {
    let name = ty.name();
    VdwTypeParams {
        radius: catalog.get_f64_or("VDW", &format!("{name}_R"), 1.7),
        well_depth: catalog.get_f64_or("VDW", &format!("{name}_K"), 0.1),
        ionization_potential: catalog.get("VDW", &format!("{name}_IP")).and_then(|v| v.parse().ok()),
        polarizability: catalog.get("VDW", &format!("{name}_POL")).and_then(|v| v.parse().ok()),
        is_hbond_donor: catalog.get("VDW", &format!("{name}_HBD")).is_some(),
        is_hbond_acceptor: catalog.get("VDW", &format!("{name}_HBA")).is_some(),
    }
}

/// Run-wide vdW knobs, independent of atom type.
#[derive(Debug, Clone)]
pub struct VdwParams {
    /// `true` selects the softer 4-8 exponent pair everywhere instead of
    /// deciding per-pair from hydrogen-bonding flags; the teacher's spec
    /// uses 4-8 only for donor/acceptor pairs, so this defaults to `false`.
    pub use_4_8: bool,
    /// Forces the Tripos `sqrt(Ki*Kj)` combining rule even when both types
    /// carry an ionization potential.
    pub use_tripos: bool,
    pub rmax_multiplier: f64,
    pub ecut: f64,
    pub e0_multiplier: f64,
}

impl VdwParams {
    pub fn from_catalog(catalog: &ParamCatalog) -> CoreResult<Self> {
        Ok(VdwParams {
            use_4_8: catalog.get("VDW", "USE_4_8").map(|v| v != "0").unwrap_or(false),
            use_tripos: catalog.get("VDW", "USE_TRIPOS").map(|v| v != "0").unwrap_or(false),
            rmax_multiplier: catalog.get_f64_or("VDW", "RMAX", VDW_RMAX_MULTIPLIER),
            ecut: catalog.get_f64_or("VDW", "ECUT", VDW_ECUT),
            e0_multiplier: catalog.get_f64_or("VDW", "E0", VDW_E0_MULTIPLIER),
        })
    }
}

impl Default for VdwParams {
    fn default() -> Self {
        VdwParams {
            use_4_8: false,
            use_tripos: false,
            rmax_multiplier: VDW_RMAX_MULTIPLIER,
            ecut: VDW_ECUT,
            e0_multiplier: VDW_E0_MULTIPLIER,
        }
    }
}

/// Everything the per-distance energy function needs for one type pair,
/// derived once from `VdwParams` + the two types' `VdwTypeParams`.
#[derive(Debug, Copy, Clone)]
struct PairParams {
    a: f64,
    b: f64,
    kij: f64,
    rmax_sq: f64,
    rcutoff_sq: f64,
    ecutoff: f64,
    e0: f64,
    slope: f64,
}

/// `kij` selection: zero for a donor/acceptor pair, the Tripos geometric
/// mean when either rule applies or an ionization potential is missing,
/// else the GOLD polarizability formula.
fn pair_kij(global: &VdwParams, ti: &VdwTypeParams, tj: &VdwTypeParams, rmin: f64) -> f64 {
    if (ti.is_hbond_donor && tj.is_hbond_acceptor) || (tj.is_hbond_donor && ti.is_hbond_acceptor) {
        return 0.0;
    }
    if global.use_tripos || ti.ionization_potential.is_none() || tj.ionization_potential.is_none() {
        return (ti.well_depth * tj.well_depth).sqrt();
    }
    let ii = ti.ionization_potential.unwrap();
    let ij = tj.ionization_potential.unwrap();
    let alpha_i = ti.polarizability.unwrap_or(0.0);
    let alpha_j = tj.polarizability.unwrap_or(0.0);
    let d = 0.345 * ii * ij * alpha_i * alpha_j / (ii + ij);
    let c = 0.5 * d * rmin.powi(6);
    if c == 0.0 {
        0.0
    } else {
        d * d / (4.0 * c)
    }
}

/// Builds a type pair's derived constants: `rmin = Ri+Rj`, `rmax =
/// rmin*RMAX`, `kij` per [`pair_kij`], `A`/`B` from `kij` and `rmin^4` or
/// `rmin^6`, then the close-range quadratic `e0`/`slope` matching the
/// generalized-LJ value and continuity at `rcutoff`.
fn pair_params(global: &VdwParams, ti: &VdwTypeParams, tj: &VdwTypeParams, use_4_8: bool) -> PairParams {
    let rmin = ti.radius + tj.radius;
    let rmax = rmin * global.rmax_multiplier;
    let rmax_sq = rmax * rmax;

    let kij = pair_kij(global, ti, tj, rmin);

    let rmin_pwr = if use_4_8 { rmin.powi(4) } else { rmin.powi(6) };
    let a = kij * rmin_pwr * rmin_pwr;
    let b = 2.0 * kij * rmin_pwr;

    // x/p/c follow the close-range derivation: p is the factor by which r
    // must shrink from rmin for the raw energy to reach ecutoff = kij*ecut.
    let x = 1.0 + (1.0 + global.ecut).sqrt();
    let p = if use_4_8 { x.powf(0.25) } else { x.powf(1.0 / 6.0) };
    let c = 1.0 / p;
    let rcutoff_sq = (rmin * c).powi(2);
    let ecutoff = kij * global.ecut;
    let e0 = ecutoff * global.e0_multiplier;
    let slope = if rcutoff_sq > 0.0 { (e0 - ecutoff) / rcutoff_sq } else { 0.0 };

    PairParams {
        a,
        b,
        kij,
        rmax_sq,
        rcutoff_sq,
        ecutoff,
        e0,
        slope,
    }
}

/// 6-12 generalized Lennard-Jones, zero beyond `rmax`, quadratic-capped
/// inside `rcutoff`.
fn f6_12(r_sq: f64, p: &PairParams) -> f64 {
    if p.kij == 0.0 || r_sq > p.rmax_sq {
        0.0
    } else if r_sq < p.rcutoff_sq {
        p.e0 - p.slope * r_sq
    } else {
        let rr6 = 1.0 / (r_sq * r_sq * r_sq);
        rr6 * (rr6 * p.a - p.b)
    }
}

/// 4-8 generalized Lennard-Jones (softer exponents, used for
/// hydrogen-bonding pairs), same cutoff shape as [`f6_12`].
fn f4_8(r_sq: f64, p: &PairParams) -> f64 {
    if p.kij == 0.0 || r_sq > p.rmax_sq {
        0.0
    } else if r_sq < p.rcutoff_sq {
        p.e0 - p.slope * r_sq
    } else {
        let rr4 = 1.0 / (r_sq * r_sq);
        rr4 * (rr4 * p.a - p.b)
    }
}

/// Context a caller supplies per atom so this module stays agnostic of
/// `Model`/typer internals beyond what it needs.
pub struct VdwContext<'a> {
    pub params: &'a VdwParams,
    pub catalog: &'a ParamCatalog,
    /// Resolves an atom's Tripos type; returns `Undefined` (falling back to
    /// generic radius/well-depth defaults) if unset.
    pub tripos_type: &'a dyn Fn(AtomId) -> TriposType,
    pub is_hbond_pair: &'a dyn Fn(AtomId, AtomId) -> bool,
}

pub struct VdwScore<'a> {
    pub ctx: VdwContext<'a>,
}

impl<'a> VdwScore<'a> {
    pub fn new(ctx: VdwContext<'a>) -> Self {
        VdwScore { ctx }
    }

    fn pair_energy(&self, a: AtomId, b: AtomId, r_sq: f64) -> f64 {
        let use_4_8 = self.ctx.params.use_4_8 || (self.ctx.is_hbond_pair)(a, b);
        let ty_a = (self.ctx.tripos_type)(a);
        let ty_b = (self.ctx.tripos_type)(b);
        let pa = type_params(self.ctx.catalog, ty_a);
        let pb = type_params(self.ctx.catalog, ty_b);
        let params = pair_params(self.ctx.params, &pa, &pb, use_4_8);
        if use_4_8 {
            f4_8(r_sq, &params)
        } else {
            f6_12(r_sq, &params)
        }
    }

    /// Scores every receptor/ligand pair unconditionally.
    fn score_pairs(&self, receptor: &Model, ligand: &Model) -> (f64, Vec<Annotation>) {
        self.score_pairs_filtered(receptor, ligand, false)
    }

    /// As [`Self::score_pairs`], but when `enabled_only` is set, skips pairs
    /// where either model is disabled — mirroring the upstream
    /// `VdwScoreEnabledOnly` entry point, where "enabled" there is a
    /// per-atom flag but here is the whole-`Model` occupancy flag
    /// (`Model::is_enabled`).
    fn score_pairs_filtered(&self, receptor: &Model, ligand: &Model, enabled_only: bool) -> (f64, Vec<Annotation>) {
        if enabled_only && (!receptor.is_enabled() || !ligand.is_enabled()) {
            return (0.0, Vec::new());
        }
        let mut total = 0.0;
        let mut annotations = Vec::new();
        for r_atom in receptor.atoms() {
            for l_atom in ligand.atoms() {
                let r_sq = r_atom.coord.distance_sq(&l_atom.coord);
                let energy = self.pair_energy(r_atom.id, l_atom.id, r_sq);
                if energy == 0.0 {
                    continue;
                }
                total += energy;
                annotations.push(Annotation {
                    atom1: r_atom.id,
                    atom2: l_atom.id,
                    distance: r_sq.sqrt(),
                    energy,
                });
            }
        }
        (total, annotations)
    }

    /// Equivalent of the upstream `VdwScoreEnabledOnly`: scores only when
    /// both `receptor` and `ligand` are enabled, else contributes 0.
    pub fn score_enabled_only(&self, receptor: &Model, ligand: &Model) -> CoreResult<f64> {
        Ok(self.score_pairs_filtered(receptor, ligand, true).0)
    }
}

impl<'a> BaseSf for VdwScore<'a> {
    fn score(&self, receptor: &Model, ligand: &Model) -> CoreResult<f64> {
        Ok(self.score_pairs(receptor, ligand).0)
    }

    fn score_annotated(&self, receptor: &Model, ligand: &Model) -> CoreResult<(f64, Vec<Annotation>)> {
        Ok(self.score_pairs(receptor, ligand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;

    fn carbon_pair(rmin: f64, kij: f64) -> PairParams {
        let global = VdwParams::default();
        let ti = VdwTypeParams {
            radius: rmin / 2.0,
            well_depth: kij,
            ionization_potential: None,
            polarizability: None,
            is_hbond_donor: false,
            is_hbond_acceptor: false,
        };
        pair_params(&global, &ti, &ti, false)
    }

    #[test]
    fn six_twelve_is_minus_kij_at_rmin() {
        let p = carbon_pair(3.4, 0.1);
        let e = f6_12(3.4 * 3.4, &p);
        assert!((e - (-0.1)).abs() < 1e-6, "{e}");
    }

    #[test]
    fn six_twelve_is_zero_far_beyond_rmax() {
        let p = carbon_pair(3.4, 0.1);
        let r = 3.4 * 100.0;
        assert_eq!(f6_12(r * r, &p), 0.0);
    }

    #[test]
    fn six_twelve_is_zero_exactly_beyond_rmax_sq() {
        let p = carbon_pair(3.4, 0.1);
        assert_eq!(f6_12(p.rmax_sq + 1e-6, &p), 0.0);
    }

    #[test]
    fn six_twelve_is_bounded_close_in() {
        let p = carbon_pair(3.4, 0.1);
        let e = f6_12(0.1 * 0.1, &p);
        assert!(e.is_finite());
        assert!(e <= p.e0 + 1e-9);
    }

    #[test]
    fn quadratic_branch_matches_generalized_branch_at_rcutoff() {
        // Property 8: the two close-range pieces must agree exactly at the
        // switch point, since both are evaluated from the same `rcutoff_sq`.
        let p = carbon_pair(3.4, 0.1);
        let quadratic_at_boundary = p.e0 - p.slope * p.rcutoff_sq;
        let rr6 = 1.0 / (p.rcutoff_sq * p.rcutoff_sq * p.rcutoff_sq);
        let generalized_at_boundary = rr6 * (rr6 * p.a - p.b);
        assert!((quadratic_at_boundary - generalized_at_boundary).abs() < 1e-6);
    }

    #[test]
    fn zero_well_depth_scores_zero_everywhere() {
        let global = VdwParams::default();
        let ti = VdwTypeParams {
            radius: 1.7,
            well_depth: 0.1,
            ionization_potential: None,
            polarizability: None,
            is_hbond_donor: true,
            is_hbond_acceptor: false,
        };
        let tj = VdwTypeParams {
            radius: 1.7,
            well_depth: 0.1,
            ionization_potential: None,
            polarizability: None,
            is_hbond_donor: false,
            is_hbond_acceptor: true,
        };
        let p = pair_params(&global, &ti, &tj, false);
        assert_eq!(p.kij, 0.0);
        assert_eq!(f6_12(3.4 * 3.4, &p), 0.0);
    }

    #[test]
    fn gold_formula_used_when_ionization_potentials_present() {
        let global = VdwParams::default();
        let ti = VdwTypeParams {
            radius: 1.7,
            well_depth: 0.1,
            ionization_potential: Some(12.0),
            polarizability: Some(1.5),
            is_hbond_donor: false,
            is_hbond_acceptor: false,
        };
        let p = pair_params(&global, &ti, &ti, false);
        // GOLD kij need not equal the Tripos sqrt(Ki*Kj) value; just confirm
        // it took the branch (nonzero, finite) rather than the 0.1 default.
        assert!(p.kij.is_finite());
        assert!(p.kij > 0.0);
    }

    #[test]
    fn tripos_flag_forces_geometric_mean_even_with_ionization_data() {
        let mut global = VdwParams::default();
        global.use_tripos = true;
        let ti = VdwTypeParams {
            radius: 1.7,
            well_depth: 0.4,
            ionization_potential: Some(12.0),
            polarizability: Some(1.5),
            is_hbond_donor: false,
            is_hbond_acceptor: false,
        };
        let p = pair_params(&global, &ti, &ti, false);
        assert!((p.kij - 0.4).abs() < 1e-9);
    }

    #[test]
    fn score_sums_every_receptor_ligand_pair() {
        let mut receptor = Model::new();
        receptor.add_atom(6, "C1", Coord::ZERO);
        let mut ligand = Model::new();
        ligand.add_atom(6, "C2", Coord::new(3.4, 0.0, 0.0));

        let catalog = ParamCatalog::new();
        let params = VdwParams::default();
        let tripos = |_: AtomId| TriposType::C3;
        let is_hbond = |_: AtomId, _: AtomId| false;
        let ctx = VdwContext {
            params: &params,
            catalog: &catalog,
            tripos_type: &tripos,
            is_hbond_pair: &is_hbond,
        };
        let score_fn = VdwScore::new(ctx);
        let (total, annotations) = score_fn.score_annotated(&receptor, &ligand).unwrap();
        assert_eq!(annotations.len(), 1);
        assert!(total.is_finite());
    }

    #[test]
    fn score_enabled_only_skips_a_disabled_model() {
        let mut receptor = Model::new();
        receptor.add_atom(6, "C1", Coord::ZERO);
        let mut ligand = Model::new();
        ligand.add_atom(6, "C2", Coord::new(3.4, 0.0, 0.0));
        ligand.occupancy = 0.0;

        let catalog = ParamCatalog::new();
        let params = VdwParams::default();
        let tripos = |_: AtomId| TriposType::C3;
        let is_hbond = |_: AtomId, _: AtomId| false;
        let ctx = VdwContext {
            params: &params,
            catalog: &catalog,
            tripos_type: &tripos,
            is_hbond_pair: &is_hbond,
        };
        let score_fn = VdwScore::new(ctx);
        assert!(!ligand.is_enabled());
        let enabled_only = score_fn.score_enabled_only(&receptor, &ligand).unwrap();
        assert_eq!(enabled_only, 0.0);
    }
}
