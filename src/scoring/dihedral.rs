//! Dihedral (torsional) scoring: a
//! sum of Fourier terms per rotatable bond, plus synthetic "ghost" terms
//! standing in for implicit hydrogens that have no explicit dihedral of
//! their own.

use crate::catalog::ParamCatalog;
use crate::error::CoreResult;
use crate::flex::chrom_dihedral::{normalize_angle, ChromDihedralRefData};
use crate::model::Model;

/// One Fourier term: `k * (1 + sign * cos(s * (theta - offset) * pi/180))`
///. `sign` is +1 or -1.
#[derive(Debug, Copy, Clone)]
pub struct FourierTerm {
    pub k: f64,
    pub sign: f64,
    pub s: f64,
    pub offset_deg: f64,
}

impl FourierTerm {
    pub fn energy(&self, theta_deg: f64) -> f64 {
        let delta = normalize_angle(theta_deg - self.offset_deg);
        self.k * (1.0 + self.sign * (self.s * delta.to_radians()).cos())
    }
}

/// Per-bond-type torsional parameters: the real dihedral's Fourier terms,
/// plus ghost terms for implicit hydrogens attached to either end of the
/// rotatable bond.
#[derive(Debug, Clone)]
pub struct DihedralParams {
    pub terms: Vec<FourierTerm>,
    /// Angular offsets (degrees) at which a ghost term is evaluated,
    /// relative to the real dihedral value — `120`/`240` for a tetrahedral
    /// implicit H, `180` for a single trigonal one.
    pub ghost_offsets_deg: Vec<f64>,
}

impl DihedralParams {
    /// Falls back to a flat single-term, no-ghost default when a specific
    /// bond-type key is absent from the parameter catalog.
    pub fn from_catalog(catalog: &ParamCatalog, bond_type_key: &str) -> DihedralParams {
        let prefix = format!("DIHEDRAL::{bond_type_key}");
        let default_prefix = "DIHEDRAL::DEFAULT";
        let section = "DIHEDRAL";

        let k = catalog
            .get_f64_or(section, &format!("{prefix}_K"), f64::NAN)
            .to_option()
            .or_else(|| catalog.get(section, &format!("{default_prefix}_K")).and_then(|v| v.parse().ok()))
            .unwrap_or(0.0);
        let sign = catalog.get_f64_or(section, &format!("{prefix}_SIGN"), 1.0);
        let s = catalog.get_f64_or(section, &format!("{prefix}_S"), 3.0);
        let offset = catalog.get_f64_or(section, &format!("{prefix}_OFFSET"), 0.0);

        DihedralParams {
            terms: vec![FourierTerm {
                k,
                sign,
                s,
                offset_deg: offset,
            }],
            ghost_offsets_deg: vec![120.0, 240.0],
        }
    }
}

trait NanToOption {
    fn to_option(self) -> Option<f64>;
}

impl NanToOption for f64 {
    fn to_option(self) -> Option<f64> {
        if self.is_nan() {
            None
        } else {
            Some(self)
        }
    }
}

pub struct DihedralScore<'a> {
    pub dihedrals: &'a [(ChromDihedralRefData, DihedralParams)],
    /// True when the ligand-end atom of a dihedral carries implicit
    /// hydrogens, in which case ghost terms are added.
    pub has_implicit_h: &'a dyn Fn(usize) -> bool,
}

impl<'a> DihedralScore<'a> {
    pub fn score(&self, model: &Model) -> CoreResult<f64> {
        let mut total = 0.0;
        for (i, (chrom, params)) in self.dihedrals.iter().enumerate() {
            let theta = chrom.get_model_value(model)?;
            for term in &params.terms {
                total += term.energy(theta);
            }
            if (self.has_implicit_h)(i) {
                for ghost_offset in &params.ghost_offsets_deg {
                    for term in &params.terms {
                        total += term.energy(theta + ghost_offset);
                    }
                }
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;
    use crate::model::bond::FormalBondOrder;
    use crate::model::AtomId;

    fn chrom() -> ChromDihedralRefData {
        let mut model = Model::new();
        let a1 = model.add_atom(6, "C1", Coord::new(0.0, 1.0, 0.0));
        let a2 = model.add_atom(6, "C2", Coord::new(0.0, 0.0, 0.0));
        let a3 = model.add_atom(6, "C3", Coord::new(1.0, 0.0, 0.0));
        let a4 = model.add_atom(6, "C4", Coord::new(1.0, 1.0, 0.0));
        model.construct_bond(a1, a2, FormalBondOrder::Single).unwrap();
        model.construct_bond(a2, a3, FormalBondOrder::Single).unwrap();
        model.construct_bond(a3, a4, FormalBondOrder::Single).unwrap();
        ChromDihedralRefData::new_free(&model, [a1, a2, a3, a4], vec![a4], 30.0).unwrap()
    }

    #[test]
    fn fourier_term_energy_is_zero_at_minimum() {
        let term = FourierTerm {
            k: 2.0,
            sign: -1.0,
            s: 3.0,
            offset_deg: 0.0,
        };
        assert!((term.energy(0.0)).abs() < 1e-9);
    }

    #[test]
    fn default_fallback_parameters_are_flat_zero() {
        let catalog = ParamCatalog::new();
        let params = DihedralParams::from_catalog(&catalog, "C.3-C.3");
        assert_eq!(params.terms[0].k, 0.0);
    }

    #[test]
    fn score_adds_ghost_terms_when_implicit_h_present() {
        let mut model = Model::new();
        let a1 = model.add_atom(6, "C1", Coord::new(0.0, 1.0, 0.0));
        let a2 = model.add_atom(6, "C2", Coord::new(0.0, 0.0, 0.0));
        let a3 = model.add_atom(6, "C3", Coord::new(1.0, 0.0, 0.0));
        let a4 = model.add_atom(6, "C4", Coord::new(1.0, 1.0, 0.0));
        model.construct_bond(a1, a2, FormalBondOrder::Single).unwrap();
        model.construct_bond(a2, a3, FormalBondOrder::Single).unwrap();
        model.construct_bond(a3, a4, FormalBondOrder::Single).unwrap();
        let chrom = ChromDihedralRefData::new_free(&model, [a1, a2, a3, a4], vec![a4], 30.0).unwrap();

        let params = DihedralParams {
            terms: vec![FourierTerm {
                k: 1.0,
                sign: 1.0,
                s: 1.0,
                offset_deg: 0.0,
            }],
            ghost_offsets_deg: vec![120.0, 240.0],
        };
        let dihedrals = vec![(chrom, params)];
        let no_ghosts = DihedralScore {
            dihedrals: &dihedrals,
            has_implicit_h: &|_| false,
        };
        let with_ghosts = DihedralScore {
            dihedrals: &dihedrals,
            has_implicit_h: &|_| true,
        };
        let plain = no_ghosts.score(&model).unwrap();
        let ghosted = with_ghosts.score(&model).unwrap();
        assert!(ghosted > plain);
        let _ = AtomId(0);
    }
}
