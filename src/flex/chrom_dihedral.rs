//! `ChromDihedralRefData`: one rotatable-bond entry in a flexible model's
//! chromosome.
//!
//! Each entry names the four atoms that define the dihedral, the list of
//! atoms that move when the bond is rotated, and converts between the
//! dihedral's current value (degrees) and a rotation applied about the
//! bond axis. A single instance is meant to be shared across every clone of
//! a given chromosome, so the mutation step size, sampling mode, tether
//! half-width, and the dihedral's initial value (captured once, from the
//! model's starting coordinates) all live here rather than on each clone.

use crate::constants::DIHEDRAL_UPDATE_EPSILON_DEG;
use crate::error::CoreResult;
use crate::geometry::{Coord, Quaternion};
use crate::model::{AtomId, Model};

/// How a dihedral chromosome element is sampled during mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DihedralMode {
    /// Sampled uniformly at random, unconstrained by the starting value.
    #[default]
    Free,
    /// Sampled within `max_dihedral` degrees of `initial_value`.
    Tethered,
    /// Never mutated; held at `initial_value`.
    Fixed,
}

#[derive(Debug, Clone)]
pub struct ChromDihedralRefData {
    /// Atom quadruple (a1-a2-a3-a4) defining the dihedral; the rotatable
    /// bond is a2-a3.
    pub atoms: [AtomId; 4],
    /// Atoms that move with the bond, in deterministic (id) order.
    pub rotate_list: Vec<AtomId>,
    /// Maximum mutation step size, in degrees.
    pub step_size: f64,
    pub mode: DihedralMode,
    /// Maximum deviation from `initial_value`, in degrees; meaningful only
    /// in [`DihedralMode::Tethered`].
    pub max_dihedral: f64,
    /// The dihedral's value at construction time, read once from `model`'s
    /// starting coordinates and never recomputed afterwards.
    pub initial_value: f64,
}

impl ChromDihedralRefData {
    /// `atoms`/`rotate_list` are normally the output of
    /// [`crate::flex::setup_rotatable_bond`] (dihedral atoms + rotating
    /// side). `initial_value` is captured here, from `model`'s coordinates
    /// at the moment of construction.
    pub fn new(
        model: &Model,
        atoms: [AtomId; 4],
        mut rotate_list: Vec<AtomId>,
        step_size: f64,
        mode: DihedralMode,
        max_dihedral: f64,
    ) -> CoreResult<Self> {
        rotate_list.sort_by_key(|a| a.0);
        rotate_list.dedup();
        let mut data = ChromDihedralRefData {
            atoms,
            rotate_list,
            step_size,
            mode,
            max_dihedral,
            initial_value: 0.0,
        };
        data.initial_value = data.get_model_value(model)?;
        Ok(data)
    }

    /// As [`Self::new`], with the common defaults of free sampling and no
    /// tether.
    pub fn new_free(model: &Model, atoms: [AtomId; 4], rotate_list: Vec<AtomId>, step_size: f64) -> CoreResult<Self> {
        Self::new(model, atoms, rotate_list, step_size, DihedralMode::Free, 0.0)
    }

    /// Current dihedral angle in degrees, computed from `model`'s live
    /// coordinates via the standard four-point dihedral formula.
    pub fn get_model_value(&self, model: &Model) -> CoreResult<f64> {
        let [a1, a2, a3, a4] = self.atoms;
        let p1 = atom_coord(model, a1)?;
        let p2 = atom_coord(model, a2)?;
        let p3 = atom_coord(model, a3)?;
        let p4 = atom_coord(model, a4)?;
        Ok(dihedral_degrees(p1, p2, p3, p4))
    }

    /// Rotates `rotate_list` about the a2-a3 axis so the dihedral reads
    /// `target_degrees`. Below `DIHEDRAL_UPDATE_EPSILON_DEG` the call is a
    /// no-op.
    pub fn set_model_value(&self, model: &mut Model, target_degrees: f64) -> CoreResult<()> {
        let current = self.get_model_value(model)?;
        let mut delta = target_degrees - current;
        delta = normalize_angle(delta);
        if delta.abs() < DIHEDRAL_UPDATE_EPSILON_DEG {
            return Ok(());
        }

        let [_, a2, a3, _] = self.atoms;
        let pivot = atom_coord(model, a2)?;
        let axis = (atom_coord(model, a3)? - pivot).normalized();
        let q = Quaternion::from_axis_angle(axis, delta.to_radians());

        for &atom_id in &self.rotate_list {
            if let Some(atom) = model.atom_mut(atom_id) {
                let local = atom.coord - pivot;
                atom.set_coords(q.rotate(local) + pivot);
            }
        }
        Ok(())
    }
}

fn atom_coord(model: &Model, id: AtomId) -> CoreResult<Coord> {
    model
        .atom(id)
        .map(|a| a.coord)
        .ok_or_else(|| crate::error::CoreError::InvalidRequest(format!("dihedral references missing atom {}", id.0)))
}

/// Normalizes an angle in degrees to `(-180, 180]`. Every ghost/implicit-H
/// offset and every delta is routed through this single normalizer so
/// nothing drifts out of range after repeated mutation.
pub fn normalize_angle(mut degrees: f64) -> f64 {
    degrees %= 360.0;
    if degrees <= -180.0 {
        degrees += 360.0;
    } else if degrees > 180.0 {
        degrees -= 360.0;
    }
    degrees
}

fn dihedral_degrees(p1: Coord, p2: Coord, p3: Coord, p4: Coord) -> f64 {
    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    let m1 = n1.cross(&b2.normalized());

    let x = n1.dot(&n2);
    let y = m1.dot(&n2);
    y.atan2(x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bond::FormalBondOrder;

    fn butane_like_model() -> (Model, ChromDihedralRefData) {
        let mut model = Model::new();
        let a1 = model.add_atom(6, "C1", Coord::new(0.0, 1.0, 0.0));
        let a2 = model.add_atom(6, "C2", Coord::new(0.0, 0.0, 0.0));
        let a3 = model.add_atom(6, "C3", Coord::new(1.0, 0.0, 0.0));
        let a4 = model.add_atom(6, "C4", Coord::new(1.0, 1.0, 0.0));
        model.construct_bond(a1, a2, FormalBondOrder::Single).unwrap();
        model.construct_bond(a2, a3, FormalBondOrder::Single).unwrap();
        model.construct_bond(a3, a4, FormalBondOrder::Single).unwrap();
        let chrom = ChromDihedralRefData::new_free(&model, [a1, a2, a3, a4], vec![a4], 30.0).unwrap();
        (model, chrom)
    }

    #[test]
    fn get_model_value_reads_planar_cis_as_zero() {
        let (model, chrom) = butane_like_model();
        let value = chrom.get_model_value(&model).unwrap();
        assert!((value - 0.0).abs() < 1e-6);
    }

    #[test]
    fn new_captures_initial_value_at_construction_time() {
        let (model, chrom) = butane_like_model();
        let live = chrom.get_model_value(&model).unwrap();
        assert!((chrom.initial_value - live).abs() < 1e-6);
    }

    #[test]
    fn initial_value_does_not_follow_later_mutation() {
        let (mut model, chrom) = butane_like_model();
        let initial = chrom.initial_value;
        chrom.set_model_value(&mut model, 90.0).unwrap();
        assert!((chrom.initial_value - initial).abs() < 1e-12);
        let live = chrom.get_model_value(&model).unwrap();
        assert!((live - initial).abs() > 1.0);
    }

    #[test]
    fn new_free_defaults_to_free_mode_with_no_tether() {
        let (_model, chrom) = butane_like_model();
        assert_eq!(chrom.mode, DihedralMode::Free);
        assert_eq!(chrom.max_dihedral, 0.0);
        assert_eq!(chrom.step_size, 30.0);
    }

    #[test]
    fn set_model_value_rotates_only_listed_atoms() {
        let (mut model, chrom) = butane_like_model();
        let a1_before = model.atom(chrom.atoms[0]).unwrap().coord;
        chrom.set_model_value(&mut model, 90.0).unwrap();
        let value = chrom.get_model_value(&model).unwrap();
        assert!((value - 90.0).abs() < 1e-6);
        assert_eq!(model.atom(chrom.atoms[0]).unwrap().coord, a1_before);
    }

    #[test]
    fn set_model_value_below_epsilon_is_noop() {
        let (mut model, chrom) = butane_like_model();
        let a4_before = model.atom(chrom.atoms[3]).unwrap().coord;
        chrom.set_model_value(&mut model, 0.0001).unwrap();
        assert_eq!(model.atom(chrom.atoms[3]).unwrap().coord, a4_before);
    }

    #[test]
    fn normalize_angle_wraps_into_symmetric_range() {
        assert!((normalize_angle(190.0) - (-170.0)).abs() < 1e-9);
        assert!((normalize_angle(-190.0) - 170.0).abs() < 1e-9);
        assert!((normalize_angle(180.0) - 180.0).abs() < 1e-9);
    }
}
