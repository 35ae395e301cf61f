//! `Atom`: a mutable graph node carrying 2-D chemistry (typer results,
//! bond list) and 3-D state (coordinate, saved snapshots).

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::geometry::Coord;
use crate::model::bond::BondId;
use crate::typer::{HhsType, PmfType, TriposType};

/// 1-based index of an atom within its owning `Model`. `Copy` and cheap, so
/// it can be held as a non-owning reference to an atom that outlives any
/// single borrow.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Hybridization {
    #[default]
    Undef,
    Sp,
    Sp2,
    Sp3,
    Arom,
    Tri,
}

/// Snapshot id 0 is reserved for the "most recent `SaveCoords`" style
/// default slot; callers are free to use any `i64` key.
pub const DEFAULT_SNAPSHOT: i64 = 0;

#[derive(Debug, Clone)]
pub struct Atom {
    pub id: AtomId,
    pub atomic_no: u32,
    pub name: String,
    pub subunit_id: i32,
    pub subunit_name: String,
    pub segment_name: String,

    pub hybrid: Hybridization,
    pub n_implicit_h: u32,
    pub formal_charge: i32,
    pub partial_charge: f64,
    pub group_charge: f64,

    pub coord: Coord,
    pub atomic_mass: f64,
    pub vdw_radius: f64,

    pub ff_type: String,
    pub pmf_type: Option<PmfType>,
    pub tripos_type: Option<TriposType>,
    pub hhs_type: Option<HhsType>,

    pub cyclic: bool,
    pub selected: bool,
    pub user1_bool: bool,
    pub user1_double: f64,
    pub user2_double: f64,

    /// Incident bonds, keyed by bond id so iteration is always in id order.
    bond_map: BTreeMap<BondId, bool>,

    /// Snapshot id → saved coordinate.
    saved_coords: BTreeMap<i64, Coord>,
}

impl Atom {
    pub fn new(id: AtomId, atomic_no: u32, name: impl Into<String>, coord: Coord) -> Self {
        Atom {
            id,
            atomic_no,
            name: name.into(),
            subunit_id: 0,
            subunit_name: String::from("UNK"),
            segment_name: String::new(),
            hybrid: Hybridization::Undef,
            n_implicit_h: 0,
            formal_charge: 0,
            partial_charge: 0.0,
            group_charge: 0.0,
            coord,
            atomic_mass: 0.0,
            vdw_radius: 1.5,
            ff_type: String::new(),
            pmf_type: None,
            tripos_type: None,
            hhs_type: None,
            cyclic: false,
            selected: false,
            user1_bool: false,
            user1_double: 0.0,
            user2_double: 0.0,
            bond_map: BTreeMap::new(),
            saved_coords: BTreeMap::new(),
        }
    }

    /// Coordination number: bonded neighbors plus implicit hydrogens.
    pub fn coordination_number(&self) -> usize {
        self.bond_map.len() + self.n_implicit_h as usize
    }

    /// Incident bonds in deterministic (bond-id) order, each paired with
    /// whether this atom is bond's "atom1" endpoint.
    pub fn bonds(&self) -> impl Iterator<Item = (BondId, bool)> + '_ {
        self.bond_map.iter().map(|(id, is_atom1)| (*id, *is_atom1))
    }

    pub fn bond_count(&self) -> usize {
        self.bond_map.len()
    }

    pub fn has_bond(&self, bond: BondId) -> bool {
        self.bond_map.contains_key(&bond)
    }

    pub(crate) fn register_bond(&mut self, bond: BondId, is_atom1: bool) -> bool {
        if self.bond_map.contains_key(&bond) {
            return false;
        }
        self.bond_map.insert(bond, is_atom1);
        true
    }

    pub(crate) fn unregister_bond(&mut self, bond: BondId) {
        self.bond_map.remove(&bond);
    }

    pub fn set_coords(&mut self, coord: Coord) {
        self.coord = coord;
    }

    pub fn translate(&mut self, delta: Coord) {
        self.coord += delta;
    }

    pub fn rotate_using_quat(&mut self, q: crate::geometry::Quaternion) {
        self.coord = q.rotate(self.coord);
    }

    pub fn save_coords(&mut self, snapshot: i64) {
        self.saved_coords.insert(snapshot, self.coord);
    }

    pub fn revert_coords(&mut self, snapshot: i64) -> CoreResult<()> {
        match self.saved_coords.get(&snapshot) {
            Some(&coord) => {
                self.coord = coord;
                Ok(())
            }
            None => Err(CoreError::InvalidRequest(format!(
                "atom {}: no saved coords under snapshot {snapshot}",
                self.id.0
            ))),
        }
    }

    pub fn saved_coord(&self, snapshot: i64) -> Option<Coord> {
        self.saved_coords.get(&snapshot).copied()
    }

    pub fn is_metal(&self) -> bool {
        matches!(
            self.atomic_no,
            3 | 11 | 12 | 13 | 19 | 20 | 25 | 26 | 27 | 28 | 29 | 30 | 37 | 38 | 47 | 48 | 55 | 56 | 74 | 78 | 79 | 80
        )
    }

    /// Halogens excluding fluorine, used by `is_lipophilic`.
    pub fn is_halogen_not_f(&self) -> bool {
        matches!(self.atomic_no, 17 | 35 | 53 | 85)
    }

    pub fn is_in_sphere(&self, center: Coord, radius: f64) -> bool {
        self.coord.distance_sq(&center) <= radius * radius
    }

    pub fn is_in_cuboid(&self, min: Coord, max: Coord) -> bool {
        self.coord.x >= min.x
            && self.coord.x <= max.x
            && self.coord.y >= min.y
            && self.coord.y <= max.y
            && self.coord.z >= min.z
            && self.coord.z <= max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordination_number_counts_implicit_h() {
        let mut atom = Atom::new(AtomId(1), 6, "C1", Coord::ZERO);
        atom.n_implicit_h = 2;
        assert_eq!(atom.coordination_number(), 2);
        atom.register_bond(BondId(1), true);
        assert_eq!(atom.coordination_number(), 3);
    }

    #[test]
    fn save_and_revert_round_trip() {
        let mut atom = Atom::new(AtomId(1), 6, "C1", Coord::new(1.0, 2.0, 3.0));
        atom.save_coords(0);
        atom.translate(Coord::new(5.0, 5.0, 5.0));
        assert_eq!(atom.coord, Coord::new(6.0, 7.0, 8.0));
        atom.revert_coords(0).unwrap();
        assert_eq!(atom.coord, Coord::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn revert_missing_snapshot_is_invalid_request() {
        let mut atom = Atom::new(AtomId(1), 6, "C1", Coord::ZERO);
        let err = atom.revert_coords(42).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRequest(_)));
    }

    #[test]
    fn register_bond_rejects_reregistration() {
        let mut atom = Atom::new(AtomId(1), 6, "C1", Coord::ZERO);
        assert!(atom.register_bond(BondId(1), true));
        assert!(!atom.register_bond(BondId(1), false));
    }
}
