//! `Model`: the owning container for a molecular graph. Holds every `Atom`/`Bond`, and is the only place that resolves an
//! `AtomId`/`BondId` back into real data.

use std::collections::BTreeMap;

use crate::constants::DEFAULT_OCCUPANCY_THRESHOLD;
use crate::error::{CoreError, CoreResult, ModelTopologyError};
use crate::flex::flex_data::FlexData;
use crate::geometry::{Coord, Quaternion};
use crate::model::atom::{Atom, AtomId};
use crate::model::bond::{Bond, BondId};
use crate::model::pseudo_atom::PseudoAtom;

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub titles: Vec<String>,
    atoms: BTreeMap<AtomId, Atom>,
    bonds: BTreeMap<BondId, Bond>,
    pseudo_atoms: BTreeMap<AtomId, PseudoAtom>,
    next_atom_id: u32,
    next_bond_id: u32,

    /// Substructure name → atom count, in first-seen order.
    substructure_counts: Vec<(String, usize)>,

    /// Flattened ring membership, one bitset-by-atom-ids per ring, populated
    /// by `crate::topology::find_rings`.
    pub rings: Vec<Vec<AtomId>>,

    pub occupancy: f64,
    pub enabled_threshold: f64,

    pub flex_data: Option<FlexData>,
}

impl Model {
    pub fn new() -> Self {
        Model {
            occupancy: 1.0,
            enabled_threshold: DEFAULT_OCCUPANCY_THRESHOLD,
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.occupancy >= self.enabled_threshold
    }

    // -- atoms ---------------------------------------------------------

    pub fn add_atom(&mut self, atomic_no: u32, name: impl Into<String>, coord: Coord) -> AtomId {
        self.next_atom_id += 1;
        let id = AtomId(self.next_atom_id);
        self.atoms.insert(id, Atom::new(id, atomic_no, name, coord));
        id
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(&id)
    }

    /// Atoms in id order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    // -- bonds -----------------------------------------------------------

    /// Registers a bond between two atoms already owned by this model.
    /// Fails with `ModelTopology` if either endpoint is foreign, and with
    /// `InvalidRequest` if the same bond id/endpoint pair is registered
    /// twice.
    pub fn construct_bond(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        formal_order: crate::model::bond::FormalBondOrder,
    ) -> CoreResult<BondId> {
        if !self.atoms.contains_key(&atom1_id) || !self.atoms.contains_key(&atom2_id) {
            return Err(CoreError::ModelTopology(ModelTopologyError::CrossModelBond { bond_id: 0 }));
        }
        self.next_bond_id += 1;
        let id = BondId(self.next_bond_id);
        let bond = Bond::new(id, atom1_id, atom2_id, formal_order);
        self.bonds.insert(id, bond);

        let registered_1 = self.atoms.get_mut(&atom1_id).unwrap().register_bond(id, true);
        let registered_2 = self.atoms.get_mut(&atom2_id).unwrap().register_bond(id, false);
        if !registered_1 || !registered_2 {
            self.bonds.remove(&id);
            return Err(CoreError::InvalidRequest(format!(
                "bond between atoms {} and {} already exists",
                atom1_id.0, atom2_id.0
            )));
        }
        Ok(id)
    }

    pub fn destroy_bond(&mut self, bond_id: BondId) -> CoreResult<()> {
        let bond = self
            .bonds
            .remove(&bond_id)
            .ok_or_else(|| CoreError::InvalidRequest(format!("no such bond {}", bond_id.0)))?;
        if let Some(a) = self.atoms.get_mut(&bond.atom1_id) {
            a.unregister_bond(bond_id);
        }
        if let Some(a) = self.atoms.get_mut(&bond.atom2_id) {
            a.unregister_bond(bond_id);
        }
        Ok(())
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(&id)
    }

    pub fn bonds(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.values()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Neighboring atom ids of `atom`, in bond-id order.
    pub fn neighbors(&self, atom: AtomId) -> Vec<AtomId> {
        let Some(a) = self.atoms.get(&atom) else {
            return Vec::new();
        };
        a.bonds()
            .filter_map(|(bond_id, _)| self.bonds.get(&bond_id))
            .filter_map(|bond| bond.other_atom(atom))
            .collect()
    }

    pub fn is_12_connected(&self, a: AtomId, b: AtomId) -> bool {
        self.neighbors(a).contains(&b)
    }

    pub fn is_13_connected(&self, a: AtomId, b: AtomId) -> bool {
        self.neighbors(a).iter().any(|mid| self.neighbors(*mid).contains(&b))
    }

    // -- geometric/global operations --------------------------------------

    pub fn translate(&mut self, delta: Coord) {
        for atom in self.atoms.values_mut() {
            atom.translate(delta);
        }
    }

    pub fn rotate_using_quat(&mut self, q: Quaternion) {
        for atom in self.atoms.values_mut() {
            atom.rotate_using_quat(q);
        }
    }

    pub fn save_coords(&mut self, snapshot: i64) {
        for atom in self.atoms.values_mut() {
            atom.save_coords(snapshot);
        }
    }

    pub fn revert_coords(&mut self, snapshot: i64) -> CoreResult<()> {
        for atom in self.atoms.values_mut() {
            atom.revert_coords(snapshot)?;
        }
        Ok(())
    }

    pub fn update_pseudo_atom_coords(&mut self) {
        let snapshot: Vec<(AtomId, Vec<Coord>)> = self
            .pseudo_atoms
            .iter()
            .map(|(id, pa)| {
                let coords = pa
                    .constituents
                    .iter()
                    .filter_map(|cid| self.atoms.get(cid))
                    .map(|a| a.coord)
                    .collect();
                (*id, coords)
            })
            .collect();
        for (id, coords) in snapshot {
            if let Some(pa) = self.pseudo_atoms.get_mut(&id) {
                pa.update_coords(&coords);
            }
        }
    }

    // -- chemical predicates ----------------------------------

    pub fn is_metal(&self, atom: AtomId) -> bool {
        self.atoms.get(&atom).map(Atom::is_metal).unwrap_or(false)
    }

    /// A lipophilic atom: carbon or a non-F halogen, with no attached
    /// heteroatom hydrogen-bonding partner.
    pub fn is_lipophilic(&self, atom: AtomId) -> bool {
        let Some(a) = self.atoms.get(&atom) else {
            return false;
        };
        a.atomic_no == 6 || a.is_halogen_not_f()
    }

    /// N/O/S with a lone pair available, and not already saturated with
    /// bonds+implicit H beyond its common valence.
    pub fn is_hbond_acceptor(&self, atom: AtomId) -> bool {
        let Some(a) = self.atoms.get(&atom) else {
            return false;
        };
        matches!(a.atomic_no, 7 | 8 | 16) && a.formal_charge <= 0
    }

    /// A hydrogen bonded to N, O, or S.
    pub fn is_hbond_donor(&self, atom: AtomId) -> bool {
        let Some(a) = self.atoms.get(&atom) else {
            return false;
        };
        if a.atomic_no != 1 {
            return false;
        }
        self.neighbors(atom)
            .iter()
            .filter_map(|n| self.atoms.get(n))
            .any(|n| matches!(n.atomic_no, 7 | 8 | 16))
    }

    pub fn is_pi_atom(&self, atom: AtomId) -> bool {
        self.atoms
            .get(&atom)
            .map(|a| matches!(a.hybrid, crate::model::Hybridization::Sp2 | crate::model::Hybridization::Arom))
            .unwrap_or(false)
    }

    /// Guanidinium-carbon predicate: sp2 carbon with three sp2 nitrogen
    /// neighbors and a net positive group charge.
    pub fn is_guanidinium_carbon(&self, atom: AtomId) -> bool {
        let Some(a) = self.atoms.get(&atom) else {
            return false;
        };
        if a.atomic_no != 6 || a.hybrid != crate::model::Hybridization::Sp2 {
            return false;
        }
        let neighbors = self.neighbors(atom);
        let n_nitrogens = neighbors
            .iter()
            .filter_map(|n| self.atoms.get(n))
            .filter(|n| n.atomic_no == 7)
            .count();
        n_nitrogens >= 3 && a.group_charge > 0.5
    }

    pub fn is_atom_in_sphere(&self, atom: AtomId, center: Coord, radius: f64) -> bool {
        self.atoms.get(&atom).map(|a| a.is_in_sphere(center, radius)).unwrap_or(false)
    }

    pub fn is_atom_in_cuboid(&self, atom: AtomId, min: Coord, max: Coord) -> bool {
        self.atoms.get(&atom).map(|a| a.is_in_cuboid(min, max)).unwrap_or(false)
    }

    // -- flex data ---------------------------------------------------------

    pub fn set_flex_data(&mut self, flex_data: FlexData) {
        self.flex_data = Some(flex_data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bond::FormalBondOrder;

    fn sample_model() -> (Model, AtomId, AtomId, AtomId) {
        let mut model = Model::new();
        let c1 = model.add_atom(6, "C1", Coord::new(0.0, 0.0, 0.0));
        let c2 = model.add_atom(6, "C2", Coord::new(1.5, 0.0, 0.0));
        let o1 = model.add_atom(8, "O1", Coord::new(3.0, 0.0, 0.0));
        model.construct_bond(c1, c2, FormalBondOrder::Single).unwrap();
        model.construct_bond(c2, o1, FormalBondOrder::Single).unwrap();
        (model, c1, c2, o1)
    }

    #[test]
    fn construct_bond_registers_both_endpoints() {
        let (model, c1, c2, _) = sample_model();
        assert!(model.is_12_connected(c1, c2));
        assert_eq!(model.atom(c1).unwrap().bond_count(), 1);
        assert_eq!(model.atom(c2).unwrap().bond_count(), 2);
    }

    #[test]
    fn construct_bond_rejects_foreign_atom() {
        let (mut model, c1, _, _) = sample_model();
        let err = model
            .construct_bond(c1, AtomId(999), FormalBondOrder::Single)
            .unwrap_err();
        assert!(matches!(err, CoreError::ModelTopology(_)));
    }

    #[test]
    fn destroy_bond_unregisters_both_endpoints() {
        let (mut model, c1, c2, _) = sample_model();
        let bond_id = model.atom(c1).unwrap().bonds().next().unwrap().0;
        model.destroy_bond(bond_id).unwrap();
        assert!(!model.is_12_connected(c1, c2));
    }

    #[test]
    fn is_13_connected_reaches_through_middle_atom() {
        let (model, c1, _, o1) = sample_model();
        assert!(model.is_13_connected(c1, o1));
        assert!(!model.is_12_connected(c1, o1));
    }

    #[test]
    fn save_and_revert_whole_model() {
        let (mut model, c1, _, _) = sample_model();
        model.save_coords(0);
        model.translate(Coord::new(10.0, 0.0, 0.0));
        assert_eq!(model.atom(c1).unwrap().coord, Coord::new(10.0, 0.0, 0.0));
        model.revert_coords(0).unwrap();
        assert_eq!(model.atom(c1).unwrap().coord, Coord::ZERO);
    }
}
