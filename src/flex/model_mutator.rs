//! `ModelMutator`: for a set of rotatable bonds, decides which side of each
//! bond is the smaller (or, in tethered mode, the free) one to rotate, and
//! builds the atom-indexed flexible-interaction matrix a scoring function
//! consults to know which atom pairs can change distance across a mutation.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CoreError, CoreResult};
use crate::model::bond::BondId;
use crate::model::{AtomId, Model};

/// Connected component reachable from `seed` without crossing `bond`.
fn spin_side(model: &Model, bond_id: BondId, seed: AtomId) -> BTreeSet<AtomId> {
    let mut selected = BTreeSet::new();
    let mut pending = vec![seed];
    selected.insert(seed);
    while let Some(current) = pending.pop() {
        let Some(atom) = model.atom(current) else { continue };
        for (neighbor_bond, _) in atom.bonds() {
            if neighbor_bond == bond_id {
                continue;
            }
            let Some(b) = model.bond(neighbor_bond) else { continue };
            if let Some(other) = b.other_atom(current) {
                if selected.insert(other) {
                    pending.push(other);
                }
            }
        }
    }
    selected
}

/// The two bonded-atom lists either side of a rotatable bond, excluding the
/// bond's own two atoms, needed to pick the dihedral's outer atoms.
fn bonded_excluding(model: &Model, atom: AtomId, exclude: AtomId) -> Vec<AtomId> {
    model.neighbors(atom).into_iter().filter(|&a| a != exclude).collect()
}

/// Dihedral atom quadruple plus the rotating side for one rotatable bond,
/// mirroring `RbtModelMutator::Setup`'s per-bond computation.
#[derive(Debug, Clone)]
pub struct RotatableBondSetup {
    pub bond_id: BondId,
    pub dihedral_atoms: [AtomId; 4],
    /// Atoms on the side that should actually be rotated: the smaller side,
    /// or in tethered mode, the side with fewer (ideally zero) tethered
    /// atoms, even if that side is larger overall.
    pub rotating_side: Vec<AtomId>,
}

/// Computes the rotatable-bond setup (dihedral atoms + rotating side) for a
/// single bond. `tethered_atoms` empty means "not tethered": the half-split
/// is judged over the whole molecule instead of just the tethered subset.
pub fn setup_rotatable_bond(model: &Model, bond_id: BondId, tethered_atoms: &BTreeSet<AtomId>) -> CoreResult<RotatableBondSetup> {
    let bond = model
        .bond(bond_id)
        .ok_or_else(|| CoreError::InvalidRequest(format!("no such bond {}", bond_id.0)))?;
    let atom2 = bond.atom1_id;
    let atom3 = bond.atom2_id;

    let bonded_atoms2 = bonded_excluding(model, atom2, atom3);
    let bonded_atoms3 = bonded_excluding(model, atom3, atom2);
    let first2 = *bonded_atoms2
        .first()
        .ok_or_else(|| CoreError::InvalidRequest(format!("bond {} atom has no other neighbors to rotate", bond_id.0)))?;
    let first3 = *bonded_atoms3
        .first()
        .ok_or_else(|| CoreError::InvalidRequest(format!("bond {} atom has no other neighbors to rotate", bond_id.0)))?;

    let mut spin = spin_side(model, bond_id, atom2);
    spin.remove(&atom2);
    spin.remove(&atom3);

    let n_tethered = tethered_atoms.len();
    let n_selected = if n_tethered == 0 {
        spin.len()
    } else {
        spin.intersection(tethered_atoms).count()
    };
    let n_atoms = model.atom_count();
    let n_half = if n_tethered == 0 {
        n_atoms.saturating_sub(2) / 2
    } else {
        n_tethered.saturating_sub(2) / 2
    };

    if n_selected > n_half {
        // Over half (of the relevant population) selected: rotate the other
        // side instead.
        let mut complement: BTreeSet<AtomId> = model.atoms().map(|a| a.id).collect();
        for atom in &spin {
            complement.remove(atom);
        }
        complement.remove(&atom2);
        complement.remove(&atom3);
        Ok(RotatableBondSetup {
            bond_id,
            dihedral_atoms: [first3, atom3, atom2, first2],
            rotating_side: complement.into_iter().collect(),
        })
    } else {
        Ok(RotatableBondSetup {
            bond_id,
            dihedral_atoms: [first2, atom2, atom3, first3],
            rotating_side: spin.into_iter().collect(),
        })
    }
}

/// Symmetric atom-indexed interaction matrix: `flex_intns(i)` holds every
/// other atom whose distance to atom `i` can change across some rotatable
/// bond. Atoms absent from `i`'s entry are therefore rigidly fixed relative
/// to atom `i`.
#[derive(Debug, Clone, Default)]
pub struct ModelMutator {
    pub rot_bonds: Vec<BondId>,
    pub setups: Vec<RotatableBondSetup>,
    flex_intns: BTreeMap<AtomId, BTreeSet<AtomId>>,
}

impl ModelMutator {
    /// Builds the mutator for `model` given its rotatable bonds and
    /// (possibly empty) tethered-atom set.
    pub fn build(model: &Model, rotatable_bonds: &[BondId], tethered_atoms: &BTreeSet<AtomId>) -> CoreResult<Self> {
        let mut flex_intns: BTreeMap<AtomId, BTreeSet<AtomId>> = model.atoms().map(|a| (a.id, BTreeSet::new())).collect();
        let mut setups = Vec::with_capacity(rotatable_bonds.len());

        for &bond_id in rotatable_bonds {
            let setup = setup_rotatable_bond(model, bond_id, tethered_atoms)?;
            let rotating: BTreeSet<AtomId> = setup.rotating_side.iter().copied().collect();
            let bond = model.bond(bond_id).expect("bond existence checked by setup_rotatable_bond");
            let fixed: BTreeSet<AtomId> = model
                .atoms()
                .map(|a| a.id)
                .filter(|id| !rotating.contains(id) && *id != bond.atom1_id && *id != bond.atom2_id)
                .collect();

            for &s in &rotating {
                for &u in &fixed {
                    flex_intns.entry(s).or_default().insert(u);
                    flex_intns.entry(u).or_default().insert(s);
                }
            }
            setups.push(setup);
        }

        Ok(ModelMutator {
            rot_bonds: rotatable_bonds.to_vec(),
            setups,
            flex_intns,
        })
    }

    /// Every other atom whose distance to `atom` can change across a
    /// rotatable bond, sorted and deduplicated by construction.
    pub fn flex_intns(&self, atom: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.flex_intns.get(&atom).into_iter().flat_map(|set| set.iter().copied())
    }

    pub fn flex_intns_map(&self) -> &BTreeMap<AtomId, BTreeSet<AtomId>> {
        &self.flex_intns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;
    use crate::model::bond::FormalBondOrder;

    /// Straight chain C1-C2-C3-C4-C5-C6 with a single rotatable bond C3-C4.
    fn hexane_like_model() -> (Model, BondId) {
        let mut model = Model::new();
        let atoms: Vec<_> = (0..6)
            .map(|i| model.add_atom(6, format!("C{}", i + 1), Coord::new(i as f64, 0.0, 0.0)))
            .collect();
        for pair in atoms.windows(2) {
            model.construct_bond(pair[0], pair[1], FormalBondOrder::Single).unwrap();
        }
        let bond_id = model
            .bonds()
            .find(|b| b.has_atom(atoms[2]) && b.has_atom(atoms[3]))
            .unwrap()
            .id;
        (model, bond_id)
    }

    #[test]
    fn flex_intns_is_symmetric_for_every_pair() {
        let (model, bond_id) = hexane_like_model();
        let mutator = ModelMutator::build(&model, &[bond_id], &BTreeSet::new()).unwrap();
        for atom in model.atoms() {
            for other in mutator.flex_intns(atom.id) {
                assert!(mutator.flex_intns(other).any(|back| back == atom.id));
            }
        }
    }

    #[test]
    fn flex_intns_excludes_atoms_on_the_same_rigid_side() {
        let (model, bond_id) = hexane_like_model();
        let mutator = ModelMutator::build(&model, &[bond_id], &BTreeSet::new()).unwrap();
        let atoms: Vec<AtomId> = model.atoms().map(|a| a.id).collect();
        // C1 and C2 sit on the same side of the C3-C4 bond as each other.
        assert!(!mutator.flex_intns(atoms[0]).any(|a| a == atoms[1]));
        // C1 and C6 are on opposite sides, so they are flexibly interacting.
        assert!(mutator.flex_intns(atoms[0]).any(|a| a == atoms[5]));
    }

    #[test]
    fn rotating_side_is_the_smaller_half() {
        let (model, bond_id) = hexane_like_model();
        let setup = setup_rotatable_bond(&model, bond_id, &BTreeSet::new()).unwrap();
        // C3-C4 is the middle bond of a 6-atom chain, either side has 2
        // non-pivot atoms, so picking either is equally valid; just check
        // the rotating side never exceeds half the (non-pivot) population.
        assert!(setup.rotating_side.len() <= 2);
    }

    #[test]
    fn duplicate_build_calls_are_idempotent() {
        let (model, bond_id) = hexane_like_model();
        let m1 = ModelMutator::build(&model, &[bond_id], &BTreeSet::new()).unwrap();
        let m2 = ModelMutator::build(&model, &[bond_id], &BTreeSet::new()).unwrap();
        assert_eq!(m1.flex_intns_map(), m2.flex_intns_map());
    }
}
