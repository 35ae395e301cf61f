//! `Bond`: an edge between two atoms.

use crate::model::atom::AtomId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BondId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormalBondOrder {
    Single,
    Double,
    Triple,
    /// Delocalized/aromatic bond, formal order unknown.
    Aromatic,
}

impl FormalBondOrder {
    pub fn as_integer(self) -> Option<u8> {
        match self {
            FormalBondOrder::Single => Some(1),
            FormalBondOrder::Double => Some(2),
            FormalBondOrder::Triple => Some(3),
            FormalBondOrder::Aromatic => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bond {
    pub id: BondId,
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub formal_order: FormalBondOrder,
    /// Fractional bond order, e.g. 1.5 for an aromatic ring bond.
    pub partial_order: f64,
    pub cyclic: bool,
    pub selected: bool,
}

impl Bond {
    pub fn new(id: BondId, atom1_id: AtomId, atom2_id: AtomId, formal_order: FormalBondOrder) -> Self {
        let partial_order = formal_order.as_integer().map(f64::from).unwrap_or(1.5);
        Bond {
            id,
            atom1_id,
            atom2_id,
            formal_order,
            partial_order,
            cyclic: false,
            selected: false,
        }
    }

    /// Returns the atom at the other end from `from`, or `None` if `from`
    /// is not one of this bond's endpoints.
    pub fn other_atom(&self, from: AtomId) -> Option<AtomId> {
        if from == self.atom1_id {
            Some(self.atom2_id)
        } else if from == self.atom2_id {
            Some(self.atom1_id)
        } else {
            None
        }
    }

    pub fn has_atom(&self, atom: AtomId) -> bool {
        atom == self.atom1_id || atom == self.atom2_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_atom_resolves_either_endpoint() {
        let bond = Bond::new(BondId(1), AtomId(1), AtomId(2), FormalBondOrder::Single);
        assert_eq!(bond.other_atom(AtomId(1)), Some(AtomId(2)));
        assert_eq!(bond.other_atom(AtomId(2)), Some(AtomId(1)));
        assert_eq!(bond.other_atom(AtomId(3)), None);
    }

    #[test]
    fn aromatic_bond_defaults_partial_order_to_one_point_five() {
        let bond = Bond::new(BondId(1), AtomId(1), AtomId(2), FormalBondOrder::Aromatic);
        assert_eq!(bond.partial_order, 1.5);
        assert_eq!(bond.formal_order.as_integer(), None);
    }
}
