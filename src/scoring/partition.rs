//! Two-tier distance partition: shrinks the flexible-interaction list every
//! atom must be rescored against down to whichever neighbors currently sit
//! within a chosen radius, so the vdW and HHS solvation terms only have to
//! resum `O(atoms within range)` instead of `O(all flexibly-interacting
//! atoms)` after a mutation moves a handful of atoms.

use std::collections::BTreeMap;

use crate::model::AtomId;

/// Per-atom partitioned interaction lists, built from a master
/// flex-interaction map (e.g. [`crate::flex::ModelMutator::flex_intns_map`])
/// by keeping only entries within `d` Å of each atom.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    partitioned: BTreeMap<AtomId, Vec<AtomId>>,
}

impl Partition {
    pub fn new() -> Self {
        Partition::default()
    }

    pub fn get(&self, atom: AtomId) -> &[AtomId] {
        self.partitioned.get(&atom).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rebuilds the partition for every atom in `atom_list`, copying from
    /// `intns` only the entries currently within `d` Å of that atom (via
    /// `coord`). `d <= 0.0` resets the partition to the unfiltered master
    /// list — the two-tier scheme's "cold" mode, used once per full
    /// rescore.
    pub fn partition(
        &mut self,
        atom_list: &[AtomId],
        intns: &BTreeMap<AtomId, std::collections::BTreeSet<AtomId>>,
        coord: &dyn Fn(AtomId) -> crate::geometry::Coord,
        d: f64,
    ) {
        self.partitioned.clear();
        for &atom in atom_list {
            let Some(neighbors) = intns.get(&atom) else {
                continue;
            };
            if d > 0.0 {
                let dd = d * d;
                let center = coord(atom);
                let within: Vec<AtomId> = neighbors.iter().copied().filter(|&n| coord(n).distance_sq(&center) < dd).collect();
                self.partitioned.insert(atom, within);
            } else {
                self.partitioned.insert(atom, neighbors.iter().copied().collect());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;
    use std::collections::BTreeSet;

    fn sample_intns() -> BTreeMap<AtomId, BTreeSet<AtomId>> {
        let mut map = BTreeMap::new();
        map.insert(AtomId(1), BTreeSet::from([AtomId(2), AtomId(3)]));
        map
    }

    fn coord_of(atom: AtomId) -> Coord {
        match atom.0 {
            1 => Coord::ZERO,
            2 => Coord::new(1.0, 0.0, 0.0),
            3 => Coord::new(10.0, 0.0, 0.0),
            _ => Coord::ZERO,
        }
    }

    #[test]
    fn zero_distance_resets_to_the_full_list() {
        let mut partition = Partition::new();
        partition.partition(&[AtomId(1)], &sample_intns(), &coord_of, 0.0);
        assert_eq!(partition.get(AtomId(1)), &[AtomId(2), AtomId(3)]);
    }

    #[test]
    fn positive_distance_keeps_only_atoms_in_range() {
        let mut partition = Partition::new();
        partition.partition(&[AtomId(1)], &sample_intns(), &coord_of, 5.0);
        assert_eq!(partition.get(AtomId(1)), &[AtomId(2)]);
    }

    #[test]
    fn every_atom_within_d_in_the_master_list_survives_partition() {
        let intns = sample_intns();
        let mut partition = Partition::new();
        partition.partition(&[AtomId(1)], &intns, &coord_of, 5.0);
        for &neighbor in &intns[&AtomId(1)] {
            let in_range = coord_of(AtomId(1)).distance_sq(&coord_of(neighbor)) < 25.0;
            assert_eq!(partition.get(AtomId(1)).contains(&neighbor), in_range);
        }
    }

    #[test]
    fn repartitioning_clears_stale_entries() {
        let mut partition = Partition::new();
        partition.partition(&[AtomId(1)], &sample_intns(), &coord_of, 0.0);
        assert_eq!(partition.get(AtomId(1)).len(), 2);
        partition.partition(&[], &sample_intns(), &coord_of, 0.0);
        assert!(partition.get(AtomId(1)).is_empty());
    }
}
