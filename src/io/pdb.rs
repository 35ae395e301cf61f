//! PDB reader, a thin adapter over `pdbtbx`: walk its
//! model/chain/residue/atom hierarchy into a flat [`Model`], bonding
//! consecutive backbone atoms are left to a later `topology` pass since a
//! PDB carries no explicit bond records for standard residues.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::geometry::Coord;
use crate::model::{AtomId, Model};

/// Reads the first model of a PDB file. `pdbtbx` already validates the
/// record grammar; parse errors are folded into `CoreError::ParseFailure`
/// with the file path as context.
pub fn read_pdb_file(path: &Path) -> CoreResult<Model> {
    let (pdb, _warnings) = pdbtbx::open(path).map_err(|errors| {
        CoreError::ParseFailure(crate::error::ParseError::BadField {
            context: format!("PDB file {}", path.display()),
            field: "record".into(),
            line: 0,
            detail: errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "),
        })
    })?;

    let mut model = Model::new();
    let mut atom_ids: Vec<(usize, AtomId)> = Vec::new();

    for chain in pdb.chains() {
        for residue in chain.residues() {
            for conformer in residue.conformers() {
                for atom in conformer.atoms() {
                    let atomic_no = atom
                        .element()
                        .map(|e| e.atomic_number() as u32)
                        .unwrap_or_else(|| crate::io::sdf_element_guess(atom.name()));
                    let id = model.add_atom(atomic_no, atom.name(), Coord::new(atom.x(), atom.y(), atom.z()));
                    if let Some(a) = model.atom_mut(id) {
                        a.subunit_name = residue.name().unwrap_or("UNK").to_string();
                        a.subunit_id = residue.serial_number();
                        a.segment_name = chain.id().to_string();
                    }
                    atom_ids.push((atom.serial_number(), id));
                }
            }
        }
    }

    if model.atom_count() == 0 {
        return Err(CoreError::InvalidRequest(format!("PDB file {} contains no atoms", path.display())));
    }

    Ok(model)
}
