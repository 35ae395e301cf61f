//! Atom/bond graph and the owning `Model`.
//!
//! Atoms and bonds reference each other only through small `Copy` id
//! newtypes (`AtomId`, `BondId`); the owning [`Model`] holds the actual
//! `Vec<Atom>`/`Vec<Bond>` storage. This sidesteps the raw-pointer /
//! reference-counting duality: ids are `Copy`, never dangle, and any
//! traversal that needs a neighboring atom or bond goes through
//! `Model::atom`/`Model::bond`.

pub mod atom;
pub mod bond;
pub mod model;
pub mod pseudo_atom;

pub use atom::{Atom, AtomId, Hybridization};
pub use bond::{Bond, BondId};
pub use model::Model;
pub use pseudo_atom::PseudoAtom;
