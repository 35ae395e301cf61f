//! Ligand/receptor/solvent flexibility representation: a parameter bag per flexibility class plus a chromosome encoding
//! of rotatable-bond state, and the mutator that builds the interaction
//! matrix a scoring function needs to stay `O(moving atoms)`.

pub mod chrom_dihedral;
pub mod flex_data;
pub mod model_mutator;

pub use chrom_dihedral::{ChromDihedralRefData, DihedralMode};
pub use flex_data::{FlexClass, FlexData};
pub use model_mutator::{ModelMutator, RotatableBondSetup, setup_rotatable_bond};
