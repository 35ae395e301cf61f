//! Scoring functions: vdW, dihedral (torsional), and
//! HHS solvation terms, all built on the shared [`base::BaseSf`] trait and
//! the [`partition`] two-tier hot/cold split that keeps a rescoring pass
//! `O(moving atoms)` instead of `O(all atoms)`.

pub mod base;
pub mod dihedral;
pub mod hhs_solvation;
pub mod partition;
pub mod vdw;

pub use base::{Annotation, BaseSf};
pub use dihedral::DihedralScore;
pub use hhs_solvation::HhsSolvationScore;
pub use vdw::VdwScore;
