//! Spatial grids: a shared coordinate↔index mapping
//! plus three payload layers — a float-valued `RealGrid`, and the
//! atom-index-list `NonBondedGrid` used for fast neighbor queries during
//! scoring.

pub mod base;
pub mod nonbonded_grid;
pub mod real_grid;

pub use base::Grid;
pub use nonbonded_grid::NonBondedGrid;
pub use real_grid::RealGrid;
