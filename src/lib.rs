//! Core scoring, grid, and flexibility engine for protein-ligand docking.
//!
//! This crate is the deterministic, reusable core a docking search driver
//! is built on top of: molecular graph + topology, atom typers, spatial
//! grids, docking-site mapping, ligand/receptor flexibility, and the vdW /
//! dihedral / HHS-solvation scoring functions. It deliberately stops short
//! of the driver itself (no GA/MC/simplex search, no CLI) — see each
//! module's doc comment for what it owns.

pub mod catalog;
pub mod cavity;
pub mod constants;
pub mod docking_site;
pub mod error;
pub mod flex;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod model;
pub mod scoring;
pub mod site_mapper;
pub mod topology;
pub mod typer;

pub use error::{CoreError, CoreResult};
