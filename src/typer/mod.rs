//! Atom typers: pure classification functions from
//! an atom's local chemical context to a categorical type. None of these
//! touch `Model` directly — callers gather the small context struct each
//! typer needs and hand it in, keeping the typers trivially unit-testable.

pub mod charmm;
pub mod hhs;
pub mod pmf;
pub mod tripos;

pub use charmm::{CharmmMassesAdapter, CharmmRecord};
pub use hhs::HhsType;
pub use pmf::PmfType;
pub use tripos::{TriposContext, TriposType};
