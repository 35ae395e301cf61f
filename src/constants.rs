//! Tunable defaults shared across the core: one flat module of named magic
//! numbers instead of scattering literals through the algorithms.

/// When a quaternion SLERP is considered linear and not spherical.
pub const LINEAR_THRESHOLD: f64 = 0.9995;

/// Minimum delta (degrees) a `ChromDihedralRefData::set_model_value` call
/// must see before it bothers rotating any atoms.
pub const DIHEDRAL_UPDATE_EPSILON_DEG: f64 = 0.001;

/// Default occupancy threshold above which a `Model` is considered enabled.
pub const DEFAULT_OCCUPANCY_THRESHOLD: f64 = 0.5;

/// Default equality tolerance used by `RealGrid` value comparisons.
pub const DEFAULT_GRID_TOLERANCE: f64 = 1e-6;

/// Default number of padding cells surrounding the interior of a grid.
pub const DEFAULT_GRID_PAD: i64 = 1;

/// 1-2 / 1-3 / 1-4-or-further connectivity corrections used by the HHS
/// solvation overlap term.
pub const HHS_P_12: f64 = 0.8875;
pub const HHS_P_13: f64 = 0.3516;
pub const HHS_P_14_PLUS: f64 = 0.3156;

/// Default solvent probe radius (Å) added to each HHS interaction center's
/// own radius when computing isolated surface area.
pub const DEFAULT_SOLVENT_RADIUS: f64 = 1.4;

/// Hard cap on the number of cavities a site mapper will keep after sorting
/// by descending volume.
pub const MAX_CAVITIES: usize = 99;

/// Default minimum cavity volume (number of grid cells) accepted by
/// `FindPeaks` when used for site mapping.
pub const DEFAULT_MIN_CAVITY_VOLUME: usize = 10;

/// vdW outer cutoff as a multiple of `rmin = Ri + Rj`.
pub const VDW_RMAX_MULTIPLIER: f64 = 1.5;

/// vdW close-range energy cap, as a multiple of `kij`, defining where the
/// quadratic switch kicks in.
pub const VDW_ECUT: f64 = 1.0;

/// vdW close-range quadratic's value at `R = 0`, as a multiple of `ecutoff`.
pub const VDW_E0_MULTIPLIER: f64 = 1.5;
