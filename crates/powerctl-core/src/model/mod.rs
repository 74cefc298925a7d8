// ── Domain model ──
//
// Canonical in-memory representation of power control entities. Wire shapes
// live in `powerctl-api`; consumers depend on these types.

pub mod device;

pub use device::{Outlet, PowerDevice};
