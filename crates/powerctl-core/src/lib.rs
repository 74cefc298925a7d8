// powerctl-core: Domain data layer between powerctl-api and consumers.

pub mod convert;
pub mod error;
pub mod model;
pub mod outlets;
pub mod persist;

// ── Primary re-exports ──────────────────────────────────────────────
pub use convert::{flatten_device, flatten_record, hydrate_device, hydrate_devices};
pub use error::{CoreError, ShapeError};
pub use model::{Outlet, PowerDevice};
pub use outlets::{PendingDetach, outlet_host_intersection, reassign, same_host};
pub use persist::OutletWriter;
