// powerctl-api: Async Rust client for the power control manager's REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::PowerApiClient;
pub use error::Error;
pub use models::{
    DevicePayload, Envelope, InlineResource, Meta, OutletPayload, OutletRef, RawOutlet,
    RawPowerDevice, Ref,
};
pub use transport::{TlsMode, TransportConfig};
