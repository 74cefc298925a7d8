// Power control device and outlet domain entities.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use powerctl_api::OutletPayload;

use crate::error::CoreError;
use crate::persist::OutletWriter;

/// A power distribution unit record.
///
/// Owns its outlets exclusively; outlet order matches the wire and is
/// meaningful (intersection queries report in this order).
#[derive(Debug, Clone)]
pub struct PowerDevice {
    /// Server-assigned identifier; absent before the record is created.
    pub id: Option<String>,
    pub name: Option<String>,
    /// Reference to the device's type.
    pub device_type: Option<String>,
    pub outlets: Vec<Outlet>,
    /// Non-reference wire fields preserved verbatim for write-back.
    pub extra: serde_json::Map<String, Value>,
}

/// A single switchable outlet on a power device.
///
/// Constructed only by hydration (or tests); always carries the persistence
/// capability, even when the raw input lacked a `resource_uri`.
#[derive(Clone)]
pub struct Outlet {
    /// Sub-resource endpoint for persisting this outlet.
    pub resource_uri: Option<String>,
    /// Unique within the owning device's outlet sequence.
    pub identifier: String,
    /// Reference to the bound host; `None` when unassigned.
    pub host: Option<String>,
    /// Reference to the owning device.
    pub device: Option<String>,
    writer: Arc<dyn OutletWriter>,
}

impl Outlet {
    pub fn new(
        identifier: String,
        resource_uri: Option<String>,
        host: Option<String>,
        device: Option<String>,
        writer: Arc<dyn OutletWriter>,
    ) -> Self {
        Self {
            resource_uri,
            identifier,
            host,
            device,
            writer,
        }
    }

    /// Snapshot the outlet's current state as a wire payload.
    pub fn to_payload(&self) -> OutletPayload {
        OutletPayload {
            identifier: self.identifier.clone(),
            host: self.host.clone(),
            device: self.device.clone(),
        }
    }

    /// Persist the outlet's current state to its sub-resource endpoint.
    pub async fn persist(&self) -> Result<(), CoreError> {
        self.persist_future().await
    }

    /// The persistence operation as an owned future, so callers can initiate
    /// it (e.g. spawn it) without borrowing the outlet.
    pub(crate) fn persist_future(
        &self,
    ) -> impl Future<Output = Result<(), CoreError>> + Send + 'static {
        let writer = Arc::clone(&self.writer);
        let resource_uri = self.resource_uri.clone();
        let identifier = self.identifier.clone();
        let payload = self.to_payload();

        async move {
            let Some(uri) = resource_uri else {
                return Err(CoreError::OutletNotPersistable { identifier });
            };
            writer.update_outlet(&uri, &payload).await
        }
    }
}

impl fmt::Debug for Outlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outlet")
            .field("resource_uri", &self.resource_uri)
            .field("identifier", &self.identifier)
            .field("host", &self.host)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}
