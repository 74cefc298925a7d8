// ── Outlet persistence seam ──
//
// Every hydrated outlet carries an `OutletWriter` handle; the trait is the
// boundary between the domain model and whatever transport persists it.

use async_trait::async_trait;

use powerctl_api::{OutletPayload, PowerApiClient};

use crate::error::CoreError;

/// Persist-current-state capability for a single outlet sub-resource.
#[async_trait]
pub trait OutletWriter: Send + Sync {
    /// Write an outlet's flattened state to its own sub-resource endpoint.
    async fn update_outlet(
        &self,
        resource_uri: &str,
        payload: &OutletPayload,
    ) -> Result<(), CoreError>;
}

#[async_trait]
impl OutletWriter for PowerApiClient {
    async fn update_outlet(
        &self,
        resource_uri: &str,
        payload: &OutletPayload,
    ) -> Result<(), CoreError> {
        PowerApiClient::update_outlet(self, resource_uri, payload).await?;
        Ok(())
    }
}
