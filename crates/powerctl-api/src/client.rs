// HTTP client for the power control manager's REST API.
//
// Wraps `reqwest::Client` with manager-specific URL construction and
// collection-envelope unwrapping. Collection reads return unwrapped
// `objects` payloads -- the envelope is stripped before the caller sees it.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{DevicePayload, Envelope, OutletPayload, RawPowerDevice};
use crate::transport::TransportConfig;

/// Collection endpoint for power control device records.
const DEVICE_COLLECTION: &str = "api/power_control_device/";

/// Async client for the power control manager's REST API.
pub struct PowerApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PowerApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` should be the manager root (e.g.
    /// `https://manager.example.com`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The manager base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the device collection URL: `{base}/api/power_control_device/`
    fn collection_url(&self) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{DEVICE_COLLECTION}")).expect("invalid collection URL")
    }

    /// Build a per-record URL: `{base}/api/power_control_device/{id}/`
    fn record_url(&self, id: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{DEVICE_COLLECTION}{id}/")).expect("invalid record URL")
    }

    /// Resolve a server-issued `resource_uri` (an absolute path like
    /// `/api/power_control_device_outlet/7/`) against the manager base.
    fn resource_url(&self, resource_uri: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(resource_uri)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List all power control device records.
    ///
    /// `GET /api/power_control_device/`
    pub async fn list_devices(&self) -> Result<Vec<RawPowerDevice>, Error> {
        let url = self.collection_url();
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.parse_collection(resp).await
    }

    /// Create a device record from a flattened payload (no `id`).
    ///
    /// `POST /api/power_control_device/`
    pub async fn create_device(&self, payload: &DevicePayload) -> Result<RawPowerDevice, Error> {
        let url = self.collection_url();
        debug!("POST {url}");

        let resp = self.http.post(url).json(payload).send().await?;
        self.parse_record(resp).await
    }

    /// Update a device record from a flattened payload (including `id`).
    ///
    /// `PUT /api/power_control_device/{id}/`
    pub async fn update_device(
        &self,
        id: &str,
        payload: &DevicePayload,
    ) -> Result<RawPowerDevice, Error> {
        let url = self.record_url(id);
        debug!("PUT {url}");

        let resp = self.http.put(url).json(payload).send().await?;
        self.parse_record(resp).await
    }

    /// Persist an outlet's current state to its own sub-resource endpoint.
    ///
    /// `PUT {resource_uri}`
    pub async fn update_outlet(
        &self,
        resource_uri: &str,
        payload: &OutletPayload,
    ) -> Result<(), Error> {
        let url = self.resource_url(resource_uri)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(payload).send().await?;
        self.check_status(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Parse a `{ meta, objects }` envelope, returning `objects`.
    async fn parse_collection<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Vec<T>, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        Ok(envelope.objects)
    }

    /// Parse a single-record response body.
    async fn parse_record<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })
    }

    /// Check a response status, discarding any success body.
    async fn check_status(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();

        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }
}

/// Build an `Error::Api` from a non-2xx response, extracting the server's
/// `error_message` when the body carries one.
fn api_error(status: reqwest::StatusCode, body: &str) -> Error {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error_message: Option<String>,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });

    Error::Api {
        message,
        status: status.as_u16(),
    }
}
