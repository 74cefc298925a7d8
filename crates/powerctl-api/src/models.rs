// Wire types for the power control manager's REST API.
//
// The server is a Tastypie-style JSON API: collection reads are wrapped in a
// `{ meta, objects }` envelope, resources are identified by `resource_uri`
// strings, and relationship fields may arrive either as a bare reference
// string or as an inline object carrying its own `resource_uri`. Raw read
// shapes use `#[serde(default)]` liberally because outlet records can come
// back partially shaped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard collection envelope.
///
/// Every collection endpoint wraps its payload:
/// ```json
/// { "meta": { "limit": 20, "offset": 0, "total_count": 3 }, "objects": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub meta: Meta,
    pub objects: Vec<T>,
}

/// Pagination metadata from the collection envelope.
#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

// ── References ───────────────────────────────────────────────────────

/// A reference-bearing field value: either a bare reference string or an
/// inline resource object.
///
/// A value that is neither fails deserialization outright; an inline object
/// without a `resource_uri` deserializes fine but yields `None` from
/// [`Ref::uri`] -- the codec turns that into an explicit shape error rather
/// than silently coercing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref {
    /// A bare reference string, e.g. `"/api/host/3/"`.
    Bare(String),
    /// An inline resource object carrying its own `resource_uri`.
    Inline(InlineResource),
}

/// An inline resource object embedded in a reference field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineResource {
    #[serde(default)]
    pub resource_uri: Option<String>,
    /// Remaining fields of the embedded resource.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Ref {
    /// The reference string, or `None` for an inline object without one.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Bare(uri) => Some(uri),
            Self::Inline(resource) => resource.resource_uri.as_deref(),
        }
    }
}

/// An element of a device's `outlets` sequence on the wire.
///
/// Reads return full (or partial) outlet objects; already-flattened payloads
/// carry bare reference strings. Both shapes round-trip through the codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutletRef {
    Uri(String),
    Record(RawOutlet),
}

impl OutletRef {
    /// The outlet's reference string, or `None` for a record without one.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(uri),
            Self::Record(raw) => raw.resource_uri.as_deref(),
        }
    }
}

// ── Raw read shapes ──────────────────────────────────────────────────

/// Raw power control device record as returned by reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPowerDevice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub device_type: Option<Ref>,
    #[serde(default)]
    pub outlets: Vec<OutletRef>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Raw outlet record nested inside a device read (possibly partial).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOutlet {
    #[serde(default)]
    pub resource_uri: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    /// `null` when the outlet is unassigned.
    #[serde(default)]
    pub host: Option<Ref>,
    /// Reference to the owning device.
    #[serde(default)]
    pub device: Option<Ref>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Flat write shapes ────────────────────────────────────────────────

/// Flattened device payload for create (no `id`) and update (with `id`).
///
/// Reference-bearing fields hold bare reference strings only; all other
/// fields pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevicePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub outlets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Flattened outlet payload for the per-outlet update endpoint.
///
/// `host` always serializes, as a reference string or as JSON `null` --
/// detaching an outlet is communicated by writing the null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutletPayload {
    pub identifier: String,
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}
