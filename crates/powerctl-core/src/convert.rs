// ── Wire-to-domain conversions ──
//
// Bridges raw `powerctl_api` record shapes into domain types and back.
// Flattening replaces inline reference objects with their reference
// strings, one level deep, on exactly the reference-bearing fields
// (`device_type`, each element of `outlets`); everything else passes
// through unchanged. Hydration installs the persistence capability on
// every outlet. Both directions are pure data shaping -- no network calls.

use std::sync::Arc;

use powerctl_api::{DevicePayload, OutletRef, RawPowerDevice, Ref};

use crate::error::ShapeError;
use crate::model::{Outlet, PowerDevice};
use crate::persist::OutletWriter;

fn ref_uri(r: &Ref, field: &'static str) -> Result<String, ShapeError> {
    r.uri().map(str::to_owned).ok_or(ShapeError { field })
}

// ── Hydration ────────────────────────────────────────────────────────

/// Hydrate one raw device record into a [`PowerDevice`] whose outlets are
/// full entities, each constructed with the writer capability.
pub fn hydrate_device(
    raw: RawPowerDevice,
    writer: &Arc<dyn OutletWriter>,
) -> Result<PowerDevice, ShapeError> {
    let device_type = raw
        .device_type
        .as_ref()
        .map(|r| ref_uri(r, "device_type"))
        .transpose()?;

    let outlets = raw
        .outlets
        .into_iter()
        .map(|o| hydrate_outlet(o, writer))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PowerDevice {
        id: raw.id,
        name: raw.name,
        device_type,
        outlets,
        extra: raw.extra,
    })
}

/// Hydrate a batch read; every element's outlets are hydrated.
pub fn hydrate_devices(
    raw: Vec<RawPowerDevice>,
    writer: &Arc<dyn OutletWriter>,
) -> Result<Vec<PowerDevice>, ShapeError> {
    raw.into_iter().map(|r| hydrate_device(r, writer)).collect()
}

/// A bare reference hydrates to an outlet known only by its URI; a record
/// keeps whatever fields the read supplied.
fn hydrate_outlet(outlet: OutletRef, writer: &Arc<dyn OutletWriter>) -> Result<Outlet, ShapeError> {
    match outlet {
        OutletRef::Uri(uri) => Ok(Outlet::new(
            String::new(),
            Some(uri),
            None,
            None,
            Arc::clone(writer),
        )),
        OutletRef::Record(raw) => {
            let host = raw.host.as_ref().map(|r| ref_uri(r, "host")).transpose()?;
            let device = raw
                .device
                .as_ref()
                .map(|r| ref_uri(r, "device"))
                .transpose()?;

            Ok(Outlet::new(
                raw.identifier.unwrap_or_default(),
                raw.resource_uri,
                host,
                device,
                Arc::clone(writer),
            ))
        }
    }
}

// ── Flattening ───────────────────────────────────────────────────────

/// Flatten a raw record into the wire payload shared by the create and
/// update paths.
///
/// Bare reference strings pass through unchanged, so the transform is
/// idempotent; non-reference fields are preserved verbatim.
pub fn flatten_record(raw: &RawPowerDevice) -> Result<DevicePayload, ShapeError> {
    let outlets = raw
        .outlets
        .iter()
        .map(|o| {
            o.uri()
                .map(str::to_owned)
                .ok_or(ShapeError { field: "outlets" })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let device_type = raw
        .device_type
        .as_ref()
        .map(|r| ref_uri(r, "device_type"))
        .transpose()?;

    Ok(DevicePayload {
        id: raw.id.clone(),
        name: raw.name.clone(),
        outlets,
        device_type,
        extra: raw.extra.clone(),
    })
}

/// Flatten a hydrated device back to its wire payload.
///
/// Outlets without a `resource_uri` have no wire identity to reference and
/// are omitted from the outlet list.
pub fn flatten_device(device: &PowerDevice) -> DevicePayload {
    DevicePayload {
        id: device.id.clone(),
        name: device.name.clone(),
        outlets: device
            .outlets
            .iter()
            .filter_map(|o| o.resource_uri.clone())
            .collect(),
        device_type: device.device_type.clone(),
        extra: device.extra.clone(),
    }
}
