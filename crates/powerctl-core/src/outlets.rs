// ── Outlet/host relationship bookkeeping ──
//
// Pure intersection query plus the detach-on-reassignment mutation. Host
// references compare by exact string equality -- no normalization, no
// partial matching -- and the policy lives in `same_host` so it is an
// explicit contract rather than implicit behavior.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::CoreError;
use crate::model::PowerDevice;

/// Exact host-reference equality. An unassigned outlet never matches.
pub fn same_host(outlet_host: Option<&str>, host_uri: &str) -> bool {
    outlet_host == Some(host_uri)
}

/// Identifiers of the outlets currently bound to `host_uri`, in the
/// device's outlet order. Empty when nothing matches; never an error.
pub fn outlet_host_intersection(device: &PowerDevice, host_uri: &str) -> Vec<String> {
    device
        .outlets
        .iter()
        .filter(|o| same_host(o.host.as_deref(), host_uri))
        .map(|o| o.identifier.clone())
        .collect()
}

/// An in-flight detach update for one outlet.
///
/// `reassign` returns once updates are initiated; await `task` to observe
/// that outlet's persistence result. Each outlet fails or succeeds
/// independently -- there is no rollback.
#[derive(Debug)]
pub struct PendingDetach {
    pub identifier: String,
    pub task: JoinHandle<Result<(), CoreError>>,
}

/// Detach every outlet bound to `host_uri` whose identifier is not in
/// `keep`: the host is nulled in memory synchronously, then the outlet's
/// persistence update is initiated.
///
/// Outlets unassigned or bound to a different host are never considered,
/// regardless of their identifier. Identifiers in `keep` that match no
/// bound outlet are ignored. This only ever drives outlets from
/// `assigned(host_uri)` to unassigned; assigning to a new host is the
/// caller's follow-up.
///
/// Must be called within a Tokio runtime: updates run as independent tasks
/// with no completion ordering between them.
pub fn reassign(device: &mut PowerDevice, host_uri: &str, keep: &[&str]) -> Vec<PendingDetach> {
    let mut pending = Vec::new();

    for outlet in &mut device.outlets {
        if !same_host(outlet.host.as_deref(), host_uri) {
            continue;
        }
        if keep.contains(&outlet.identifier.as_str()) {
            continue;
        }

        debug!(identifier = %outlet.identifier, host = host_uri, "detaching outlet");
        outlet.host = None;

        pending.push(PendingDetach {
            identifier: outlet.identifier.clone(),
            task: tokio::spawn(outlet.persist_future()),
        });
    }

    pending
}
