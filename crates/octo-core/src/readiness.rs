//! Startup probe for the host bridge.
//!
//! checking → (present) resolved
//! checking → waiting-for-load → (present) resolved
//! waiting-for-load → waiting-timeout → resolved
//!
//! The probe always finishes and hands back the bridge it found (or `NotReady`).

use std::fmt;
use std::rc::Rc;
use crate::ports::{HostBridge, HostEnvironment};

/// Where the probe is. Only used for logging; the waiter is a straight-line
/// async fn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessPhase {
    Checking,
    WaitingForLoad,
    WaitingTimeout,
    Resolved,
}

/// Result of the startup probe
#[derive(Clone)]
pub enum Readiness {
    Ready(Rc<dyn HostBridge>),
    NotReady,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready(_))
    }

    pub fn bridge(&self) -> Option<Rc<dyn HostBridge>> {
        match self {
            Readiness::Ready(bridge) => Some(bridge.clone()),
            Readiness::NotReady => None,
        }
    }
}

impl fmt::Debug for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Ready(_) => f.write_str("Ready"),
            Readiness::NotReady => f.write_str("NotReady"),
        }
    }
}

/// Wait for the host bridge to show up. Runs once at startup; no cancellation.
pub async fn wait_for_host(env: &dyn HostEnvironment, timeout_ms: u64) -> Readiness {
    log::info!("Host readiness: {:?}", ReadinessPhase::Checking);
    if let Some(bridge) = env.probe() {
        log::info!("Host APIs available");
        return resolved(Readiness::Ready(bridge));
    }

    log::info!("Host readiness: {:?}", ReadinessPhase::WaitingForLoad);
    env.content_loaded().await;
    if let Some(bridge) = env.probe() {
        log::info!("Host APIs available after content loaded");
        return resolved(Readiness::Ready(bridge));
    }

    log::info!(
        "Host readiness: {:?} ({}ms)",
        ReadinessPhase::WaitingTimeout,
        timeout_ms
    );
    env.sleep(timeout_ms).await;
    match env.probe() {
        Some(bridge) => {
            log::info!("Host APIs available after timeout");
            resolved(Readiness::Ready(bridge))
        }
        None => {
            log::warn!("Host APIs still not available after timeout");
            resolved(Readiness::NotReady)
        }
    }
}

fn resolved(readiness: Readiness) -> Readiness {
    log::info!("Host readiness: {:?} -> {:?}", ReadinessPhase::Resolved, readiness);
    readiness
}
