use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::AddressSpaceClient;
use crate::manager::RealmManager;

/// Polls the address-space API and feeds the full desired set into the
/// realm manager. A failed pass leaves the last-seen snapshot untouched,
/// so the same set is retried on the next tick (at-least-once retry,
/// driven here rather than inside the reconciler).
pub struct WatchDriver {
    client: AddressSpaceClient,
    poll_interval: Duration,
}

impl WatchDriver {
    pub fn new(client: AddressSpaceClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }

    pub async fn run(&self, manager: &RealmManager) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        let mut last_applied: Option<String> = None;
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "realm watch loop started"
        );
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received; stopping watch loop");
                    return;
                }
            }

            let spaces = match self.client.list_address_spaces().await {
                Ok(spaces) => spaces,
                Err(error) => {
                    warn!(%error, "failed to observe address spaces");
                    continue;
                }
            };

            // The identity-based equality on AddressSpace is too weak for
            // change detection; compare the serialized snapshot instead.
            let snapshot = match serde_json::to_string(&spaces) {
                Ok(snapshot) => snapshot,
                Err(error) => {
                    warn!(%error, "failed to serialize snapshot");
                    continue;
                }
            };
            if last_applied.as_ref() == Some(&snapshot) {
                debug!("desired state unchanged; skipping pass");
                continue;
            }

            match manager.on_update(&spaces).await {
                Ok(summary) => {
                    info!(?summary, "realms reconciled");
                    last_applied = Some(snapshot);
                }
                Err(error) => {
                    warn!(%error, "realm reconciliation failed; retrying on next cycle");
                }
            }
        }
    }
}
