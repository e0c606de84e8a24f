use std::time::Duration;

use tracing::{debug, info, warn};

use maas_models::AddressSpaceStatus;

use crate::client::AddressSpaceClient;
use crate::controller::SpaceController;

/// Polls the address-space API, feeds the desired set into the
/// controller, and reports readiness back after a successful pass. A
/// failed pass is retried wholesale on the next tick.
pub struct WatchDriver {
    client: AddressSpaceClient,
    poll_interval: Duration,
    report_status: bool,
}

impl WatchDriver {
    pub fn new(
        client: AddressSpaceClient,
        poll_interval: Duration,
        report_status: bool,
    ) -> Self {
        Self {
            client,
            poll_interval,
            report_status,
        }
    }

    pub async fn run(&self, controller: &SpaceController) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        let mut last_applied: Option<String> = None;
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "space watch loop started"
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

            match controller.on_update(&spaces).await {
                Ok(summary) => {
                    info!(?summary, "infrastructure reconciled");
                    last_applied = Some(snapshot);
                    if self.report_status {
                        self.report_ready(&spaces).await;
                    }
                }
                Err(error) => {
                    warn!(%error, "infrastructure reconciliation failed; retrying on next cycle");
                }
            }
        }
    }

    /// Mark freshly reconciled spaces ready. Readiness of the underlying
    /// workloads is the cluster gateway's concern; this reports that the
    /// resource sets were applied.
    async fn report_ready(&self, spaces: &[maas_models::AddressSpace]) {
        for space in spaces {
            if space.status.ready {
                continue;
            }
            let status = AddressSpaceStatus {
                ready: true,
                messages: vec![],
                endpoint_statuses: space.status.endpoint_statuses.clone(),
            };
            if let Err(error) =
                self.client.report_status(&space.name, &status).await
            {
                warn!(space = %space.name, %error, "failed to report status");
            }
        }
    }
}
