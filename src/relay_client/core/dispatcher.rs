use std::sync::Arc;

use tracing::{info, warn};

use crate::relay_client::api::RelayCommand;
use crate::relay_client::gateway::DeviceGateway;
use crate::relay_client::models::{RelayAction, RelayId};
use crate::types::RelayError;

use super::synchronizer::Synchronizer;

/// Turns toggle intents into device commands and refreshes the snapshot
/// afterwards.
///
/// The direction is taken from the last known state, so two toggles issued
/// before a refresh lands can both send the same action.
#[derive(Clone)]
pub struct CommandDispatcher {
    gateway: Arc<dyn DeviceGateway>,
    synchronizer: Synchronizer,
}

impl CommandDispatcher {
    pub fn new(synchronizer: Synchronizer) -> Self {
        Self {
            gateway: synchronizer.gateway(),
            synchronizer,
        }
    }

    /// Flip `relay` relative to the latest snapshot.
    pub async fn toggle(&self, relay: RelayId) -> Result<RelayAction, RelayError> {
        let last_known = self.synchronizer.snapshot().relay(relay);
        self.toggle_from(relay, last_known.active).await
    }

    /// Send the opposite of `last_known_active` to `relay`.
    ///
    /// On success the synchronizer is polled right away. On failure
    /// connectivity is dropped and no poll is made.
    pub async fn toggle_from(
        &self,
        relay: RelayId,
        last_known_active: bool,
    ) -> Result<RelayAction, RelayError> {
        let action = RelayAction::negate(last_known_active);
        info!(relay = %relay, action = %action, "Toggling relay");

        match self
            .gateway
            .send_command(RelayCommand::new(relay, action))
            .await
        {
            Ok(()) => {
                self.synchronizer.refresh().await;
                Ok(action)
            }
            Err(err) => {
                warn!(relay = %relay, error = %err, "Failed to control relay");
                self.synchronizer.mark_disconnected();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{self, Instant};

    use super::super::fake::FakeDevice;
    use super::*;
    use crate::relay_client::models::{DeviceStatus, RelayState, SyncSnapshot};

    #[tokio::test]
    async fn inactive_relay_is_switched_on() {
        let device = FakeDevice::online(DeviceStatus::default());
        let sync = Synchronizer::new(device.clone());
        sync.refresh().await;

        let dispatcher = CommandDispatcher::new(sync.clone());
        let action = dispatcher.toggle(RelayId::Relay1).await.unwrap();

        assert_eq!(action, RelayAction::On);
        assert_eq!(
            device.commands(),
            vec![RelayCommand::new(RelayId::Relay1, RelayAction::On)]
        );
    }

    #[tokio::test]
    async fn active_relay_is_switched_off() {
        let device = FakeDevice::online(DeviceStatus {
            relay1: RelayState::new(true, 1800),
            relay2: RelayState::new(true, 200),
        });
        let sync = Synchronizer::new(device.clone());
        sync.refresh().await;

        let dispatcher = CommandDispatcher::new(sync.clone());
        dispatcher.toggle(RelayId::Relay2).await.unwrap();

        assert_eq!(
            device.commands(),
            vec![RelayCommand::new(RelayId::Relay2, RelayAction::Off)]
        );
        assert_eq!(sync.snapshot().relay2, RelayState::default());
        assert_eq!(sync.snapshot().relay1, RelayState::new(true, 1800));
    }

    #[tokio::test]
    async fn stale_state_repeats_the_same_action() {
        let device = FakeDevice::online(DeviceStatus::default());
        let sync = Synchronizer::new(device.clone());
        let dispatcher = CommandDispatcher::new(sync.clone());

        dispatcher.toggle_from(RelayId::Relay1, false).await.unwrap();
        dispatcher.toggle_from(RelayId::Relay1, false).await.unwrap();

        let actions: Vec<_> = device.commands().iter().map(|c| c.action).collect();
        assert_eq!(actions, vec![RelayAction::On, RelayAction::On]);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_toggle_refreshes_before_next_tick() {
        let device = FakeDevice::online(DeviceStatus::default());
        let sync = Synchronizer::new(device.clone());
        let handle = sync.start();
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(device.fetch_count(), 1);
        assert!(!sync.snapshot().relay1.active);

        let dispatcher = CommandDispatcher::new(sync.clone());
        let issued = Instant::now();
        dispatcher.toggle(RelayId::Relay1).await.unwrap();

        assert_eq!(device.fetch_count(), 2);
        assert!(issued.elapsed() < Duration::from_secs(1));
        assert_eq!(
            sync.snapshot(),
            SyncSnapshot {
                connected: true,
                relay1: RelayState::new(true, 2400),
                relay2: RelayState::default(),
            }
        );

        sync.stop(handle);
    }

    #[tokio::test]
    async fn failed_send_drops_connectivity_without_polling() {
        let device = FakeDevice::online(DeviceStatus {
            relay1: RelayState::new(true, 75),
            relay2: RelayState::default(),
        });
        let sync = Synchronizer::new(device.clone());
        sync.refresh().await;
        assert!(sync.snapshot().connected);

        device.set_online(false);
        let dispatcher = CommandDispatcher::new(sync.clone());
        let err = dispatcher.toggle(RelayId::Relay1).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(device.fetch_count(), 1);
        let snapshot = sync.snapshot();
        assert!(!snapshot.connected);
        assert_eq!(snapshot.relay1, RelayState::new(true, 75));
    }
}
