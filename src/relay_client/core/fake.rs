use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::relay_client::api::RelayCommand;
use crate::relay_client::gateway::DeviceGateway;
use crate::relay_client::helpers::COUNTDOWN_WINDOW_SECS;
use crate::relay_client::models::{DeviceStatus, RelayAction, RelayId, RelayState};
use crate::types::RelayError;

/// In-memory stand-in for the relay device.
///
/// Status fetches answer from `status` while online. A queued gate makes the
/// next fetch wait until the test releases it with `Some(status)` (success)
/// or `None` (failure).
pub struct FakeDevice {
    status: Mutex<DeviceStatus>,
    online: AtomicBool,
    fetches: AtomicUsize,
    commands: Mutex<Vec<RelayCommand>>,
    gates: Mutex<VecDeque<oneshot::Receiver<Option<DeviceStatus>>>>,
}

impl FakeDevice {
    pub fn online(status: DeviceStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            online: AtomicBool::new(true),
            fetches: AtomicUsize::new(0),
            commands: Mutex::new(Vec::new()),
            gates: Mutex::new(VecDeque::new()),
        })
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn set_status(&self, status: DeviceStatus) {
        *self.status.lock().unwrap() = status;
    }

    pub fn gate(&self) -> oneshot::Sender<Option<DeviceStatus>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn commands(&self) -> Vec<RelayCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// Yield until at least `count` fetches have started.
    pub async fn wait_for_fetches(&self, count: usize) {
        while self.fetch_count() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl DeviceGateway for FakeDevice {
    async fn fetch_status(&self) -> Result<DeviceStatus, RelayError> {
        let gate = self.gates.lock().unwrap().pop_front();
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = gate {
            return match gate.await {
                Ok(Some(status)) => Ok(status),
                _ => Err(RelayError::Device("/api/status returned 503".to_string())),
            };
        }

        if self.online.load(Ordering::SeqCst) {
            Ok(*self.status.lock().unwrap())
        } else {
            Err(RelayError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "device offline",
            )))
        }
    }

    async fn send_command(&self, command: RelayCommand) -> Result<(), RelayError> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(RelayError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "device offline",
            )));
        }

        self.commands.lock().unwrap().push(command);
        let next = match command.action {
            RelayAction::On => RelayState::new(true, COUNTDOWN_WINDOW_SECS),
            RelayAction::Off => RelayState::default(),
        };
        let mut status = self.status.lock().unwrap();
        match command.relay_id() {
            Some(RelayId::Relay1) => status.relay1 = next,
            Some(RelayId::Relay2) => status.relay2 = next,
            None => {}
        }
        Ok(())
    }
}
