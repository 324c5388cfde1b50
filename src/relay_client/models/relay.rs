use std::fmt;

use serde::Serialize;

use crate::relay_client::helpers::format_time;

/// One of the two relays exposed by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelayId {
    Relay1,
    Relay2,
}

impl RelayId {
    pub const ALL: [RelayId; 2] = [RelayId::Relay1, RelayId::Relay2];

    /// Number used on the wire (`1` or `2`).
    pub fn number(self) -> u8 {
        match self {
            RelayId::Relay1 => 1,
            RelayId::Relay2 => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(RelayId::Relay1),
            2 => Some(RelayId::Relay2),
            _ => None,
        }
    }
}

impl fmt::Display for RelayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relay{}", self.number())
    }
}

/// Command direction sent to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelayAction {
    On,
    Off,
}

impl RelayAction {
    /// The action that flips a relay last seen in `active` state.
    pub fn negate(active: bool) -> Self {
        if active {
            RelayAction::Off
        } else {
            RelayAction::On
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelayAction::On => "ON",
            RelayAction::Off => "OFF",
        }
    }
}

impl fmt::Display for RelayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last device-reported state of a single relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RelayState {
    pub active: bool,
    pub remaining_seconds: u64,
}

impl RelayState {
    pub fn new(active: bool, remaining_seconds: u64) -> Self {
        Self {
            active,
            remaining_seconds,
        }
    }

    /// Countdown to show. An inactive relay always shows zero, whatever the
    /// device last sent.
    pub fn display_seconds(&self) -> u64 {
        if self.active {
            self.remaining_seconds
        } else {
            0
        }
    }

    /// `MM:SS` countdown while active, nothing otherwise.
    pub fn countdown(&self) -> Option<String> {
        self.active.then(|| format_time(self.remaining_seconds))
    }
}

/// Both relays as reported by one successful status fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceStatus {
    pub relay1: RelayState,
    pub relay2: RelayState,
}
