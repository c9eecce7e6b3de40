// ── Runtime accessory configuration ──
//
// These types describe *what* to expose and *how often* to poll.
// They never touch disk. The binary builds an `AccessoryConfig` from
// `chamberlain-config` and hands it in.

use std::time::Duration;

use crate::state::ProtocolCodes;

/// Polling cadence for the reconciliation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay while the door is moving or has not reached its target.
    pub active_delay: Duration,
    /// Delay once the door is settled, and after a failed read.
    pub idle_delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            active_delay: Duration::from_millis(2_000),
            idle_delay: Duration::from_millis(10_000),
        }
    }
}

/// Configuration for a single garage door accessory.
#[derive(Debug, Clone)]
pub struct AccessoryConfig {
    /// Display name of the accessory.
    pub name: String,
    /// Protocol values the host uses for door states.
    pub codes: ProtocolCodes,
    pub poll: PollConfig,
}

impl Default for AccessoryConfig {
    fn default() -> Self {
        Self {
            name: "Garage Door".into(),
            codes: ProtocolCodes::default(),
            poll: PollConfig::default(),
        }
    }
}
