//! State reconciliation for a single bridged garage door.
//!
//! The crate keeps a bridge's view of a remote garage door in step with the
//! real device, which is only reachable through a latent, polled API:
//!
//! - **[`GarageDoorOpener`]**: the accessory. Owns the `doorstate` and
//!   `desireddoorstate` [`Characteristic`]s, forwards target writes to the
//!   remote device and logs every observed transition.
//!
//! - **Reconciliation loop** ([`poll`]): spawned once by
//!   [`GarageDoorOpener::start`]. Re-reads `doorstate` every 2s while the door
//!   is in transit and every 10s once it has settled.
//!
//! - **[`StateTranslator`]**: fixed tables between remote codes, protocol
//!   values and log labels.
//!
//! - **Seams**: [`DeviceApi`] for the remote device (implemented for
//!   [`chamberlain_api::MyQClient`]), [`EventSink`] for log output and
//!   [`Scheduler`] for delays.

pub mod accessory;
pub mod characteristic;
pub mod config;
pub mod error;
pub mod poll;
pub mod remote;
pub mod sink;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use accessory::{CURRENT_PROPERTY, GarageDoorOpener, TARGET_PROPERTY};
pub use characteristic::{Change, Characteristic};
pub use config::{AccessoryConfig, PollConfig};
pub use error::CoreError;
pub use poll::{PollOutcome, Scheduler, TokioScheduler};
pub use remote::DeviceApi;
pub use sink::{EventSink, TracingSink};
pub use state::{CurrentDoorState, ProtocolCodes, StateTranslator, TargetDoorState};
