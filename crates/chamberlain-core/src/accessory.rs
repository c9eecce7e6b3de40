// ── Garage door accessory ──
//
// Wires the two door characteristics to the remote device: the
// `doorstate` get-handler reads through the translator, the
// `desireddoorstate` set-handler forwards commands, and both report
// transitions to the event sink. The reconciliation loop is started
// exactly once, from `start()`.

use std::sync::Arc;

use tracing::debug;

use crate::characteristic::{Change, Characteristic};
use crate::config::AccessoryConfig;
use crate::error::CoreError;
use crate::poll::{self, Scheduler};
use crate::remote::DeviceApi;
use crate::sink::EventSink;
use crate::state::{CurrentDoorState, StateTranslator, TargetDoorState};

/// Name of the read-only current-state property.
pub const CURRENT_PROPERTY: &str = "doorstate";
/// Name of the writable target-state property.
pub const TARGET_PROPERTY: &str = "desireddoorstate";

/// A garage door opener exposed as a bridged accessory.
///
/// Lives as long as its reconciliation loop, which holds an `Arc` to it.
#[derive(Debug)]
pub struct GarageDoorOpener {
    name: String,
    translator: StateTranslator,
    current: Characteristic,
    target: Characteristic,
}

impl GarageDoorOpener {
    /// Build the accessory and spawn its reconciliation loop.
    ///
    /// Both properties start out closed. The first poll runs immediately.
    /// Must be called from within a tokio runtime.
    pub fn start(
        config: AccessoryConfig,
        api: Arc<dyn DeviceApi>,
        sink: Arc<dyn EventSink>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Arc<Self>, CoreError> {
        let poll = config.poll;
        let accessory = Arc::new(Self::new(config, api, sink)?);
        tokio::spawn(poll::poll_task(Arc::clone(&accessory), poll, scheduler));
        debug!(accessory = %accessory.name, "reconciliation loop started");
        Ok(accessory)
    }

    /// Build the accessory without a reconciliation loop.
    ///
    /// Suits one-shot commands; the current position is only updated by
    /// explicit [`refresh_current`](Self::refresh_current) calls.
    pub fn new(
        config: AccessoryConfig,
        api: Arc<dyn DeviceApi>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, CoreError> {
        let translator = StateTranslator::new(config.codes)?;

        let current = Characteristic::builder(CURRENT_PROPERTY)
            .on_get({
                let api = Arc::clone(&api);
                let sink = Arc::clone(&sink);
                move || read_current(Arc::clone(&api), Arc::clone(&sink), translator)
            })
            .on_change(change_logger(CURRENT_PROPERTY, translator, Arc::clone(&sink)))
            .build();

        let target = Characteristic::builder(TARGET_PROPERTY)
            .on_set({
                let api = Arc::clone(&api);
                let sink = Arc::clone(&sink);
                move |value| write_target(Arc::clone(&api), Arc::clone(&sink), translator, value)
            })
            .on_change(change_logger(TARGET_PROPERTY, translator, sink))
            .build();

        current.assign(translator.current_to_code(CurrentDoorState::Closed));
        target.assign(translator.target_to_code(TargetDoorState::Closed));

        Ok(Self {
            name: config.name,
            translator,
            current,
            target,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn translator(&self) -> &StateTranslator {
        &self.translator
    }

    /// The `doorstate` property as seen by the host.
    pub fn current(&self) -> &Characteristic {
        &self.current
    }

    /// The `desireddoorstate` property as seen by the host.
    pub fn target(&self) -> &Characteristic {
        &self.target
    }

    /// Last known door position, without a remote call.
    pub fn current_state(&self) -> Option<CurrentDoorState> {
        self.translator.current_from_code(self.current.value())
    }

    /// Last accepted target position.
    pub fn target_state(&self) -> Option<TargetDoorState> {
        self.translator.target_from_code(self.target.value())
    }

    /// Read the door position from the remote device and store it.
    pub async fn refresh_current(&self) -> Result<CurrentDoorState, CoreError> {
        let value = self.current.refresh().await?;
        self.translator
            .current_from_code(value)
            .ok_or_else(|| CoreError::Config {
                message: format!("{CURRENT_PROPERTY} holds unmapped value {value}"),
            })
    }

    /// Ask the remote device to move toward `target`.
    ///
    /// The target property only changes once the remote side accepts the
    /// command. The current position is left for the next poll to observe.
    pub async fn set_target(&self, target: TargetDoorState) -> Result<(), CoreError> {
        self.target
            .write(self.translator.target_to_code(target))
            .await
    }
}

// ── Handlers ──────────────────────────────────────────────────────

async fn read_current(
    api: Arc<dyn DeviceApi>,
    sink: Arc<dyn EventSink>,
    translator: StateTranslator,
) -> Result<u8, CoreError> {
    let result = api
        .get_device_attribute(CURRENT_PROPERTY)
        .await
        .and_then(StateTranslator::remote_to_current)
        .map(|state| translator.current_to_code(state));

    if let Err(ref e) = result {
        sink.error(e);
    }
    result
}

async fn write_target(
    api: Arc<dyn DeviceApi>,
    sink: Arc<dyn EventSink>,
    translator: StateTranslator,
    value: u8,
) -> Result<(), CoreError> {
    let Some(target) = translator.target_from_code(value) else {
        let err = CoreError::InvalidTarget { value };
        sink.error(&err);
        return Err(err);
    };

    sink.line(&format!("attempting to set {TARGET_PROPERTY} to {target}"));

    let code = StateTranslator::target_to_remote(target);
    let result = api.set_device_attribute(TARGET_PROPERTY, code).await;
    if let Err(ref e) = result {
        sink.error(e);
    }
    result
}

fn change_logger(
    property: &'static str,
    translator: StateTranslator,
    sink: Arc<dyn EventSink>,
) -> impl Fn(Change) + Send + Sync + 'static {
    move |Change { old, new }| {
        let from = translator.label_of(old).unwrap_or("unknown");
        let to = translator.label_of(new).unwrap_or("unknown");
        sink.line(&format!("{property} changed from {from} to {to}"));
    }
}
