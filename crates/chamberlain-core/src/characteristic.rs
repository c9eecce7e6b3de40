// ── Characteristic host ──
//
// A named protocol value with optional async get/set handlers and change
// listeners. Handlers and listeners are registered once through the
// builder and never change afterwards; the value itself lives in a
// `watch` channel so reactive consumers can subscribe to it.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use tokio::sync::watch;
use tracing::trace;

use crate::error::CoreError;

type GetHandler = Arc<dyn Fn() -> BoxFuture<'static, Result<u8, CoreError>> + Send + Sync>;
type SetHandler = Arc<dyn Fn(u8) -> BoxFuture<'static, Result<(), CoreError>> + Send + Sync>;
type ChangeListener = Box<dyn Fn(Change) + Send + Sync>;

/// A single observed value transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub old: u8,
    pub new: u8,
}

pub struct Characteristic {
    name: String,
    value: watch::Sender<u8>,
    on_get: Option<GetHandler>,
    on_set: Option<SetHandler>,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Characteristic")
            .field("name", &self.name)
            .field("value", &*self.value.borrow())
            .field("readable", &self.on_get.is_some())
            .field("writable", &self.on_set.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Characteristic {
    pub fn builder(name: impl Into<String>) -> CharacteristicBuilder {
        CharacteristicBuilder {
            name: name.into(),
            initial: 0,
            on_get: None,
            on_set: None,
            listeners: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored value. Never touches the remote side.
    pub fn value(&self) -> u8 {
        *self.value.borrow()
    }

    /// Overwrite the stored value without notifying listeners.
    pub fn assign(&self, value: u8) {
        self.value.send_replace(value);
    }

    /// Subscribe to stored-value updates.
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.value.subscribe()
    }

    /// Fetch a fresh value through the get-handler and store it.
    ///
    /// Without a get-handler this returns the stored value. On error the
    /// stored value is left as it was.
    pub async fn refresh(&self) -> Result<u8, CoreError> {
        let Some(handler) = &self.on_get else {
            return Ok(self.value());
        };
        let fresh = handler().await?;
        self.store(fresh);
        Ok(fresh)
    }

    /// Run the set-handler and store `value` once it succeeds.
    pub async fn write(&self, value: u8) -> Result<(), CoreError> {
        let Some(handler) = &self.on_set else {
            return Err(CoreError::ReadOnly {
                property: self.name.clone(),
            });
        };
        handler(value).await?;
        self.store(value);
        Ok(())
    }

    fn store(&self, new: u8) {
        let old = self.value.send_replace(new);
        if old != new {
            trace!(property = %self.name, old, new, "value changed");
            let change = Change { old, new };
            for listener in &self.listeners {
                listener(change);
            }
        }
    }
}

/// Chained registration, one call per handler.
pub struct CharacteristicBuilder {
    name: String,
    initial: u8,
    on_get: Option<GetHandler>,
    on_set: Option<SetHandler>,
    listeners: Vec<ChangeListener>,
}

impl CharacteristicBuilder {
    /// Value held before the first refresh or write.
    pub fn initial(mut self, value: u8) -> Self {
        self.initial = value;
        self
    }

    pub fn on_get<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<u8, CoreError>> + Send + 'static,
    {
        self.on_get = Some(Arc::new(move || handler().boxed()));
        self
    }

    pub fn on_set<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(u8) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CoreError>> + Send + 'static,
    {
        self.on_set = Some(Arc::new(move |value| handler(value).boxed()));
        self
    }

    pub fn on_change<F>(mut self, listener: F) -> Self
    where
        F: Fn(Change) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn build(self) -> Characteristic {
        let (value, _) = watch::channel(self.initial);
        Characteristic {
            name: self.name,
            value,
            on_get: self.on_get,
            on_set: self.on_set,
            listeners: self.listeners,
        }
    }
}
