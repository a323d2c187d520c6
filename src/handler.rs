//! Uniform handler contract for function invocations.
//!
//! Synchronous and asynchronous handlers are normalized onto one boxed-future
//! invocation path, so the execute route always awaits regardless of which
//! form the caller supplied.

use std::future::Future;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use futures::future::BoxFuture;
use serde_json::Value;

/// Boxed invocation path shared by sync and async handlers.
pub type HandlerFn = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Shared handler slot.
///
/// The runtime and the server state hold the same slot, so replacing the
/// handler takes effect for all executions received after the swap.
#[derive(Clone, Default)]
pub struct HandlerSlot {
    inner: Arc<RwLock<Option<HandlerFn>>>,
}

impl HandlerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previously attached asynchronous handler.
    pub fn attach<F, Fut>(&self, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let wrapped: HandlerFn = Arc::new(move |input| Box::pin(handler(input)));
        self.set(wrapped);
    }

    /// Replaces any previously attached handler with a synchronous one.
    pub fn attach_sync<F>(&self, handler: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        let wrapped: HandlerFn =
            Arc::new(move |input| Box::pin(std::future::ready(handler(input))));
        self.set(wrapped);
    }

    pub fn is_attached(&self) -> bool {
        self.inner.read().expect("handler lock poisoned").is_some()
    }

    /// Returns the current handler, if any. The guard is released before the
    /// caller awaits the invocation, so a long-running handler never blocks a
    /// concurrent attach.
    pub fn get(&self) -> Option<HandlerFn> {
        self.inner.read().expect("handler lock poisoned").clone()
    }

    fn set(&self, handler: HandlerFn) {
        *self.inner.write().expect("handler lock poisoned") = Some(handler);
    }
}

impl std::fmt::Debug for HandlerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerSlot")
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn sync_and_async_handlers_share_one_path() {
        let slot = HandlerSlot::new();
        assert!(!slot.is_attached());

        slot.attach_sync(|input| Ok(json!({ "echo": input })));
        let handler = slot.get().unwrap();
        assert_eq!(
            handler(json!(1)).await.unwrap(),
            json!({ "echo": 1 })
        );

        slot.attach(|input| async move { Ok(json!({ "async_echo": input })) });
        let handler = slot.get().unwrap();
        assert_eq!(
            handler(json!(2)).await.unwrap(),
            json!({ "async_echo": 2 })
        );
    }

    #[tokio::test]
    async fn attach_replaces_previous_handler() {
        let slot = HandlerSlot::new();
        slot.attach_sync(|_| Ok(json!("first")));
        slot.attach_sync(|_| Ok(json!("second")));

        let handler = slot.get().unwrap();
        assert_eq!(handler(json!(null)).await.unwrap(), json!("second"));
    }
}
