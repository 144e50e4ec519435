//! Providers: mount a domain context for the lifetime of a subtree.

use std::ops::Deref;

use async_trait::async_trait;
use tokio::task::JoinHandle;

/// A context that knows what to load when it is mounted.
#[async_trait]
pub trait Mount: Clone + Send + Sync + 'static {
    /// Provider name used in log fields.
    const NAME: &'static str;

    /// The auto-fetch run once per mount. Failures are already reported to
    /// the store and the notifier by the operation itself.
    async fn on_mount(&self);
}

/// Owns one domain context while mounted.
///
/// Mounting starts from a fresh context and spawns exactly one auto-fetch.
/// Two providers mounted for the same domain each fetch; nothing is shared.
/// Must be called from within a tokio runtime.
pub struct Provider<C: Mount> {
    context: C,
    auto_fetch: Option<JoinHandle<()>>,
}

impl<C: Mount> Provider<C> {
    pub fn mount(context: C) -> Self {
        tracing::debug!(provider = C::NAME, "mount");

        let task_context = context.clone();
        let auto_fetch = tokio::spawn(async move { task_context.on_mount().await });

        Self {
            context,
            auto_fetch: Some(auto_fetch),
        }
    }

    /// The mounted context; cloning it hands the same store to descendants.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Wait for the on-mount fetch to settle.
    pub async fn settled(&mut self) {
        if let Some(task) = self.auto_fetch.take() {
            if let Err(err) = task.await {
                tracing::error!(provider = C::NAME, error = %err, "auto-fetch task failed");
            }
        }
    }

    /// Tear the provider down.
    ///
    /// An auto-fetch still in flight is not cancelled; it settles into a
    /// store nobody observes any more.
    pub fn unmount(self) {
        tracing::debug!(provider = C::NAME, "unmount");
    }
}

impl<C: Mount> Deref for Provider<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.context
    }
}
