//! The settle half of a high-level operation: log, dispatch, toast.

use std::future::Future;

use grocer_data::ApiError;

use crate::effects::Effects;

/// One invocation of a high-level operation.
///
/// The caller dispatches the start action, then hands the network call to
/// [`Operation::run`] together with the success and failure dispatches.
pub(crate) struct Operation<'a> {
    domain: &'static str,
    name: &'static str,
    effects: &'a Effects,
    announcement: Option<String>,
}

impl<'a> Operation<'a> {
    pub(crate) fn new(domain: &'static str, name: &'static str, effects: &'a Effects) -> Self {
        Self {
            domain,
            name,
            effects,
            announcement: None,
        }
    }

    /// Toast `message` when the call succeeds.
    pub(crate) fn announce(mut self, message: impl Into<String>) -> Self {
        self.announcement = Some(message.into());
        self
    }

    pub(crate) async fn run<T, U>(
        self,
        call: impl Future<Output = Result<T, ApiError>>,
        on_success: impl FnOnce(T) -> U,
        on_failure: impl FnOnce(&ApiError),
    ) -> Result<U, ApiError> {
        tracing::debug!(domain = self.domain, operation = self.name, "started");

        match call.await {
            Ok(value) => {
                let output = on_success(value);
                tracing::debug!(domain = self.domain, operation = self.name, "finished");
                if let Some(message) = self.announcement {
                    self.effects.success(message);
                }
                Ok(output)
            }
            Err(error) => {
                on_failure(&error);
                tracing::warn!(
                    domain = self.domain,
                    operation = self.name,
                    error = %error,
                    "failed"
                );
                self.effects.error(error.message());
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{HistoryNavigator, Notice, RecordingNotifier};
    use std::sync::Arc;

    fn effects() -> (Effects, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (
            Effects::new(notifier.clone(), Arc::new(HistoryNavigator::new())),
            notifier,
        )
    }

    #[tokio::test]
    async fn test_success_runs_dispatch_and_announces() {
        let (effects, notifier) = effects();
        let result = Operation::new("news", "add_news_item", &effects)
            .announce("News item published")
            .run(async { Ok::<_, ApiError>(2) }, |n| n * 10, |_| panic!("no failure"))
            .await;

        assert_eq!(result, Ok(20));
        assert_eq!(
            notifier.notices(),
            vec![Notice::Success("News item published".into())]
        );
    }

    #[tokio::test]
    async fn test_failure_toasts_message() {
        let (effects, notifier) = effects();
        let mut seen = None;
        let result: Result<(), ApiError> = Operation::new("news", "get_news", &effects)
            .announce("never shown")
            .run(
                async { Err(ApiError::network("network down")) },
                |()| (),
                |error| seen = Some(error.clone()),
            )
            .await;

        assert_eq!(result, Err(ApiError::network("network down")));
        assert_eq!(seen, Some(ApiError::network("network down")));
        assert_eq!(notifier.errors(), vec!["network down".to_string()]);
        assert_eq!(notifier.notices().len(), 1);
    }
}
