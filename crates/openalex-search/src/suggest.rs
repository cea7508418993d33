//! Debounced topic suggestions.
//!
//! Each input change restarts a short timer; only the last timer fires a
//! lookup. Lookups already in flight are not cancelled, so every lookup
//! carries a [`Generation`] and results from superseded inputs are dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::CatalogApi;
use crate::config::api;
use crate::generation::{Generation, GenerationCounter};
use crate::models::TopicSuggestion;

/// Suggestions delivered for one topic input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionUpdate {
    /// Generation of the input that produced this update.
    pub generation: Generation,

    /// Input the suggestions were looked up for.
    pub input: String,

    /// Suggestions, possibly empty.
    pub suggestions: Vec<TopicSuggestion>,
}

/// Debounced, last-input-wins topic suggestion lookups.
pub struct TopicSuggester<A> {
    api: Arc<A>,
    debounce: Duration,
    generations: GenerationCounter,
    timer: Option<JoinHandle<()>>,
    updates: mpsc::UnboundedSender<SuggestionUpdate>,
}

impl<A> TopicSuggester<A>
where
    A: CatalogApi + 'static,
{
    /// Create a suggester and the receiver its updates are delivered on.
    #[must_use]
    pub fn new(
        api: Arc<A>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SuggestionUpdate>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let suggester = Self {
            api,
            debounce,
            generations: GenerationCounter::new(),
            timer: None,
            updates,
        };
        (suggester, rx)
    }

    /// React to a change of the topic input.
    ///
    /// Must be called within a Tokio runtime.
    pub fn input_changed(&mut self, input: &str) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let generation = self.generations.next();
        let input = input.trim().to_string();

        if input.chars().count() < api::MIN_SUGGESTION_INPUT {
            deliver(
                &self.updates,
                SuggestionUpdate {
                    generation,
                    input,
                    suggestions: Vec::new(),
                },
            );
            return;
        }

        let api = Arc::clone(&self.api);
        let generations = self.generations.clone();
        let updates = self.updates.clone();
        let debounce = self.debounce;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // The lookup runs detached so a later input cannot cancel it mid-request.
            tokio::spawn(lookup(api, input, generation, generations, updates));
        }));
    }

    /// Generation of the most recent input.
    #[must_use]
    pub fn latest_generation(&self) -> Generation {
        self.generations.latest()
    }
}

async fn lookup<A>(
    api: Arc<A>,
    input: String,
    generation: Generation,
    generations: GenerationCounter,
    updates: mpsc::UnboundedSender<SuggestionUpdate>,
) where
    A: CatalogApi + 'static,
{
    let suggestions = api.search_topics(&input).await;

    if !generations.is_current(generation) {
        tracing::debug!(
            %input,
            generation = generation.value(),
            "Discarding stale topic suggestions"
        );
        return;
    }

    deliver(
        &updates,
        SuggestionUpdate {
            generation,
            input,
            suggestions,
        },
    );
}

fn deliver(updates: &mpsc::UnboundedSender<SuggestionUpdate>, update: SuggestionUpdate) {
    if let Err(mpsc::error::SendError(update)) = updates.send(update) {
        tracing::debug!(
            input = %update.input,
            generation = update.generation.value(),
            "Suggestion receiver closed, dropping update"
        );
    }
}

impl<A> Drop for TopicSuggester<A> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<A> std::fmt::Debug for TopicSuggester<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicSuggester")
            .field("debounce", &self.debounce)
            .field("latest_generation", &self.generations.latest())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::{ClientError, ClientResult};
    use crate::models::{SearchResponse, Work};
    use crate::query::SearchParams;

    /// Records lookups; inputs starting with "slow" take a second to answer.
    #[derive(Default)]
    struct RecordingApi {
        lookups: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl CatalogApi for RecordingApi {
        async fn search(&self, _params: &SearchParams) -> ClientResult<SearchResponse> {
            Err(ClientError::request(500, "unused"))
        }

        async fn get_work(&self, _id: &str) -> ClientResult<Work> {
            Err(ClientError::request(500, "unused"))
        }

        async fn search_topics(&self, prefix: &str) -> Vec<TopicSuggestion> {
            self.lookups.lock().unwrap().push(prefix.to_string());
            if prefix.starts_with("slow") {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            vec![TopicSuggestion {
                id: format!("C-{prefix}"),
                display_name: prefix.to_uppercase(),
            }]
        }

        async fn fetch_open_access_file(&self, _url: &str) -> ClientResult<Vec<u8>> {
            Err(ClientError::request(500, "unused"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_input_fires() {
        let api = Arc::new(RecordingApi::default());
        let (mut suggester, mut rx) =
            TopicSuggester::new(Arc::clone(&api), Duration::from_millis(300));

        suggester.input_changed("ne");
        suggester.input_changed("neu");
        suggester.input_changed("neuro");

        let update = rx.recv().await.unwrap();
        assert_eq!(update.input, "neuro");
        assert_eq!(update.generation, suggester.latest_generation());
        assert_eq!(update.suggestions[0].id, "C-neuro");
        assert_eq!(*api.lookups.lock().unwrap(), vec!["neuro".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_clears_without_lookup() {
        let api = Arc::new(RecordingApi::default());
        let (mut suggester, mut rx) =
            TopicSuggester::new(Arc::clone(&api), Duration::from_millis(300));

        suggester.input_changed("n");

        let update = rx.recv().await.unwrap();
        assert_eq!(update.input, "n");
        assert!(update.suggestions.is_empty());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(api.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_in_flight_lookup_is_discarded() {
        let api = Arc::new(RecordingApi::default());
        let (mut suggester, mut rx) =
            TopicSuggester::new(Arc::clone(&api), Duration::from_millis(300));

        suggester.input_changed("slow topic");
        // Let the timer fire so the slow lookup is in flight.
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(api.lookups.lock().unwrap().len(), 1);

        suggester.input_changed("fast");

        let update = rx.recv().await.unwrap();
        assert_eq!(update.input, "fast");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err(), "stale slow result must not be delivered");
        assert_eq!(api.lookups.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_receiver_does_not_panic() {
        let api = Arc::new(RecordingApi::default());
        let (mut suggester, rx) =
            TopicSuggester::new(Arc::clone(&api), Duration::from_millis(300));
        drop(rx);

        suggester.input_changed("n");
        suggester.input_changed("neuro");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(*api.lookups.lock().unwrap(), vec!["neuro".to_string()]);
    }
}
