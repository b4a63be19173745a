use crate::backend::SearchBackend;
use scour_qiita::SearchResult;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const INPUT_CAPACITY: usize = 32;
const OUTCOME_CAPACITY: usize = 8;

/// Raw events forwarded by the display collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineInput {
    /// Explicit submission (search button / enter). Empty text means "clear".
    Submit(String),
    /// Keystroke-level emptiness of the input field.
    InputEmpty(bool),
}

/// The input side of the pipeline has shut down.
#[derive(Debug, thiserror::Error)]
#[error("search pipeline is closed")]
pub struct PipelineClosed;

/// Handle to a running pipeline instance.
///
/// Outputs are `watch` channels: consumers read them from whatever execution
/// context they like, which keeps the core context-agnostic.
pub struct SearchPipeline {
    inputs: mpsc::Sender<PipelineInput>,
    results: watch::Receiver<Vec<SearchResult>>,
    busy: watch::Receiver<bool>,
    driver: JoinHandle<()>,
}

impl SearchPipeline {
    /// Spawn the driver task around `backend`.
    pub fn spawn<B: SearchBackend>(backend: B) -> Self {
        let (input_tx, input_rx) = mpsc::channel(INPUT_CAPACITY);
        let (done_tx, done_rx) = mpsc::channel(OUTCOME_CAPACITY);
        let (results_tx, results_rx) = watch::channel(Vec::new());
        let (busy_tx, busy_rx) = watch::channel(false);

        let driver = Driver {
            backend: Arc::new(backend),
            results: results_tx,
            busy: busy_tx,
            done: done_tx,
            last_query: String::new(),
            generation: 0,
        };
        let task = tokio::spawn(driver.run(input_rx, done_rx));

        Self {
            inputs: input_tx,
            results: results_rx,
            busy: busy_rx,
            driver: task,
        }
    }

    /// Explicit submission. Empty text clears the visible results.
    pub async fn submit_query(&self, text: impl Into<String>) -> Result<(), PipelineClosed> {
        self.send(PipelineInput::Submit(text.into())).await
    }

    /// Keystroke-level emptiness signal; `true` clears the visible results.
    pub async fn set_input_empty(&self, is_empty: bool) -> Result<(), PipelineClosed> {
        self.send(PipelineInput::InputEmpty(is_empty)).await
    }

    async fn send(&self, input: PipelineInput) -> Result<(), PipelineClosed> {
        self.inputs.send(input).await.map_err(|_| PipelineClosed)
    }

    /// The result stream. Starts at `[]`; a failed fetch also lands here as `[]`.
    pub fn results(&self) -> watch::Receiver<Vec<SearchResult>> {
        self.results.clone()
    }

    /// Busy flag bracketing each actual network call.
    pub fn busy(&self) -> watch::Receiver<bool> {
        self.busy.clone()
    }

    /// Clone of the raw input sender, for callers that feed events directly.
    pub fn sender(&self) -> mpsc::Sender<PipelineInput> {
        self.inputs.clone()
    }

    /// Close the input side and wait for the driver to drain.
    pub async fn shutdown(self) {
        drop(self.inputs);
        let _ = self.driver.await;
    }
}

/// Completion record for one spawned fetch. `generation` identifies which
/// submission triggered it; stale generations are discarded on arrival.
struct FetchOutcome {
    generation: u64,
    items: Vec<SearchResult>,
}

struct Driver<B> {
    backend: Arc<B>,
    results: watch::Sender<Vec<SearchResult>>,
    busy: watch::Sender<bool>,
    done: mpsc::Sender<FetchOutcome>,
    last_query: String,
    generation: u64,
}

impl<B: SearchBackend> Driver<B> {
    async fn run(
        mut self,
        mut inputs: mpsc::Receiver<PipelineInput>,
        mut done: mpsc::Receiver<FetchOutcome>,
    ) {
        loop {
            tokio::select! {
                maybe_input = inputs.recv() => match maybe_input {
                    Some(input) => self.on_input(input),
                    // All handles dropped: stop. In-flight fetches die with us.
                    None => break,
                },
                Some(outcome) = done.recv() => self.on_outcome(outcome),
            }
        }
    }

    fn on_input(&mut self, input: PipelineInput) {
        match input {
            PipelineInput::Submit(text) if text.is_empty() => self.clear(),
            PipelineInput::Submit(text) => {
                // Consecutive duplicate submissions are suppressed entirely.
                if text == self.last_query {
                    tracing::trace!(query = %text, "duplicate submission ignored");
                    return;
                }
                self.last_query = text.clone();
                self.generation += 1;
                let generation = self.generation;

                self.busy.send_replace(true);
                tracing::debug!(query = %text, generation, "search started");

                let backend = Arc::clone(&self.backend);
                let done = self.done.clone();
                tokio::spawn(async move {
                    let items = match backend.search(&text).await {
                        Ok(items) => items,
                        Err(e) => {
                            tracing::warn!(
                                query = %text,
                                error = %e,
                                "search failed; publishing empty results"
                            );
                            Vec::new()
                        }
                    };
                    let _ = done.send(FetchOutcome { generation, items }).await;
                });
            }
            PipelineInput::InputEmpty(true) => self.clear(),
            PipelineInput::InputEmpty(false) => {}
        }
    }

    /// Show nothing, forget the last query, and supersede any in-flight fetch.
    fn clear(&mut self) {
        self.generation += 1;
        self.last_query.clear();
        // If a fetch was in flight its outcome is now stale and will never
        // close the loading bracket, so close it here. When idle this stays
        // silent, matching the no-notification empty short-circuit.
        self.busy.send_if_modified(|b| std::mem::replace(b, false));
        self.results.send_replace(Vec::new());
    }

    fn on_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            tracing::trace!(
                stale = outcome.generation,
                current = self.generation,
                "dropping superseded search outcome"
            );
            return;
        }
        self.busy.send_replace(false);
        self.results.send_replace(outcome.items);
    }
}
