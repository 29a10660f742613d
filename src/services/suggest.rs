//! Debounced predictive suggestion controller.
//!
//! State machine: `Idle → Debouncing → Fetching → Settled`. Each input
//! change supersedes whatever was pending: the previous debounce timer dies
//! cooperatively when it expires and finds a newer sequence number, and a
//! previous lookup that is already in flight gets its settlement discarded
//! on arrival (last-writer-wins). Cancellation is soft throughout; the
//! [`SuggestionSource`] transport exposes no hard abort.
//!
//! The controller runs on a single-threaded cooperative event loop: spawned
//! tasks only sleep and fetch, then report back over an unbounded channel.
//! The owner drives state by calling [`PredictiveSearch::pump`] (or awaiting
//! [`PredictiveSearch::next_event`]) between interactions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::VitrinaResult;
use crate::record::Suggestion;

/// Controller tuning: 300 ms debounce, 3-character minimum, 10 suggestions
/// shown by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestTuning {
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub max_suggestions: usize,
}

impl Default for SuggestTuning {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 3,
            max_suggestions: 10,
        }
    }
}

/// Asynchronous suggestion lookup collaborator, backed by a remote service.
#[async_trait]
pub trait SuggestionSource: Send + Sync + 'static {
    async fn fetch(&self, text: &str) -> VitrinaResult<Vec<Suggestion>>;
}

/// Controller state, observable by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestState {
    Idle,
    Debouncing,
    Fetching,
    Settled,
}

enum Event {
    FetchStarted(u64),
    Settled(u64, VitrinaResult<Vec<Suggestion>>),
}

/// The debounced, cancellable type-ahead controller.
pub struct PredictiveSearch<S: SuggestionSource> {
    source: Arc<S>,
    tuning: SuggestTuning,

    /// Monotonically increasing request sequence; only the latest
    /// sequence's events are honored.
    seq: u64,
    latest: Arc<AtomicU64>,

    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,

    state: SuggestState,
    suggestions: Vec<Suggestion>,
}

impl<S: SuggestionSource> PredictiveSearch<S> {
    pub fn new(source: S) -> Self {
        Self::with_tuning(source, SuggestTuning::default())
    }

    pub fn with_tuning(source: S, tuning: SuggestTuning) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            tuning,
            seq: 0,
            latest: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
            state: SuggestState::Idle,
            suggestions: Vec::new(),
        }
    }

    /// Handle one keystroke's worth of input.
    ///
    /// Short input clears the dropdown immediately; anything else restarts
    /// the debounce window and supersedes whatever was pending.
    pub fn on_input(&mut self, text: &str) {
        self.seq += 1;
        self.latest.store(self.seq, Ordering::Relaxed);

        let trimmed = text.trim();
        if trimmed.chars().count() < self.tuning.min_query_len {
            self.state = SuggestState::Idle;
            self.suggestions.clear();
            return;
        }

        self.state = SuggestState::Debouncing;

        let seq = self.seq;
        let latest = Arc::clone(&self.latest);
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let debounce = Duration::from_millis(self.tuning.debounce_ms);
        let text = trimmed.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // Superseded while debouncing: die without dispatching a lookup.
            if latest.load(Ordering::Relaxed) != seq {
                return;
            }
            let _ = tx.send(Event::FetchStarted(seq));
            let result = source.fetch(&text).await;
            let _ = tx.send(Event::Settled(seq, result));
        });
    }

    /// Click-outside or explicit clear: back to `Idle` from any state.
    pub fn dismiss(&mut self) {
        self.seq += 1;
        self.latest.store(self.seq, Ordering::Relaxed);
        self.state = SuggestState::Idle;
        self.suggestions.clear();
    }

    /// Apply all events that have arrived so far. Returns true if anything
    /// was applied.
    pub fn pump(&mut self) -> bool {
        let mut applied = false;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            applied = true;
        }
        applied
    }

    /// Await and apply the next event. Never resolves to `false` while the
    /// controller is alive (it holds its own sender).
    pub async fn next_event(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::FetchStarted(seq) => {
                if seq == self.seq && self.state == SuggestState::Debouncing {
                    self.state = SuggestState::Fetching;
                }
            }
            Event::Settled(seq, result) => {
                if seq != self.seq {
                    // Stale resolution from a superseded lookup.
                    return;
                }
                let mut list = match result {
                    Ok(list) => list,
                    Err(err) => {
                        warn!(error = %err, "suggestion lookup failed");
                        Vec::new()
                    }
                };
                list.truncate(self.tuning.max_suggestions);
                self.suggestions = list;
                self.state = SuggestState::Settled;
            }
        }
    }

    pub fn state(&self) -> SuggestState {
        self.state
    }

    /// The currently visible suggestion list.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SuggestState::Debouncing | SuggestState::Fetching)
    }

    /// Whether the dropdown is open (a settled lookup, even an empty one,
    /// keeps it open to show "no results").
    pub fn is_open(&self) -> bool {
        self.state == SuggestState::Settled
    }
}
