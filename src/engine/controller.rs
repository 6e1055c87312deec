use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::Local;
use log::error;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    ambient::{AmbientController, AudioSink},
    config::EngineConfig,
    models::{HistoryPoint, Mood},
    mood::MoodClassifier,
    scoring::{FusionWeights, Suggestion},
    sentiment::SentimentAnalyzer,
    store::SnapshotStore,
};

use super::state::{EngineSnapshot, EngineState};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// The focus engine. Construction via [`FocusEngine::start`] restores the
/// persisted history and spawns the background loops; [`FocusEngine::stop`]
/// tears them down. One instance, one run: there are no ambient singletons,
/// and a stopped engine stays stopped.
///
/// Clones share the same engine.
#[derive(Clone)]
pub struct FocusEngine {
    state: Arc<Mutex<EngineState>>,
    ambient: Arc<Mutex<AmbientController>>,
    analyzer: Arc<SentimentAnalyzer>,
    weights: FusionWeights,
    store: SnapshotStore,
    history_key: String,
    cancel: CancellationToken,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl FocusEngine {
    /// Restore history from the store and bring the engine up. When a
    /// classifier is supplied it is polled on the configured cadence;
    /// otherwise the host pushes labels through [`FocusEngine::update_mood`].
    pub async fn start(
        config: EngineConfig,
        store: SnapshotStore,
        classifier: Option<Box<dyn MoodClassifier>>,
        sink: Box<dyn AudioSink>,
    ) -> Result<Self> {
        let history = store
            .load_history(&config.history_key, config.history_capacity)
            .await;

        let engine = Self {
            state: Arc::new(Mutex::new(EngineState::new(history))),
            ambient: Arc::new(Mutex::new(AmbientController::new(
                config.ambient_policy,
                sink,
            ))),
            analyzer: Arc::new(SentimentAnalyzer::new()),
            weights: config.weights(),
            store: store.clone(),
            history_key: config.history_key.clone(),
            cancel: CancellationToken::new(),
            tasks: Arc::new(Mutex::new(Vec::new())),
        };

        let mut tasks = Vec::new();

        if let Some(classifier) = classifier {
            tasks.push(tokio::spawn(mood_poll_loop(
                engine.state.clone(),
                engine.ambient.clone(),
                engine.weights.clone(),
                classifier,
                Duration::from_millis(config.mood_poll_ms),
                engine.cancel.clone(),
            )));
        }

        tasks.push(tokio::spawn(history_loop(
            engine.state.clone(),
            store,
            config.history_key,
            Duration::from_millis(config.history_push_ms),
            engine.cancel.clone(),
        )));

        *engine.tasks.lock().await = tasks;

        Ok(engine)
    }

    /// Cancel the background loops and wait for them to finish. Safe to
    /// call more than once; nothing keeps ticking afterwards.
    pub async fn stop(&self) {
        self.cancel.cancel();
        let mut tasks = self.tasks.lock().await;
        for handle in tasks.drain(..) {
            if let Err(err) = handle.await {
                error!("Engine task failed to join: {err}");
            }
        }
    }

    /// Latest label from the expression classifier (or any host-side
    /// mood source). Re-evaluates only when the label actually changed.
    pub async fn update_mood(&self, mood: Mood) {
        let mut state = self.state.lock().await;
        if state.mood == mood {
            return;
        }
        state.mood = mood;
        self.evaluate_and_command(&mut state).await;
    }

    /// Replace the journal text and rescore it.
    pub async fn update_journal(&self, text: &str) {
        let sentiment = self.analyzer.analyze(text);
        let mut state = self.state.lock().await;
        state.journal = text.to_string();
        if state.sentiment == sentiment {
            return;
        }
        state.sentiment = sentiment;
        self.evaluate_and_command(&mut state).await;
    }

    /// Voice transcript: appended to the journal, then scored through the
    /// same sentiment path as typed text.
    pub async fn append_transcript(&self, transcript: &str) {
        let combined = {
            let state = self.state.lock().await;
            if state.journal.is_empty() {
                transcript.to_string()
            } else {
                format!("{} {}", state.journal, transcript)
            }
        };
        self.update_journal(&combined).await;
    }

    /// A keystroke landed in the journal; refresh the cadence estimate.
    pub async fn record_keystroke(&self) {
        let mut state = self.state.lock().await;
        state.typing.record_keystroke();
        self.evaluate_and_command(&mut state).await;
    }

    pub async fn set_audio_enabled(&self, enabled: bool) {
        let mut state = self.state.lock().await;
        state.audio_enabled = enabled;
        let published = state.published;
        drop(state);
        self.ambient.lock().await.update(published, enabled);
    }

    /// Soft restart of the visible state: sentinel history, baseline
    /// published score, persisted snapshot cleared. Signal sources keep
    /// running untouched.
    pub async fn reset_history(&self) {
        let (published, enabled) = {
            let mut state = self.state.lock().await;
            state.reset_history();
            (state.published, state.audio_enabled)
        };

        if let Err(err) = self.store.clear_history(&self.history_key).await {
            error!("Failed to clear persisted history: {err:#}");
        }

        self.ambient.lock().await.update(published, enabled);
    }

    pub async fn published_score(&self) -> u8 {
        self.state.lock().await.published
    }

    pub async fn instantaneous_score(&self) -> u8 {
        self.state.lock().await.instantaneous
    }

    pub async fn suggestion(&self) -> Suggestion {
        self.state.lock().await.suggestion
    }

    pub async fn history(&self) -> Vec<HistoryPoint> {
        self.state.lock().await.history.to_vec()
    }

    pub async fn journal(&self) -> String {
        self.state.lock().await.journal.clone()
    }

    pub async fn snapshot(&self) -> EngineSnapshot {
        self.state.lock().await.snapshot()
    }

    async fn evaluate_and_command(&self, state: &mut EngineState) {
        state.evaluate(&self.weights);
        let published = state.published;
        let enabled = state.audio_enabled;
        self.ambient.lock().await.update(published, enabled);
    }
}

async fn mood_poll_loop(
    state: Arc<Mutex<EngineState>>,
    ambient: Arc<Mutex<AmbientController>>,
    weights: FusionWeights,
    mut classifier: Box<dyn MoodClassifier>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // One classification in flight at a time; a slow backend
                // just stretches the cadence.
                let mood = match classifier.classify().await {
                    Ok(mood) => mood,
                    Err(err) => {
                        log_warn!("mood classification failed: {err:#}");
                        Mood::Unknown
                    }
                };

                let update = {
                    let mut guard = state.lock().await;
                    if guard.mood == mood {
                        None
                    } else {
                        guard.mood = mood;
                        guard.evaluate(&weights);
                        Some((guard.published, guard.audio_enabled))
                    }
                };

                if let Some((published, enabled)) = update {
                    ambient.lock().await.update(published, enabled);
                }
            }
            _ = cancel.cancelled() => {
                log_info!("mood poll loop shutting down");
                break;
            }
        }
    }
}

async fn history_loop(
    state: Arc<Mutex<EngineState>>,
    store: SnapshotStore,
    key: String,
    period: Duration,
    cancel: CancellationToken,
) {
    // First push lands one full period after startup.
    let mut ticker = time::interval_at(time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let series = {
                    let mut guard = state.lock().await;
                    guard.push_history_point(Local::now());
                    guard.history.clone()
                };

                // The in-memory series stands even if the write fails.
                if let Err(err) = store.save_history(&key, &series).await {
                    error!("Failed to persist history snapshot: {err:#}");
                }
            }
            _ = cancel.cancelled() => {
                log_info!("history ticker shutting down");
                break;
            }
        }
    }
}
