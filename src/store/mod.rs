use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::{error, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

mod migrations;

use crate::models::{HistoryPoint, HistorySeries};
use migrations::run_migrations;

/// Version stamped into every persisted history envelope. Snapshots
/// carrying a different version are treated as no prior history.
const HISTORY_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct HistoryEnvelope {
    version: u32,
    points: Vec<HistoryPoint>,
}

type StoreTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum StoreCommand {
    Execute(StoreTask),
    Shutdown,
}

struct StoreInner {
    sender: mpsc::Sender<StoreCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(StoreCommand::Shutdown) {
                error!("Failed to send shutdown to store thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join store thread: {join_err:?}");
            }
        }
    }
}

/// Durable key/value snapshot store. A single SQLite connection lives on
/// a dedicated worker thread; callers hand it closures over an mpsc
/// channel and await the reply.
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<StoreInner>,
    db_path: Arc<PathBuf>,
}

impl SnapshotStore {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create store directory {}", parent.display())
            })?;
        }

        let (command_tx, command_rx) = mpsc::channel::<StoreCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("mindsync-store".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow::Error::new(err)
                            .context("failed to open SQLite database")));
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run store migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("Store initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        StoreCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        StoreCommand::Shutdown => break,
                    }
                }

                info!("Store thread shutting down");
            })
            .with_context(|| "failed to spawn store worker thread")?;

        ready_rx
            .recv()
            .context("store worker exited before signaling readiness")??;

        info!("Snapshot store initialized at {}", db_path.display());

        Ok(Self {
            inner: Arc::new(StoreInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = StoreCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("Store caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to store thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("store thread terminated unexpectedly"))?
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.query_row(
                "SELECT value FROM snapshots WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| "failed to read snapshot")
        })
        .await
    }

    pub async fn put(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO snapshots (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| "failed to write snapshot")?;
            Ok(())
        })
        .await
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.execute("DELETE FROM snapshots WHERE key = ?1", params![key])
                .with_context(|| "failed to delete snapshot")?;
            Ok(())
        })
        .await
    }

    /// Restore the persisted series under `key`. Absence, a read failure,
    /// a parse failure, or an unrecognized envelope version all fall back
    /// to a freshly seeded series; none of them is an error to the caller.
    pub async fn load_history(&self, key: &str, capacity: usize) -> HistorySeries {
        let raw = match self.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return HistorySeries::seeded(capacity),
            Err(err) => {
                warn!("Failed to read history snapshot, starting fresh: {err:#}");
                return HistorySeries::seeded(capacity);
            }
        };

        match serde_json::from_str::<HistoryEnvelope>(&raw) {
            Ok(envelope) if envelope.version == HISTORY_SNAPSHOT_VERSION => {
                HistorySeries::from_points(envelope.points, capacity)
            }
            Ok(envelope) => {
                warn!(
                    "History snapshot has unsupported version {}, starting fresh",
                    envelope.version
                );
                HistorySeries::seeded(capacity)
            }
            Err(err) => {
                warn!("Malformed history snapshot, starting fresh: {err}");
                HistorySeries::seeded(capacity)
            }
        }
    }

    /// Write the whole series under `key` as a versioned envelope.
    pub async fn save_history(&self, key: &str, series: &HistorySeries) -> Result<()> {
        let envelope = HistoryEnvelope {
            version: HISTORY_SNAPSHOT_VERSION,
            points: series.to_vec(),
        };
        let raw = serde_json::to_string(&envelope).context("failed to serialize history")?;
        self.put(key, raw).await
    }

    pub async fn clear_history(&self, key: &str) -> Result<()> {
        self.delete(key).await
    }
}
