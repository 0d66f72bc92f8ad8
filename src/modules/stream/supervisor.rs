use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use super::command::transcode_args;
use super::filter::{build_filter_plan, resolve_asset};
use crate::infrastructure::db::pool::DbPool;
use crate::modules::overlay::model::Overlay;
use crate::modules::overlay::repository::OverlayRepository;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Failed to start transcoder: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("No stream is currently running.")]
    NothingToStop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StreamState {
    Idle,
    Starting,
    Running,
}

/// Read access to the overlay store. A fetch failure degrades to an empty
/// overlay list; starting a broadcast never depends on the store being up.
#[async_trait::async_trait]
pub trait OverlayLister: Send + Sync {
    async fn list_overlays(&self) -> anyhow::Result<Vec<Overlay>>;
}

pub struct DbOverlayLister {
    db: DbPool,
}

impl DbOverlayLister {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl OverlayLister for DbOverlayLister {
    async fn list_overlays(&self) -> anyhow::Result<Vec<Overlay>> {
        Ok(OverlayRepository::find_all(&self.db).await?)
    }
}

#[derive(Clone, Debug)]
pub struct TranscodeSettings {
    pub ffmpeg_path: String,
    pub asset_root: PathBuf,
    pub publish_url: String,
}

struct ActiveSession {
    generation: u64,
    source_url: String,
    kill_tx: oneshot::Sender<()>,
}

struct Inner {
    state: StreamState,
    session: Option<ActiveSession>,
    next_generation: u64,
}

/// Owns the single allowed transcode subprocess. Sessions are numbered by a
/// monotonically increasing generation; the exit watcher only clears the
/// slot when it still holds its own generation, so a late exit notification
/// from a superseded process can never drop a newer session.
pub struct StreamSupervisor {
    settings: TranscodeSettings,
    overlays: Arc<dyn OverlayLister>,
    inner: Arc<Mutex<Inner>>,
}

impl StreamSupervisor {
    pub fn new(settings: TranscodeSettings, overlays: Arc<dyn OverlayLister>) -> Self {
        Self {
            settings,
            overlays,
            inner: Arc::new(Mutex::new(Inner {
                state: StreamState::Idle,
                session: None,
                next_generation: 1,
            })),
        }
    }

    /// Starts broadcasting `source_url`, superseding any active session.
    /// The superseded process is asked to terminate without waiting for it
    /// to exit; registration of the new session happens under the same lock.
    pub async fn start(&self, source_url: &str) -> Result<(), StreamError> {
        let mut inner = self.inner.lock().await;

        if let Some(old) = inner.session.take() {
            info!(
                "Transcoder is already running, superseding generation {}",
                old.generation
            );
            let _ = old.kill_tx.send(());
        }
        inner.state = StreamState::Starting;

        let overlays = match self.overlays.list_overlays().await {
            Ok(overlays) => overlays,
            Err(e) => {
                warn!("Could not fetch overlays, starting without: {}", e);
                Vec::new()
            }
        };

        let plan = build_filter_plan(&overlays, |content| {
            resolve_asset(&self.settings.asset_root, content)
        });
        let args = transcode_args(source_url, &plan, &self.settings.publish_url);

        info!(
            "🚀 Starting transcoder: {} {}",
            self.settings.ffmpeg_path,
            args.join(" ")
        );

        let mut child = match Command::new(&self.settings.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                error!("❌ Failed to start transcoder: {}", e);
                inner.state = StreamState::Idle;
                return Err(StreamError::Spawn(e));
            }
        };

        let generation = inner.next_generation;
        inner.next_generation += 1;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_stderr(stderr, generation));
        }

        let (kill_tx, kill_rx) = oneshot::channel();
        tokio::spawn(watch_session(
            Arc::clone(&self.inner),
            child,
            generation,
            kill_rx,
        ));

        inner.session = Some(ActiveSession {
            generation,
            source_url: source_url.to_string(),
            kill_tx,
        });
        inner.state = StreamState::Running;
        Ok(())
    }

    /// Requests termination of the active session. The slot is freed once
    /// the kill signal is issued, not once the process has exited.
    pub async fn stop(&self) -> Result<(), StreamError> {
        let mut inner = self.inner.lock().await;

        let session = inner.session.take().ok_or(StreamError::NothingToStop)?;
        let _ = session.kill_tx.send(());
        inner.state = StreamState::Idle;

        info!(
            "🛑 Stop requested for transcoder generation {}",
            session.generation
        );
        Ok(())
    }

    /// Start already supersedes a running session, so restart is the same
    /// operation with a louder log line.
    pub async fn restart(&self, source_url: &str) -> Result<(), StreamError> {
        info!("Restarting stream...");
        self.start(source_url).await
    }

    pub async fn status(&self) -> (StreamState, Option<String>) {
        let inner = self.inner.lock().await;
        (
            inner.state,
            inner.session.as_ref().map(|s| s.source_url.clone()),
        )
    }
}

async fn forward_stderr(stderr: ChildStderr, generation: u64) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!("[FFMPEG {}]: {}", generation, line);
    }
}

/// Waits for the child to exit on its own or for a kill request, reaps it,
/// and releases the session slot if it still belongs to this generation.
async fn watch_session(
    inner: Arc<Mutex<Inner>>,
    mut child: Child,
    generation: u64,
    kill_rx: oneshot::Receiver<()>,
) {
    let natural_exit = tokio::select! {
        status = child.wait() => Some(status),
        _ = kill_rx => None,
    };

    match natural_exit {
        Some(Ok(status)) => {
            info!("🛑 Transcoder generation {} exited with {}", generation, status)
        }
        Some(Err(e)) => {
            error!("Failed to wait on transcoder generation {}: {}", generation, e)
        }
        None => {
            let _ = child.start_kill();
            let _ = child.wait().await;
            info!("Transcoder generation {} terminated", generation);
        }
    }

    let mut inner = inner.lock().await;
    if inner
        .session
        .as_ref()
        .is_some_and(|s| s.generation == generation)
    {
        inner.session = None;
        inner.state = StreamState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::time::Duration;

    struct EmptyLister;

    #[async_trait::async_trait]
    impl OverlayLister for EmptyLister {
        async fn list_overlays(&self) -> anyhow::Result<Vec<Overlay>> {
            Ok(Vec::new())
        }
    }

    struct FailingLister;

    #[async_trait::async_trait]
    impl OverlayLister for FailingLister {
        async fn list_overlays(&self) -> anyhow::Result<Vec<Overlay>> {
            anyhow::bail!("overlay store unavailable")
        }
    }

    // A stand-in transcoder that ignores its argv and runs until killed.
    // Real binaries like `yes` or `sleep` choke on the transcoder flags.
    fn stub_transcoder(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("transcoder");
        std::fs::write(&path, "#!/bin/sh\nsleep 30\n").unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.display().to_string()
    }

    fn supervisor(binary: &str, lister: Arc<dyn OverlayLister>) -> StreamSupervisor {
        StreamSupervisor::new(
            TranscodeSettings {
                ffmpeg_path: binary.to_string(),
                asset_root: PathBuf::from("public"),
                publish_url: "rtmp://localhost:1935/live/stream".to_string(),
            },
            lister,
        )
    }

    #[tokio::test]
    async fn stop_without_active_session_fails() {
        let sup = supervisor("true", Arc::new(EmptyLister));

        let err = sup.stop().await.unwrap_err();
        assert!(matches!(err, StreamError::NothingToStop));
        assert_eq!(sup.status().await, (StreamState::Idle, None));
    }

    #[tokio::test]
    async fn spawn_failure_reverts_to_idle() {
        let sup = supervisor("/nonexistent/livecast-transcoder", Arc::new(EmptyLister));

        let err = sup.start("rtsp://cam/1").await.unwrap_err();
        assert!(matches!(err, StreamError::Spawn(_)));
        assert_eq!(sup.status().await, (StreamState::Idle, None));
    }

    #[tokio::test]
    async fn start_survives_overlay_store_outage() {
        let dir = tempfile::tempdir().unwrap();
        let sup = supervisor(&stub_transcoder(&dir), Arc::new(FailingLister));

        sup.start("rtsp://cam/1").await.unwrap();
        let (state, url) = sup.status().await;
        assert_eq!(state, StreamState::Running);
        assert_eq!(url.as_deref(), Some("rtsp://cam/1"));

        sup.stop().await.unwrap();
    }

    #[tokio::test]
    async fn second_start_supersedes_first_session() {
        let dir = tempfile::tempdir().unwrap();
        let sup = supervisor(&stub_transcoder(&dir), Arc::new(EmptyLister));

        sup.start("rtsp://cam/a").await.unwrap();
        sup.start("rtsp://cam/b").await.unwrap();

        // Give the superseded session's watcher time to observe the kill;
        // its exit must not clear the surviving session.
        tokio::time::sleep(Duration::from_millis(200)).await;

        let (state, url) = sup.status().await;
        assert_eq!(state, StreamState::Running);
        assert_eq!(url.as_deref(), Some("rtsp://cam/b"));

        sup.stop().await.unwrap();
        assert_eq!(sup.status().await, (StreamState::Idle, None));
    }

    #[tokio::test]
    async fn concurrent_starts_leave_exactly_one_session() {
        let dir = tempfile::tempdir().unwrap();
        let sup = Arc::new(supervisor(&stub_transcoder(&dir), Arc::new(EmptyLister)));

        let a = {
            let sup = Arc::clone(&sup);
            tokio::spawn(async move { sup.start("rtsp://cam/a").await })
        };
        let b = {
            let sup = Arc::clone(&sup);
            tokio::spawn(async move { sup.start("rtsp://cam/b").await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        let (state, url) = sup.status().await;
        assert_eq!(state, StreamState::Running);
        assert!(url.is_some());

        sup.stop().await.unwrap();
        assert!(matches!(
            sup.stop().await.unwrap_err(),
            StreamError::NothingToStop
        ));
    }

    #[tokio::test]
    async fn natural_exit_clears_the_session() {
        // `true` exits immediately, simulating a transcoder crash.
        let sup = supervisor("true", Arc::new(EmptyLister));

        sup.start("rtsp://cam/1").await.unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(sup.status().await, (StreamState::Idle, None));
    }
}
