//! Primary process supervision with a one-time switch to the fallback server.

use crate::{
    AvailabilityProber, ErrorScanner, FailureTrigger, Fallback, Outcome, PrimaryCommand,
    SupervisionState, SupervisorResult, inspector,
};

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::ExitStatus;
use std::time::Duration;

use log::{Level, debug, error, info, log, warn};
use standby_config::Config;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::watch;

#[cfg(unix)]
use nix::sys::signal::{Signal, killpg};
#[cfg(unix)]
use nix::unistd::Pid;
#[cfg(unix)]
use tokio::time::Instant;

const READ_CHUNK_SIZE: usize = 8 * 1024;
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);
#[cfg(unix)]
const GROUP_EXIT_TIMEOUT: Duration = Duration::from_secs(2);
#[cfg(unix)]
const GROUP_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// One event from the primary or the outside world, handled to completion
/// before the next one is awaited.
enum PrimaryEvent {
    Shutdown,
    Stdout(io::Result<usize>),
    Stderr(io::Result<usize>),
    Exited(io::Result<ExitStatus>),
}

/// How the primary phase ended.
enum PrimaryPhase {
    Exited,
    Shutdown,
    Failed(FailureTrigger),
}

/// Owns the port's lifecycle: runs the primary if it can, otherwise (or
/// after it fails) the fallback server.
pub struct Supervisor<F: Fallback> {
    config: Config,
    prober: AvailabilityProber,
    fallback: F,
    state_tx: watch::Sender<SupervisionState>,
    state_rx: watch::Receiver<SupervisionState>,
}

impl<F: Fallback> Supervisor<F> {
    pub fn new(config: Config, fallback: F) -> Self {
        let (state_tx, state_rx) = watch::channel(SupervisionState::NotStarted);
        let prober = AvailabilityProber::from_config(&config.primary);

        Self {
            config,
            prober,
            fallback,
            state_tx,
            state_rx,
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SupervisionState> {
        self.state_rx.clone()
    }

    /// Get current state.
    pub fn state(&self) -> SupervisionState {
        self.state_rx.borrow().clone()
    }

    /// Supervise until `shutdown` resolves or the primary exits cleanly.
    ///
    /// Only a fallback bind/serve error is returned as `Err`; every other
    /// failure is converted into the fallback transition.
    pub async fn run<S>(&self, shutdown: S) -> SupervisorResult<Outcome>
    where
        S: Future,
    {
        let mut shutdown = std::pin::pin!(shutdown);

        inspector::inspect(&self.config);

        let probe = tokio::select! {
            _ = shutdown.as_mut() => return Ok(self.shut_down()),
            probe = self.prober.probe() => probe,
        };

        let trigger = if probe.available {
            match self.run_primary(shutdown.as_mut()).await {
                PrimaryPhase::Exited => return Ok(Outcome::PrimaryExited),
                PrimaryPhase::Shutdown => return Ok(Outcome::ShutdownRequested),
                PrimaryPhase::Failed(trigger) => trigger,
            }
        } else {
            FailureTrigger::Unavailable {
                reason: probe.reason.unwrap_or_else(|| String::from("unknown")),
            }
        };

        self.enter_secondary(&trigger);
        self.run_secondary(shutdown.as_mut()).await
    }

    /// Spawn the primary and relay its output until it exits, fails, or a
    /// shutdown arrives. The child's process group is killed and the child
    /// reaped before returning.
    async fn run_primary<S>(&self, mut shutdown: Pin<&mut S>) -> PrimaryPhase
    where
        S: Future,
    {
        let command = PrimaryCommand::from_config(&self.config);
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                error!("{e}");
                return PrimaryPhase::Failed(FailureTrigger::Internal {
                    message: e.to_string(),
                });
            }
        };

        let pid = child.id();
        info!("Primary started (PID: {:?})", pid);
        self.set_state(SupervisionState::RunningPrimary { pid });

        let mut stdout = child.stdout.take();
        let mut stderr = child.stderr.take();
        let mut scanner = ErrorScanner::new(self.config.primary.fatal_markers.iter().cloned());
        let mut stdout_buf = vec![0u8; READ_CHUNK_SIZE];
        let mut stderr_buf = vec![0u8; READ_CHUNK_SIZE];

        let phase = loop {
            let event = tokio::select! {
                _ = shutdown.as_mut() => PrimaryEvent::Shutdown,
                read = read_chunk(&mut stdout, &mut stdout_buf) => PrimaryEvent::Stdout(read),
                read = read_chunk(&mut stderr, &mut stderr_buf) => PrimaryEvent::Stderr(read),
                status = child.wait() => PrimaryEvent::Exited(status),
            };

            match event {
                PrimaryEvent::Shutdown => {
                    self.set_state(SupervisionState::ShuttingDown);
                    kill_primary(&mut child, pid).await;
                    return PrimaryPhase::Shutdown;
                }
                PrimaryEvent::Stdout(Ok(0)) => {
                    debug!("Primary closed stdout");
                    stdout = None;
                }
                PrimaryEvent::Stdout(Ok(n)) => relay("stdout", Level::Info, &stdout_buf[..n]),
                PrimaryEvent::Stderr(Ok(0)) => {
                    debug!("Primary closed stderr");
                    stderr = None;
                }
                PrimaryEvent::Stderr(Ok(n)) => {
                    relay("stderr", Level::Warn, &stderr_buf[..n]);
                    if let Some(marker) = scanner.scan(&stderr_buf[..n]) {
                        break PrimaryPhase::Failed(FailureTrigger::FatalOutput {
                            marker: marker.to_string(),
                        });
                    }
                }
                PrimaryEvent::Stdout(Err(e)) | PrimaryEvent::Stderr(Err(e)) => {
                    break PrimaryPhase::Failed(FailureTrigger::Internal {
                        message: format!("reading primary output failed: {e}"),
                    });
                }
                PrimaryEvent::Exited(Ok(status)) if status.success() => {
                    break PrimaryPhase::Exited;
                }
                PrimaryEvent::Exited(Ok(status)) => {
                    break PrimaryPhase::Failed(FailureTrigger::AbnormalExit {
                        code: status.code(),
                    });
                }
                PrimaryEvent::Exited(Err(e)) => {
                    break PrimaryPhase::Failed(FailureTrigger::Internal {
                        message: format!("waiting for primary failed: {e}"),
                    });
                }
            }
        };

        kill_primary(&mut child, pid).await;

        // Output still buffered in the pipes, usually the traceback
        let drained = drain_output(&mut stdout, &mut stderr, &mut scanner);
        match tokio::time::timeout(DRAIN_TIMEOUT, drained).await {
            Ok(Some(marker)) => warn!("Fatal marker in remaining primary output: {marker}"),
            Ok(None) => {}
            Err(_) => warn!("Primary output still open after {:?}", DRAIN_TIMEOUT),
        }

        if matches!(phase, PrimaryPhase::Exited) {
            info!("Primary exited cleanly, not falling back");
            self.set_state(SupervisionState::ShuttingDown);
        }

        phase
    }

    /// Serve the fallback until it stops or a shutdown arrives.
    async fn run_secondary<S>(&self, shutdown: Pin<&mut S>) -> SupervisorResult<Outcome>
    where
        S: Future,
    {
        let addr = self.config.server.bind_addr();

        tokio::select! {
            _ = shutdown => Ok(self.shut_down()),
            result = self.fallback.serve(addr) => {
                result?;
                warn!("Fallback server stopped");
                Ok(Outcome::FallbackStopped)
            }
        }
    }

    /// Move to `RunningSecondary`. Returns false (and does nothing) when the
    /// transition already happened or shutdown is in progress.
    pub(crate) fn enter_secondary(&self, trigger: &FailureTrigger) -> bool {
        if !self.state_rx.borrow().can_fall_back() {
            debug!("Ignoring failure trigger after fallback: {trigger}");
            return false;
        }

        error!("Switching to fallback server: {trigger}");
        self.set_state(SupervisionState::RunningSecondary {
            port: self.config.server.port,
        });
        true
    }

    fn shut_down(&self) -> Outcome {
        self.set_state(SupervisionState::ShuttingDown);
        Outcome::ShutdownRequested
    }

    fn set_state(&self, state: SupervisionState) {
        let _ = self.state_tx.send(state);
    }
}

/// Read the next chunk, or wait forever once the stream is gone.
async fn read_chunk<R>(reader: &mut Option<R>, buf: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    match reader {
        Some(reader) => reader.read(buf).await,
        None => std::future::pending().await,
    }
}

/// Relay whatever is left in both pipes until EOF. Returns the first fatal
/// marker seen on stderr.
pub(crate) async fn drain_output<O, E>(
    stdout: &mut Option<O>,
    stderr: &mut Option<E>,
    scanner: &mut ErrorScanner,
) -> Option<String>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut stdout_buf = vec![0u8; READ_CHUNK_SIZE];
    let mut stderr_buf = vec![0u8; READ_CHUNK_SIZE];
    let mut found = None;

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            read = read_chunk(stdout, &mut stdout_buf) => match read {
                Ok(n) if n > 0 => relay("stdout", Level::Info, &stdout_buf[..n]),
                _ => *stdout = None,
            },
            read = read_chunk(stderr, &mut stderr_buf) => match read {
                Ok(n) if n > 0 => {
                    relay("stderr", Level::Warn, &stderr_buf[..n]);
                    if let Some(marker) = scanner.scan(&stderr_buf[..n])
                        && found.is_none()
                    {
                        found = Some(marker.to_string());
                    }
                }
                _ => *stderr = None,
            },
        }
    }

    found
}

/// Forward a chunk of child output immediately, tagged with its stream.
fn relay(stream: &str, level: Level, chunk: &[u8]) {
    let text = String::from_utf8_lossy(chunk);
    let text = text.trim_end();
    if !text.is_empty() {
        log!(level, "[primary:{stream}] {text}");
    }
}

/// Best-effort kill of the primary and every worker in its process group,
/// then reap. An already-exited child is not an error.
async fn kill_primary(child: &mut Child, pid: Option<u32>) {
    #[cfg(unix)]
    {
        if let Some(pid) = pid
            && let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL)
        {
            debug!("Primary process group already gone (PGID: {}): {}", pid, e);
        }
    }

    match child.kill().await {
        Ok(()) => info!("Primary process terminated (PID: {:?})", pid),
        Err(e) => debug!("Primary already gone (PID: {:?}): {}", pid, e),
    }

    #[cfg(unix)]
    {
        if let Some(pid) = pid {
            wait_for_group_exit(Pid::from_raw(pid as i32)).await;
        }
    }
}

/// Wait until no process of the group is left, so its sockets are closed.
#[cfg(unix)]
async fn wait_for_group_exit(pgid: Pid) {
    let start = Instant::now();

    while killpg(pgid, None).is_ok() {
        if start.elapsed() >= GROUP_EXIT_TIMEOUT {
            warn!(
                "Primary process group {} still present after {:?}",
                pgid, GROUP_EXIT_TIMEOUT
            );
            return;
        }
        tokio::time::sleep(GROUP_POLL_INTERVAL).await;
    }
}
