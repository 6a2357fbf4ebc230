#![allow(dead_code)]

//! Test infrastructure for supervisor integration tests

use standby_config::{Config, PrimaryConfig, ServerConfig};
use standby_fallback::FallbackResult;
use standby_supervisor::Fallback;

use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use log::{LevelFilter, Log, Metadata, Record};
use nix::sys::signal::kill;
use nix::unistd::Pid;

const WAIT_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Fallback double that counts how often it was started.
#[derive(Clone)]
pub struct RecordingFallback {
    calls: Arc<AtomicUsize>,
    hold: bool,
}

impl RecordingFallback {
    /// Returns from `serve` immediately
    pub fn returning() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            hold: false,
        }
    }

    /// Serves until dropped, like the real server
    pub fn holding() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            hold: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fallback for RecordingFallback {
    async fn serve(&self, _addr: SocketAddr) -> FallbackResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hold {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

/// Config whose primary is `sh <dir>/primary.sh`.
///
/// The version query becomes `sh /dev/null`, which exits 0.
pub fn fake_primary(dir: &Path, port: u16, script: &str) -> Config {
    let path = dir.join("primary.sh");
    std::fs::write(&path, script).unwrap();

    Config {
        server: ServerConfig { port },
        primary: PrimaryConfig {
            program: String::from("sh"),
            app: path.to_string_lossy().into_owned(),
            version_arg: String::from("/dev/null"),
            entry_point: path,
            ..PrimaryConfig::default()
        },
        ..Config::default()
    }
}

/// Config whose entry point does not exist, so the prober reports unavailable.
pub fn unavailable_primary(dir: &Path, port: u16, script: &str) -> Config {
    let mut config = fake_primary(dir, port, script);
    config.primary.entry_point = dir.join("missing_wsgi.py");
    config
}

/// Find a port that is free right now.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, 0)).unwrap();
    listener.local_addr().unwrap().port()
}

/// Wait for the fake primary to write its PID.
pub async fn wait_for_pid(pid_file: &PathBuf) -> i32 {
    let start = tokio::time::Instant::now();

    while start.elapsed() < WAIT_TIMEOUT {
        if let Ok(contents) = std::fs::read_to_string(pid_file)
            && let Ok(pid) = contents.trim().parse()
        {
            return pid;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    panic!("primary never wrote {}", pid_file.display());
}

/// Whether `pid` is still running. Zombies waiting to be reaped by their new
/// parent count as gone.
pub fn process_alive(pid: i32) -> bool {
    if kill(Pid::from_raw(pid), None).is_err() {
        return false;
    }

    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => stat
            .rsplit(')')
            .next()
            .is_some_and(|rest| !rest.trim_start().starts_with('Z')),
        Err(_) => kill(Pid::from_raw(pid), None).is_ok(),
    }
}

/// Poll `GET /health` until it answers 200.
pub async fn wait_for_health(port: u16) -> serde_json::Value {
    let url = format!("http://127.0.0.1:{port}/health");
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    let start = tokio::time::Instant::now();

    while start.elapsed() < WAIT_TIMEOUT {
        if let Ok(response) = client.get(&url).send().await
            && response.status().is_success()
        {
            return response.json().await.unwrap();
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    panic!("fallback never became healthy on port {port}");
}

/// Logger that keeps every formatted message in memory.
struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static CAPTURE: OnceLock<&'static CaptureLogger> = OnceLock::new();

/// Install the capturing logger (once per test binary) and clear it.
pub fn capture_logs() {
    let logger = CAPTURE.get_or_init(|| {
        let logger: &'static CaptureLogger = Box::leak(Box::new(CaptureLogger {
            lines: Mutex::new(Vec::new()),
        }));
        log::set_logger(logger).unwrap();
        log::set_max_level(LevelFilter::Trace);
        logger
    });
    logger.lines.lock().unwrap().clear();
}

/// Messages captured since the last `capture_logs`.
pub fn captured_logs() -> Vec<String> {
    CAPTURE
        .get()
        .map(|logger| logger.lines.lock().unwrap().clone())
        .unwrap_or_default()
}
