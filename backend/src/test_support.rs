//! Test doubles shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature, which the
//! crate enables for its own integration tests.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::body::{self, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use serde_json::Value;
use tracing::Level;
use tracing::subscriber::DefaultGuard;

use crate::domain::HealthService;
use crate::domain::ports::{DatabaseProbe, DatabaseProbeError};
use crate::inbound::http::state::HttpState;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at the Unix epoch.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Scripted outcome of a [`StubDatabaseProbe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeBehaviour {
    /// Answer successfully.
    Healthy,
    /// Fail with a connection error.
    Failing,
    /// Panic inside the probe.
    Panicking,
}

/// Database probe with a fixed outcome that counts its invocations.
#[derive(Debug)]
pub struct StubDatabaseProbe {
    behaviour: ProbeBehaviour,
    calls: AtomicUsize,
}

impl StubDatabaseProbe {
    /// Probe that always behaves as `behaviour`.
    pub fn new(behaviour: ProbeBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completed or attempted pings.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseProbe for StubDatabaseProbe {
    async fn ping(&self) -> Result<(), DatabaseProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            ProbeBehaviour::Healthy => Ok(()),
            ProbeBehaviour::Failing => Err(DatabaseProbeError::connection("connection refused")),
            ProbeBehaviour::Panicking => panic!("database driver panicked"),
        }
    }
}

/// Handler state backed by `probe` and a clock frozen at the epoch.
pub fn http_state(probe: Arc<StubDatabaseProbe>) -> web::Data<HttpState> {
    let health = HealthService::new(probe, Arc::new(FixedClock::epoch()));
    web::Data::new(HttpState::new(health))
}

/// Send `req` to `app` and render the outcome the way the HTTP server does:
/// an `Err` from the outermost service becomes its `error_response`.
pub async fn respond<S, R, B>(app: &S, req: R) -> HttpResponse
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + 'static,
{
    match app.call(req).await {
        Ok(res) => res.into_parts().1.map_into_boxed_body(),
        Err(err) => err.error_response(),
    }
}

/// Like [`respond`], returning the status and the JSON body.
pub async fn respond_json<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + 'static,
{
    let res = respond(app, req).await;
    let status = res.status();
    let bytes = match body::to_bytes(res.into_body()).await {
        Ok(bytes) => bytes,
        Err(error) => panic!("reading response body failed: {error}"),
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => (status, value),
        Err(error) => panic!("response body is not JSON ({error}): {bytes:?}"),
    }
}

/// In-memory sink for formatted log lines.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        match self.0.lock() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => panic!("log buffer mutex"),
        }
    }

    /// Number of events recorded at `level`.
    pub fn count(&self, level: Level) -> usize {
        let level = level.as_str();
        self.contents()
            .lines()
            .filter(|line| line.split_whitespace().next() == Some(level))
            .count()
    }

    /// Number of events recorded at any level.
    pub fn total(&self) -> usize {
        self.contents()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut bytes) => bytes.extend_from_slice(buf),
            Err(_) => panic!("log buffer mutex"),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's `DEBUG` and above events into a [`CapturedLogs`]
/// until the returned guard is dropped.
///
/// Lines are written without timestamps, so each starts with its level.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}
