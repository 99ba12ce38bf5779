//! Process-wide recorder for faults nobody handled.
//!
//! Two kinds of fault are captured: panics (through a panic hook) and
//! detached tasks started with [`FaultRecorder::spawn_watched`] that finish
//! with an error. Each becomes one JSON line appended to the log file.
//! Appending is best-effort: a failed write is reported through `tracing`
//! and dropped.

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::future::Future;
use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::thread::{self, JoinHandle};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::FaultError;

static RECORDER: OnceLock<FaultRecorder> = OnceLock::new();

/// Something that went wrong and was not handled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fault {
    pub message: String,
    pub stack: Option<String>,
}

impl Fault {
    /// The stack lists the error's source chain followed by a backtrace
    /// captured here, whatever `RUST_BACKTRACE` says.
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut stack = String::new();
        let mut source = err.source();
        if source.is_some() {
            stack.push_str("Caused by:\n");
        }
        while let Some(cause) = source {
            stack.push_str(&format!("    {cause}\n"));
            source = cause.source();
        }
        stack.push_str(&Backtrace::force_capture().to_string());

        Self {
            message: err.to_string(),
            stack: Some(stack),
        }
    }

    /// For failure values that are not errors. Carries no stack.
    pub fn from_reason(reason: impl Display) -> Self {
        Self {
            message: reason.to_string(),
            stack: None,
        }
    }

    fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "Box<dyn Any>".to_owned());

        let backtrace = Backtrace::force_capture();
        let stack = match info.location() {
            Some(location) => format!("panicked at {location}\n{backtrace}"),
            None => backtrace.to_string(),
        };

        Self {
            message,
            stack: Some(stack),
        }
    }
}

/// One line of the fault log.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FaultRecord {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// RFC 3339 UTC with milliseconds, e.g. `2026-10-16T09:30:00.123Z`.
    pub timestamp: String,
}

impl FaultRecord {
    pub fn now(fault: Fault) -> Self {
        Self {
            message: fault.message,
            stack: fault.stack,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FaultRecorder {
    log_path: PathBuf,
}

impl FaultRecorder {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append `fault` on a detached writer thread. Dropping the handle is
    /// fine; joining it only waits for the write, whose failure has already
    /// been reported. `None` if no thread could be started.
    pub fn record(&self, fault: Fault) -> Option<JoinHandle<()>> {
        let record = FaultRecord::now(fault);
        let path = self.log_path.clone();

        let spawned = thread::Builder::new()
            .name("fault-writer".to_owned())
            .spawn(move || {
                if let Err(err) = append_record(&path, &record) {
                    error!(path = %path.display(), %err, "error writing to fault log");
                }
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!(%err, "cannot start fault writer");
                None
            }
        }
    }

    /// Spawn `future` as a detached task and record its error if it fails.
    /// Panics inside the task reach the panic hook instead, so they are not
    /// recorded twice.
    ///
    /// Must be called from within a tokio runtime; `tokio::spawn` panics
    /// otherwise. The task finishes only after the record is written, so
    /// awaiting the returned handle means the log line is on disk.
    pub fn spawn_watched<F, T, E>(&self, future: F) -> tokio::task::JoinHandle<()>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Into<anyhow::Error> + Send + 'static,
    {
        let recorder = self.clone();
        tokio::spawn(async move {
            let Err(err) = future.await else {
                return;
            };
            let err: anyhow::Error = err.into();
            let Some(writer) = recorder.record(Fault::from_error(&*err)) else {
                return;
            };
            if !matches!(
                tokio::task::spawn_blocking(move || writer.join()).await,
                Ok(Ok(()))
            ) {
                error!("fault writer did not finish");
            }
        })
    }
}

fn append_record(path: &Path, record: &FaultRecord) -> io::Result<()> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}

/// Install the process-wide recorder and its panic hook. Only the first
/// call has an effect.
pub fn install(log_path: impl Into<PathBuf>) -> Result<&'static FaultRecorder, FaultError> {
    let mut fresh = false;
    let recorder = RECORDER.get_or_init(|| {
        fresh = true;
        FaultRecorder::new(log_path)
    });
    if !fresh {
        return Err(FaultError::AlreadyInstalled);
    }

    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // Wait for the write so a panicking main thread does not end the
        // process before the record lands.
        if let Some(writer) = recorder.record(Fault::from_panic(info)) {
            let _ = writer.join();
        }
        previous(info);
    }));

    Ok(recorder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use tempfile::TempDir;

    fn read_records(path: &Path) -> Vec<FaultRecord> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn assert_timestamp(record: &FaultRecord) {
        let parsed = chrono::DateTime::parse_from_rfc3339(&record.timestamp).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert!(record.timestamp.ends_with('Z'));
    }

    #[test]
    fn record_appends_one_json_line() {
        let temp = TempDir::new().unwrap();
        let recorder = FaultRecorder::new(temp.path().join("error.json"));

        recorder
            .record(Fault::from_reason("boom"))
            .unwrap()
            .join()
            .unwrap();

        let raw = std::fs::read_to_string(recorder.log_path()).unwrap();
        assert_eq!(raw.lines().count(), 1);
        assert!(raw.ends_with('\n'));

        let records = read_records(recorder.log_path());
        assert_eq!(records[0].message, "boom");
        assert_eq!(records[0].stack, None);
        assert!(!raw.contains("\"stack\""));
        assert_timestamp(&records[0]);
    }

    #[test]
    fn records_accumulate_without_rewriting() {
        let temp = TempDir::new().unwrap();
        let recorder = FaultRecorder::new(temp.path().join("error.json"));

        for message in ["first", "second"] {
            recorder
                .record(Fault::from_error(&*anyhow!(message)))
                .unwrap()
                .join()
                .unwrap();
        }

        let records = read_records(recorder.log_path());
        let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(records.iter().all(|r| r.stack.is_some()));
    }

    #[test]
    fn write_failure_does_not_escape_record() {
        let temp = TempDir::new().unwrap();
        // A directory cannot be opened for appending.
        let recorder = FaultRecorder::new(temp.path());

        let writer = recorder.record(Fault::from_reason("lost")).unwrap();
        assert!(writer.join().is_ok());
    }

    #[test]
    fn error_stack_includes_cause_chain() {
        let err = anyhow!("disk unplugged").context("saving manifest");
        let fault = Fault::from_error(&*err);

        assert_eq!(fault.message, "saving manifest");
        let stack = fault.stack.unwrap();
        assert!(stack.starts_with("Caused by:\n    disk unplugged\n"));
    }

    #[test]
    fn error_stack_always_has_a_backtrace() {
        let err = io::Error::other("no cause");
        let fault = Fault::from_error(&err);

        let stack = fault.stack.unwrap();
        assert!(!stack.contains("Caused by"));
        assert!(!stack.contains("disabled backtrace"));
        assert!(!stack.is_empty());
    }

    #[tokio::test]
    async fn failed_detached_task_is_recorded() {
        let temp = TempDir::new().unwrap();
        let recorder = FaultRecorder::new(temp.path().join("error.json"));

        recorder
            .spawn_watched(async { Err::<(), _>(anyhow!("nobody was listening")) })
            .await
            .unwrap();
        recorder
            .spawn_watched(async { Ok::<_, anyhow::Error>(7) })
            .await
            .unwrap();

        let records = read_records(recorder.log_path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "nobody was listening");
    }
}
