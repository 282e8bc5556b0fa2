//! Handle returned by every log call.
//!
//! The underlying logger has already been called by the time a
//! [`Completion`] exists. Awaiting it runs the post-hooks in series and
//! yields the dispatched record. Dropping it un-awaited hands the post-hooks
//! to the ambient tokio runtime; outside one they run on a short-lived thread
//! with its own current-thread runtime. Either way they run after the write
//! and never delay it.

use std::future::IntoFuture;
use std::sync::Arc;
use std::thread;

use axe_core::{AxeError, LogRecord, Method};
use axe_hooks::{post_series_future, PostHook};
use futures::future::BoxFuture;
use tracing::warn;

use crate::reporter::ErrorReporter;

struct Pending {
    future: BoxFuture<'static, (LogRecord, Result<(), AxeError>)>,
    reporter: ErrorReporter,
}

impl Pending {
    async fn finish(self) -> LogRecord {
        let (record, result) = self.future.await;
        if let Err(e) = result {
            self.reporter.report(&e);
        }
        record
    }
}

#[must_use = "await the completion to observe post-hooks finishing"]
pub struct Completion {
    pending: Option<Pending>,
    record: Option<LogRecord>,
}

impl Completion {
    /// The level was inactive; nothing was dispatched.
    pub fn skipped() -> Self {
        Self { pending: None, record: None }
    }

    /// Dispatched, with `hooks` still to run.
    pub(crate) fn new(
        hooks: Vec<Arc<dyn PostHook>>,
        method: Method,
        record: LogRecord,
        reporter: ErrorReporter,
    ) -> Self {
        if hooks.is_empty() {
            return Self { pending: None, record: Some(record) };
        }
        Self {
            pending: Some(Pending {
                future: post_series_future(hooks, method, record),
                reporter,
            }),
            record: None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.pending.is_none() && self.record.is_none()
    }

    /// Whether post-hooks are still outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl IntoFuture for Completion {
    type Output = Option<LogRecord>;
    type IntoFuture = BoxFuture<'static, Option<LogRecord>>;

    fn into_future(mut self) -> Self::IntoFuture {
        let pending = self.pending.take();
        let record = self.record.take();
        Box::pin(async move {
            match pending {
                Some(pending) => Some(pending.finish().await),
                None => record,
            }
        })
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    pending.finish().await;
                });
            }
            Err(_) => run_detached(pending),
        }
    }
}

/// Run `pending` on a dedicated thread. `reqwest` needs a tokio reactor, so
/// the thread builds a current-thread runtime rather than polling directly.
fn run_detached(pending: Pending) {
    let spawned = thread::Builder::new()
        .name("axe-post-hooks".to_string())
        .spawn(move || {
            match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => {
                    runtime.block_on(pending.finish());
                }
                Err(e) => warn!("Post-hooks discarded: failed to start runtime: {e}"),
            }
        });
    if let Err(e) = spawned {
        warn!("Post-hooks discarded: failed to spawn thread: {e}");
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.is_pending())
            .field("record", &self.record)
            .finish()
    }
}
