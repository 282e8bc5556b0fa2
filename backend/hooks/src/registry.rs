/// Hook traits and the chain that runs them.
///
/// Pre-hooks run in registration order, each receiving the record returned by
/// the previous one. Post-hooks run sequentially in registration order; the
/// first one to fail stops the series and its error is returned.
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axe_core::{AxeError, LogRecord, Method};
use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::types::HookEntry;

// ---------------------------------------------------------------------------
// Hook traits
// ---------------------------------------------------------------------------

/// Synchronous transform applied before the underlying call.
pub trait PreHook: Send + Sync {
    fn name(&self) -> &str {
        "pre_hook"
    }

    fn run(&self, method: Method, record: LogRecord) -> LogRecord;
}

impl<F> PreHook for F
where
    F: Fn(Method, LogRecord) -> LogRecord + Send + Sync,
{
    fn run(&self, method: Method, record: LogRecord) -> LogRecord {
        self(method, record)
    }
}

/// Observer awaited after the underlying call.
#[async_trait]
pub trait PostHook: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    async fn run(&self, method: Method, record: &LogRecord) -> Result<()>;
}

/// Adapts an async closure into a [`PostHook`].
pub struct FnPostHook<F> {
    name: String,
    f: F,
}

impl<F, Fut> FnPostHook<F>
where
    F: Fn(Method, LogRecord) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

#[async_trait]
impl<F, Fut> PostHook for FnPostHook<F>
where
    F: Fn(Method, LogRecord) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, method: Method, record: &LogRecord) -> Result<()> {
        (self.f)(method, record.clone()).await
    }
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

pub type PreEntry = HookEntry<dyn PreHook>;
pub type PostEntry = HookEntry<dyn PostHook>;

/// Ordered pre and post hook lists.
#[derive(Default, Clone)]
pub struct HookChain {
    pre: Vec<PreEntry>,
    post: Vec<PostEntry>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pre-hook; `filter` restricts it to one method.
    pub fn add_pre(&mut self, filter: Option<Method>, hook: Arc<dyn PreHook>) {
        self.pre.push(HookEntry::new(filter, hook));
    }

    /// Register a post-hook; `filter` restricts it to one method.
    pub fn add_post(&mut self, filter: Option<Method>, hook: Arc<dyn PostHook>) {
        self.post.push(HookEntry::new(filter, hook));
    }

    /// Thread `record` through every applicable pre-hook.
    pub fn run_pre(&self, method: Method, mut record: LogRecord) -> LogRecord {
        for entry in self.pre.iter().filter(|e| e.applies_to(method)) {
            debug!("[Hooks] Running pre-hook {} for {}", entry.hook.name(), method);
            record = entry.hook.run(method, record);
        }
        record
    }

    /// The post-hooks that apply to `method`, in order. The snapshot is
    /// unaffected by later registrations.
    pub fn post_for(&self, method: Method) -> Vec<Arc<dyn PostHook>> {
        self.post
            .iter()
            .filter(|e| e.applies_to(method))
            .map(|e| Arc::clone(&e.hook))
            .collect()
    }
}

/// Await each hook before starting the next; stop at the first failure.
pub async fn run_post_series(
    hooks: &[Arc<dyn PostHook>],
    method: Method,
    record: &LogRecord,
) -> Result<(), AxeError> {
    for hook in hooks {
        debug!("[Hooks] Running post-hook {} for {}", hook.name(), method);
        if let Err(e) = hook.run(method, record).await {
            warn!("[Hooks] {} returned error: {:#}", hook.name(), e);
            return Err(AxeError::Hook {
                hook: hook.name().to_string(),
                message: format!("{e:#}"),
            });
        }
    }
    Ok(())
}

/// Owned future running a post-hook snapshot, suitable for spawning.
pub fn post_series_future(
    hooks: Vec<Arc<dyn PostHook>>,
    method: Method,
    record: LogRecord,
) -> BoxFuture<'static, (LogRecord, Result<(), AxeError>)> {
    Box::pin(async move {
        let result = run_post_series(&hooks, method, &record).await;
        (record, result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axe_core::LogLevel;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(message: &str) -> LogRecord {
        LogRecord::new(Method::Info, LogLevel::Info, message)
    }

    #[test]
    fn pre_hooks_run_in_order_and_respect_filter() {
        let mut chain = HookChain::new();
        chain.add_pre(
            Some(Method::Info),
            Arc::new(|_m: Method, mut r: LogRecord| {
                r.message = r.message.to_uppercase();
                r
            }),
        );
        chain.add_pre(
            None,
            Arc::new(|m: Method, mut r: LogRecord| {
                r.message.push_str(&format!(" ({m})"));
                r
            }),
        );
        chain.add_pre(
            Some(Method::Warn),
            Arc::new(|_m: Method, mut r: LogRecord| {
                r.message.clear();
                r
            }),
        );

        let out = chain.run_pre(Method::Info, record("hi"));
        assert_eq!(out.message, "HI (info)");
    }

    #[tokio::test]
    async fn post_hooks_run_in_series() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = HookChain::new();

        for label in ["first", "second"] {
            let counter = Arc::clone(&counter);
            let seen = Arc::clone(&seen);
            chain.add_post(
                Some(Method::Info),
                Arc::new(FnPostHook::new(label, move |_m, _r| {
                    let counter = Arc::clone(&counter);
                    let seen = Arc::clone(&seen);
                    async move {
                        let start = counter.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                        let end = counter.fetch_add(1, Ordering::SeqCst);
                        seen.lock().unwrap().push((label, start, end));
                        Ok(())
                    }
                })),
            );
        }

        let hooks = chain.post_for(Method::Info);
        run_post_series(&hooks, Method::Info, &record("x")).await.unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![("first", 0, 1), ("second", 2, 3)]);
    }

    #[tokio::test]
    async fn first_post_failure_stops_the_series() {
        let ran = Arc::new(AtomicUsize::new(0));
        let mut chain = HookChain::new();
        chain.add_post(
            None,
            Arc::new(FnPostHook::new("broken", |_m, _r| async {
                Err(anyhow::anyhow!("sink unavailable"))
            })),
        );
        let ran_clone = Arc::clone(&ran);
        chain.add_post(
            None,
            Arc::new(FnPostHook::new("after", move |_m, _r| {
                let ran = Arc::clone(&ran_clone);
                async move {
                    ran.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })),
        );

        let hooks = chain.post_for(Method::Error);
        let err = run_post_series(&hooks, Method::Error, &record("x")).await.unwrap_err();
        match err {
            AxeError::Hook { hook, message } => {
                assert_eq!(hook, "broken");
                assert!(message.contains("sink unavailable"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn snapshot_ignores_later_registration() {
        let mut chain = HookChain::new();
        let snapshot = chain.post_for(Method::Info);
        chain.add_post(
            None,
            Arc::new(FnPostHook::new("late", |_m, _r| async { Err(anyhow::anyhow!("late")) })),
        );
        let (rec, result) = post_series_future(snapshot, Method::Info, record("x")).await;
        assert!(result.is_ok());
        assert_eq!(rec.message, "x");
        assert_eq!(chain.post_for(Method::Info).len(), 1);
    }
}
