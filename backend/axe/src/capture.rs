//! Remote capture post-hook.
//!
//! POSTs every dispatched record as JSON to an HTTP endpoint. Delivery is
//! best effort: failures are reported to the underlying logger's `error`
//! method and never fail the hook chain. There is no retry.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use axe_core::{AxeError, LogError, LogRecord, Meta, Method};
use axe_hooks::PostHook;

use crate::reporter::ErrorReporter;

/// Body sent to the capture endpoint.
#[derive(Debug, Serialize)]
pub struct CaptureDocument<'a> {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub method: Method,
    pub message: &'a str,
    pub err: Option<&'a LogError>,
    pub meta: &'a Meta,
}

impl<'a> CaptureDocument<'a> {
    pub fn new(method: Method, record: &'a LogRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            method,
            message: &record.message,
            err: record.err.as_ref(),
            meta: &record.meta,
        }
    }
}

pub struct HttpCapture {
    client: Client,
    endpoint: String,
    reporter: ErrorReporter,
}

impl HttpCapture {
    pub fn new(endpoint: impl Into<String>, reporter: ErrorReporter) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            reporter,
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, document: &CaptureDocument<'_>) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(document)
            .send()
            .await
            .with_context(|| format!("Failed to reach capture endpoint {}", self.endpoint))?;
        response
            .error_for_status()
            .with_context(|| format!("Capture endpoint {} rejected the record", self.endpoint))?;
        Ok(())
    }
}

#[async_trait]
impl PostHook for HttpCapture {
    fn name(&self) -> &str {
        "http_capture"
    }

    async fn run(&self, method: Method, record: &LogRecord) -> Result<()> {
        let document = CaptureDocument::new(method, record);
        match self.send(&document).await {
            Ok(()) => debug!(id = %document.id, "Captured log record"),
            Err(e) => {
                warn!(endpoint = %self.endpoint, "Log capture failed: {e:#}");
                self.reporter.report(&AxeError::Transport(format!("{e:#}")));
            }
        }
        Ok(())
    }
}
