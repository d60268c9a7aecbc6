//! Test doubles for the completion boundary

use super::{CompletionRequest, CompletionService};
use crate::core::CompletionPayload;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Returns a fixed payload and records every request it receives
pub struct ScriptedService {
    payload: CompletionPayload,
    delay: Option<Duration>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedService {
    pub fn text(reply: &str) -> Arc<Self> {
        Self::payload(CompletionPayload::Text(reply.to_string()))
    }

    pub fn payload(payload: CompletionPayload) -> Arc<Self> {
        Arc::new(Self {
            payload,
            delay: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            payload: CompletionPayload::Text(reply.to_string()),
            delay: Some(delay),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionPayload> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.payload.clone())
    }
}

/// Always fails like an unreachable endpoint
pub struct FailingService {
    calls: Mutex<usize>,
}

impl FailingService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CompletionService for FailingService {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionPayload> {
        *self.calls.lock().unwrap() += 1;
        Err(anyhow::anyhow!("connection refused"))
    }
}
