//! Test engines: record what they were asked to execute and reply with a
//! canned result, a failure, or never.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use graphql_web::engine::{EngineError, ExecutionEngine};
use graphql_web::types::{ExecutionInput, ExecutionResult};
use tokio::sync::Notify;

enum Reply {
    Result(ExecutionResult),
    Fail(String),
}

/// Engine that records every input and returns a fixed reply.
pub struct RecordingEngine {
    reply: Reply,
    calls: Mutex<Vec<ExecutionInput>>,
}

impl RecordingEngine {
    pub fn returning(result: ExecutionResult) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Result(result),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Reply parsed from an engine JSON document, e.g. `{"data":null,"errors":[...]}`.
    pub fn returning_json(value: serde_json::Value) -> Arc<Self> {
        Self::returning(serde_json::from_value(value).expect("valid execution result"))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<ExecutionInput> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ExecutionEngine for RecordingEngine {
    async fn execute(&self, input: ExecutionInput) -> Result<ExecutionResult, EngineError> {
        self.calls.lock().unwrap().push(input);
        match &self.reply {
            Reply::Result(result) => Ok(result.clone()),
            Reply::Fail(message) => Err(EngineError::new(message.clone())),
        }
    }
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Engine whose execution never completes. Records when its in-flight
/// future is dropped.
#[derive(Default)]
pub struct PendingEngine {
    started: Notify,
    dropped: Arc<AtomicBool>,
}

impl PendingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wait until an execution has started.
    pub async fn started(&self) {
        self.started.notified().await
    }

    pub fn was_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExecutionEngine for PendingEngine {
    async fn execute(&self, _input: ExecutionInput) -> Result<ExecutionResult, EngineError> {
        let _guard = DropFlag(self.dropped.clone());
        self.started.notify_one();
        std::future::pending().await
    }
}
