//! Notification dispatch - the engine's only path to the job substrate
//!
//! The engine hands each notification to a [`Dispatcher`] after the store
//! commit succeeds. `enqueue` never fails from the caller's point of view;
//! backends log their own failures.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::core::identity::EntityId;

/// Named tasks understood by the notification workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskName {
    NotifyProcurement,
    NotifyEngineer,
    NotifyFabrication,
    NotifyWarehouse,
    NotifyShipping,
    GenerateDemandReport,
    SendNotification,
}

impl TaskName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskName::NotifyProcurement => "notify_procurement",
            TaskName::NotifyEngineer => "notify_engineer",
            TaskName::NotifyFabrication => "notify_fabrication",
            TaskName::NotifyWarehouse => "notify_warehouse",
            TaskName::NotifyShipping => "notify_shipping",
            TaskName::GenerateDemandReport => "generate_demand_report",
            TaskName::SendNotification => "send_notification",
        }
    }

    /// The team (or worker) that consumes this task
    pub fn audience(&self) -> &'static str {
        match self {
            TaskName::NotifyProcurement => "Procurement",
            TaskName::NotifyEngineer => "Engineer",
            TaskName::NotifyFabrication => "Fabrication",
            TaskName::NotifyWarehouse => "Warehouse",
            TaskName::NotifyShipping => "Shipping",
            TaskName::GenerateDemandReport => "Reports",
            TaskName::SendNotification => "Direct",
        }
    }

    pub fn all() -> &'static [TaskName] {
        &[
            TaskName::NotifyProcurement,
            TaskName::NotifyEngineer,
            TaskName::NotifyFabrication,
            TaskName::NotifyWarehouse,
            TaskName::NotifyShipping,
            TaskName::GenerateDemandReport,
            TaskName::SendNotification,
        ]
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskName::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown task: {}", s))
    }
}

/// Fire-and-forget submission of a named task
pub trait Dispatcher: Send + Sync {
    fn enqueue(&self, task: TaskName, payload: Value);
}

impl<D: Dispatcher + ?Sized> Dispatcher for Arc<D> {
    fn enqueue(&self, task: TaskName, payload: Value) {
        (**self).enqueue(task, payload)
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn enqueue(&self, task: TaskName, payload: Value) {
        (**self).enqueue(task, payload)
    }
}

/// A notification produced inside a unit of work, dispatched after commit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub task: TaskName,
    pub payload: Value,
}

impl Notice {
    /// A human-readable message about a single record
    pub fn about(task: TaskName, subject: &EntityId, message: impl Into<String>) -> Self {
        Self {
            task,
            payload: json!({
                "message": message.into(),
                "entity": subject.to_string(),
            }),
        }
    }

    pub fn new(task: TaskName, payload: Value) -> Self {
        Self { task, payload }
    }

    /// The `message` field of the payload, if present
    pub fn message(&self) -> Option<&str> {
        self.payload.get("message").and_then(Value::as_str)
    }
}

/// Dispatcher that logs each task through `tracing` and drops it
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDispatcher;

impl Dispatcher for TracingDispatcher {
    fn enqueue(&self, task: TaskName, payload: Value) {
        tracing::info!(task = %task, payload = %payload, "notification enqueued");
    }
}

/// In-memory dispatcher that records every enqueued task in order
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    tasks: Mutex<Vec<Notice>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything enqueued so far
    pub fn tasks(&self) -> Vec<Notice> {
        self.tasks.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Everything enqueued for a given task name
    pub fn tasks_named(&self, task: TaskName) -> Vec<Notice> {
        self.tasks()
            .into_iter()
            .filter(|n| n.task == task)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<Notice> {
        self.tasks
            .lock()
            .map(|mut t| std::mem::take(&mut *t))
            .unwrap_or_default()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn enqueue(&self, task: TaskName, payload: Value) {
        match self.tasks.lock() {
            Ok(mut tasks) => tasks.push(Notice { task, payload }),
            Err(_) => tracing::warn!(task = %task, "recording dispatcher poisoned, task dropped"),
        }
    }
}
