//! Core module - fundamental types and infrastructure

pub mod config;
pub mod dispatch;
pub mod entity;
pub mod identity;
pub mod logging;
pub mod outbox;
pub mod store;

pub use config::{Config, ConfigError, DispatcherKind, LogFormat};
pub use dispatch::{Dispatcher, Notice, RecordingDispatcher, TaskName, TracingDispatcher};
pub use entity::{Entity, Status};
pub use identity::{EntityId, EntityKind, IdParseError};
pub use outbox::{OutboxDispatcher, OutboxEntry};
pub use store::{
    DeleteReport, EntityStore, MemoryStore, SqliteStore, StoreError, Transaction, TransactionExt,
};
