//! Shared helper functions for CLI commands
//!
//! Opening the engine, resolving configuration and small formatting helpers
//! used across the command modules.

use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::config::{Config, DispatcherKind};
use crate::core::dispatch::{Dispatcher, TracingDispatcher};
use crate::core::identity::EntityId;
use crate::core::outbox::OutboxDispatcher;
use crate::core::store::SqliteStore;
use crate::workflow::Engine;

/// The engine as the CLI runs it
pub type CliEngine = Engine<SqliteStore, Box<dyn Dispatcher>>;

/// Load layered configuration with the `--database` flag on top
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let mut config = Config::load().into_diagnostic()?;
    if let Some(ref path) = global.database {
        config.database = Some(path.clone());
    }
    Ok(config)
}

/// Open the store and the configured dispatcher
pub fn open_engine(global: &GlobalOpts) -> Result<CliEngine> {
    let config = load_config(global)?;
    let path = config.database().into_diagnostic()?;

    let store = SqliteStore::open(&path).into_diagnostic()?;
    let dispatcher: Box<dyn Dispatcher> = match config.dispatcher() {
        DispatcherKind::Outbox => Box::new(OutboxDispatcher::open(&path).into_diagnostic()?),
        DispatcherKind::Log => Box::new(TracingDispatcher),
    };

    tracing::debug!(database = %path.display(), dispatcher = ?config.dispatcher(), "engine opened");
    Ok(Engine::new(store, dispatcher))
}

/// Open the outbox on the configured database
pub fn open_outbox(global: &GlobalOpts) -> Result<OutboxDispatcher> {
    let config = load_config(global)?;
    let path = config.database().into_diagnostic()?;
    OutboxDispatcher::open(&path).into_diagnostic()
}

/// Format an optional reference in full, "-" when cleared
pub fn format_ref(id: Option<&EntityId>) -> String {
    id.map(EntityId::to_string).unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityKind;

    #[test]
    fn test_format_ref() {
        assert_eq!(format_ref(None), "-");
        let id = EntityId::new(EntityKind::Widget);
        // Printed in full so it can be pasted back into a command
        let shown = format_ref(Some(&id));
        assert_eq!(shown.parse::<EntityId>().unwrap(), id);
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("défauts visibles", 7), "défa...");
    }
}
