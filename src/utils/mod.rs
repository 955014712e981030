use dirs::home_dir;
use std::{env, path::PathBuf, sync::Once};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIR_NAME: &str = ".ledger_engine";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ledger_engine=info"));

        if let Err(err) = fmt().with_env_filter(filter).try_init() {
            tracing::debug!(error = %err, "keeping the host's tracing subscriber");
        }
    });
}

/// Returns the engine's data directory, defaulting to `~/.ledger_engine`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LEDGER_ENGINE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Cuts `note` down to at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(note: &str, max_chars: usize) -> String {
    match note.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => note[..byte_idx].to_string(),
        None => note.to_string(),
    }
}
