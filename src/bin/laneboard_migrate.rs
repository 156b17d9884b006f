//! Applies or drops the laneboard schema on the configured database.
//!
//! Usage:
//!
//! ```text
//! laneboard_migrate [up|down]
//! ```
//!
//! The database URL comes from `database.url` in `laneboard.toml` or from
//! `LANEBOARD_DATABASE__URL`. Log verbosity follows `RUST_LOG`.

use laneboard::board::adapters::postgres::{
    PostgresBoardStore, apply_board_schema, drop_board_schema,
};
use laneboard::config::BoardSettings;
use std::env;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum MigrateError {
    #[error("unknown direction '{0}', expected 'up' or 'down'")]
    UnknownDirection(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    fn parse(raw: Option<&str>) -> Result<Self, MigrateError> {
        match raw {
            None | Some("up") => Ok(Self::Up),
            Some("down") => Ok(Self::Down),
            Some(other) => Err(MigrateError::UnknownDirection(other.to_owned())),
        }
    }
}

fn main() -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let argument = env::args().nth(1);
    let direction = Direction::parse(argument.as_deref())?;
    let settings = BoardSettings::load()?;
    let url = settings.database.require_url()?;
    let store = PostgresBoardStore::connect(url, settings.database.pool_max_size)?;

    match direction {
        Direction::Up => apply_board_schema(store.pool())?,
        Direction::Down => drop_board_schema(store.pool())?,
    }
    info!(?direction, "schema migration complete");
    Ok(())
}
