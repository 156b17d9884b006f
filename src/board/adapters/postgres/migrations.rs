//! Embedded SQL schema for the board tables.

use super::BoardPgPool;
use crate::board::ports::{BoardStoreError, BoardStoreResult};
use diesel::connection::SimpleConnection;

/// Creates the board tables and indexes when absent.
pub const CREATE_BOARD_TABLES_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_board_tables/up.sql");

/// Drops the board tables.
pub const DROP_BOARD_TABLES_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_board_tables/down.sql");

/// Applies [`CREATE_BOARD_TABLES_SQL`]. Safe to run repeatedly.
///
/// # Errors
///
/// Returns [`BoardStoreError::Persistence`] when no connection is available
/// or the SQL fails.
pub fn apply_board_schema(pool: &BoardPgPool) -> BoardStoreResult<()> {
    run_script(pool, CREATE_BOARD_TABLES_SQL)
}

/// Applies [`DROP_BOARD_TABLES_SQL`].
///
/// # Errors
///
/// Returns [`BoardStoreError::Persistence`] when no connection is available
/// or the SQL fails.
pub fn drop_board_schema(pool: &BoardPgPool) -> BoardStoreResult<()> {
    run_script(pool, DROP_BOARD_TABLES_SQL)
}

fn run_script(pool: &BoardPgPool, sql: &str) -> BoardStoreResult<()> {
    let mut connection = pool.get().map_err(BoardStoreError::persistence)?;
    connection
        .batch_execute(sql)
        .map_err(BoardStoreError::persistence)
}
