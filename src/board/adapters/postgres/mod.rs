//! `PostgreSQL` adapters for board persistence.

mod migrations;
mod models;
mod repository;
mod schema;

pub use migrations::{
    CREATE_BOARD_TABLES_SQL, DROP_BOARD_TABLES_SQL, apply_board_schema, drop_board_schema,
};
pub use repository::{BoardPgPool, PostgresBoardStore};
