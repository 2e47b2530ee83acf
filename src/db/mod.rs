//! Database layer
//!
//! Supports SQLite (default, single-file deployment) and MySQL. The driver is
//! selected from configuration; everything above this module talks to the
//! `DatabasePool` trait and the repository traits.
//!
//! ```ignore
//! let pool = folio::db::create_pool(&config.database).await?;
//! folio::db::migrations::run_migrations(&pool).await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, Backend, DatabasePool, DynDatabasePool, MysqlDatabase,
    SqliteDatabase,
};
