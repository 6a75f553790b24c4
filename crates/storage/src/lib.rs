//! PostgreSQL form store.
//!
//! Persists forms as flat columns (the schedule lives in `sch*` columns on
//! the form row) and assembles them into the typed `Form` + `FormSchedule`
//! pair the rest of the system consumes. Schema migrations live in the
//! workspace-root `migrations/` directory and run at pool init.

pub mod db;
pub mod error;
pub mod row;
pub mod store;

pub use db::init_pg_pool;
pub use error::StorageError;
pub use row::FormRow;
pub use store::FormStore;
