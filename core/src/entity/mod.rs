//! `SeaORM` Entity definitions

pub mod prelude;

pub mod generated_suggestions;
pub mod health_records;
