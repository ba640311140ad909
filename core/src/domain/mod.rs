pub mod common;
pub mod health_record;
pub mod suggestion;
