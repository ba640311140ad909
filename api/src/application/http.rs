pub mod health;
pub mod health_record;
pub mod server;
pub mod suggestion;
