pub mod db;
pub mod health_record;
pub mod llm;
pub mod suggestion;
