pub mod create_health_record;
pub mod get_health_records;
pub mod get_latest_health_record;
