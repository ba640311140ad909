pub mod mappers;
pub mod repositories;

pub use repositories::health_record_repository::PostgresHealthRecordRepository;
