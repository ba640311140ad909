pub mod health_record_repository;
