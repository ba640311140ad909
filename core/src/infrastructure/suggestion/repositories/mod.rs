pub mod suggestion_cache_repository;
