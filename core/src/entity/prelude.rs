pub use super::generated_suggestions::Entity as GeneratedSuggestions;
pub use super::health_records::Entity as HealthRecords;
