//! `SeaORM` Entity for the health_records table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "health_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    #[sea_orm(column_type = "Double")]
    pub height: f64,
    #[sea_orm(column_type = "Double")]
    pub weight: f64,
    pub age: i32,
    pub blood_pressure: String,
    #[sea_orm(column_type = "Double")]
    pub cholesterol: f64,
    #[sea_orm(column_type = "Double")]
    pub sugar_levels: f64,
    #[sea_orm(column_type = "Double")]
    pub fats: f64,
    #[sea_orm(column_type = "Double")]
    pub blood_points: f64,
    #[sea_orm(column_type = "Double")]
    pub bmi: f64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::generated_suggestions::Entity")]
    GeneratedSuggestions,
}

impl Related<super::generated_suggestions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneratedSuggestions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
