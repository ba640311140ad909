//! `SeaORM` Entity for the generated_suggestions table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "generated_suggestions")]
pub struct Model {
    /// `{user_id}_{health_data_id}_{type}`
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub health_data_id: Uuid,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub suggestion_data: Json,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::health_records::Entity",
        from = "Column::HealthDataId",
        to = "super::health_records::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    HealthRecords,
}

impl Related<super::health_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HealthRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
