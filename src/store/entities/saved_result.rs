use sea_orm::entity::prelude::*;

/// A finished rewrite kept for later. Insert-only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "saved_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub original_text: String,
    pub simplified_text: String,
    pub target_audience: String,
    pub output_format: String,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
