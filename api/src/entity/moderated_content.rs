//! `SeaORM` Entity for `gupshup_moderated_content`

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "gupshup_moderated_content")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub content_type: String,
    /// ID of the flagged object, whatever its type
    pub object_id: String,
    /// Set when the flagged object is a post
    #[sea_orm(nullable)]
    pub post_id: Option<Uuid>,
    pub user_id: Uuid,
    pub status: String,
    pub severity: String,
    #[sea_orm(column_type = "Text")]
    pub flag_reason: String,
    #[sea_orm(column_type = "Text")]
    pub content_preview: String,
    pub auto_flagged: bool,
    pub flagged_at: DateTimeWithTimeZone,
    #[sea_orm(nullable)]
    pub reviewed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
