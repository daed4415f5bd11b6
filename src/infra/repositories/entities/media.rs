//! Uploaded media metadata.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Relative storage path; also the public URL
    pub slug: String,
    /// IMAGE / VIDEO / AUDIO / PDF / DOC / OTHER
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub mime_type: String,
    pub size: i64,
    pub url: String,
    pub alt_text: Option<String>,
    pub description: Option<String>,
    pub uploaded_by_id: i32,
    pub created_time: DateTimeUtc,
    pub created_user: Option<i32>,
    pub updated_time: DateTimeUtc,
    pub updated_user: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedById",
        to = "super::user::Column::Id"
    )]
    UploadedBy,
}

impl ActiveModelBehavior for ActiveModel {}
