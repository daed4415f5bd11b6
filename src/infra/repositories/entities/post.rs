//! Blog post database entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub excerpt: Option<String>,
    #[sea_orm(unique)]
    pub slug: String,
    /// 0 = draft, 1 = published
    pub status: i32,
    pub password: Option<String>,
    pub thumbnail: Option<String>,
    pub author_id: i32,
    pub delete_flg: i32,
    pub created_time: DateTimeUtc,
    pub created_user: Option<i32>,
    pub updated_time: DateTimeUtc,
    pub updated_user: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl ActiveModelBehavior for ActiveModel {}
