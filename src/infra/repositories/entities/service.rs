//! Bookable service database entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    #[sea_orm(unique)]
    pub slug: String,
    /// Catalog group code
    #[sea_orm(column_name = "type")]
    pub kind: i32,
    /// 0 = draft, 1 = published
    pub status: i32,
    pub original_price: i64,
    pub discounted_price: Option<i64>,
    pub rating: Option<f64>,
    pub order_count: i32,
    pub author_id: Option<i32>,
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
