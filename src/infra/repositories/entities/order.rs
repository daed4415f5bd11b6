//! Order database entity. `user_id` is NULL for anonymous public submissions.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub input_file_url: Option<String>,
    pub output_file_url: Option<String>,
    pub status: i32,
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
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}
