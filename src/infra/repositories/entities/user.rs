//! User database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub business_name: Option<String>,
    pub role: String,
    /// 0 = deactivated, 1 = activated, 2 = rejected
    pub status: i32,
    pub delete_flg: i32,
    pub created_time: DateTimeUtc,
    pub created_user: Option<i32>,
    pub updated_time: DateTimeUtc,
    pub updated_user: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            email: model.email,
            password: model.password,
            first_name: model.first_name,
            last_name: model.last_name,
            business_name: model.business_name,
            role: UserRole::from(model.role.as_str()),
            status: model.status,
            delete_flg: model.delete_flg,
            created_time: model.created_time,
            updated_time: model.updated_time,
        }
    }
}
