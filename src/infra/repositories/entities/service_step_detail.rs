//! Detail row nested under a service workflow step.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service_step_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub step_id: i32,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub before_url: Option<String>,
    pub after_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_step::Entity",
        from = "Column::StepId",
        to = "super::service_step::Column::Id"
    )]
    Step,
}

impl ActiveModelBehavior for ActiveModel {}
