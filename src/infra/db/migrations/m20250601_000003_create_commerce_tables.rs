//! Migration: services with their child collections, orders and order items.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Services {
    Table,
    Id,
    Title,
    Content,
    Slug,
    Type,
    Status,
    OriginalPrice,
    DiscountedPrice,
    Rating,
    OrderCount,
    AuthorId,
    DeleteFlg,
    CreatedTime,
    CreatedUser,
    UpdatedTime,
    UpdatedUser,
}

#[derive(Iden)]
enum ServiceImages {
    Table,
    Id,
    ServiceId,
    BeforeUrl,
    AfterUrl,
}

#[derive(Iden)]
enum ServiceIdealFors {
    Table,
    Id,
    ServiceId,
    Label,
}

#[derive(Iden)]
enum ServiceIncludes {
    Table,
    Id,
    ServiceId,
    Label,
}

#[derive(Iden)]
enum ServiceAddOns {
    Table,
    Id,
    ServiceId,
    Title,
    Description,
}

#[derive(Iden)]
enum ServiceSteps {
    Table,
    Id,
    ServiceId,
    BeforeUrl,
    AfterUrl,
    VideoUrl,
}

#[derive(Iden)]
enum ServiceStepDetails {
    Table,
    Id,
    StepId,
    Title,
    Content,
    BeforeUrl,
    AfterUrl,
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    UserId,
    Name,
    Email,
    Phone,
    Address,
    Note,
    InputFileUrl,
    OutputFileUrl,
    Status,
    DeleteFlg,
    CreatedTime,
    CreatedUser,
    UpdatedTime,
    UpdatedUser,
}

#[derive(Iden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    ServiceId,
    Quantity,
    Price,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::Title).string().not_null())
                    .col(ColumnDef::new(Services::Content).text().null())
                    .col(ColumnDef::new(Services::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Services::Type).integer().not_null().default(0))
                    .col(ColumnDef::new(Services::Status).integer().not_null().default(0))
                    .col(ColumnDef::new(Services::OriginalPrice).big_integer().not_null())
                    .col(ColumnDef::new(Services::DiscountedPrice).big_integer().null())
                    .col(ColumnDef::new(Services::Rating).double().null())
                    .col(ColumnDef::new(Services::OrderCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Services::AuthorId).integer().null())
                    .col(ColumnDef::new(Services::DeleteFlg).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Services::CreatedTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Services::CreatedUser).integer().null())
                    .col(
                        ColumnDef::new(Services::UpdatedTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Services::UpdatedUser).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_author")
                            .from(Services::Table, Services::AuthorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceImages::ServiceId).integer().not_null())
                    .col(ColumnDef::new(ServiceImages::BeforeUrl).string().null())
                    .col(ColumnDef::new(ServiceImages::AfterUrl).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_images_service")
                            .from(ServiceImages::Table, ServiceImages::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceIdealFors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceIdealFors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceIdealFors::ServiceId).integer().not_null())
                    .col(ColumnDef::new(ServiceIdealFors::Label).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_ideal_fors_service")
                            .from(ServiceIdealFors::Table, ServiceIdealFors::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceIncludes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceIncludes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceIncludes::ServiceId).integer().not_null())
                    .col(ColumnDef::new(ServiceIncludes::Label).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_includes_service")
                            .from(ServiceIncludes::Table, ServiceIncludes::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceAddOns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceAddOns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceAddOns::ServiceId).integer().not_null())
                    .col(ColumnDef::new(ServiceAddOns::Title).string().not_null())
                    .col(ColumnDef::new(ServiceAddOns::Description).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_add_ons_service")
                            .from(ServiceAddOns::Table, ServiceAddOns::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceSteps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceSteps::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceSteps::ServiceId).integer().not_null())
                    .col(ColumnDef::new(ServiceSteps::BeforeUrl).string().null())
                    .col(ColumnDef::new(ServiceSteps::AfterUrl).string().null())
                    .col(ColumnDef::new(ServiceSteps::VideoUrl).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_steps_service")
                            .from(ServiceSteps::Table, ServiceSteps::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceStepDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceStepDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceStepDetails::StepId).integer().not_null())
                    .col(ColumnDef::new(ServiceStepDetails::Title).string().null())
                    .col(ColumnDef::new(ServiceStepDetails::Content).text().null())
                    .col(ColumnDef::new(ServiceStepDetails::BeforeUrl).string().null())
                    .col(ColumnDef::new(ServiceStepDetails::AfterUrl).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_step_details_step")
                            .from(ServiceStepDetails::Table, ServiceStepDetails::StepId)
                            .to(ServiceSteps::Table, ServiceSteps::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::UserId).integer().null())
                    .col(ColumnDef::new(Orders::Name).string().not_null())
                    .col(ColumnDef::new(Orders::Email).string().not_null())
                    .col(ColumnDef::new(Orders::Phone).string().null())
                    .col(ColumnDef::new(Orders::Address).string().null())
                    .col(ColumnDef::new(Orders::Note).text().null())
                    .col(ColumnDef::new(Orders::InputFileUrl).string().null())
                    .col(ColumnDef::new(Orders::OutputFileUrl).string().null())
                    .col(ColumnDef::new(Orders::Status).integer().not_null().default(0))
                    .col(ColumnDef::new(Orders::DeleteFlg).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Orders::CreatedTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Orders::CreatedUser).integer().null())
                    .col(
                        ColumnDef::new(Orders::UpdatedTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Orders::UpdatedUser).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderItems::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderItems::ServiceId).integer().not_null())
                    .col(ColumnDef::new(OrderItems::Quantity).integer().not_null().default(1))
                    .col(ColumnDef::new(OrderItems::Price).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_order")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_service")
                            .from(OrderItems::Table, OrderItems::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceStepDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceSteps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceAddOns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceIncludes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceIdealFors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}
