use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_spare_parts_table::Migration),
            Box::new(m20250301_000002_create_inverter_batteries_table::Migration),
            Box::new(m20250301_000003_create_sales_table::Migration),
            Box::new(m20250301_000004_create_sale_items_table::Migration),
            Box::new(m20250301_000005_create_otps_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250301_000001_create_spare_parts_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_spare_parts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SpareParts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SpareParts::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SpareParts::Name).string().not_null())
                        .col(ColumnDef::new(SpareParts::Category).string().null())
                        .col(
                            ColumnDef::new(SpareParts::DealerPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SpareParts::CustomerPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SpareParts::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(SpareParts::ImageUrl).string().null())
                        .col(ColumnDef::new(SpareParts::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_spare_parts_name")
                        .table(SpareParts::Table)
                        .col(SpareParts::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SpareParts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SpareParts {
        Table,
        Id,
        Name,
        Category,
        DealerPrice,
        CustomerPrice,
        Quantity,
        ImageUrl,
        CreatedAt,
    }
}

mod m20250301_000002_create_inverter_batteries_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_inverter_batteries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InverterBatteries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InverterBatteries::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(InverterBatteries::Name).string().not_null())
                        .col(
                            ColumnDef::new(InverterBatteries::ModelNumber)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(InverterBatteries::Capacity).string().null())
                        .col(
                            ColumnDef::new(InverterBatteries::DealerPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InverterBatteries::CustomerPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(InverterBatteries::Voltage).string().null())
                        .col(
                            ColumnDef::new(InverterBatteries::WarrantyPeriodInMonths)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InverterBatteries::Quantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(InverterBatteries::ImageUrl).string().null())
                        .col(
                            ColumnDef::new(InverterBatteries::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inverter_batteries_name")
                        .table(InverterBatteries::Table)
                        .col(InverterBatteries::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InverterBatteries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InverterBatteries {
        Table,
        Id,
        Name,
        ModelNumber,
        Capacity,
        DealerPrice,
        CustomerPrice,
        Voltage,
        WarrantyPeriodInMonths,
        Quantity,
        ImageUrl,
        CreatedAt,
    }
}

mod m20250301_000003_create_sales_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_sales_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sales::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sales::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Sales::SaleDate).timestamp().not_null())
                        .col(
                            ColumnDef::new(Sales::TotalAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Sales::PaymentType).string().not_null())
                        .col(ColumnDef::new(Sales::PaymentStatus).string().not_null())
                        .col(ColumnDef::new(Sales::CustomerName).string().null())
                        .col(ColumnDef::new(Sales::CustomerPhone).string().null())
                        .col(ColumnDef::new(Sales::CustomerAddress).string().null())
                        .to_owned(),
                )
                .await?;

            // The history endpoint always orders and often filters by sale date
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_sale_date")
                        .table(Sales::Table)
                        .col(Sales::SaleDate)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_payment_status")
                        .table(Sales::Table)
                        .col(Sales::PaymentStatus)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sales::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Sales {
        Table,
        Id,
        SaleDate,
        TotalAmount,
        PaymentType,
        PaymentStatus,
        CustomerName,
        CustomerPhone,
        CustomerAddress,
    }
}

mod m20250301_000004_create_sale_items_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_sale_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SaleItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SaleItems::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SaleItems::SaleId).big_integer().not_null())
                        .col(ColumnDef::new(SaleItems::ProductType).string().not_null())
                        // Logical product reference only; no FK to the inventory tables
                        .col(ColumnDef::new(SaleItems::ProductId).big_integer().not_null())
                        .col(ColumnDef::new(SaleItems::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(SaleItems::DealerPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SaleItems::CustomerPrice)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sale_items_sale_id")
                                .from(SaleItems::Table, SaleItems::SaleId)
                                .to(Sales::Table, Sales::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sale_items_sale_id")
                        .table(SaleItems::Table)
                        .col(SaleItems::SaleId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sale_items_product_type")
                        .table(SaleItems::Table)
                        .col(SaleItems::ProductType)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SaleItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SaleItems {
        Table,
        Id,
        SaleId,
        ProductType,
        ProductId,
        Quantity,
        DealerPrice,
        CustomerPrice,
    }

    #[derive(DeriveIden)]
    pub(super) enum Sales {
        Table,
        Id,
    }
}

mod m20250301_000005_create_otps_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000005_create_otps_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Otps::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Otps::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Otps::Phone).string().not_null())
                        .col(ColumnDef::new(Otps::Code).string().not_null())
                        .col(ColumnDef::new(Otps::ExpiresAt).timestamp().not_null())
                        .col(ColumnDef::new(Otps::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_otps_phone")
                        .table(Otps::Table)
                        .col(Otps::Phone)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Otps::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Otps {
        Table,
        Id,
        Phone,
        Code,
        ExpiresAt,
        CreatedAt,
    }
}
