use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::util::{default_table_statement, money_column, payment_child_table_statement, percentage_column, PaymentLink};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(
                schema.create_enum_from_active_enum::<PaymentStatus>()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(PaymentRecords::Table)
                .col(ColumnDef::new(PaymentRecords::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(PaymentRecords::EmployeeName)
                    .text()
                    .not_null())
                .col(ColumnDef::new(PaymentRecords::Designation)
                    .text())
                .col(ColumnDef::new(PaymentRecords::JoiningDate)
                    .date())
                .col(ColumnDef::new(PaymentRecords::PaymentDate)
                    .date()
                    .not_null())
                .col(money_column(PaymentRecords::PaymentAmount))
                .col(ColumnDef::new(PaymentRecords::Status)
                    .custom(PaymentStatus::name())
                    .not_null())
                .col(ColumnDef::new(PaymentRecords::OrganizationId)
                    .uuid()
                    .not_null())
                .take()
            ).await?;

        // Monthly lookups go by employee and payment date
        manager
            .create_index(Index::create()
                .if_not_exists()
                .name("idx_payment_records_employee_date")
                .table(PaymentRecords::Table)
                .col(PaymentRecords::EmployeeId)
                .col(PaymentRecords::PaymentDate)
                .take()
            ).await?;

        manager
            .create_table(payment_child_table_statement(PaymentEarnings::Table, PaymentLink::One)
                .col(money_column(PaymentEarnings::Ctc))
                .col(percentage_column(PaymentEarnings::BasicPercentage, 40.0))
                .col(money_column(PaymentEarnings::BasicSalary))
                .col(money_column(PaymentEarnings::HouseRentAllowance))
                .col(money_column(PaymentEarnings::ConveyanceAllowance))
                .col(money_column(PaymentEarnings::FixedAllowance))
                .col(ColumnDef::new(PaymentEarnings::IsCtcMode)
                    .boolean()
                    .not_null()
                    .default(true))
                .col(money_column(PaymentEarnings::TotalEarnings))
                .col(money_column(PaymentEarnings::GrossEarnings))
                .col(ColumnDef::new(PaymentEarnings::PayslipEnabled)
                    .boolean()
                    .not_null()
                    .default(false))
                .col(ColumnDef::new(PaymentEarnings::GratuityEnabled)
                    .boolean()
                    .not_null()
                    .default(false))
                .col(percentage_column(PaymentEarnings::GratuityPercentage, 4.81))
                .col(money_column(PaymentEarnings::GratuityAmount))
                .take()
            ).await?;

        manager
            .create_table(payment_child_table_statement(PaymentDeductions::Table, PaymentLink::One)
                .col(money_column(PaymentDeductions::ProvidentFund))
                .col(money_column(PaymentDeductions::ProfessionalTax))
                .col(money_column(PaymentDeductions::IncomeTax))
                .col(money_column(PaymentDeductions::LoanDeduction))
                .col(money_column(PaymentDeductions::TotalDeductions))
                .col(ColumnDef::new(PaymentDeductions::PaidDays)
                    .small_integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(PaymentDeductions::LopDays)
                    .small_integer()
                    .not_null()
                    .default(0))
                .take()
            ).await?;

        manager
            .create_table(payment_child_table_statement(PaymentCustomEarnings::Table, PaymentLink::Many)
                .col(ColumnDef::new(PaymentCustomEarnings::Name)
                    .text()
                    .not_null())
                .col(money_column(PaymentCustomEarnings::Amount))
                .take()
            ).await?;

        manager
            .create_table(payment_child_table_statement(PaymentCustomDeductions::Table, PaymentLink::Many)
                .col(ColumnDef::new(PaymentCustomDeductions::Name)
                    .text()
                    .not_null())
                .col(money_column(PaymentCustomDeductions::Amount))
                .take()
            ).await?;

        manager
            .create_table(payment_child_table_statement(AppraisalRecords::Table, PaymentLink::Many)
                .col(ColumnDef::new(AppraisalRecords::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(AppraisalRecords::OrganizationId)
                    .uuid()
                    .not_null())
                .col(money_column(AppraisalRecords::PreviousPaymentAmount))
                .col(money_column(AppraisalRecords::NewPaymentAmount))
                .col(ColumnDef::new(AppraisalRecords::EffectiveDate)
                    .date()
                    .not_null())
                .take()
            ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            AppraisalRecords::Table.into_iden(),
            PaymentCustomDeductions::Table.into_iden(),
            PaymentCustomEarnings::Table.into_iden(),
            PaymentDeductions::Table.into_iden(),
            PaymentEarnings::Table.into_iden(),
            PaymentRecords::Table.into_iden(),
        ] {
            manager
                .drop_table(
                    TableDropStatement::new()
                        .table(table)
                        .if_exists()
                        .take()
                ).await?;
        }

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(PaymentStatus::name())
                    .if_exists()
                    .to_owned()
            ).await?;

        Ok(())
    }
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "failed")]
    Failed,
}

#[derive(Clone, Copy, DeriveIden)]
pub(crate) enum PaymentRecords {
    Table,
    EmployeeId,
    EmployeeName,
    Designation,
    JoiningDate,
    PaymentDate,
    PaymentAmount,
    Status,
    OrganizationId,
}

#[derive(Clone, Copy, DeriveIden)]
enum PaymentEarnings {
    Table,
    Ctc,
    BasicPercentage,
    BasicSalary,
    HouseRentAllowance,
    ConveyanceAllowance,
    FixedAllowance,
    IsCtcMode,
    TotalEarnings,
    GrossEarnings,
    #[sea_orm(iden = "payslipEnabled")]
    PayslipEnabled,
    GratuityEnabled,
    GratuityPercentage,
    GratuityAmount,
}

#[derive(Clone, Copy, DeriveIden)]
enum PaymentDeductions {
    Table,
    ProvidentFund,
    ProfessionalTax,
    IncomeTax,
    LoanDeduction,
    TotalDeductions,
    PaidDays,
    LopDays,
}

#[derive(Clone, Copy, DeriveIden)]
enum PaymentCustomEarnings {
    Table,
    Name,
    Amount,
}

#[derive(Clone, Copy, DeriveIden)]
enum PaymentCustomDeductions {
    Table,
    Name,
    Amount,
}

#[derive(Clone, Copy, DeriveIden)]
enum AppraisalRecords {
    Table,
    EmployeeId,
    OrganizationId,
    PreviousPaymentAmount,
    NewPaymentAmount,
    EffectiveDate,
}
