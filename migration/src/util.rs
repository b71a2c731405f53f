use sea_orm_migration::prelude::*;

use crate::m20250702_091230_payroll_init::PaymentRecords;

pub(crate) fn default_table_statement() -> TableCreateStatement {
    TableCreateStatement::new()
        .if_not_exists()
        .col(ColumnDef::new(DefaultColumn::Id)
            .uuid()
            .primary_key()
            .default(Expr::cust("GEN_RANDOM_UUID()"))
            .take())
        .col(ColumnDef::new(DefaultColumn::CreatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .take())
        .col(ColumnDef::new(DefaultColumn::UpdatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .take())
        .take()
}

#[derive(DeriveIden)]
pub(crate) enum DefaultColumn {
    Id,
    CreatedAt,
    UpdatedAt,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaymentLink {
    /// At most one row per payment record
    One,
    Many,
}

/// Table owned by a payment record, removed together with it
///
/// # Example
///
/// ```rs
/// manager
///     .create_table(payment_child_table_statement(PaymentCustomEarnings::Table, PaymentLink::Many)
///         .col(ColumnDef::new(PaymentCustomEarnings::Name)
///             .text()
///             .not_null())
///         .take()
///     ).await?;
/// ```
pub(crate) fn payment_child_table_statement<T>(table: T, link: PaymentLink) -> TableCreateStatement
where
    T: Iden + Copy + 'static,
{
    let mut payment_id = ColumnDef::new(PaymentColumn::PaymentId);
    payment_id.uuid().not_null();

    if link == PaymentLink::One {
        payment_id.unique_key();
    }

    default_table_statement()
        .table(table)
        .col(payment_id)
        .foreign_key(ForeignKey::create()
            .from(table, PaymentColumn::PaymentId)
            .to(PaymentRecords::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::Cascade))
        .take()
}

/// Money columns share one precision across every table
pub(crate) fn money_column<T>(column: T) -> ColumnDef
where
    T: IntoIden,
{
    ColumnDef::new(column)
        .decimal_len(14, 2)
        .not_null()
        .default(0)
        .take()
}

pub(crate) fn percentage_column<T>(column: T, default: f64) -> ColumnDef
where
    T: IntoIden,
{
    ColumnDef::new(column)
        .decimal_len(5, 2)
        .not_null()
        .default(default)
        .take()
}

#[derive(DeriveIden)]
pub(crate) enum PaymentColumn {
    PaymentId,
}
