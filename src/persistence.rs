//! Payment records and everything hanging off them.
//!
//! A save is several dependent writes (header, earnings, deductions, custom
//! earnings, custom deductions, appraisal). They run inside one transaction:
//! either all of them land or none do, and a failure names the step it died on.

use std::fmt;

use actix_web::{body, http::{header::ContentType, StatusCode}, HttpResponse};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    consts::{MAX_AMOUNT, MAX_PAY_DAYS},
    engine::{CalculationMode, FixedDeductions, Gratuity, LineItem, LineItems, PayrollState, SalaryComponents},
    entity::{
        appraisal_records, payment_custom_deductions, payment_custom_earnings, payment_deductions, payment_earnings,
        payment_records, prelude::*, sea_orm_active_enums::PaymentStatus,
    },
    utils,
};

mod dto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPayment {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub designation: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub payment_date: NaiveDate,
    pub organization_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenedPayment {
    Existing(payment_records::Model),
    Created(payment_records::Model),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentFilter {
    pub organization_id: Option<Uuid>,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPayroll {
    pub payment: payment_records::Model,
    pub state: PayrollState,
    pub appraised: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStep {
    Begin,
    Header,
    Earnings,
    Deductions,
    CustomEarnings,
    CustomDeductions,
    Appraisal,
    Commit,
}

impl fmt::Display for SaveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            SaveStep::Begin => "transaction start",
            SaveStep::Header => "payment header",
            SaveStep::Earnings => "earnings",
            SaveStep::Deductions => "deductions",
            SaveStep::CustomEarnings => "custom earnings",
            SaveStep::CustomDeductions => "custom deductions",
            SaveStep::Appraisal => "appraisal record",
            SaveStep::Commit => "transaction commit",
        };

        f.write_str(step)
    }
}

#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("basic salary is required")]
    MissingBasicSalary,
    #[error("payroll amounts exceed what a payment record can hold")]
    AmountOutOfRange,
    #[error("payment record not found")]
    NotFound,
    #[error("failed to save payroll ({step})")]
    Save {
        step: SaveStep,
        #[source]
        source: DbErr,
    },
    #[error("database error")]
    Database(#[from] DbErr),
}

impl PayrollError {
    fn at(step: SaveStep) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::Save { step, source }
    }
}

impl actix_web::error::ResponseError for PayrollError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PayrollError::MissingBasicSalary | PayrollError::AmountOutOfRange => StatusCode::BAD_REQUEST,
            PayrollError::NotFound => StatusCode::NOT_FOUND,
            PayrollError::Save { .. } | PayrollError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Finds the employee's payment record for the pay cycle (calendar month) of
/// `payment_date`, creating a pending one when there is none yet
pub async fn open_payment(db: &DatabaseConnection, request: OpenPayment) -> Result<OpenedPayment, PayrollError> {
    let (start_of_month, end_of_month) = utils::get_month_range(request.payment_date);

    let existing = PaymentRecords::find()
        .filter(payment_records::Column::EmployeeId.eq(request.employee_id))
        .filter(payment_records::Column::OrganizationId.eq(request.organization_id))
        .filter(payment_records::Column::PaymentDate.between(start_of_month, end_of_month))
        .one(db).await?;

    if let Some(existing) = existing {
        return Ok(OpenedPayment::Existing(existing));
    }

    let payment = PaymentRecords::insert(payment_records::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(Local::now().fixed_offset()),
        updated_at: Set(Local::now().fixed_offset()),
        employee_id: Set(request.employee_id),
        employee_name: Set(request.employee_name),
        designation: Set(request.designation),
        joining_date: Set(request.joining_date),
        payment_date: Set(request.payment_date),
        payment_amount: Set(Decimal::ZERO),
        status: Set(PaymentStatus::Pending),
        organization_id: Set(request.organization_id),
    }).exec_with_returning(db).await?;

    info!(payment_id = %payment.id, employee_id = %payment.employee_id, "opened new payment record");

    Ok(OpenedPayment::Created(payment))
}

/// Rebuilds the form of a payment record.
///
/// Some deployments never created the custom earnings table, a failing read
/// there is logged and treated as no custom earnings.
pub async fn load_payroll(db: &DatabaseConnection, payment: &payment_records::Model) -> Result<PayrollState, PayrollError> {
    let earnings = PaymentEarnings::find()
        .filter(payment_earnings::Column::PaymentId.eq(payment.id))
        .one(db).await?;

    let deductions = PaymentDeductions::find()
        .filter(payment_deductions::Column::PaymentId.eq(payment.id))
        .one(db).await?;

    let custom_earnings = match PaymentCustomEarnings::find()
        .filter(payment_custom_earnings::Column::PaymentId.eq(payment.id))
        .order_by_asc(payment_custom_earnings::Column::CreatedAt)
        .all(db).await
    {
        Ok(rows) => rows,
        Err(err) => {
            warn!(payment_id = %payment.id, error = %err, "custom earnings unavailable, continuing without them");
            Vec::new()
        }
    };

    let custom_deductions = PaymentCustomDeductions::find()
        .filter(payment_custom_deductions::Column::PaymentId.eq(payment.id))
        .order_by_asc(payment_custom_deductions::Column::CreatedAt)
        .all(db).await?;

    Ok(dto::state_from_rows(earnings, deductions, custom_earnings, custom_deductions))
}

/// Persists a payroll form against its payment record.
///
/// Totals are recomputed here, whatever the caller sent. An appraisal row is
/// written when a payroll saved before gets a different net pay.
pub async fn save_payroll(db: &DatabaseConnection, payment: &payment_records::Model, state: PayrollState) -> Result<SavedPayroll, PayrollError> {
    let state = state.normalized();

    if state.components.basic <= Decimal::ZERO {
        return Err(PayrollError::MissingBasicSalary);
    }

    if !fits_record(&state) {
        return Err(PayrollError::AmountOutOfRange);
    }

    let now = Local::now().fixed_offset();
    let net_pay = state.totals.net_pay;

    let txn = db.begin().await.map_err(PayrollError::at(SaveStep::Begin))?;

    let (payment, appraised) = match write_payroll(&txn, payment, &state, now).await {
        Ok(written) => written,
        Err(err) => {
            error!(payment_id = %payment.id, error = %err, "payroll save failed, rolling back");

            if let Err(rollback_err) = txn.rollback().await {
                warn!(payment_id = %payment.id, error = %rollback_err, "rollback failed");
            }

            return Err(err);
        }
    };

    txn.commit().await.map_err(PayrollError::at(SaveStep::Commit))?;

    info!(payment_id = %payment.id, %net_pay, appraised, "payroll saved");

    Ok(SavedPayroll {
        payment,
        state,
        appraised,
    })
}

/// Every stored amount has to fit a `decimal(14, 2)` column
fn fits_record(state: &PayrollState) -> bool {
    [
        state.totals.gross_earnings,
        state.totals.total_deductions,
        state.totals.net_pay.abs(),
        state.totals.reconciled_ctc,
        state.annual_ctc(),
    ]
    .iter()
    .all(|amount| *amount <= MAX_AMOUNT)
}

/// Runs every write of a save on `txn`, handing back the updated header and
/// whether an appraisal was recorded
async fn write_payroll(
    txn: &DatabaseTransaction,
    payment: &payment_records::Model,
    state: &PayrollState,
    now: sea_orm::prelude::DateTimeWithTimeZone,
) -> Result<(payment_records::Model, bool), PayrollError> {
    let net_pay = state.totals.net_pay;

    // Locked so concurrent saves compare against the amount the other one wrote
    let current = PaymentRecords::find_by_id(payment.id)
        .lock_exclusive()
        .one(txn).await
        .map_err(PayrollError::at(SaveStep::Header))?
        .ok_or(PayrollError::NotFound)?;

    let saved_before = PaymentEarnings::find()
        .filter(payment_earnings::Column::PaymentId.eq(payment.id))
        .one(txn).await
        .map_err(PayrollError::at(SaveStep::Earnings))?
        .is_some();

    PaymentRecords::update_many()
        .col_expr(payment_records::Column::PaymentAmount, Expr::value(net_pay))
        .col_expr(payment_records::Column::UpdatedAt, Expr::value(now))
        .filter(payment_records::Column::Id.eq(payment.id))
        .exec(txn).await
        .map_err(PayrollError::at(SaveStep::Header))?;

    PaymentEarnings::insert(dto::earnings_model(payment.id, state, now))
        .on_conflict(dto::earnings_on_conflict())
        .exec_without_returning(txn).await
        .map_err(PayrollError::at(SaveStep::Earnings))?;

    PaymentDeductions::insert(dto::deductions_model(payment.id, state, now))
        .on_conflict(dto::deductions_on_conflict())
        .exec_without_returning(txn).await
        .map_err(PayrollError::at(SaveStep::Deductions))?;

    replace_custom_earnings(txn, payment.id, &state.custom_earnings, now).await
        .map_err(PayrollError::at(SaveStep::CustomEarnings))?;

    replace_custom_deductions(txn, payment.id, &state.custom_deductions, now).await
        .map_err(PayrollError::at(SaveStep::CustomDeductions))?;

    let appraised = saved_before && current.payment_amount != net_pay;
    if appraised {
        AppraisalRecords::insert(dto::appraisal_model(&current, net_pay, now))
            .exec_without_returning(txn).await
            .map_err(PayrollError::at(SaveStep::Appraisal))?;
    }

    let payment = payment_records::Model {
        payment_amount: net_pay,
        updated_at: now,
        ..current
    };

    Ok((payment, appraised))
}

async fn replace_custom_earnings(
    txn: &DatabaseTransaction,
    payment_id: Uuid,
    items: &LineItems,
    now: sea_orm::prelude::DateTimeWithTimeZone,
) -> Result<(), DbErr> {
    PaymentCustomEarnings::delete_many()
        .filter(payment_custom_earnings::Column::PaymentId.eq(payment_id))
        .exec(txn).await?;

    if !items.is_empty() {
        PaymentCustomEarnings::insert_many(dto::custom_earning_models(payment_id, items, now))
            .exec_without_returning(txn).await?;
    }

    Ok(())
}

async fn replace_custom_deductions(
    txn: &DatabaseTransaction,
    payment_id: Uuid,
    items: &LineItems,
    now: sea_orm::prelude::DateTimeWithTimeZone,
) -> Result<(), DbErr> {
    PaymentCustomDeductions::delete_many()
        .filter(payment_custom_deductions::Column::PaymentId.eq(payment_id))
        .exec(txn).await?;

    if !items.is_empty() {
        PaymentCustomDeductions::insert_many(dto::custom_deduction_models(payment_id, items, now))
            .exec_without_returning(txn).await?;
    }

    Ok(())
}

/// Payroll approval
pub async fn update_status(db: &DatabaseConnection, payment: &payment_records::Model, status: PaymentStatus) -> Result<payment_records::Model, PayrollError> {
    let updated = PaymentRecords::update(payment_records::ActiveModel {
        id: Unchanged(payment.id),
        status: Set(status),
        updated_at: Set(Local::now().fixed_offset()),
        ..Default::default()
    }).exec(db).await
        .map_err(|err| match err {
            DbErr::RecordNotUpdated => PayrollError::NotFound,
            err => PayrollError::Database(err),
        })?;

    info!(payment_id = %updated.id, status = ?updated.status, "payment status changed");

    Ok(updated)
}

pub async fn list_payments(db: &DatabaseConnection, filter: PaymentFilter) -> Result<Vec<payment_records::Model>, PayrollError> {
    let payments = PaymentRecords::find()
        .apply_if(filter.organization_id, |query, organization_id|
            query.filter(payment_records::Column::OrganizationId.eq(organization_id))
        )
        .apply_if(filter.status, |query, status|
            query.filter(payment_records::Column::Status.eq(status))
        )
        .order_by_desc(payment_records::Column::PaymentDate)
        .all(db).await?;

    Ok(payments)
}
