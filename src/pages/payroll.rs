use std::str::FromStr;

use actix_web::{dev, get, post, put, web, FromRequest, HttpRequest, HttpResponse, Responder};
use futures_util::future::LocalBoxFuture;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    engine::{Action, PayrollState},
    entity::{payment_records, prelude::*, sea_orm_active_enums::PaymentStatus},
    persistence::{self, OpenPayment, OpenedPayment, PaymentFilter, PayrollError},
};

use model::*;

mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(calculate)
        .service(open_payment)
        .service(list_payments)
        .service(get_payslip)
        .service(save_payroll)
        .service(update_status);
}

/// Replays form events on top of a state and hands back the reconciled result
#[post("/calculate")]
async fn calculate(payload: web::Json<Calculate>) -> impl Responder {
    let Calculate { state, actions } = payload.into_inner();

    let state = state
        .unwrap_or_default()
        .normalized()
        .apply_all(actions);

    web::Json(PayrollView::from(state))
}

#[post("")]
async fn open_payment(db: web::Data<DatabaseConnection>, payload: web::Json<OpenPayment>) -> Result<HttpResponse, PayrollError> {
    let res = match persistence::open_payment(db.as_ref(), payload.into_inner()).await? {
        OpenedPayment::Created(payment) => HttpResponse::Created().json(web::Json(payment)),
        OpenedPayment::Existing(payment) => HttpResponse::Ok().json(web::Json(payment)),
    };

    Ok(res)
}

#[get("")]
async fn list_payments(db: web::Data<DatabaseConnection>, filter: web::Query<PaymentFilter>) -> Result<impl Responder, PayrollError> {
    let payments = persistence::list_payments(db.as_ref(), filter.into_inner()).await?;

    Ok(web::Json(payments))
}

#[get("/{payment_id}")]
async fn get_payslip(db: web::Data<DatabaseConnection>, payment: payment_records::Model) -> Result<impl Responder, PayrollError> {
    let state = persistence::load_payroll(db.as_ref(), &payment).await?;

    Ok(web::Json(Payslip {
        payment,
        payroll: state.into(),
    }))
}

#[put("/{payment_id}")]
async fn save_payroll(db: web::Data<DatabaseConnection>, payment: payment_records::Model, payload: web::Json<PayrollState>) -> Result<impl Responder, PayrollError> {
    let saved = persistence::save_payroll(db.as_ref(), &payment, payload.into_inner()).await?;

    Ok(web::Json(SavedPayslip {
        payment: saved.payment,
        payroll: saved.state.into(),
        appraised: saved.appraised,
    }))
}

#[put("/{payment_id}/status")]
async fn update_status(db: web::Data<DatabaseConnection>, payment: payment_records::Model, payload: web::Json<UpdateStatus>) -> Result<impl Responder, PayrollError> {
    let payment = persistence::update_status(db.as_ref(), &payment, payload.status).await?;

    Ok(web::Json(payment))
}
