use super::*;

impl FromRequest for payment_records::Model {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let payment_id = req.match_info().get("payment_id").expect("This extractor must be used under `payment_id` path");
            let Ok(payment_id) = Uuid::from_str(payment_id) else {
                return Err(actix_web::error::ErrorBadRequest("invalid `payment_id`"))
            };

            let db = req.app_data::<web::Data<DatabaseConnection>>().expect("DatabaseConnection must be attached");

            let payment = PaymentRecords::find_by_id(payment_id)
                .one(db.as_ref()).await
                .map_err(PayrollError::from)?;

            let Some(payment) = payment else {
                return Err(actix_web::error::ErrorNotFound("payment record not found"))
            };

            Ok(payment)
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{get, http::StatusCode, test, App, Responder};
    use chrono::{Local, NaiveDate};
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    #[actix_web::test]
    async fn test_payment_extractor() {
        #[get("/{payment_id}")]
        async fn test_handler(payment: payment_records::Model) -> impl Responder {
            web::Json(payment)
        }

        let payment = payment_records::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            employee_id: Uuid::new_v4(),
            employee_name: "Bob".to_string(),
            designation: None,
            joining_date: None,
            payment_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            payment_amount: dec!(83200),
            status: PaymentStatus::Pending,
            organization_id: Uuid::new_v4(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ payment.clone() ],
                vec![ ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.into_connection()))
                .service(test_handler)
        ).await;

        let req = test::TestRequest::default()
            .uri(&format!("/{}", payment.id))
            .to_request();

        let returned_payment: payment_records::Model = test::call_and_read_body_json(&app, req).await;
        assert_eq!(returned_payment, payment);

        let req = test::TestRequest::default()
            .uri(&format!("/{}", Uuid::new_v4()))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::default()
            .uri("/not-a-uuid")
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
