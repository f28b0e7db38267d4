use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::auth::AuthUser;
use crate::model::payslip::{MAX_SALARY_LEVEL, Payslip};
use crate::store::mysql::MySqlDocumentStore;
use crate::store::{self, PAYSLIPS_COLLECTION};

#[derive(Deserialize, ToSchema)]
pub struct CreatePayslip {
    #[schema(example = 50000.0)]
    pub gross_fixed: f64,

    #[schema(example = 5)]
    pub level: u8,
}

/// Payslip entry endpoint. Salary components are derived server-side;
/// admins only supply the gross fixed pay and the level.
#[utoipa::path(
    post,
    path = "/api/v1/payslip",
    request_body = CreatePayslip,
    responses(
        (status = 201, description = "Payslip created", body = Object, example = json!({
            "message": "Payslip created successfully",
            "id": "c1a9e7a0-0000-0000-0000-000000000000"
        })),
        (status = 400, description = "Invalid level or gross fixed pay"),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn create_payslip(
    auth: AuthUser,
    store: web::Data<MySqlDocumentStore>,
    payload: web::Json<CreatePayslip>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    if payload.level < 1 || payload.level > MAX_SALARY_LEVEL {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Level must be between 1 and 19"
        })));
    }
    if !payload.gross_fixed.is_finite() || payload.gross_fixed <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Gross fixed pay must be a positive amount"
        })));
    }

    let payslip = Payslip::derive(payload.gross_fixed, payload.level, Utc::now());
    let id = Uuid::new_v4().to_string();

    match store::set_typed(store.get_ref(), PAYSLIPS_COLLECTION, &id, &payslip).await {
        Ok(()) => Ok(HttpResponse::Created().json(serde_json::json!({
            "message": "Payslip created successfully",
            "id": id
        }))),
        Err(e) => {
            tracing::error!(error = %e, "Failed to persist payslip");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/payslip/{payslip_id}",
    params(
        ("payslip_id", description = "Payslip document id")
    ),
    responses(
        (status = 200, body = Payslip),
        (status = 404)
    ),
    security(("bearer_auth" = [])),
    tag = "Payslip"
)]
pub async fn get_payslip(
    auth: AuthUser,
    store: web::Data<MySqlDocumentStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let payslip_id = path.into_inner();

    let payslip: Option<Payslip> =
        store::get_typed(store.get_ref(), PAYSLIPS_COLLECTION, &payslip_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %payslip_id, "Failed to fetch payslip");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

    match payslip {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Payslip not found"
        }))),
    }
}
