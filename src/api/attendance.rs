use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::attendance::query::load_day;
use crate::attendance::replicate::replicate_day_record;
use crate::attendance::session::{DaySession, SessionStatus};
use crate::attendance::status::classify;
use crate::auth::auth::AuthUser;
use crate::directory::EmployeeDirectory;
use crate::error::AttendanceError;
use crate::model::attendance::{AttendanceEvent, PresenceStatus};
use crate::store::mysql::MySqlDocumentStore;

/// The reactive fields the UI renders for one day.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    #[schema(example = "Checked In")]
    pub session_status: SessionStatus,

    pub events: Vec<AttendanceEvent>,

    #[schema(example = "8.5 hours")]
    pub total_duration: String,

    #[schema(example = "P")]
    pub status: PresenceStatus,
}

impl DayView {
    fn new(session: &DaySession, status: PresenceStatus) -> Self {
        Self {
            session_status: session.status(),
            events: session.events().to_vec(),
            total_duration: session.total_duration_formatted(),
            status,
        }
    }
}

fn employee_of(auth: &AuthUser) -> actix_web::Result<(String, String)> {
    auth.employee_identity()
        .map_err(|_| actix_web::error::ErrorForbidden("No employee profile"))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "Checked in successfully", body = DayView),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "message": "Already checked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee directory entry not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    store: web::Data<MySqlDocumentStore>,
    directory: web::Data<EmployeeDirectory>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, employee_name) = employee_of(&auth)?;

    let now = Utc::now();
    let mut session =
        load_day(store.get_ref(), &employee_id, &employee_name, now.date_naive()).await;

    let status = match session.check_in(now) {
        Ok(status) => status,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Already checked in today"
            })));
        }
    };

    persist_and_render(store.get_ref(), directory.get_ref(), &session, status, "Check-in failed")
        .await
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "Checked out successfully", body = DayView),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "No active check-in found for today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee directory entry not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    store: web::Data<MySqlDocumentStore>,
    directory: web::Data<EmployeeDirectory>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, employee_name) = employee_of(&auth)?;

    let now = Utc::now();
    let mut session =
        load_day(store.get_ref(), &employee_id, &employee_name, now.date_naive()).await;

    let status = match session.check_out(now) {
        Ok(status) => status,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "No active check-in found for today"
            })));
        }
    };

    persist_and_render(store.get_ref(), directory.get_ref(), &session, status, "Check-out failed")
        .await
}

/// Day view endpoint, used on view-load and date navigation. Read-only.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{date}",
    params(
        ("date", description = "Calendar day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "The day's session", body = DayView),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn get_day(
    auth: AuthUser,
    store: web::Data<MySqlDocumentStore>,
    path: web::Path<NaiveDate>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, employee_name) = employee_of(&auth)?;

    let date = path.into_inner();
    let session = load_day(store.get_ref(), &employee_id, &employee_name, date).await;
    let status = classify(session.total_hours());

    Ok(HttpResponse::Ok().json(DayView::new(&session, status)))
}

async fn persist_and_render(
    store: &MySqlDocumentStore,
    directory: &EmployeeDirectory,
    session: &DaySession,
    status: PresenceStatus,
    context: &'static str,
) -> actix_web::Result<HttpResponse> {
    match replicate_day_record(store, directory, session, status).await {
        Ok(_) => Ok(HttpResponse::Ok().json(DayView::new(session, status))),
        Err(AttendanceError::UserNotFound(_)) => {
            Ok(HttpResponse::NotFound().json(serde_json::json!({
                "message": "Employee directory entry not found"
            })))
        }
        Err(e) => {
            tracing::error!(error = %e, employee_id = %session.employee_id, "{context}");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}
