use crate::api::attendance::DayView;
use crate::api::payslip::CreatePayslip;
use crate::model::attendance::{AttendanceEvent, PresenceStatus};
use crate::model::payslip::Payslip;
use crate::attendance::session::SessionStatus;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## HR Attendance & Payslip Service

This API powers an internal HR tool for daily attendance tracking and
admin payslip entry.

### 🔹 Key Features
- **Attendance Tracking**
  - Check in and check out, multiple sessions per day
  - Presence classification from total worked hours (8h threshold)
  - Manager read replicas of each employee's daily record
- **Day Navigation**
  - Load any prior day's session by date
- **Payslip Entry**
  - Admin-entered gross figures with server-side derived components

### 🔐 Security
All endpoints are protected using **JWT Bearer authentication** issued by
the external identity provider.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::get_day,

        crate::api::payslip::create_payslip,
        crate::api::payslip::get_payslip
    ),
    components(
        schemas(
            DayView,
            AttendanceEvent,
            PresenceStatus,
            SessionStatus,
            CreatePayslip,
            Payslip
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Payslip", description = "Payslip entry APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
