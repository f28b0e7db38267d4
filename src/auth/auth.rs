use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::AttendanceError;
use crate::model::role::Role;
use crate::models::TokenType;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};

/// The current user as asserted by the external identity provider.
pub struct AuthUser {
    pub username: String,
    pub employee_name: String,
    pub role: Role,

    /// Present only if this user is linked to an employee directory entry
    pub employee_id: Option<String>,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        // Refresh tokens never grant API access.
        if claims.token_type != TokenType::Access {
            return ready(Err(ErrorUnauthorized("Invalid token")));
        }

        let role = match Role::from_id(claims.role) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Invalid role"))),
        };

        ready(Ok(AuthUser {
            username: claims.sub,
            employee_name: claims.name,
            role,
            employee_id: claims.employee_id,
        }))
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> actix_web::Result<()> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Admin only"))
        }
    }

    /// The `(employee_id, employee_name)` pair attendance operations run
    /// under, or `Unauthenticated` for accounts without an employee profile.
    pub fn employee_identity(&self) -> Result<(String, String), AttendanceError> {
        match self.employee_id.as_ref() {
            Some(id) => Ok((id.clone(), self.employee_name.clone())),
            None => Err(AttendanceError::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_access_token;
    use actix_web::test::TestRequest;

    fn test_config() -> Config {
        Config {
            server_addr: "127.0.0.1:8080".into(),
            database_url: "mysql://unused".into(),
            jwt_secret: "test-secret".into(),
            rate_attendance_per_min: 60,
            rate_protected_per_min: 1000,
            api_prefix: "/api/v1".into(),
        }
    }

    #[actix_web::test]
    async fn extracts_employee_identity_from_bearer_token() {
        let config = test_config();
        let token = generate_access_token(
            "jdoe".into(),
            "John Doe".into(),
            Role::Employee as u8,
            Some("emp-1".into()),
            &config.jwt_secret,
            900,
        );

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .app_data(Data::new(config))
            .to_http_request();

        let user = AuthUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.username, "jdoe");
        assert_eq!(user.role, Role::Employee);
        assert_eq!(
            user.employee_identity().unwrap(),
            ("emp-1".to_string(), "John Doe".to_string())
        );
    }

    #[actix_web::test]
    async fn missing_token_is_rejected() {
        let req = TestRequest::default()
            .app_data(Data::new(test_config()))
            .to_http_request();
        assert!(
            AuthUser::from_request(&req, &mut Payload::None)
                .await
                .is_err()
        );
    }

    #[actix_web::test]
    async fn account_without_employee_profile_is_unauthenticated() {
        let config = test_config();
        let token = generate_access_token(
            "admin".into(),
            "Admin".into(),
            Role::Admin as u8,
            None,
            &config.jwt_secret,
            900,
        );

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {token}")))
            .app_data(Data::new(config))
            .to_http_request();

        let user = AuthUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert!(matches!(
            user.employee_identity(),
            Err(AttendanceError::Unauthenticated)
        ));
        assert!(user.require_admin().is_ok());
    }
}
