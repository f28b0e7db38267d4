use crate::{
    api::{attendance, payslip},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let attendance_limiter = Arc::new(build_limiter(config.rate_attendance_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // All routes are protected: handlers authenticate through the AuthUser
    // extractor, so an invalid token is rejected before any store access.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(protected_limiter)
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .wrap(attendance_limiter.clone())
                            .route(web::post().to(attendance::check_in))
                            .route(web::put().to(attendance::check_out)),
                    )
                    // /attendance/{date}
                    .service(
                        web::resource("/{date}").route(web::get().to(attendance::get_day)),
                    ),
            )
            .service(
                web::scope("/payslip")
                    // /payslip
                    .service(
                        web::resource("").route(web::post().to(payslip::create_payslip)),
                    )
                    // /payslip/{id}
                    .service(web::resource("/{id}").route(web::get().to(payslip::get_payslip))),
            ),
    );
}
