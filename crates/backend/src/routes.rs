use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// Every route the panel exposes. Auth is enforced per route: the three
/// token endpoints and the health probe are public, operator management
/// is admin only, everything else requires a valid access token.
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // BUSINESS ROUTES (AUTHENTICATED)
        // ========================================
        // A001 Agent handlers
        .route(
            "/api/agents",
            get(handlers::a001_agent::list)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/agents/stats",
            get(handlers::a001_agent::stats)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/agents/:id",
            get(handlers::a001_agent::get_by_id)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/agents/:id/team",
            get(handlers::a001_agent::team)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // A002 User handlers
        .route(
            "/api/users",
            get(handlers::a002_user::list)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/users/stats",
            get(handlers::a002_user::stats)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/users/audio-review",
            get(handlers::a002_user::audio_review)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/users/:id",
            get(handlers::a002_user::get_by_id)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/users/:id/commission",
            get(handlers::a002_user::get_commission)
                .put(handlers::a002_user::set_commission)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/users/:id/commission/history",
            get(handlers::a002_user::commission_history)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/users/:id/review",
            post(handlers::a002_user::review)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // Commission engine handlers (stateless editor support)
        .route(
            "/api/commission/validate",
            post(handlers::commission::validate)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/commission/preview",
            post(handlers::commission::preview)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // A003 Client handlers
        .route(
            "/api/clients",
            get(handlers::a003_client::list)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/clients/stats",
            get(handlers::a003_client::stats)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // A004 Chat session handlers
        .route(
            "/api/sessions",
            get(handlers::a004_chat_session::list)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/sessions/:id",
            get(handlers::a004_chat_session::get_by_id)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // A005 Recharge handlers
        .route(
            "/api/recharges",
            get(handlers::a005_recharge::list)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/recharges/stats",
            get(handlers::a005_recharge::stats)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // PROJECTIONS
        // ========================================
        // P900 Earnings Register handlers
        .route(
            "/api/reports/earnings",
            get(handlers::p900_earnings_register::earnings)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/reports/earnings/by-user",
            get(handlers::p900_earnings_register::earnings_by_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        // D400 Overview Dashboard
        .route(
            "/api/dashboard/overview",
            get(handlers::d400_overview::overview_data)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
}
