use axum::{
    http::{
        header::{HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::web::middleware::auth::{self as auth_middleware, ADMIN_EMAIL_HEADER, ADMIN_PASSWORD_HEADER};
use crate::web::routes::{
    admin, avatar, events, friends, health, locations, mitid, stats, suggestions, users,
};
use crate::web::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/admin/users",
            get(admin::admin_list_users_handler).post(admin::admin_create_user_handler),
        )
        .route(
            "/api/admin/users/:email",
            delete(admin::admin_delete_user_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_admin,
        ));

    let api_routes = Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/users", get(users::list_users_handler))
        .route("/api/users/register", post(users::register_handler))
        .route("/api/users/login", post(users::login_handler))
        .route(
            "/api/users/:email",
            get(users::get_user_handler)
                .put(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        .route("/api/admin/login", post(admin::admin_login_handler))
        .route("/api/mitid/register", post(mitid::mitid_register_handler))
        .route("/api/mitid/:cpr", get(mitid::mitid_lookup_handler))
        // Profile
        .route(
            "/api/avatar/:email",
            get(avatar::get_avatar_handler).put(avatar::put_avatar_handler),
        )
        // Social graph
        .route(
            "/api/friends/:email",
            get(friends::list_friends_handler)
                .post(friends::add_friend_handler)
                .delete(friends::remove_friend_handler),
        )
        .route(
            "/api/friendships/:email",
            delete(friends::remove_friendship_handler),
        )
        .route(
            "/api/requests/:email",
            get(friends::list_requests_handler)
                .post(friends::add_request_handler)
                .delete(friends::delete_request_handler),
        )
        .route(
            "/api/requests/:email/send",
            post(friends::send_request_handler),
        )
        .route(
            "/api/requests/:email/accept",
            post(friends::accept_request_handler),
        )
        .route(
            "/api/requests/:email/decline",
            post(friends::decline_request_handler),
        )
        .route(
            "/api/suggestions/:email",
            get(suggestions::suggestions_handler),
        )
        // Events
        .route(
            "/api/events/:email",
            get(events::list_events_handler)
                .post(events::save_event_handler)
                .delete(events::delete_event_handler),
        )
        // Locations
        .route("/api/locations", get(locations::list_locations_handler))
        .route(
            "/api/locations/:email",
            post(locations::save_location_handler),
        )
        // Progression
        .route("/api/stats/:email", get(stats::get_stats_handler))
        .route("/api/stats/:email/purchase", post(stats::purchase_handler))
        .route(
            "/api/items/:email",
            get(stats::list_items_handler).post(stats::buy_item_handler),
        );

    Router::new()
        .merge(api_routes)
        .merge(admin_routes)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

/// Any origin when none are configured; otherwise only the listed origins,
/// with credentials allowed.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(ADMIN_EMAIL_HEADER),
            HeaderName::from_static(ADMIN_PASSWORD_HEADER),
        ])
        .allow_credentials(true)
}
