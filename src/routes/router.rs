use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::Method,
    middleware,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::core::state::AppState;
use crate::routes::{auth, user};
use crate::utils;

pub(crate) fn routes(state: AppState) -> Router {
    // /auth/...
    let auth_router = Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout));

    let authorized_routes = Router::new()
        .route("/", get(user::list))
        .route("/{id}", get(user::get).delete(user::delete))
        .route("/{id}/password", patch(user::update_password))
        .route("/{id}/soft-delete", patch(user::soft_delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authorize,
        ));

    // /users/..., registration stays open
    let user_router = Router::new()
        .route("/", post(user::create))
        .merge(authorized_routes);

    Router::new()
        .route("/", get(|| async { "Hello, World!" }))
        .nest("/v1/auth", auth_router)
        .nest("/v1/users", user_router)
        .with_state(state)
        .route_layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                        .allow_origin(cors::Any),
                ),
        )
}
