use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};

use crate::core::error::Error;
use crate::core::state::AppState;

/// Guards the routes it wraps behind a bearer access token, stashing
/// the resolved user in the request extensions.
pub(crate) async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(Error::NoCredentials)?;

    let mut header = auth_header.to_str()?.split_whitespace();
    let (_bearer, token) = (header.next(), header.next());

    let user = state.auth.authenticate(token.unwrap_or_default()).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
