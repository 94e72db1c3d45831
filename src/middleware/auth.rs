use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::AuthUser;

/// Caller identity for the current request, `None` when unauthenticated.
///
/// Handlers decide what an absent session means; the middleware never rejects.
#[derive(Clone, Debug, Default)]
pub struct Session(pub Option<AuthUser>);

impl Session {
    pub fn user(&self) -> Option<&AuthUser> {
        self.0.as_ref()
    }
}

/// Resolve the session once per request and inject it into request extensions
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = state.authenticator.resolve_current_user(request.headers());

    if let Some(user) = &user {
        tracing::debug!("Session resolved for user {}", user.user_id);
    }

    request.extensions_mut().insert(Session(user));
    next.run(request).await
}
