//! Role-based authorization guards.
//!
//! Guards extract the authenticated user placed in request extensions by the
//! auth middleware and verify the required role. Citizens may only reach
//! their own reports; admins see everything.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only operations (triage, assignment, resolution).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_citizen_user, with_admin_auth};
    use axum::{
        body::Body,
        extract::Request,
        http::StatusCode,
        middleware::{from_fn, Next},
        response::Response,
        routing::get,
        Router,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
        user.name
    }

    fn app() -> Router {
        Router::new().route("/admin-only", get(admin_only))
    }

    fn request() -> Request<Body> {
        Request::builder()
            .uri("/admin-only")
            .body(Body::empty())
            .unwrap()
    }

    async fn inject_citizen(mut request: Request, next: Next) -> Response {
        request
            .extensions_mut()
            .insert(create_citizen_user(Uuid::new_v4()));
        next.run(request).await
    }

    #[tokio::test]
    async fn admin_passes_the_guard() {
        let response = with_admin_auth(app()).oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn citizen_is_forbidden() {
        let router = app().layer(from_fn(inject_citizen));
        let response = router.oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unauthenticated_is_rejected() {
        let response = app().oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
