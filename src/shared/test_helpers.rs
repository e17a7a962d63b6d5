#[cfg(test)]
use crate::features::auth::model::{AuthenticatedUser, UserRole};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: Uuid::from_u128(0xadu128),
        name: "Test Admin".to_string(),
        role: UserRole::Admin,
    }
}

#[cfg(test)]
pub fn create_citizen_user(id: Uuid) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        name: "Test Citizen".to_string(),
        role: UserRole::Citizen,
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
