//! Resolves the caller of each request into a [`Principal`].
//!
//! The session token is read from the `session` cookie, falling back to an
//! `Authorization: Bearer <token>` header. Missing, malformed, unknown and
//! expired tokens all yield [`Principal::Anonymous`]; handlers decide whether
//! that is acceptable.

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::access::Principal;
use crate::errors::AppError;
use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

pub fn session_token(req: &HttpRequest) -> Option<Uuid> {
    if let Some(token) = req
        .cookie(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        return Some(token);
    }
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|t| Uuid::parse_str(t.trim()).ok())
}

impl FromRequest for Principal {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = session_token(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let Some(token) = token else {
                return Ok(Principal::Anonymous);
            };
            let state =
                state.ok_or_else(|| AppError::Internal("application state missing".to_string()))?;
            let principal =
                web::block(move || state.accounts.resolve(Some(token), Utc::now())).await??;
            Ok(principal)
        })
    }
}
