use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::handlers::content::ArticleResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub articles: Vec<ArticleResponse>,
    /// `null` when the lookup service is unreachable.
    pub ip: Option<String>,
}

/// GET /
///
/// Latest articles plus the server's public IP.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Home page data", body = HomeResponse)),
    tag = "content"
)]
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let ip = state.info.public_ip().await;

    let articles = web::block(move || state.content.list_articles()).await??;

    Ok(HttpResponse::Ok().json(HomeResponse {
        articles: articles.into_iter().map(Into::into).collect(),
        ip,
    }))
}

#[utoipa::path(
    get,
    path = "/cat_fact",
    responses((status = 200, description = "A trivia fact, or null")),
    tag = "content"
)]
pub async fn cat_fact(state: web::Data<AppState>) -> HttpResponse {
    let fact = state.info.cat_fact().await;
    HttpResponse::Ok().json(json!({ "fact": fact }))
}
