use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::promo::{DiscountKind, NewPromoCode, PromoCode};
use crate::errors::AppError;
use crate::handlers::{parse_decimal, timestamp};
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PromoCodeResponse {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub value: String,
    pub valid_from: String,
    pub valid_to: String,
    /// Human readable form, e.g. "VALID20 (20%)".
    pub label: String,
}

impl From<PromoCode> for PromoCodeResponse {
    fn from(p: PromoCode) -> Self {
        PromoCodeResponse {
            label: p.to_string(),
            id: p.id,
            discount_type: p.kind.as_str().to_string(),
            value: p.value.to_string(),
            valid_from: timestamp(p.valid_from),
            valid_to: timestamp(p.valid_to),
            code: p.code,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePromoCodeRequest {
    pub code: String,
    /// PERCENT or FIXED.
    pub discount_type: String,
    pub value: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub max_uses: Option<i32>,
}

fn default_active() -> bool {
    true
}

/// GET /promo
///
/// Codes that can be applied to a new order right now.
#[utoipa::path(
    get,
    path = "/promo",
    responses((status = 200, description = "Selectable promo codes", body = [PromoCodeResponse])),
    tag = "promo"
)]
pub async fn list_promo_codes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let codes = web::block(move || state.promos.list_selectable(Utc::now())).await??;
    let body: Vec<PromoCodeResponse> = codes.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/promo",
    request_body = CreatePromoCodeRequest,
    responses(
        (status = 201, description = "Promo code created", body = PromoCodeResponse),
        (status = 409, description = "Code already exists"),
        (status = 422, description = "Invalid promo code"),
    ),
    tag = "promo"
)]
pub async fn create_promo_code(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreatePromoCodeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let kind: DiscountKind = body.discount_type.parse()?;
    let new = NewPromoCode {
        value: parse_decimal("value", &body.value)?,
        code: body.code,
        kind,
        valid_from: body.valid_from,
        valid_to: body.valid_to,
        is_active: body.is_active,
        max_uses: body.max_uses,
    };

    let created = web::block(move || state.promos.create(&principal, new)).await??;
    Ok(HttpResponse::Created().json(PromoCodeResponse::from(created)))
}
