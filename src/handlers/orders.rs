use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::submission::{ItemRow, OrderSubmission};
use crate::errors::AppError;
use crate::handlers::timestamp;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub service_id: Option<Uuid>,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Required for staff and admins; ignored for clients, who always order
    /// for themselves.
    pub client_id: Option<Uuid>,
    pub address: Option<String>,
    pub work_date: Option<DateTime<Utc>>,
    pub promo_code: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

impl From<CreateOrderRequest> for OrderSubmission {
    fn from(body: CreateOrderRequest) -> Self {
        OrderSubmission {
            client_id: body.client_id,
            address: body.address,
            work_date: body.work_date,
            promo_code: body.promo_code,
            items: body
                .items
                .into_iter()
                .map(|i| ItemRow {
                    service_id: i.service_id,
                    quantity: i.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub quantity: i32,
    pub price_at_order: String,
    pub line_total: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub address: String,
    pub work_date: String,
    /// `work_date` in the caller's timezone.
    pub work_date_local: String,
    pub status: String,
    pub payment_status: String,
    pub total_amount: String,
    pub promo_code: Option<String>,
    pub created_by: Option<Uuid>,
    pub assigned_staff: Vec<Uuid>,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    fn new(order: Order, principal: &Principal) -> Self {
        OrderResponse {
            id: order.id,
            client_id: order.client_id,
            address: order.address,
            work_date: timestamp(order.work_date),
            work_date_local: principal.local_time(order.work_date),
            status: order.status.as_str().to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            total_amount: order.total_amount.to_string(),
            promo_code: order.promo_code.as_ref().map(ToString::to_string),
            created_by: order.created_by,
            assigned_staff: order.assigned_staff,
            created_at: timestamp(order.created_at),
            items: order
                .items
                .into_iter()
                .map(|i| OrderItemResponse {
                    id: i.id,
                    service_id: i.service_id,
                    quantity: i.quantity,
                    line_total: i.line_total().to_string(),
                    price_at_order: i.price_at_order.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// PENDING, SCHEDULED, IN_PROGRESS, COMPLETED or CANCELLED.
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePromoRequest {
    /// A blank or missing code removes the promotion.
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignStaffRequest {
    pub staff_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderIdsRequest {
    pub ids: Vec<Uuid>,
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates the whole submission before anything is written. The order, its
/// items and the promo usage count are stored in one transaction.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created"),
        (status = 401, description = "Not logged in"),
        (status = 422, description = "Submission rejected with field and row errors"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let submission = OrderSubmission::from(body.into_inner());

    let id = web::block(move || state.orders.create_order(&principal, submission, Utc::now()))
        .await??;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// GET /orders
///
/// Lists the orders visible to the caller, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    principal: Principal,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);

    let response = web::block(move || {
        let result = state.orders.list_orders(&principal, page, limit)?;
        Ok::<_, AppError>(ListOrdersResponse {
            items: result
                .items
                .into_iter()
                .map(|o| OrderResponse::new(o, &principal))
                .collect(),
            total: result.total,
            page,
            limit,
        })
    })
    .await??;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /orders/{id}
///
/// Orders outside the caller's scope are reported as missing.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let response = web::block(move || {
        let order = state.orders.get_order(&principal, order_id)?;
        Ok::<_, AppError>(order.map(|o| OrderResponse::new(o, &principal)))
    })
    .await??;

    match response {
        Some(order) => Ok(HttpResponse::Ok().json(order)),
        None => Err(AppError::NotFound("Order".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 204, description = "Status changed"),
        (status = 400, description = "Unknown status"),
        (status = 409, description = "Transition not allowed"),
    ),
    tag = "orders"
)]
pub async fn update_status(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let next: OrderStatus = body.status.parse()?;

    web::block(move || state.orders.update_status(&principal, order_id, next)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /orders/{id}/promo
///
/// Swaps or removes the promo code and returns the recomputed total.
#[utoipa::path(
    post,
    path = "/orders/{id}/promo",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = ChangePromoRequest,
    responses(
        (status = 200, description = "Promo changed, new total returned"),
        (status = 422, description = "Code expired or invalid"),
    ),
    tag = "orders"
)]
pub async fn change_promo(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
    body: web::Json<ChangePromoRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let code = body.into_inner().code;

    let total = web::block(move || {
        state
            .orders
            .change_promo(&principal, order_id, code.as_deref(), Utc::now())
    })
    .await??;

    Ok(HttpResponse::Ok().json(json!({ "total_amount": total.to_string() })))
}

#[utoipa::path(
    post,
    path = "/orders/{id}/staff",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = AssignStaffRequest,
    responses(
        (status = 204, description = "Assignment replaced"),
        (status = 422, description = "Unknown staff member"),
    ),
    tag = "orders"
)]
pub async fn assign_staff(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
    body: web::Json<AssignStaffRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let staff_ids = body.into_inner().staff_ids;

    web::block(move || state.orders.assign_staff(&principal, order_id, &staff_ids)).await??;

    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/orders/mark_paid",
    request_body = OrderIdsRequest,
    responses((status = 200, description = "Number of orders marked as paid")),
    tag = "orders"
)]
pub async fn mark_paid(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<OrderIdsRequest>,
) -> Result<HttpResponse, AppError> {
    let ids = body.into_inner().ids;
    let updated = web::block(move || state.orders.mark_paid(&principal, &ids)).await??;
    Ok(HttpResponse::Ok().json(json!({ "updated": updated })))
}

#[utoipa::path(
    post,
    path = "/orders/recalculate",
    request_body = OrderIdsRequest,
    responses((status = 200, description = "Number of orders recalculated")),
    tag = "orders"
)]
pub async fn recalculate_totals(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<OrderIdsRequest>,
) -> Result<HttpResponse, AppError> {
    let ids = body.into_inner().ids;
    let updated = web::block(move || state.orders.recalculate_totals(&principal, &ids)).await??;
    Ok(HttpResponse::Ok().json(json!({ "updated": updated })))
}
