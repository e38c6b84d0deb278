use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::catalog::{NewServiceType, Service, ServiceDraft, ServiceFilter, ServiceType};
use crate::domain::identity::Role;
use crate::errors::AppError;
use crate::handlers::parse_decimal;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ServiceTypeRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<ServiceType> for ServiceTypeResponse {
    fn from(t: ServiceType) -> Self {
        ServiceTypeResponse {
            id: t.id,
            name: t.name,
            description: t.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ServiceRequest {
    pub service_type_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as a string, e.g. "49.90".
    pub price: String,
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ServiceRequest {
    fn into_draft(self) -> Result<ServiceDraft, AppError> {
        Ok(ServiceDraft {
            price: parse_decimal("price", &self.price)?,
            service_type_id: self.service_type_id,
            name: self.name,
            description: self.description,
            notes: self.notes,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub service_type_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: String,
    pub is_active: bool,
    /// Internal notes, only shown to admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ServiceResponse {
    fn new(service: Service, show_notes: bool) -> Self {
        ServiceResponse {
            id: service.id,
            service_type_id: service.service_type_id,
            name: service.name,
            description: service.description,
            price: service.price.to_string(),
            is_active: service.is_active,
            notes: service.notes.filter(|_| show_notes),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceQuery {
    pub service_type: Option<Uuid>,
    /// Only services strictly more expensive than this.
    pub price_gt: Option<String>,
    /// Only services strictly cheaper than this.
    pub price_lt: Option<String>,
}

impl ServiceQuery {
    fn into_filter(self) -> Result<ServiceFilter, AppError> {
        Ok(ServiceFilter {
            service_type_id: self.service_type,
            price_gt: self
                .price_gt
                .as_deref()
                .map(|v| parse_decimal("price_gt", v))
                .transpose()?,
            price_lt: self
                .price_lt
                .as_deref()
                .map(|v| parse_decimal("price_lt", v))
                .transpose()?,
            active_only: false,
        })
    }
}

fn is_admin(principal: &Principal) -> bool {
    principal.identity().is_some_and(|i| i.role == Role::Admin)
}

#[utoipa::path(
    get,
    path = "/service_types",
    responses((status = 200, description = "All service types", body = [ServiceTypeResponse])),
    tag = "catalog"
)]
pub async fn list_service_types(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let types = web::block(move || state.catalog.list_service_types()).await??;
    let body: Vec<ServiceTypeResponse> = types.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/service_types",
    request_body = ServiceTypeRequest,
    responses(
        (status = 201, description = "Service type created", body = ServiceTypeResponse),
        (status = 409, description = "Name already taken"),
    ),
    tag = "catalog"
)]
pub async fn create_service_type(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<ServiceTypeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new = NewServiceType {
        name: body.name,
        description: body.description,
    };
    let created = web::block(move || state.catalog.create_service_type(&principal, new)).await??;
    Ok(HttpResponse::Created().json(ServiceTypeResponse::from(created)))
}

/// DELETE /service_types/{id}
///
/// Refused with 409 while any service still uses the type.
#[utoipa::path(
    delete,
    path = "/service_types/{id}",
    params(("id" = Uuid, Path, description = "Service type UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 409, description = "Type still in use"),
    ),
    tag = "catalog"
)]
pub async fn delete_service_type(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_service_type(&principal, id)).await??;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /services
///
/// Price bounds are exclusive. Retired services are listed for admins only.
#[utoipa::path(
    get,
    path = "/services",
    params(ServiceQuery),
    responses((status = 200, description = "Matching services", body = [ServiceResponse])),
    tag = "catalog"
)]
pub async fn list_services(
    state: web::Data<AppState>,
    principal: Principal,
    query: web::Query<ServiceQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter()?;
    let show_notes = is_admin(&principal);

    let services = web::block(move || state.catalog.list_services(&principal, filter)).await??;

    let body: Vec<ServiceResponse> = services
        .into_iter()
        .map(|s| ServiceResponse::new(s, show_notes))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/services",
    request_body = ServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 422, description = "Invalid service"),
    ),
    tag = "catalog"
)]
pub async fn create_service(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<ServiceRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = body.into_inner().into_draft()?;
    let created = web::block(move || state.catalog.create_service(&principal, draft)).await??;
    Ok(HttpResponse::Created().json(ServiceResponse::new(created, true)))
}

#[utoipa::path(
    put,
    path = "/services/{id}",
    params(("id" = Uuid, Path, description = "Service UUID")),
    request_body = ServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 404, description = "Service not found"),
    ),
    tag = "catalog"
)]
pub async fn update_service(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
    body: web::Json<ServiceRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let draft = body.into_inner().into_draft()?;
    let updated = web::block(move || state.catalog.update_service(&principal, id, draft)).await??;
    Ok(HttpResponse::Ok().json(ServiceResponse::new(updated, true)))
}

/// DELETE /services/{id}
///
/// Refused with 409 while order items reference the service; retire it with
/// `is_active = false` instead.
#[utoipa::path(
    delete,
    path = "/services/{id}",
    params(("id" = Uuid, Path, description = "Service UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 409, description = "Service referenced by orders"),
    ),
    tag = "catalog"
)]
pub async fn delete_service(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.catalog.delete_service(&principal, id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
