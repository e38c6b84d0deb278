use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::identity::{Client, ClientProfile, ClientType, NewStaff, Registration, Staff};
use crate::errors::AppError;
use crate::handlers::auth::{session_token, SESSION_COOKIE};
use crate::handlers::timestamp;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClientProfileRequest {
    pub name: String,
    pub contact_person: Option<String>,
    /// Up to 15 digits, optionally prefixed with `+`.
    pub contact_number: String,
    pub email: Option<String>,
    /// PRIVATE or COMPANY.
    #[serde(default = "default_client_type")]
    pub client_type: String,
    pub address: Option<String>,
    /// IANA name, e.g. "Europe/Kyiv".
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_client_type() -> String {
    ClientType::Private.as_str().to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl ClientProfileRequest {
    fn into_profile(self) -> Result<ClientProfile, AppError> {
        let client_type: ClientType = self.client_type.parse()?;
        Ok(ClientProfile {
            name: self.name,
            contact_person: self.contact_person,
            contact_number: self.contact_number,
            email: self.email,
            client_type,
            address: self.address,
            timezone: self.timezone,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
    pub profile: ClientProfileRequest,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientResponse {
    pub id: Uuid,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub client_type: String,
    pub address: Option<String>,
    pub timezone: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Client> for ClientResponse {
    fn from(c: Client) -> Self {
        ClientResponse {
            id: c.id,
            name: c.name,
            contact_person: c.contact_person,
            contact_number: c.contact_number,
            email: c.email,
            client_type: c.client_type.as_str().to_string(),
            address: c.address,
            timezone: c.timezone,
            created_at: timestamp(c.created_at),
            updated_at: timestamp(c.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStaffRequest {
    pub account_id: Uuid,
    pub contact_number: String,
    pub hire_date: NaiveDate,
    pub role: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub contact_number: String,
    pub hire_date: String,
    pub role: Option<String>,
    pub is_active: bool,
    pub timezone: String,
}

impl From<Staff> for StaffResponse {
    fn from(s: Staff) -> Self {
        StaffResponse {
            id: s.id,
            account_id: s.account_id,
            contact_number: s.contact_number,
            hire_date: s.hire_date.to_string(),
            role: s.role,
            is_active: s.is_active,
            timezone: s.timezone,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SpecializationRequest {
    pub service_id: Uuid,
}

fn session_cookie(token: Uuid, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_secs.max(0)))
        .finish()
}

/// POST /auth/signup
///
/// Creates a client login together with its client profile.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account and client profile created"),
        (status = 409, description = "Username or email already taken"),
        (status = 422, description = "Invalid registration"),
    ),
    tag = "accounts"
)]
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let registration = Registration {
        profile: body.profile.into_profile()?,
        username: body.username,
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        password: body.password,
    };

    let (account, client) = web::block(move || state.accounts.register(registration)).await??;

    Ok(HttpResponse::Created().json(json!({
        "account_id": account.id,
        "username": account.username,
        "client_id": client.id,
    })))
}

/// POST /auth/login
///
/// Sets the `session` cookie and also returns the token for API clients.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in"),
        (status = 401, description = "Unknown username or wrong password"),
    ),
    tag = "accounts"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { username, password } = body.into_inner();
    let now = Utc::now();

    let session = web::block(move || state.accounts.login(&username, &password, now)).await??;

    let cookie = session_cookie(session.token, (session.expires_at - now).num_seconds());
    Ok(HttpResponse::Ok().cookie(cookie).json(json!({
        "token": session.token,
        "expires_at": timestamp(session.expires_at),
    })))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Session ended")),
    tag = "accounts"
)]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    if let Some(token) = session_token(&req) {
        web::block(move || state.accounts.logout(token)).await??;
    }

    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    Ok(HttpResponse::NoContent().cookie(cookie).finish())
}

#[utoipa::path(
    get,
    path = "/client",
    responses(
        (status = 200, description = "Own client profile", body = ClientResponse),
        (status = 404, description = "Caller has no client profile"),
    ),
    tag = "accounts"
)]
pub async fn get_client(
    state: web::Data<AppState>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    let client = web::block(move || state.accounts.client_profile(&principal)).await??;
    Ok(HttpResponse::Ok().json(ClientResponse::from(client)))
}

#[utoipa::path(
    put,
    path = "/client",
    request_body = ClientProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ClientResponse),
        (status = 422, description = "Invalid profile"),
    ),
    tag = "accounts"
)]
pub async fn update_client(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<ClientProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = body.into_inner().into_profile()?;
    let client =
        web::block(move || state.accounts.update_client_profile(&principal, profile)).await??;
    Ok(HttpResponse::Ok().json(ClientResponse::from(client)))
}

/// DELETE /client
///
/// Deletes the profile and its login. Refused with 409 while orders exist.
#[utoipa::path(
    delete,
    path = "/client",
    responses(
        (status = 204, description = "Profile and account deleted"),
        (status = 409, description = "Client still has orders"),
    ),
    tag = "accounts"
)]
pub async fn delete_client(
    state: web::Data<AppState>,
    principal: Principal,
) -> Result<HttpResponse, AppError> {
    web::block(move || state.accounts.delete_client_profile(&principal)).await??;

    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    Ok(HttpResponse::NoContent().cookie(cookie).finish())
}

#[utoipa::path(
    post,
    path = "/staff",
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Staff member created", body = StaffResponse),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Account is already staff"),
    ),
    tag = "accounts"
)]
pub async fn create_staff(
    state: web::Data<AppState>,
    principal: Principal,
    body: web::Json<CreateStaffRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new = NewStaff {
        account_id: body.account_id,
        contact_number: body.contact_number,
        hire_date: body.hire_date,
        role: body.role,
        timezone: body.timezone,
    };
    let staff = web::block(move || state.accounts.create_staff(&principal, new)).await??;
    Ok(HttpResponse::Created().json(StaffResponse::from(staff)))
}

#[utoipa::path(
    post,
    path = "/staff/{id}/specializations",
    params(("id" = Uuid, Path, description = "Staff UUID")),
    request_body = SpecializationRequest,
    responses((status = 200, description = "Current specializations")),
    tag = "accounts"
)]
pub async fn add_specialization(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
    body: web::Json<SpecializationRequest>,
) -> Result<HttpResponse, AppError> {
    let staff_id = path.into_inner();
    let service_id = body.service_id;
    let services = web::block(move || {
        state
            .accounts
            .add_specialization(&principal, staff_id, service_id)
    })
    .await??;
    Ok(HttpResponse::Ok().json(json!({ "specializations": services })))
}

#[utoipa::path(
    delete,
    path = "/staff/{id}/specializations/{service_id}",
    params(
        ("id" = Uuid, Path, description = "Staff UUID"),
        ("service_id" = Uuid, Path, description = "Service UUID"),
    ),
    responses((status = 200, description = "Current specializations")),
    tag = "accounts"
)]
pub async fn remove_specialization(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (staff_id, service_id) = path.into_inner();
    let services = web::block(move || {
        state
            .accounts
            .remove_specialization(&principal, staff_id, service_id)
    })
    .await??;
    Ok(HttpResponse::Ok().json(json!({ "specializations": services })))
}

/// DELETE /staff/{id}
///
/// Refused with 409 while the staff member created or is assigned to orders.
#[utoipa::path(
    delete,
    path = "/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 409, description = "Staff member referenced by orders"),
    ),
    tag = "accounts"
)]
pub async fn delete_staff(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let staff_id = path.into_inner();
    web::block(move || state.accounts.delete_staff(&principal, staff_id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
