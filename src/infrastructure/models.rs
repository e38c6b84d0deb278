use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalog::{Service, ServiceType};
use crate::domain::content::{About, Faq, PrivacyPolicy, Vacancy};
use crate::domain::errors::DomainError;
use crate::domain::identity::{Account, Client, Staff};
use crate::domain::order::OrderItem;
use crate::domain::promo::PromoCode;
use crate::schema::{
    about_pages, accounts, articles, clients, faqs, order_assignments, order_items, orders,
    privacy_policies, promo_codes, reviews, service_types, services, sessions, staff,
    staff_specializations, vacancies,
};

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = service_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceTypeRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<ServiceTypeRow> for ServiceType {
    fn from(row: ServiceTypeRow) -> Self {
        ServiceType {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = services)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRow {
    pub id: Uuid,
    pub service_type_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub notes: Option<String>,
    pub is_active: bool,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            id: row.id,
            service_type_id: row.service_type_id,
            name: row.name,
            description: row.description,
            price: row.price,
            notes: row.notes,
            is_active: row.is_active,
        }
    }
}

// ── Promotion ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = promo_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PromoCodeRow {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub value: BigDecimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub is_active: bool,
    pub max_uses: Option<i32>,
    pub used_count: i32,
}

impl TryFrom<PromoCodeRow> for PromoCode {
    type Error = DomainError;

    fn try_from(row: PromoCodeRow) -> Result<Self, Self::Error> {
        Ok(PromoCode {
            id: row.id,
            code: row.code,
            kind: row.discount_type.parse()?,
            value: row.value,
            valid_from: row.valid_from,
            valid_to: row.valid_to,
            is_active: row.is_active,
            max_uses: row.max_uses,
            used_count: row.used_count,
        })
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub address: String,
    pub work_date: DateTime<Utc>,
    pub status: String,
    pub payment_status: String,
    pub total_amount: BigDecimal,
    pub created_by: Option<Uuid>,
    pub promo_code_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub address: String,
    pub work_date: DateTime<Utc>,
    pub status: String,
    pub payment_status: String,
    pub total_amount: BigDecimal,
    pub created_by: Option<Uuid>,
    pub promo_code_id: Option<Uuid>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub service_id: Uuid,
    pub quantity: i32,
    pub price_at_order: BigDecimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            service_id: row.service_id,
            quantity: row.quantity,
            price_at_order: row.price_at_order,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = order_assignments)]
#[diesel(primary_key(order_id, staff_id))]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderAssignmentRow {
    pub order_id: Uuid,
    pub staff_id: Uuid,
}

// ── Identity ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl AccountRow {
    pub fn into_account(self) -> Result<(Account, String), DomainError> {
        Ok((
            Account {
                id: self.id,
                username: self.username,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                role: self.role.parse()?,
                created_at: self.created_at,
            },
            self.password_hash,
        ))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SessionRow {
    pub token: Uuid,
    pub account_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientRow {
    pub id: Uuid,
    pub account_id: Option<Uuid>,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub client_type: String,
    pub address: Option<String>,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = DomainError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        Ok(Client {
            id: row.id,
            account_id: row.account_id,
            name: row.name,
            contact_person: row.contact_person,
            contact_number: row.contact_number,
            email: row.email,
            client_type: row.client_type.parse()?,
            address: row.address,
            timezone: row.timezone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Columns a client may change on their own profile.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = clients)]
#[diesel(treat_none_as_null = true)]
pub struct ClientProfileRow {
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub client_type: String,
    pub address: Option<String>,
    pub timezone: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StaffRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub contact_number: String,
    pub hire_date: NaiveDate,
    pub role: Option<String>,
    pub is_active: bool,
    pub timezone: String,
}

impl From<StaffRow> for Staff {
    fn from(row: StaffRow) -> Self {
        Staff {
            id: row.id,
            account_id: row.account_id,
            contact_number: row.contact_number,
            hire_date: row.hire_date,
            role: row.role,
            is_active: row.is_active,
            timezone: row.timezone,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = staff_specializations)]
pub struct NewSpecializationRow {
    pub staff_id: Uuid,
    pub service_id: Uuid,
}

// ── Content ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ArticleRow {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub img: Option<String>,
    pub summary: String,
    pub content: String,
    pub publication_date: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = articles)]
pub struct NewArticleRow {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub img: Option<String>,
    pub summary: String,
    pub content: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub content: String,
    pub publication_date: DateTime<Utc>,
    pub score: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub content: String,
    pub score: i32,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = reviews)]
pub struct ReviewChangeset {
    pub title: String,
    pub content: String,
    pub score: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = faqs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FaqRow {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub answer_date: DateTime<Utc>,
}

impl From<FaqRow> for Faq {
    fn from(row: FaqRow) -> Self {
        Faq {
            id: row.id,
            question: row.question,
            answer: row.answer,
            answer_date: row.answer_date,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = vacancies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VacancyRow {
    pub id: Uuid,
    pub job_title: String,
    pub job_description: String,
    pub job_type_id: Option<Uuid>,
}

impl From<VacancyRow> for Vacancy {
    fn from(row: VacancyRow) -> Self {
        Vacancy {
            id: row.id,
            job_title: row.job_title,
            job_description: row.job_description,
            job_type_id: row.job_type_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = about_pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AboutRow {
    pub id: Uuid,
    pub logo: Option<String>,
    pub history: Option<String>,
    pub contact_info: String,
    pub created_at: DateTime<Utc>,
}

impl From<AboutRow> for About {
    fn from(row: AboutRow) -> Self {
        About {
            id: row.id,
            logo: row.logo,
            history: row.history,
            contact_info: row.contact_info,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = privacy_policies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PrivacyPolicyRow {
    pub id: Uuid,
    pub policy_content: String,
    pub created_at: DateTime<Utc>,
}

impl From<PrivacyPolicyRow> for PrivacyPolicy {
    fn from(row: PrivacyPolicyRow) -> Self {
        PrivacyPolicy {
            id: row.id,
            policy_content: row.policy_content,
            created_at: row.created_at,
        }
    }
}
