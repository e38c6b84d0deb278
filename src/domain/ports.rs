use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::access::{Identity, OrderScope};
use super::catalog::{NewServiceType, Service, ServiceDraft, ServiceFilter, ServiceType};
use super::content::{
    About, Article, ArticleDraft, Faq, PrivacyPolicy, Review, ReviewDraft, ReviewStat, Vacancy,
};
use super::errors::DomainError;
use super::identity::{
    Account, Client, ClientProfile, NewAccount, NewStaff, Session, Staff, StoredCredentials,
};
use super::order::{ListResult, NewOrder, Order, OrderStatus};
use super::promo::{NewPromoCode, PromoCode};

pub trait CatalogRepository: Send + Sync + 'static {
    fn list_service_types(&self) -> Result<Vec<ServiceType>, DomainError>;
    fn create_service_type(&self, new: NewServiceType) -> Result<ServiceType, DomainError>;
    /// Fails with `Conflict` while services still reference the type.
    fn delete_service_type(&self, id: Uuid) -> Result<(), DomainError>;
    fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>, DomainError>;
    fn find_services(&self, ids: &[Uuid]) -> Result<Vec<Service>, DomainError>;
    fn create_service(&self, draft: ServiceDraft) -> Result<Service, DomainError>;
    fn update_service(&self, id: Uuid, draft: ServiceDraft) -> Result<Service, DomainError>;
    /// Fails with `Conflict` while order items reference the service.
    fn delete_service(&self, id: Uuid) -> Result<(), DomainError>;
}

pub trait PromoRepository: Send + Sync + 'static {
    fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, DomainError>;
    fn list_active(&self) -> Result<Vec<PromoCode>, DomainError>;
    fn create(&self, new: NewPromoCode) -> Result<PromoCode, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Inserts the order, its items and the promo usage atomically, then
    /// stores the computed total.
    fn create(&self, order: NewOrder) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn list(&self, scope: OrderScope, page: i64, limit: i64) -> Result<ListResult, DomainError>;
    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError>;
    /// Returns the number of orders that moved from unpaid to paid.
    fn mark_paid(&self, ids: &[Uuid]) -> Result<usize, DomainError>;
    fn set_assigned_staff(&self, id: Uuid, staff_ids: &[Uuid]) -> Result<(), DomainError>;
    /// Swaps the promo code and returns the recomputed total.
    fn set_promo_code(&self, id: Uuid, promo_id: Option<Uuid>) -> Result<BigDecimal, DomainError>;
    /// Returns the number of orders whose totals were recomputed.
    fn recalculate_totals(&self, ids: &[Uuid]) -> Result<usize, DomainError>;
}

pub trait IdentityRepository: Send + Sync + 'static {
    /// Creates the account and its client profile in one transaction.
    fn register(&self, account: NewAccount, profile: ClientProfile)
        -> Result<(Account, Client), DomainError>;
    fn email_taken(&self, email: &str) -> Result<bool, DomainError>;
    fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>, DomainError>;
    fn create_session(&self, account_id: Uuid, expires_at: DateTime<Utc>)
        -> Result<Session, DomainError>;
    fn delete_session(&self, token: Uuid) -> Result<(), DomainError>;
    /// Resolves an unexpired session to the caller's role and profiles.
    fn resolve_session(&self, token: Uuid, now: DateTime<Utc>)
        -> Result<Option<Identity>, DomainError>;
    fn find_client(&self, id: Uuid) -> Result<Option<Client>, DomainError>;
    fn find_client_by_account(&self, account_id: Uuid) -> Result<Option<Client>, DomainError>;
    fn update_client(&self, id: Uuid, profile: ClientProfile) -> Result<Client, DomainError>;
    /// Deletes the client and, if linked, its account. Fails with `Conflict`
    /// while orders reference the client.
    fn delete_client(&self, id: Uuid) -> Result<(), DomainError>;
    fn find_account(&self, id: Uuid) -> Result<Option<Account>, DomainError>;
    /// Creates the staff profile and switches the account role to staff.
    fn create_staff(&self, new: NewStaff) -> Result<Staff, DomainError>;
    fn find_staff(&self, ids: &[Uuid]) -> Result<Vec<Staff>, DomainError>;
    fn add_specialization(&self, staff_id: Uuid, service_id: Uuid) -> Result<(), DomainError>;
    fn remove_specialization(&self, staff_id: Uuid, service_id: Uuid) -> Result<(), DomainError>;
    fn specializations(&self, staff_id: Uuid) -> Result<Vec<Uuid>, DomainError>;
    /// Fails with `Conflict` while orders reference the staff member.
    fn delete_staff(&self, id: Uuid) -> Result<(), DomainError>;
}

pub trait ContentRepository: Send + Sync + 'static {
    fn list_articles(&self) -> Result<Vec<Article>, DomainError>;
    fn find_article(&self, id: Uuid) -> Result<Option<Article>, DomainError>;
    fn create_article(&self, author_id: Uuid, draft: ArticleDraft) -> Result<Article, DomainError>;
    fn list_faqs(&self) -> Result<Vec<Faq>, DomainError>;
    fn create_faq(&self, question: String, answer: String) -> Result<Faq, DomainError>;
    fn list_vacancies(&self) -> Result<Vec<Vacancy>, DomainError>;
    fn create_vacancy(
        &self,
        job_title: String,
        job_description: String,
        job_type_id: Option<Uuid>,
    ) -> Result<Vacancy, DomainError>;
    fn latest_about(&self) -> Result<Option<About>, DomainError>;
    fn publish_about(
        &self,
        logo: Option<String>,
        history: Option<String>,
        contact_info: String,
    ) -> Result<About, DomainError>;
    fn latest_privacy_policy(&self) -> Result<Option<PrivacyPolicy>, DomainError>;
    fn publish_privacy_policy(&self, policy_content: String) -> Result<PrivacyPolicy, DomainError>;
    fn list_reviews(&self) -> Result<Vec<Review>, DomainError>;
    fn find_review(&self, id: Uuid) -> Result<Option<Review>, DomainError>;
    fn create_review(&self, author_id: Uuid, draft: ReviewDraft) -> Result<Review, DomainError>;
    fn update_review(&self, id: Uuid, draft: ReviewDraft) -> Result<Review, DomainError>;
    fn delete_review(&self, id: Uuid) -> Result<(), DomainError>;
    /// Review count per account, accounts without reviews included.
    fn review_stats(&self) -> Result<Vec<ReviewStat>, DomainError>;
}
