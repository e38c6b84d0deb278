pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod content;
pub mod home;
pub mod orders;
pub mod promo;

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use utoipa::OpenApi;

use crate::domain::errors::ValidationErrors;
use crate::errors::AppError;

/// Decimal amounts travel as strings, e.g. "9.99".
pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(value.trim()).map_err(|_| {
        let mut errors = ValidationErrors::default();
        errors.add_field(field, "Enter a number.");
        AppError::Validation(errors)
    })
}

pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        home::index,
        home::cat_fact,
        content::list_articles,
        content::get_article,
        content::create_article,
        content::list_faqs,
        content::create_faq,
        content::list_vacancies,
        content::create_vacancy,
        content::about,
        content::publish_about,
        content::privacy_policy,
        content::publish_privacy_policy,
        content::list_reviews,
        content::create_review,
        content::update_review,
        content::delete_review,
        content::review_stats,
        catalog::list_service_types,
        catalog::create_service_type,
        catalog::delete_service_type,
        catalog::list_services,
        catalog::create_service,
        catalog::update_service,
        catalog::delete_service,
        promo::list_promo_codes,
        promo::create_promo_code,
        accounts::signup,
        accounts::login,
        accounts::logout,
        accounts::get_client,
        accounts::update_client,
        accounts::delete_client,
        accounts::create_staff,
        accounts::add_specialization,
        accounts::remove_specialization,
        accounts::delete_staff,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_status,
        orders::change_promo,
        orders::assign_staff,
        orders::mark_paid,
        orders::recalculate_totals,
    ),
    tags(
        (name = "content", description = "Public pages and reviews"),
        (name = "catalog", description = "Service types and services"),
        (name = "promo", description = "Promo codes"),
        (name = "accounts", description = "Registration, sessions, profiles and staff"),
        (name = "orders", description = "Order workflow"),
    )
)]
pub struct ApiDoc;
