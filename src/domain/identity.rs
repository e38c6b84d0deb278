use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use regex::Regex;
use uuid::Uuid;

use super::errors::{DomainError, ValidationErrors};

const PHONE_PATTERN: &str = r"^\+375(44|29|33)\d{7}$";

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"))
}

pub fn is_valid_contact_number(number: &str) -> bool {
    phone_regex().is_match(number)
}

pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.parse::<Tz>().ok()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !email.contains(' ')
        }
        None => false,
    }
}

/// Role tag stored on the account and resolved once at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Staff => "STAFF",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(Role::Client),
            "STAFF" => Ok(Role::Staff),
            "ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    Private,
    Company,
}

impl ClientType {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientType::Private => "PRIVATE",
            ClientType::Company => "COMPANY",
        }
    }
}

impl FromStr for ClientType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRIVATE" => Ok(ClientType::Private),
            "COMPANY" => Ok(ClientType::Company),
            other => Err(DomainError::InvalidInput(format!(
                "unknown client type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub account: Account,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: Uuid,
    pub account_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: Uuid,
    pub account_id: Option<Uuid>,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub client_type: ClientType,
    pub address: Option<String>,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable client profile fields, also used when the profile is first created.
#[derive(Debug, Clone)]
pub struct ClientProfile {
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub client_type: ClientType,
    pub address: Option<String>,
    pub timezone: String,
}

impl ClientProfile {
    pub fn check(&self, errors: &mut ValidationErrors) {
        if self.name.trim().is_empty() {
            errors.add_field("name", "This field is required.");
        }
        if !is_valid_contact_number(&self.contact_number) {
            errors.add_field("contact_number", "Enter a valid value.");
        }
        if let Some(email) = &self.email {
            if !looks_like_email(email) {
                errors.add_field("email", "Enter a valid email address.");
            }
        }
        let has_contact = self
            .contact_person
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty());
        if self.client_type == ClientType::Company && !has_contact {
            errors.add_field("contact_person", "Contact person is required for companies");
        }
        if parse_timezone(&self.timezone).is_none() {
            errors.add_field("timezone", "Unknown timezone.");
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        self.check(&mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Sign-up form: the account plus the client profile created alongside it.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub profile: ClientProfile,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.username.trim().is_empty() {
            errors.add_field("username", "This field is required.");
        }
        if !looks_like_email(&self.email) {
            errors.add_field("email", "Enter a valid email address.");
        }
        if self.first_name.trim().is_empty() {
            errors.add_field("first_name", "This field is required.");
        }
        if self.last_name.trim().is_empty() {
            errors.add_field("last_name", "This field is required.");
        }
        if self.password.chars().count() < 8 {
            errors.add_field("password", "This password is too short. It must contain at least 8 characters.");
        }
        self.profile.check(&mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Staff {
    pub id: Uuid,
    pub account_id: Uuid,
    pub contact_number: String,
    pub hire_date: NaiveDate,
    pub role: Option<String>,
    pub is_active: bool,
    pub timezone: String,
}

#[derive(Debug, Clone)]
pub struct NewStaff {
    pub account_id: Uuid,
    pub contact_number: String,
    pub hire_date: NaiveDate,
    pub role: Option<String>,
    pub timezone: String,
}

impl NewStaff {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if !is_valid_contact_number(&self.contact_number) {
            errors.add_field("contact_number", "Enter a valid value.");
        }
        if parse_timezone(&self.timezone).is_none() {
            errors.add_field("timezone", "Unknown timezone.");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
