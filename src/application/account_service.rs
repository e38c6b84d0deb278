use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::application::passwords::{hash_password, verify_password};
use crate::domain::access::Principal;
use crate::domain::errors::{DomainError, ValidationErrors};
use crate::domain::identity::{
    Account, Client, ClientProfile, NewAccount, NewStaff, Registration, Role, Session, Staff,
};
use crate::domain::ports::IdentityRepository;

pub struct AccountService<R> {
    repo: R,
    session_ttl: Duration,
}

impl<R: IdentityRepository> AccountService<R> {
    pub fn new(repo: R, session_ttl: Duration) -> Self {
        Self { repo, session_ttl }
    }

    /// Creates the login account and then, as the second step of the same
    /// unit of work, the client profile that goes with it.
    pub fn register(&self, registration: Registration) -> Result<(Account, Client), DomainError> {
        let mut errors = match registration.validate() {
            Ok(()) => ValidationErrors::default(),
            Err(errors) => errors,
        };
        if self.repo.email_taken(&registration.email)? {
            errors.add_field("email", "An account with this email already exists.");
        }
        errors.into_result()?;

        let Registration {
            username,
            email,
            first_name,
            last_name,
            password,
            mut profile,
        } = registration;
        profile.email = Some(email.clone());

        let account = NewAccount {
            username,
            email: Some(email),
            first_name,
            last_name,
            password_hash: hash_password(&password)?,
            role: Role::Client,
        };
        let (account, client) = self.repo.register(account, profile)?;
        log::info!("Registered account {} with client {}", account.username, client.id);
        Ok((account, client))
    }

    pub fn login(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, DomainError> {
        let Some(credentials) = self.repo.find_credentials(username)? else {
            return Err(DomainError::Unauthorized);
        };
        if !verify_password(password, &credentials.password_hash) {
            log::warn!("Failed login for {}", username);
            return Err(DomainError::Unauthorized);
        }
        self.repo
            .create_session(credentials.account.id, now + self.session_ttl)
    }

    pub fn logout(&self, token: Uuid) -> Result<(), DomainError> {
        self.repo.delete_session(token)
    }

    /// Unknown or expired tokens resolve to an anonymous principal.
    pub fn resolve(&self, token: Option<Uuid>, now: DateTime<Utc>) -> Result<Principal, DomainError> {
        let Some(token) = token else {
            return Ok(Principal::Anonymous);
        };
        Ok(self
            .repo
            .resolve_session(token, now)?
            .map_or(Principal::Anonymous, Principal::Authenticated))
    }

    pub fn client_profile(&self, principal: &Principal) -> Result<Client, DomainError> {
        let identity = principal.require_identity()?;
        self.repo
            .find_client_by_account(identity.account_id)?
            .ok_or(DomainError::NotFound("Client profile"))
    }

    pub fn update_client_profile(
        &self,
        principal: &Principal,
        profile: ClientProfile,
    ) -> Result<Client, DomainError> {
        let client = self.client_profile(principal)?;
        profile.validate()?;
        self.repo.update_client(client.id, profile)
    }

    /// Removes the profile together with its login. Refused while the
    /// client still has orders.
    pub fn delete_client_profile(&self, principal: &Principal) -> Result<(), DomainError> {
        let client = self.client_profile(principal)?;
        self.repo.delete_client(client.id)?;
        log::info!("Client {} deleted with its account", client.id);
        Ok(())
    }

    pub fn create_staff(&self, principal: &Principal, new: NewStaff) -> Result<Staff, DomainError> {
        principal.require_admin()?;
        new.validate()?;
        if self.repo.find_account(new.account_id)?.is_none() {
            return Err(DomainError::NotFound("Account"));
        }
        self.repo.create_staff(new)
    }

    pub fn add_specialization(
        &self,
        principal: &Principal,
        staff_id: Uuid,
        service_id: Uuid,
    ) -> Result<Vec<Uuid>, DomainError> {
        principal.require_admin()?;
        if self.repo.find_staff(&[staff_id])?.is_empty() {
            return Err(DomainError::NotFound("Staff"));
        }
        self.repo.add_specialization(staff_id, service_id)?;
        self.repo.specializations(staff_id)
    }

    pub fn remove_specialization(
        &self,
        principal: &Principal,
        staff_id: Uuid,
        service_id: Uuid,
    ) -> Result<Vec<Uuid>, DomainError> {
        principal.require_admin()?;
        self.repo.remove_specialization(staff_id, service_id)?;
        self.repo.specializations(staff_id)
    }

    pub fn delete_staff(&self, principal: &Principal, staff_id: Uuid) -> Result<(), DomainError> {
        principal.require_admin()?;
        self.repo.delete_staff(staff_id)
    }
}
