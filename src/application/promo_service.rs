use chrono::{DateTime, Utc};

use crate::domain::access::Principal;
use crate::domain::errors::DomainError;
use crate::domain::ports::PromoRepository;
use crate::domain::promo::{NewPromoCode, PromoCode};

pub struct PromoService<R> {
    repo: R,
}

impl<R: PromoRepository> PromoService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Codes a client could select right now.
    pub fn list_selectable(&self, now: DateTime<Utc>) -> Result<Vec<PromoCode>, DomainError> {
        Ok(self
            .repo
            .list_active()?
            .into_iter()
            .filter(|p| p.is_valid_at(now))
            .collect())
    }

    pub fn create(&self, principal: &Principal, new: NewPromoCode) -> Result<PromoCode, DomainError> {
        principal.require_admin()?;
        new.validate()?;
        let promo = self.repo.create(new)?;
        log::info!("Promo code {} created", promo);
        Ok(promo)
    }
}
