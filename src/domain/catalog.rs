use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use super::errors::ValidationErrors;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewServiceType {
    pub name: String,
    pub description: Option<String>,
}

impl NewServiceType {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errors.add_field("name", "This field is required.");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub service_type_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub notes: Option<String>,
    pub is_active: bool,
}

/// Fields an admin supplies when creating or editing a service.
#[derive(Debug, Clone)]
pub struct ServiceDraft {
    pub service_type_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub notes: Option<String>,
    pub is_active: bool,
}

impl ServiceDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errors.add_field("name", "This field is required.");
        }
        if self.price < BigDecimal::zero() {
            errors.add_field("price", "Ensure this value is greater than or equal to 0.");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Listing filter; price bounds are exclusive.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub service_type_id: Option<Uuid>,
    pub price_gt: Option<BigDecimal>,
    pub price_lt: Option<BigDecimal>,
    pub active_only: bool,
}

impl ServiceFilter {
    pub fn matches(&self, service: &Service) -> bool {
        if self.active_only && !service.is_active {
            return false;
        }
        if let Some(type_id) = self.service_type_id {
            if service.service_type_id != type_id {
                return false;
            }
        }
        if let Some(gt) = &self.price_gt {
            if service.price <= *gt {
                return false;
            }
        }
        if let Some(lt) = &self.price_lt {
            if service.price >= *lt {
                return false;
            }
        }
        true
    }
}
