use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::{DomainError, ValidationErrors};

pub const INVALID_PROMO_MESSAGE: &str = "This promo code is expired or invalid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

impl DiscountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountKind::Percentage => "PERCENT",
            DiscountKind::Fixed => "FIXED",
        }
    }
}

impl FromStr for DiscountKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PERCENT" => Ok(DiscountKind::Percentage),
            "FIXED" => Ok(DiscountKind::Fixed),
            other => Err(DomainError::InvalidInput(format!(
                "unknown discount type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromoCode {
    pub id: Uuid,
    pub code: String,
    pub kind: DiscountKind,
    pub value: BigDecimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub is_active: bool,
    pub max_uses: Option<i32>,
    pub used_count: i32,
}

impl PromoCode {
    /// Whether the code may be selected for a new order at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.valid_from <= now
            && now <= self.valid_to
            && self.max_uses.map_or(true, |cap| self.used_count < cap)
    }

    /// Amount taken off `subtotal`, before clamping the total at zero.
    pub fn discount_on(&self, subtotal: &BigDecimal) -> BigDecimal {
        match self.kind {
            DiscountKind::Fixed => self.value.clone(),
            DiscountKind::Percentage => subtotal * &self.value / BigDecimal::from(100),
        }
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiscountKind::Percentage => write!(f, "{} ({}%)", self.code, self.value),
            DiscountKind::Fixed => write!(f, "{} (${} Fixed)", self.code, self.value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPromoCode {
    pub code: String,
    pub kind: DiscountKind,
    pub value: BigDecimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub is_active: bool,
    pub max_uses: Option<i32>,
}

impl NewPromoCode {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.code.trim().is_empty() {
            errors.add_field("code", "This field is required.");
        }
        if self.value < BigDecimal::zero() {
            errors.add_field("value", "Ensure this value is greater than or equal to 0.");
        } else if self.kind == DiscountKind::Percentage && self.value > BigDecimal::from(100) {
            errors.add_field("value", "A percentage discount cannot exceed 100.");
        }
        if self.valid_to < self.valid_from {
            errors.add_field("valid_to", "End of the validity window is before its start.");
        }
        if matches!(self.max_uses, Some(n) if n < 0) {
            errors.add_field("max_uses", "Ensure this value is greater than or equal to 0.");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn promo(kind: DiscountKind, value: i32) -> PromoCode {
        let now = Utc::now();
        PromoCode {
            id: Uuid::new_v4(),
            code: "VALID20".to_string(),
            kind,
            value: BigDecimal::from(value),
            valid_from: now - Duration::days(1),
            valid_to: now + Duration::days(1),
            is_active: true,
            max_uses: None,
            used_count: 0,
        }
    }

    #[test]
    fn valid_inside_window() {
        assert!(promo(DiscountKind::Percentage, 20).is_valid_at(Utc::now()));
    }

    #[test]
    fn expired_code_is_invalid_even_when_active() {
        let mut p = promo(DiscountKind::Fixed, 50);
        p.valid_from = Utc::now() - Duration::days(2);
        p.valid_to = Utc::now() - Duration::days(1);
        assert!(p.is_active);
        assert!(!p.is_valid_at(Utc::now()));
    }

    #[test]
    fn not_yet_started_is_invalid() {
        let mut p = promo(DiscountKind::Fixed, 50);
        p.valid_from = Utc::now() + Duration::hours(1);
        assert!(!p.is_valid_at(Utc::now()));
    }

    #[test]
    fn inactive_code_is_invalid() {
        let mut p = promo(DiscountKind::Fixed, 50);
        p.is_active = false;
        assert!(!p.is_valid_at(Utc::now()));
    }

    #[test]
    fn usage_cap_is_enforced() {
        let mut p = promo(DiscountKind::Fixed, 50);
        p.max_uses = Some(2);
        p.used_count = 1;
        assert!(p.is_valid_at(Utc::now()));
        p.used_count = 2;
        assert!(!p.is_valid_at(Utc::now()));
    }

    #[test]
    fn percentage_discount() {
        let p = promo(DiscountKind::Percentage, 20);
        assert_eq!(p.discount_on(&BigDecimal::from(200)), BigDecimal::from(40));
    }

    #[test]
    fn fixed_discount_ignores_subtotal() {
        let p = promo(DiscountKind::Fixed, 50);
        assert_eq!(p.discount_on(&BigDecimal::from(30)), BigDecimal::from(50));
    }

    #[test]
    fn display_shows_kind() {
        assert_eq!(promo(DiscountKind::Percentage, 20).to_string(), "VALID20 (20%)");
        assert_eq!(promo(DiscountKind::Fixed, 50).to_string(), "VALID20 ($50 Fixed)");
    }

    #[test]
    fn discount_kind_round_trips_through_str() {
        for kind in [DiscountKind::Percentage, DiscountKind::Fixed] {
            assert_eq!(kind.as_str().parse::<DiscountKind>().unwrap(), kind);
        }
        assert!("HALF".parse::<DiscountKind>().is_err());
    }

    #[test]
    fn new_code_rejects_percent_over_hundred_and_inverted_window() {
        let now = Utc::now();
        let new = NewPromoCode {
            code: "BIG".to_string(),
            kind: DiscountKind::Percentage,
            value: BigDecimal::from(150),
            valid_from: now,
            valid_to: now - Duration::days(1),
            is_active: true,
            max_uses: None,
        };
        let errors = new.validate().unwrap_err();
        assert_eq!(errors.field("value").len(), 1);
        assert_eq!(errors.field("valid_to").len(), 1);
    }
}
