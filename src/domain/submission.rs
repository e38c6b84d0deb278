//! Order submission checks that need no lookups.
//!
//! The form part (address, work date) and the item rows are validated
//! together so that every problem in a submission is reported in one go.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::{ValidationErrors, ROW_ERROR_KEY};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const MIN_ITEMS_MESSAGE: &str = "Please submit at least 1 service.";
pub const MIN_QUANTITY_MESSAGE: &str = "Ensure this value is greater than or equal to 1.";
pub const DUPLICATE_SERVICE_MESSAGE: &str =
    "This service is already in the order; remove the duplicate row or raise its quantity.";

#[derive(Debug, Clone, Default)]
pub struct ItemRow {
    pub service_id: Option<Uuid>,
    pub quantity: Option<i32>,
}

impl ItemRow {
    fn is_blank(&self) -> bool {
        self.service_id.is_none() && self.quantity.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderSubmission {
    /// Only honoured for staff and admins entering an order for a client.
    pub client_id: Option<Uuid>,
    pub address: Option<String>,
    pub work_date: Option<DateTime<Utc>>,
    pub promo_code: Option<String>,
    pub items: Vec<ItemRow>,
}

/// A row that passed the structural checks, tagged with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedRow {
    pub row: usize,
    pub service_id: Uuid,
    pub quantity: i32,
}

impl OrderSubmission {
    /// Promo code with surrounding whitespace removed; blank means none.
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn check_form(&self, errors: &mut ValidationErrors) {
        if self.address.as_deref().map_or(true, |a| a.trim().is_empty()) {
            errors.add_field("address", REQUIRED_MESSAGE);
        }
        if self.work_date.is_none() {
            errors.add_field("work_date", REQUIRED_MESSAGE);
        }
    }

    /// Checks the item rows as a group and returns the rows that can be saved.
    ///
    /// Blank rows are skipped. A missing quantity defaults to 1.
    pub fn check_items(&self, errors: &mut ValidationErrors) -> Vec<AcceptedRow> {
        let mut accepted = Vec::new();
        let mut seen = HashSet::new();
        let mut selected = 0usize;

        for (row, item) in self.items.iter().enumerate() {
            if item.is_blank() {
                continue;
            }
            let Some(service_id) = item.service_id else {
                errors.add_row(row, "service", REQUIRED_MESSAGE);
                continue;
            };
            selected += 1;

            let quantity = item.quantity.unwrap_or(1);
            let mut row_ok = true;
            if quantity < 1 {
                errors.add_row(row, "quantity", MIN_QUANTITY_MESSAGE);
                row_ok = false;
            }
            if !seen.insert(service_id) {
                errors.add_row(row, ROW_ERROR_KEY, DUPLICATE_SERVICE_MESSAGE);
                row_ok = false;
            }
            if row_ok {
                accepted.push(AcceptedRow {
                    row,
                    service_id,
                    quantity,
                });
            }
        }

        if selected == 0 {
            errors.add_non_field(MIN_ITEMS_MESSAGE);
        }
        accepted
    }
}
