use std::collections::{HashMap, HashSet};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::errors::{DomainError, ValidationErrors};
use crate::domain::identity::Role;
use crate::domain::order::{ListResult, NewOrder, NewOrderItem, Order, OrderStatus};
use crate::domain::ports::{CatalogRepository, IdentityRepository, OrderRepository, PromoRepository};
use crate::domain::promo::{PromoCode, INVALID_PROMO_MESSAGE};
use crate::domain::submission::{AcceptedRow, OrderSubmission, REQUIRED_MESSAGE};

pub const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

pub struct OrderService<O, C, P, I> {
    orders: O,
    catalog: C,
    promos: P,
    identities: I,
}

impl<O, C, P, I> OrderService<O, C, P, I>
where
    O: OrderRepository,
    C: CatalogRepository,
    P: PromoRepository,
    I: IdentityRepository,
{
    pub fn new(orders: O, catalog: C, promos: P, identities: I) -> Self {
        Self {
            orders,
            catalog,
            promos,
            identities,
        }
    }

    /// Validates the whole submission, then stores the order and its items
    /// at current catalog prices.
    pub fn create_order(
        &self,
        principal: &Principal,
        submission: OrderSubmission,
        now: DateTime<Utc>,
    ) -> Result<Uuid, DomainError> {
        let identity = principal.require_identity()?;

        let mut errors = ValidationErrors::default();
        submission.check_form(&mut errors);
        let rows = submission.check_items(&mut errors);

        let (client_id, created_by) = match identity.role {
            Role::Client => (Some(identity.client_id.ok_or(DomainError::Forbidden)?), None),
            Role::Staff | Role::Admin => {
                (self.check_client(submission.client_id, &mut errors)?, identity.staff_id)
            }
        };
        let promo = self.check_promo(submission.promo_code(), now, &mut errors)?;
        let items = self.price_rows(&rows, &mut errors)?;

        errors.into_result()?;
        let Some(client_id) = client_id else {
            return Err(DomainError::Internal("order owner missing".to_string()));
        };
        let (Some(address), Some(work_date)) = (submission.address, submission.work_date) else {
            return Err(DomainError::Internal("order form fields missing".to_string()));
        };

        let order_id = self.orders.create(NewOrder {
            client_id,
            address: address.trim().to_string(),
            work_date,
            created_by,
            promo_code_id: promo.as_ref().map(|p| p.id),
            items,
            placed_at: now,
        })?;

        log::info!(
            "Order {} created for client {} by {}",
            order_id,
            client_id,
            identity.username
        );
        Ok(order_id)
    }

    pub fn list_orders(
        &self,
        principal: &Principal,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        self.orders
            .list(principal.order_scope(), page.max(1), limit.clamp(1, 100))
    }

    /// Orders outside the caller's scope read as missing.
    pub fn get_order(&self, principal: &Principal, id: Uuid) -> Result<Option<Order>, DomainError> {
        let scope = principal.order_scope();
        Ok(self.orders.find_by_id(id)?.filter(|o| scope.permits(o)))
    }

    pub fn update_status(
        &self,
        principal: &Principal,
        id: Uuid,
        next: OrderStatus,
    ) -> Result<(), DomainError> {
        principal.require_staff_or_admin()?;
        let order = self
            .get_order(principal, id)?
            .ok_or(DomainError::NotFound("Order"))?;
        if !order.status.can_transition_to(next) {
            return Err(DomainError::Conflict(format!(
                "order cannot move from {} to {}",
                order.status.as_str(),
                next.as_str()
            )));
        }
        self.orders.update_status(id, next)?;
        log::info!(
            "Order {} status {} -> {}",
            id,
            order.status.as_str(),
            next.as_str()
        );
        Ok(())
    }

    pub fn mark_paid(&self, principal: &Principal, ids: &[Uuid]) -> Result<usize, DomainError> {
        principal.require_admin()?;
        let updated = self.orders.mark_paid(ids)?;
        log::info!("Marked {} orders as paid", updated);
        Ok(updated)
    }

    pub fn assign_staff(
        &self,
        principal: &Principal,
        id: Uuid,
        staff_ids: &[Uuid],
    ) -> Result<(), DomainError> {
        principal.require_admin()?;
        if self.orders.find_by_id(id)?.is_none() {
            return Err(DomainError::NotFound("Order"));
        }

        let mut unique = Vec::with_capacity(staff_ids.len());
        let mut seen = HashSet::new();
        for staff_id in staff_ids {
            if seen.insert(*staff_id) {
                unique.push(*staff_id);
            }
        }
        let known: HashSet<Uuid> = self
            .identities
            .find_staff(&unique)?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let mut errors = ValidationErrors::default();
        for staff_id in unique.iter().filter(|s| !known.contains(s)) {
            errors.add_field("assigned_staff", format!("Unknown staff member {staff_id}."));
        }
        errors.into_result()?;

        self.orders.set_assigned_staff(id, &unique)
    }

    /// Replaces the order's promo code and returns the recomputed total.
    pub fn change_promo(
        &self,
        principal: &Principal,
        id: Uuid,
        code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<BigDecimal, DomainError> {
        principal.require_admin()?;
        if self.orders.find_by_id(id)?.is_none() {
            return Err(DomainError::NotFound("Order"));
        }
        let mut errors = ValidationErrors::default();
        let promo = self.check_promo(code.map(str::trim).filter(|c| !c.is_empty()), now, &mut errors)?;
        errors.into_result()?;
        self.orders.set_promo_code(id, promo.map(|p| p.id))
    }

    pub fn recalculate_totals(&self, principal: &Principal, ids: &[Uuid]) -> Result<usize, DomainError> {
        principal.require_admin()?;
        let count = self.orders.recalculate_totals(ids)?;
        log::info!("Recalculated totals for {} orders", count);
        Ok(count)
    }

    fn check_client(
        &self,
        client_id: Option<Uuid>,
        errors: &mut ValidationErrors,
    ) -> Result<Option<Uuid>, DomainError> {
        let Some(client_id) = client_id else {
            errors.add_field("client_id", REQUIRED_MESSAGE);
            return Ok(None);
        };
        if self.identities.find_client(client_id)?.is_none() {
            errors.add_field("client_id", INVALID_CHOICE_MESSAGE);
            return Ok(None);
        }
        Ok(Some(client_id))
    }

    fn check_promo(
        &self,
        code: Option<&str>,
        now: DateTime<Utc>,
        errors: &mut ValidationErrors,
    ) -> Result<Option<PromoCode>, DomainError> {
        let Some(code) = code else {
            return Ok(None);
        };
        match self.promos.find_by_code(code)? {
            Some(promo) if promo.is_valid_at(now) => Ok(Some(promo)),
            _ => {
                errors.add_field("promo_code", INVALID_PROMO_MESSAGE);
                Ok(None)
            }
        }
    }

    fn price_rows(
        &self,
        rows: &[AcceptedRow],
        errors: &mut ValidationErrors,
    ) -> Result<Vec<NewOrderItem>, DomainError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.service_id).collect();
        let services: HashMap<Uuid, _> = self
            .catalog
            .find_services(&ids)?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            match services.get(&row.service_id) {
                Some(service) if service.is_active => items.push(NewOrderItem {
                    service_id: service.id,
                    quantity: row.quantity,
                    price_at_order: service.price.clone(),
                }),
                _ => errors.add_row(row.row, "service", INVALID_CHOICE_MESSAGE),
            }
        }
        Ok(items)
    }
}
