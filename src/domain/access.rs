use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use super::errors::DomainError;
use super::identity::Role;
use super::order::Order;

/// Authenticated caller, resolved once per request from the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub account_id: Uuid,
    pub username: String,
    pub role: Role,
    pub client_id: Option<Uuid>,
    pub staff_id: Option<Uuid>,
    pub timezone: Tz,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Principal {
    Anonymous,
    Authenticated(Identity),
}

impl Principal {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated(identity) => Some(identity),
        }
    }

    pub fn require_identity(&self) -> Result<&Identity, DomainError> {
        self.identity().ok_or(DomainError::Unauthorized)
    }

    pub fn require_admin(&self) -> Result<&Identity, DomainError> {
        let identity = self.require_identity()?;
        if identity.role == Role::Admin {
            Ok(identity)
        } else {
            Err(DomainError::Forbidden)
        }
    }

    pub fn require_staff_or_admin(&self) -> Result<&Identity, DomainError> {
        let identity = self.require_identity()?;
        match identity.role {
            Role::Admin | Role::Staff => Ok(identity),
            Role::Client => Err(DomainError::Forbidden),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.identity().map_or(Tz::UTC, |i| i.timezone)
    }

    /// Render `at` in the caller's own timezone.
    pub fn local_time(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.timezone()).to_rfc3339()
    }

    /// Which orders this principal may read.
    pub fn order_scope(&self) -> OrderScope {
        let Some(identity) = self.identity() else {
            return OrderScope::Nothing;
        };
        match identity.role {
            Role::Admin => OrderScope::All,
            Role::Staff => identity
                .staff_id
                .map_or(OrderScope::Nothing, OrderScope::Staff),
            Role::Client => identity
                .client_id
                .map_or(OrderScope::Nothing, OrderScope::Client),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    All,
    /// Orders the staff member created or is assigned to.
    Staff(Uuid),
    Client(Uuid),
    Nothing,
}

impl OrderScope {
    pub fn permits(&self, order: &Order) -> bool {
        match *self {
            OrderScope::All => true,
            OrderScope::Staff(staff_id) => {
                order.created_by == Some(staff_id) || order.assigned_staff.contains(&staff_id)
            }
            OrderScope::Client(client_id) => order.client_id == client_id,
            OrderScope::Nothing => false,
        }
    }
}
