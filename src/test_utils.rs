//! In-memory implementations of the repository ports for service tests.
//!
//! Every fake shares one [`Store`], so an order created through
//! `InMemoryOrders` is visible to the catalog's delete protection and a
//! registration through `InMemoryIdentities` can be logged in afterwards.

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::domain::access::{Identity, OrderScope, Principal};
use crate::domain::catalog::{NewServiceType, Service, ServiceDraft, ServiceFilter, ServiceType};
use crate::domain::content::{
    About, Article, ArticleDraft, Faq, PrivacyPolicy, Review, ReviewDraft, ReviewStat, Vacancy,
};
use crate::domain::errors::{DomainError, ValidationErrors};
use crate::domain::identity::{
    Account, Client, ClientProfile, ClientType, NewAccount, NewStaff, Role, Session, Staff,
    StoredCredentials,
};
use crate::domain::order::{
    calculate_total, ListResult, NewOrder, Order, OrderItem, OrderStatus, PaymentStatus,
};
use crate::domain::ports::{
    CatalogRepository, ContentRepository, IdentityRepository, OrderRepository, PromoRepository,
};
use crate::domain::promo::{DiscountKind, NewPromoCode, PromoCode, INVALID_PROMO_MESSAGE};

#[derive(Default)]
pub struct Store {
    pub service_types: Vec<ServiceType>,
    pub services: Vec<Service>,
    pub promos: Vec<PromoCode>,
    pub orders: Vec<Order>,
    pub accounts: Vec<StoredCredentials>,
    pub sessions: Vec<Session>,
    pub clients: Vec<Client>,
    pub staff: Vec<Staff>,
    pub specializations: Vec<(Uuid, Uuid)>,
    pub articles: Vec<Article>,
    pub reviews: Vec<Review>,
    pub faqs: Vec<Faq>,
    pub vacancies: Vec<Vacancy>,
    pub abouts: Vec<About>,
    pub policies: Vec<PrivacyPolicy>,
}

type Shared = Arc<Mutex<Store>>;

fn lock(store: &Shared) -> MutexGuard<'_, Store> {
    store.lock().expect("store lock poisoned")
}

#[derive(Clone)]
pub struct InMemoryCatalog(Shared);
#[derive(Clone)]
pub struct InMemoryPromos(Shared);
#[derive(Clone)]
pub struct InMemoryOrders(Shared);
#[derive(Clone)]
pub struct InMemoryIdentities(Shared);
#[derive(Clone)]
pub struct InMemoryContent(Shared);

pub struct Fixture {
    pub store: Shared,
    pub catalog: InMemoryCatalog,
    pub promos: InMemoryPromos,
    pub orders: InMemoryOrders,
    pub identities: InMemoryIdentities,
    pub content: InMemoryContent,
}

impl Fixture {
    pub fn new() -> Self {
        let store: Shared = Arc::new(Mutex::new(Store::default()));
        Self {
            catalog: InMemoryCatalog(store.clone()),
            promos: InMemoryPromos(store.clone()),
            orders: InMemoryOrders(store.clone()),
            identities: InMemoryIdentities(store.clone()),
            content: InMemoryContent(store.clone()),
            store,
        }
    }

    pub fn add_service(&self, price: &str, active: bool) -> Uuid {
        let id = Uuid::new_v4();
        lock(&self.store).services.push(Service {
            id,
            service_type_id: Uuid::new_v4(),
            name: format!("Service {id}"),
            description: String::new(),
            price: BigDecimal::from_str(price).expect("valid price"),
            notes: None,
            is_active: active,
        });
        id
    }

    /// `days_offset` of 0 gives a code valid now; negative values give a
    /// window that ended that many days ago.
    pub fn add_promo(&self, code: &str, kind: DiscountKind, value: &str, active: bool, days_offset: i64) {
        let now = Utc::now();
        let (valid_from, valid_to) = if days_offset < 0 {
            (now + Duration::days(days_offset - 1), now + Duration::days(days_offset))
        } else {
            (now - Duration::days(1), now + Duration::days(1 + days_offset))
        };
        lock(&self.store).promos.push(PromoCode {
            id: Uuid::new_v4(),
            code: code.to_string(),
            kind,
            value: BigDecimal::from_str(value).expect("valid value"),
            valid_from,
            valid_to,
            is_active: active,
            max_uses: None,
            used_count: 0,
        });
    }

    pub fn add_account(&self, username: &str, role: Role) -> Uuid {
        let id = Uuid::new_v4();
        lock(&self.store).accounts.push(StoredCredentials {
            account: Account {
                id,
                username: username.to_string(),
                email: None,
                first_name: String::new(),
                last_name: String::new(),
                role,
                created_at: Utc::now(),
            },
            password_hash: String::new(),
        });
        id
    }

    pub fn add_client(&self, account_id: Option<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        lock(&self.store).clients.push(Client {
            id,
            account_id,
            name: "Test Client".to_string(),
            contact_person: None,
            contact_number: "+375291234567".to_string(),
            email: None,
            client_type: ClientType::Private,
            address: None,
            timezone: "UTC".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn add_staff(&self, account_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        lock(&self.store).staff.push(Staff {
            id,
            account_id,
            contact_number: "+375291234567".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
            role: Some("Cleaner".to_string()),
            is_active: true,
            timezone: "UTC".to_string(),
        });
        id
    }
}

fn identity(account_id: Uuid, role: Role, client_id: Option<Uuid>, staff_id: Option<Uuid>) -> Identity {
    Identity {
        account_id,
        username: format!("user-{account_id}"),
        role,
        client_id,
        staff_id,
        timezone: Tz::UTC,
    }
}

pub fn admin() -> Principal {
    Principal::Authenticated(identity(Uuid::new_v4(), Role::Admin, None, None))
}

pub fn client_principal(fx: &Fixture) -> (Principal, Uuid) {
    let account_id = fx.add_account(&format!("client-{}", Uuid::new_v4()), Role::Client);
    let client_id = fx.add_client(Some(account_id));
    (
        Principal::Authenticated(identity(account_id, Role::Client, Some(client_id), None)),
        client_id,
    )
}

pub fn staff_principal(fx: &Fixture) -> (Principal, Uuid) {
    let account_id = fx.add_account(&format!("staff-{}", Uuid::new_v4()), Role::Staff);
    let staff_id = fx.add_staff(account_id);
    (
        Principal::Authenticated(identity(account_id, Role::Staff, None, Some(staff_id))),
        staff_id,
    )
}

// ── Catalog ──────────────────────────────────────────────────────────────────

impl InMemoryCatalog {
    pub fn set_price(&self, id: Uuid, price: &str) {
        let mut store = lock(&self.0);
        if let Some(s) = store.services.iter_mut().find(|s| s.id == id) {
            s.price = BigDecimal::from_str(price).expect("valid price");
        }
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn list_service_types(&self) -> Result<Vec<ServiceType>, DomainError> {
        Ok(lock(&self.0).service_types.clone())
    }

    fn create_service_type(&self, new: NewServiceType) -> Result<ServiceType, DomainError> {
        let mut store = lock(&self.0);
        if store.service_types.iter().any(|t| t.name == new.name) {
            return Err(DomainError::Conflict("service type name taken".to_string()));
        }
        let st = ServiceType {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
        };
        store.service_types.push(st.clone());
        Ok(st)
    }

    fn delete_service_type(&self, id: Uuid) -> Result<(), DomainError> {
        let mut store = lock(&self.0);
        if store.services.iter().any(|s| s.service_type_id == id) {
            return Err(DomainError::Conflict("service type is in use".to_string()));
        }
        let before = store.service_types.len();
        store.service_types.retain(|t| t.id != id);
        if store.service_types.len() == before {
            return Err(DomainError::NotFound("Service type"));
        }
        Ok(())
    }

    fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>, DomainError> {
        Ok(lock(&self.0)
            .services
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }

    fn find_services(&self, ids: &[Uuid]) -> Result<Vec<Service>, DomainError> {
        Ok(lock(&self.0)
            .services
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    fn create_service(&self, draft: ServiceDraft) -> Result<Service, DomainError> {
        let mut store = lock(&self.0);
        if !store.service_types.iter().any(|t| t.id == draft.service_type_id) {
            return Err(DomainError::Conflict("unknown service type".to_string()));
        }
        let service = Service {
            id: Uuid::new_v4(),
            service_type_id: draft.service_type_id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            notes: draft.notes,
            is_active: draft.is_active,
        };
        store.services.push(service.clone());
        Ok(service)
    }

    fn update_service(&self, id: Uuid, draft: ServiceDraft) -> Result<Service, DomainError> {
        let mut store = lock(&self.0);
        let service = store
            .services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DomainError::NotFound("Service"))?;
        service.service_type_id = draft.service_type_id;
        service.name = draft.name;
        service.description = draft.description;
        service.price = draft.price;
        service.notes = draft.notes;
        service.is_active = draft.is_active;
        Ok(service.clone())
    }

    fn delete_service(&self, id: Uuid) -> Result<(), DomainError> {
        let mut store = lock(&self.0);
        let referenced = store
            .orders
            .iter()
            .any(|o| o.items.iter().any(|i| i.service_id == id));
        if referenced {
            return Err(DomainError::Conflict("service is referenced by orders".to_string()));
        }
        let before = store.services.len();
        store.services.retain(|s| s.id != id);
        if store.services.len() == before {
            return Err(DomainError::NotFound("Service"));
        }
        Ok(())
    }
}

// ── Promotion ────────────────────────────────────────────────────────────────

impl InMemoryPromos {
    pub fn used_count(&self, code: &str) -> i32 {
        lock(&self.0)
            .promos
            .iter()
            .find(|p| p.code == code)
            .map_or(0, |p| p.used_count)
    }
}

impl PromoRepository for InMemoryPromos {
    fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, DomainError> {
        Ok(lock(&self.0).promos.iter().find(|p| p.code == code).cloned())
    }

    fn list_active(&self) -> Result<Vec<PromoCode>, DomainError> {
        Ok(lock(&self.0)
            .promos
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }

    fn create(&self, new: NewPromoCode) -> Result<PromoCode, DomainError> {
        let mut store = lock(&self.0);
        if store.promos.iter().any(|p| p.code == new.code) {
            return Err(DomainError::Conflict("promo code taken".to_string()));
        }
        let promo = PromoCode {
            id: Uuid::new_v4(),
            code: new.code,
            kind: new.kind,
            value: new.value,
            valid_from: new.valid_from,
            valid_to: new.valid_to,
            is_active: new.is_active,
            max_uses: new.max_uses,
            used_count: 0,
        };
        store.promos.push(promo.clone());
        Ok(promo)
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

impl InMemoryOrders {
    pub fn count(&self) -> usize {
        lock(&self.0).orders.len()
    }
}

fn recompute(order: &mut Order) {
    order.total_amount = calculate_total(&order.items, order.promo_code.as_ref());
    order.updated_at = Utc::now();
}

impl OrderRepository for InMemoryOrders {
    fn create(&self, new: NewOrder) -> Result<Uuid, DomainError> {
        let mut store = lock(&self.0);
        let promo = match new.promo_code_id {
            Some(pid) => {
                let promo = store
                    .promos
                    .iter_mut()
                    .find(|p| p.id == pid)
                    .filter(|p| p.is_valid_at(new.placed_at))
                    .ok_or_else(|| {
                        let mut errors = ValidationErrors::default();
                        errors.add_field("promo_code", INVALID_PROMO_MESSAGE);
                        DomainError::from(errors)
                    })?;
                promo.used_count += 1;
                Some(promo.clone())
            }
            None => None,
        };
        let now = Utc::now();
        let mut order = Order {
            id: Uuid::new_v4(),
            client_id: new.client_id,
            address: new.address,
            work_date: new.work_date,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            total_amount: BigDecimal::from(0),
            created_by: new.created_by,
            assigned_staff: vec![],
            promo_code: promo,
            items: new
                .items
                .into_iter()
                .map(|i| OrderItem {
                    id: Uuid::new_v4(),
                    service_id: i.service_id,
                    quantity: i.quantity,
                    price_at_order: i.price_at_order,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        recompute(&mut order);
        let id = order.id;
        store.orders.push(order);
        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(lock(&self.0).orders.iter().find(|o| o.id == id).cloned())
    }

    fn list(&self, scope: OrderScope, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let store = lock(&self.0);
        let visible: Vec<Order> = store
            .orders
            .iter()
            .rev()
            .filter(|o| scope.permits(o))
            .cloned()
            .collect();
        let total = visible.len() as i64;
        let items = visible
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(limit) as usize)
            .take(limit as usize)
            .collect();
        Ok(ListResult { items, total })
    }

    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError> {
        let mut store = lock(&self.0);
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DomainError::NotFound("Order"))?;
        order.status = status;
        recompute(order);
        Ok(())
    }

    fn mark_paid(&self, ids: &[Uuid]) -> Result<usize, DomainError> {
        let mut store = lock(&self.0);
        let mut updated = 0;
        for order in store.orders.iter_mut().filter(|o| ids.contains(&o.id)) {
            if order.payment_status == PaymentStatus::Unpaid {
                order.payment_status = PaymentStatus::Paid;
                updated += 1;
            }
        }
        Ok(updated)
    }

    fn set_assigned_staff(&self, id: Uuid, staff_ids: &[Uuid]) -> Result<(), DomainError> {
        let mut store = lock(&self.0);
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DomainError::NotFound("Order"))?;
        order.assigned_staff = staff_ids.to_vec();
        Ok(())
    }

    fn set_promo_code(&self, id: Uuid, promo_id: Option<Uuid>) -> Result<BigDecimal, DomainError> {
        let mut store = lock(&self.0);
        let promo = promo_id.and_then(|pid| store.promos.iter().find(|p| p.id == pid).cloned());
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DomainError::NotFound("Order"))?;
        order.promo_code = promo;
        recompute(order);
        Ok(order.total_amount.clone())
    }

    fn recalculate_totals(&self, ids: &[Uuid]) -> Result<usize, DomainError> {
        let mut store = lock(&self.0);
        let mut count = 0;
        for order in store.orders.iter_mut().filter(|o| ids.contains(&o.id)) {
            recompute(order);
            count += 1;
        }
        Ok(count)
    }
}

// ── Identity ─────────────────────────────────────────────────────────────────

fn profile_timezone(name: &str) -> Tz {
    name.parse().unwrap_or(Tz::UTC)
}

impl IdentityRepository for InMemoryIdentities {
    fn register(&self, account: NewAccount, profile: ClientProfile) -> Result<(Account, Client), DomainError> {
        let mut store = lock(&self.0);
        if store.accounts.iter().any(|a| a.account.username == account.username) {
            return Err(DomainError::Conflict("username taken".to_string()));
        }
        let now = Utc::now();
        let stored = Account {
            id: Uuid::new_v4(),
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            role: account.role,
            created_at: now,
        };
        let client = Client {
            id: Uuid::new_v4(),
            account_id: Some(stored.id),
            name: profile.name,
            contact_person: profile.contact_person,
            contact_number: profile.contact_number,
            email: profile.email,
            client_type: profile.client_type,
            address: profile.address,
            timezone: profile.timezone,
            created_at: now,
            updated_at: now,
        };
        store.accounts.push(StoredCredentials {
            account: stored.clone(),
            password_hash: account.password_hash,
        });
        store.clients.push(client.clone());
        Ok((stored, client))
    }

    fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        Ok(lock(&self.0)
            .accounts
            .iter()
            .any(|a| a.account.email.as_deref() == Some(email)))
    }

    fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>, DomainError> {
        Ok(lock(&self.0)
            .accounts
            .iter()
            .find(|a| a.account.username == username)
            .cloned())
    }

    fn create_session(&self, account_id: Uuid, expires_at: DateTime<Utc>) -> Result<Session, DomainError> {
        let session = Session {
            token: Uuid::new_v4(),
            account_id,
            expires_at,
        };
        lock(&self.0).sessions.push(session.clone());
        Ok(session)
    }

    fn delete_session(&self, token: Uuid) -> Result<(), DomainError> {
        lock(&self.0).sessions.retain(|s| s.token != token);
        Ok(())
    }

    fn resolve_session(&self, token: Uuid, now: DateTime<Utc>) -> Result<Option<Identity>, DomainError> {
        let store = lock(&self.0);
        let Some(session) = store
            .sessions
            .iter()
            .find(|s| s.token == token && s.expires_at > now)
        else {
            return Ok(None);
        };
        let Some(account) = store
            .accounts
            .iter()
            .find(|a| a.account.id == session.account_id)
            .map(|a| &a.account)
        else {
            return Ok(None);
        };
        let client = store.clients.iter().find(|c| c.account_id == Some(account.id));
        let staff = store.staff.iter().find(|s| s.account_id == account.id);
        let timezone = staff
            .map(|s| profile_timezone(&s.timezone))
            .or_else(|| client.map(|c| profile_timezone(&c.timezone)))
            .unwrap_or(Tz::UTC);
        Ok(Some(Identity {
            account_id: account.id,
            username: account.username.clone(),
            role: account.role,
            client_id: client.map(|c| c.id),
            staff_id: staff.map(|s| s.id),
            timezone,
        }))
    }

    fn find_client(&self, id: Uuid) -> Result<Option<Client>, DomainError> {
        Ok(lock(&self.0).clients.iter().find(|c| c.id == id).cloned())
    }

    fn find_client_by_account(&self, account_id: Uuid) -> Result<Option<Client>, DomainError> {
        Ok(lock(&self.0)
            .clients
            .iter()
            .find(|c| c.account_id == Some(account_id))
            .cloned())
    }

    fn update_client(&self, id: Uuid, profile: ClientProfile) -> Result<Client, DomainError> {
        let mut store = lock(&self.0);
        let client = store
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::NotFound("Client"))?;
        client.name = profile.name;
        client.contact_person = profile.contact_person;
        client.contact_number = profile.contact_number;
        client.email = profile.email;
        client.client_type = profile.client_type;
        client.address = profile.address;
        client.timezone = profile.timezone;
        client.updated_at = Utc::now();
        Ok(client.clone())
    }

    fn delete_client(&self, id: Uuid) -> Result<(), DomainError> {
        let mut store = lock(&self.0);
        if store.orders.iter().any(|o| o.client_id == id) {
            return Err(DomainError::Conflict("client has orders".to_string()));
        }
        let client = store
            .clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(DomainError::NotFound("Client"))?;
        store.clients.retain(|c| c.id != id);
        if let Some(account_id) = client.account_id {
            store.accounts.retain(|a| a.account.id != account_id);
            store.sessions.retain(|s| s.account_id != account_id);
        }
        Ok(())
    }

    fn find_account(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(lock(&self.0)
            .accounts
            .iter()
            .find(|a| a.account.id == id)
            .map(|a| a.account.clone()))
    }

    fn create_staff(&self, new: NewStaff) -> Result<Staff, DomainError> {
        let mut store = lock(&self.0);
        if store.staff.iter().any(|s| s.account_id == new.account_id) {
            return Err(DomainError::Conflict("account already has a staff profile".to_string()));
        }
        let account = store
            .accounts
            .iter_mut()
            .find(|a| a.account.id == new.account_id)
            .ok_or(DomainError::NotFound("Account"))?;
        if account.account.role == Role::Client {
            account.account.role = Role::Staff;
        }
        let staff = Staff {
            id: Uuid::new_v4(),
            account_id: new.account_id,
            contact_number: new.contact_number,
            hire_date: new.hire_date,
            role: new.role,
            is_active: true,
            timezone: new.timezone,
        };
        store.staff.push(staff.clone());
        Ok(staff)
    }

    fn find_staff(&self, ids: &[Uuid]) -> Result<Vec<Staff>, DomainError> {
        Ok(lock(&self.0)
            .staff
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    fn add_specialization(&self, staff_id: Uuid, service_id: Uuid) -> Result<(), DomainError> {
        let mut store = lock(&self.0);
        if store.specializations.contains(&(staff_id, service_id)) {
            return Err(DomainError::Conflict("specialization already exists".to_string()));
        }
        store.specializations.push((staff_id, service_id));
        Ok(())
    }

    fn remove_specialization(&self, staff_id: Uuid, service_id: Uuid) -> Result<(), DomainError> {
        lock(&self.0)
            .specializations
            .retain(|pair| *pair != (staff_id, service_id));
        Ok(())
    }

    fn specializations(&self, staff_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(lock(&self.0)
            .specializations
            .iter()
            .filter(|(s, _)| *s == staff_id)
            .map(|(_, service)| *service)
            .collect())
    }

    fn delete_staff(&self, id: Uuid) -> Result<(), DomainError> {
        let mut store = lock(&self.0);
        let referenced = store
            .orders
            .iter()
            .any(|o| o.created_by == Some(id) || o.assigned_staff.contains(&id));
        if referenced {
            return Err(DomainError::Conflict("staff member is referenced by orders".to_string()));
        }
        store.staff.retain(|s| s.id != id);
        store.specializations.retain(|(s, _)| *s != id);
        Ok(())
    }
}

// ── Content ──────────────────────────────────────────────────────────────────

impl InMemoryContent {
    fn author_name(store: &Store, author_id: Uuid) -> String {
        store
            .accounts
            .iter()
            .find(|a| a.account.id == author_id)
            .map(|a| a.account.username.clone())
            .unwrap_or_default()
    }
}

impl ContentRepository for InMemoryContent {
    fn list_articles(&self) -> Result<Vec<Article>, DomainError> {
        let mut articles = lock(&self.0).articles.clone();
        articles.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
        Ok(articles)
    }

    fn find_article(&self, id: Uuid) -> Result<Option<Article>, DomainError> {
        Ok(lock(&self.0).articles.iter().find(|a| a.id == id).cloned())
    }

    fn create_article(&self, author_id: Uuid, draft: ArticleDraft) -> Result<Article, DomainError> {
        let mut store = lock(&self.0);
        let article = Article {
            id: Uuid::new_v4(),
            title: draft.title,
            author_id,
            author_name: Self::author_name(&store, author_id),
            img: draft.img,
            summary: draft.summary,
            content: draft.content,
            publication_date: Utc::now(),
        };
        store.articles.push(article.clone());
        Ok(article)
    }

    fn list_faqs(&self) -> Result<Vec<Faq>, DomainError> {
        Ok(lock(&self.0).faqs.clone())
    }

    fn create_faq(&self, question: String, answer: String) -> Result<Faq, DomainError> {
        let faq = Faq {
            id: Uuid::new_v4(),
            question,
            answer,
            answer_date: Utc::now(),
        };
        lock(&self.0).faqs.push(faq.clone());
        Ok(faq)
    }

    fn list_vacancies(&self) -> Result<Vec<Vacancy>, DomainError> {
        Ok(lock(&self.0).vacancies.clone())
    }

    fn create_vacancy(
        &self,
        job_title: String,
        job_description: String,
        job_type_id: Option<Uuid>,
    ) -> Result<Vacancy, DomainError> {
        let vacancy = Vacancy {
            id: Uuid::new_v4(),
            job_title,
            job_description,
            job_type_id,
        };
        lock(&self.0).vacancies.push(vacancy.clone());
        Ok(vacancy)
    }

    fn latest_about(&self) -> Result<Option<About>, DomainError> {
        Ok(lock(&self.0).abouts.last().cloned())
    }

    fn publish_about(
        &self,
        logo: Option<String>,
        history: Option<String>,
        contact_info: String,
    ) -> Result<About, DomainError> {
        let about = About {
            id: Uuid::new_v4(),
            logo,
            history,
            contact_info,
            created_at: Utc::now(),
        };
        lock(&self.0).abouts.push(about.clone());
        Ok(about)
    }

    fn latest_privacy_policy(&self) -> Result<Option<PrivacyPolicy>, DomainError> {
        Ok(lock(&self.0).policies.last().cloned())
    }

    fn publish_privacy_policy(&self, policy_content: String) -> Result<PrivacyPolicy, DomainError> {
        let policy = PrivacyPolicy {
            id: Uuid::new_v4(),
            policy_content,
            created_at: Utc::now(),
        };
        lock(&self.0).policies.push(policy.clone());
        Ok(policy)
    }

    fn list_reviews(&self) -> Result<Vec<Review>, DomainError> {
        Ok(lock(&self.0).reviews.clone())
    }

    fn find_review(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        Ok(lock(&self.0).reviews.iter().find(|r| r.id == id).cloned())
    }

    fn create_review(&self, author_id: Uuid, draft: ReviewDraft) -> Result<Review, DomainError> {
        let mut store = lock(&self.0);
        let review = Review {
            id: Uuid::new_v4(),
            title: draft.title,
            author_id,
            author_name: Self::author_name(&store, author_id),
            content: draft.content,
            publication_date: Utc::now(),
            score: draft.score,
        };
        store.reviews.push(review.clone());
        Ok(review)
    }

    fn update_review(&self, id: Uuid, draft: ReviewDraft) -> Result<Review, DomainError> {
        let mut store = lock(&self.0);
        let review = store
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::NotFound("Review"))?;
        review.title = draft.title;
        review.content = draft.content;
        review.score = draft.score;
        Ok(review.clone())
    }

    fn delete_review(&self, id: Uuid) -> Result<(), DomainError> {
        lock(&self.0).reviews.retain(|r| r.id != id);
        Ok(())
    }

    fn review_stats(&self) -> Result<Vec<ReviewStat>, DomainError> {
        let store = lock(&self.0);
        Ok(store
            .accounts
            .iter()
            .map(|a| ReviewStat {
                username: a.account.username.clone(),
                review_count: store
                    .reviews
                    .iter()
                    .filter(|r| r.author_id == a.account.id)
                    .count() as i64,
            })
            .collect())
    }
}

pub fn promo_draft(code: &str, kind: DiscountKind, value: i32) -> NewPromoCode {
    NewPromoCode {
        code: code.to_string(),
        kind,
        value: BigDecimal::from(value),
        valid_from: Utc::now() - Duration::days(1),
        valid_to: Utc::now() + Duration::days(7),
        is_active: true,
        max_uses: None,
    }
}
