use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::access::OrderScope;
use crate::domain::errors::{DomainError, ValidationErrors};
use crate::domain::order::{
    calculate_total, ListResult, NewOrder, Order, OrderItem, OrderStatus, PaymentStatus,
};
use crate::domain::ports::OrderRepository;
use crate::domain::promo::{PromoCode, INVALID_PROMO_MESSAGE};
use crate::schema::{order_assignments, order_items, orders, promo_codes};

use super::models::{NewOrderRow, OrderAssignmentRow, OrderItemRow, OrderRow, PromoCodeRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Orders visible under `scope`, or `None` when nothing is.
fn scoped(scope: OrderScope) -> Option<orders::BoxedQuery<'static, Pg>> {
    let query = orders::table.into_boxed();
    match scope {
        OrderScope::All => Some(query),
        OrderScope::Client(client_id) => Some(query.filter(orders::client_id.eq(client_id))),
        OrderScope::Staff(staff_id) => Some(
            query.filter(
                orders::created_by.eq(staff_id).or(orders::id.eq_any(
                    order_assignments::table
                        .filter(order_assignments::staff_id.eq(staff_id))
                        .select(order_assignments::order_id),
                )),
            ),
        ),
        OrderScope::Nothing => None,
    }
}

/// Attaches items, assignments and promo codes to a page of order rows.
fn hydrate(conn: &mut PgConnection, rows: Vec<OrderRow>) -> Result<Vec<Order>, DomainError> {
    let items = OrderItemRow::belonging_to(&rows)
        .select(OrderItemRow::as_select())
        .load(conn)?
        .grouped_by(&rows);
    let assignments = OrderAssignmentRow::belonging_to(&rows)
        .select(OrderAssignmentRow::as_select())
        .load(conn)?
        .grouped_by(&rows);

    let promo_ids: Vec<Uuid> = rows.iter().filter_map(|r| r.promo_code_id).collect();
    let promos: HashMap<Uuid, PromoCode> = promo_codes::table
        .filter(promo_codes::id.eq_any(&promo_ids))
        .select(PromoCodeRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|row| PromoCode::try_from(row).map(|p| (p.id, p)))
        .collect::<Result<_, _>>()?;

    rows.into_iter()
        .zip(items)
        .zip(assignments)
        .map(|((row, items), assignments)| {
            Ok(Order {
                id: row.id,
                client_id: row.client_id,
                address: row.address,
                work_date: row.work_date,
                status: row.status.parse()?,
                payment_status: row.payment_status.parse()?,
                total_amount: row.total_amount,
                created_by: row.created_by,
                assigned_staff: assignments.into_iter().map(|a| a.staff_id).collect(),
                promo_code: row.promo_code_id.and_then(|id| promos.get(&id).cloned()),
                items: items.into_iter().map(OrderItem::from).collect(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        })
        .collect()
}

/// Recomputes and stores the total from the order's current items and promo.
fn store_total(conn: &mut PgConnection, order_id: Uuid) -> Result<BigDecimal, DomainError> {
    let promo_id: Option<Uuid> = orders::table
        .find(order_id)
        .select(orders::promo_code_id)
        .first(conn)
        .optional()?
        .ok_or(DomainError::NotFound("Order"))?;
    let items: Vec<OrderItem> = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .select(OrderItemRow::as_select())
        .load(conn)?
        .into_iter()
        .map(OrderItem::from)
        .collect();
    let promo = match promo_id {
        Some(id) => Some(PromoCode::try_from(
            promo_codes::table
                .find(id)
                .select(PromoCodeRow::as_select())
                .first(conn)?,
        )?),
        None => None,
    };

    let total = calculate_total(&items, promo.as_ref());
    diesel::update(orders::table.find(order_id))
        .set((
            orders::total_amount.eq(total.clone()),
            orders::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;
    Ok(total)
}

fn promo_no_longer_valid() -> DomainError {
    let mut errors = ValidationErrors::default();
    errors.add_field("promo_code", INVALID_PROMO_MESSAGE);
    errors.into()
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, new: NewOrder) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Count the promo usage, only while the code is still usable.
            let promo = match new.promo_code_id {
                Some(promo_id) => {
                    let row = diesel::update(
                        promo_codes::table
                            .find(promo_id)
                            .filter(promo_codes::is_active.eq(true))
                            .filter(promo_codes::valid_from.le(new.placed_at))
                            .filter(promo_codes::valid_to.ge(new.placed_at))
                            .filter(
                                promo_codes::max_uses.is_null().or(promo_codes::used_count
                                    .lt(promo_codes::max_uses.assume_not_null())),
                            ),
                    )
                    .set(promo_codes::used_count.eq(promo_codes::used_count + 1))
                    .returning(PromoCodeRow::as_returning())
                    .get_result(conn)
                    .optional()?
                    .ok_or_else(promo_no_longer_valid)?;
                    Some(PromoCode::try_from(row)?)
                }
                None => None,
            };

            // 2. Insert the order with its total already computed
            let order_id = Uuid::new_v4();
            let items: Vec<OrderItemRow> = new
                .items
                .into_iter()
                .map(|i| OrderItemRow {
                    id: Uuid::new_v4(),
                    order_id,
                    service_id: i.service_id,
                    quantity: i.quantity,
                    price_at_order: i.price_at_order,
                })
                .collect();
            let priced: Vec<OrderItem> = items.iter().cloned().map(OrderItem::from).collect();

            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    client_id: new.client_id,
                    address: new.address,
                    work_date: new.work_date,
                    status: OrderStatus::Pending.as_str().to_string(),
                    payment_status: PaymentStatus::Unpaid.as_str().to_string(),
                    total_amount: calculate_total(&priced, promo.as_ref()),
                    created_by: new.created_by,
                    promo_code_id: new.promo_code_id,
                })
                .execute(conn)?;

            // 3. Items, each carrying the price captured at submission
            diesel::insert_into(order_items::table)
                .values(&items)
                .execute(conn)?;

            Ok(order_id)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };
        Ok(hydrate(&mut conn, vec![order])?.pop())
    }

    fn list(&self, scope: OrderScope, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let (Some(count_query), Some(page_query)) = (scoped(scope), scoped(scope)) else {
            return Ok(ListResult {
                items: vec![],
                total: 0,
            });
        };
        let mut conn = self.pool.get()?;

        let offset = page.saturating_sub(1).saturating_mul(limit);
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = count_query.count().get_result(conn)?;

            let rows = page_query
                .select(OrderRow::as_select())
                .order((orders::created_at.desc(), orders::id.asc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: hydrate(conn, rows)?,
                total,
            })
        })
    }

    fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let updated = diesel::update(orders::table.find(id))
            .set((
                orders::status.eq(status.as_str()),
                orders::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(DomainError::NotFound("Order"));
        }
        Ok(())
    }

    fn mark_paid(&self, ids: &[Uuid]) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let updated = diesel::update(
            orders::table
                .filter(orders::id.eq_any(ids))
                .filter(orders::payment_status.eq(PaymentStatus::Unpaid.as_str())),
        )
        .set((
            orders::payment_status.eq(PaymentStatus::Paid.as_str()),
            orders::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;
        Ok(updated)
    }

    fn set_assigned_staff(&self, id: Uuid, staff_ids: &[Uuid]) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let exists: i64 = orders::table.find(id).count().get_result(conn)?;
            if exists == 0 {
                return Err(DomainError::NotFound("Order"));
            }
            diesel::delete(order_assignments::table.filter(order_assignments::order_id.eq(id)))
                .execute(conn)?;
            let rows: Vec<OrderAssignmentRow> = staff_ids
                .iter()
                .map(|&staff_id| OrderAssignmentRow {
                    order_id: id,
                    staff_id,
                })
                .collect();
            diesel::insert_into(order_assignments::table)
                .values(&rows)
                .execute(conn)?;
            Ok(())
        })
    }

    fn set_promo_code(&self, id: Uuid, promo_id: Option<Uuid>) -> Result<BigDecimal, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let updated = diesel::update(orders::table.find(id))
                .set(orders::promo_code_id.eq(promo_id))
                .execute(conn)?;
            if updated == 0 {
                return Err(DomainError::NotFound("Order"));
            }
            store_total(conn, id)
        })
    }

    fn recalculate_totals(&self, ids: &[Uuid]) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let existing: Vec<Uuid> = orders::table
                .filter(orders::id.eq_any(ids))
                .select(orders::id)
                .load(conn)?;
            for id in &existing {
                store_total(conn, *id)?;
            }
            Ok(existing.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::{Duration, Utc};
    use diesel::prelude::*;
    use uuid::Uuid;

    use super::DieselOrderRepository;
    use crate::domain::access::OrderScope;
    use crate::domain::errors::DomainError;
    use crate::domain::order::{NewOrder, NewOrderItem, OrderStatus, PaymentStatus};
    use crate::domain::ports::{IdentityRepository, OrderRepository, PromoRepository};
    use crate::domain::promo::{DiscountKind, INVALID_PROMO_MESSAGE};
    use crate::infrastructure::identity_repo::DieselIdentityRepository;
    use crate::infrastructure::promo_repo::DieselPromoRepository;
    use crate::infrastructure::test_db::{seed_client, seed_service, seed_staff, setup_db};
    use crate::schema::promo_codes;
    use crate::test_utils::promo_draft;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn new_order(client_id: Uuid, items: Vec<(Uuid, i32, &str)>) -> NewOrder {
        NewOrder {
            client_id,
            address: "Test Address".to_string(),
            work_date: Utc::now() + Duration::days(1),
            created_by: None,
            promo_code_id: None,
            placed_at: Utc::now(),
            items: items
                .into_iter()
                .map(|(service_id, quantity, price)| NewOrderItem {
                    service_id,
                    quantity,
                    price_at_order: dec(price),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn create_and_find_by_id_roundtrip() {
        let (_container, pool) = setup_db().await;
        let client_id = seed_client(&pool);
        let s1 = seed_service(&pool, "100.00");
        let s2 = seed_service(&pool, "50.00");
        let repo = DieselOrderRepository::new(pool);

        let order_id = repo
            .create(new_order(client_id, vec![(s1, 2, "100.00"), (s2, 1, "50.00")]))
            .expect("create failed");

        let order = repo
            .find_by_id(order_id)
            .expect("find failed")
            .expect("order should exist");

        assert_eq!(order.client_id, client_id);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_amount, dec("250.00"));
    }

    #[tokio::test]
    async fn create_counts_promo_use_and_applies_discount() {
        let (_container, pool) = setup_db().await;
        let client_id = seed_client(&pool);
        let service = seed_service(&pool, "100.00");
        let promo = DieselPromoRepository::new(pool.clone())
            .create(promo_draft("SAVE50", DiscountKind::Fixed, 50))
            .unwrap();
        let repo = DieselOrderRepository::new(pool.clone());

        let mut order = new_order(client_id, vec![(service, 1, "100.00")]);
        order.promo_code_id = Some(promo.id);
        let order_id = repo.create(order).unwrap();

        let stored = repo.find_by_id(order_id).unwrap().unwrap();
        assert_eq!(stored.total_amount, dec("50.00"));
        assert_eq!(stored.promo_code.map(|p| p.code).as_deref(), Some("SAVE50"));

        let mut conn = pool.get().unwrap();
        let used: i32 = promo_codes::table
            .find(promo.id)
            .select(promo_codes::used_count)
            .first(&mut conn)
            .unwrap();
        assert_eq!(used, 1);
    }

    #[tokio::test]
    async fn failed_create_rolls_back_promo_usage() {
        let (_container, pool) = setup_db().await;
        let promo = DieselPromoRepository::new(pool.clone())
            .create(promo_draft("SAVE50", DiscountKind::Fixed, 50))
            .unwrap();
        let repo = DieselOrderRepository::new(pool.clone());

        // Unknown client violates the foreign key after the promo was counted.
        let mut order = new_order(Uuid::new_v4(), vec![]);
        order.promo_code_id = Some(promo.id);
        assert!(matches!(repo.create(order), Err(DomainError::Conflict(_))));

        let reloaded = DieselPromoRepository::new(pool)
            .find_by_code("SAVE50")
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.used_count, 0);
        assert_eq!(repo.list(OrderScope::All, 1, 20).unwrap().total, 0);
    }

    #[tokio::test]
    async fn exhausted_promo_is_refused_at_commit() {
        let (_container, pool) = setup_db().await;
        let client_id = seed_client(&pool);
        let service = seed_service(&pool, "100.00");
        let mut draft = promo_draft("ONCE", DiscountKind::Fixed, 10);
        draft.max_uses = Some(1);
        let promo = DieselPromoRepository::new(pool.clone()).create(draft).unwrap();
        let repo = DieselOrderRepository::new(pool.clone());

        let mut first = new_order(client_id, vec![(service, 1, "100.00")]);
        first.promo_code_id = Some(promo.id);
        repo.create(first).unwrap();

        // A second order validated before the first one committed.
        let mut second = new_order(client_id, vec![(service, 1, "100.00")]);
        second.promo_code_id = Some(promo.id);
        match repo.create(second) {
            Err(DomainError::Validation(errors)) => {
                assert_eq!(errors.field("promo_code"), [INVALID_PROMO_MESSAGE])
            }
            other => panic!("expected a promo_code error, got {other:?}"),
        }

        let reloaded = DieselPromoRepository::new(pool)
            .find_by_code("ONCE")
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.used_count, 1);
        assert_eq!(repo.list(OrderScope::All, 1, 20).unwrap().total, 1);
    }

    #[tokio::test]
    async fn expired_promo_is_refused_at_commit() {
        let (_container, pool) = setup_db().await;
        let client_id = seed_client(&pool);
        let service = seed_service(&pool, "100.00");
        let promo = DieselPromoRepository::new(pool.clone())
            .create(promo_draft("SHORT", DiscountKind::Fixed, 10))
            .unwrap();
        let repo = DieselOrderRepository::new(pool);

        let mut order = new_order(client_id, vec![(service, 1, "100.00")]);
        order.promo_code_id = Some(promo.id);
        order.placed_at = Utc::now() + Duration::days(30);
        assert!(matches!(repo.create(order), Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn list_respects_scope_and_paginates() {
        let (_container, pool) = setup_db().await;
        let mine = seed_client(&pool);
        let other = seed_client(&pool);
        let creator = seed_staff(&pool, "creator");
        let assignee = seed_staff(&pool, "assignee");
        let service = seed_service(&pool, "10.00");
        let repo = DieselOrderRepository::new(pool);

        for _ in 0..3 {
            repo.create(new_order(mine, vec![(service, 1, "10.00")])).unwrap();
        }
        let mut staffed = new_order(other, vec![(service, 1, "10.00")]);
        staffed.created_by = Some(creator);
        let staffed_id = repo.create(staffed).unwrap();
        let assigned_id = repo.create(new_order(other, vec![(service, 1, "10.00")])).unwrap();
        repo.set_assigned_staff(assigned_id, &[assignee]).unwrap();

        let page1 = repo.list(OrderScope::Client(mine), 1, 2).unwrap();
        assert_eq!(page1.total, 3);
        assert_eq!(page1.items.len(), 2);
        let page2 = repo.list(OrderScope::Client(mine), 2, 2).unwrap();
        assert_eq!(page2.items.len(), 1);

        let created: Vec<Uuid> = repo
            .list(OrderScope::Staff(creator), 1, 20)
            .unwrap()
            .items
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(created, vec![staffed_id]);
        let assigned = repo.list(OrderScope::Staff(assignee), 1, 20).unwrap();
        assert_eq!(assigned.items[0].assigned_staff, vec![assignee]);

        assert_eq!(repo.list(OrderScope::All, 1, 20).unwrap().total, 5);
        assert_eq!(repo.list(OrderScope::Nothing, 1, 20).unwrap().total, 0);
    }

    #[tokio::test]
    async fn far_page_is_empty() {
        let (_container, pool) = setup_db().await;
        let client_id = seed_client(&pool);
        let service = seed_service(&pool, "10.00");
        let repo = DieselOrderRepository::new(pool);
        repo.create(new_order(client_id, vec![(service, 1, "10.00")])).unwrap();

        let page = repo.list(OrderScope::All, i64::MAX, 100).unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn mark_paid_only_counts_unpaid_orders() {
        let (_container, pool) = setup_db().await;
        let client_id = seed_client(&pool);
        let service = seed_service(&pool, "10.00");
        let repo = DieselOrderRepository::new(pool);
        let a = repo.create(new_order(client_id, vec![(service, 1, "10.00")])).unwrap();
        let b = repo.create(new_order(client_id, vec![(service, 1, "10.00")])).unwrap();

        assert_eq!(repo.mark_paid(&[a]).unwrap(), 1);
        assert_eq!(repo.mark_paid(&[a, b]).unwrap(), 1);
        assert_eq!(
            repo.find_by_id(b).unwrap().unwrap().payment_status,
            PaymentStatus::Paid
        );
    }

    #[tokio::test]
    async fn promo_swap_recomputes_from_stored_prices() {
        let (_container, pool) = setup_db().await;
        let client_id = seed_client(&pool);
        let service = seed_service(&pool, "80.00");
        let promo = DieselPromoRepository::new(pool.clone())
            .create(promo_draft("HALF", DiscountKind::Percentage, 50))
            .unwrap();
        let repo = DieselOrderRepository::new(pool);
        let id = repo.create(new_order(client_id, vec![(service, 2, "80.00")])).unwrap();

        assert_eq!(repo.set_promo_code(id, Some(promo.id)).unwrap(), dec("80.00"));
        assert_eq!(repo.set_promo_code(id, None).unwrap(), dec("160.00"));
        assert_eq!(repo.recalculate_totals(&[id, Uuid::new_v4()]).unwrap(), 1);
        assert!(matches!(
            repo.set_promo_code(Uuid::new_v4(), None),
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn referenced_staff_cannot_be_deleted() {
        let (_container, pool) = setup_db().await;
        let client_id = seed_client(&pool);
        let staff_id = seed_staff(&pool, "busy");
        let service = seed_service(&pool, "10.00");
        let repo = DieselOrderRepository::new(pool.clone());
        let id = repo.create(new_order(client_id, vec![(service, 1, "10.00")])).unwrap();
        repo.set_assigned_staff(id, &[staff_id]).unwrap();

        let identities = DieselIdentityRepository::new(pool);
        assert!(matches!(
            identities.delete_staff(staff_id),
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            identities.delete_client(client_id),
            Err(DomainError::Conflict(_))
        ));
    }
}
