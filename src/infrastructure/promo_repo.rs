use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::PromoRepository;
use crate::domain::promo::{NewPromoCode, PromoCode};
use crate::schema::promo_codes;

use super::models::PromoCodeRow;

#[derive(Clone)]
pub struct DieselPromoRepository {
    pool: DbPool,
}

impl DieselPromoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PromoRepository for DieselPromoRepository {
    fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, DomainError> {
        let mut conn = self.pool.get()?;
        promo_codes::table
            .filter(promo_codes::code.eq(code))
            .select(PromoCodeRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(PromoCode::try_from)
            .transpose()
    }

    fn list_active(&self) -> Result<Vec<PromoCode>, DomainError> {
        let mut conn = self.pool.get()?;
        promo_codes::table
            .filter(promo_codes::is_active.eq(true))
            .select(PromoCodeRow::as_select())
            .order(promo_codes::code.asc())
            .load(&mut conn)?
            .into_iter()
            .map(PromoCode::try_from)
            .collect()
    }

    fn create(&self, new: NewPromoCode) -> Result<PromoCode, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(promo_codes::table)
            .values(&PromoCodeRow {
                id: Uuid::new_v4(),
                code: new.code,
                discount_type: new.kind.as_str().to_string(),
                value: new.value,
                valid_from: new.valid_from,
                valid_to: new.valid_to,
                is_active: new.is_active,
                max_uses: new.max_uses,
                used_count: 0,
            })
            .returning(PromoCodeRow::as_returning())
            .get_result(&mut conn)?;
        row.try_into()
    }
}
