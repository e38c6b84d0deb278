use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{NewServiceType, Service, ServiceDraft, ServiceFilter, ServiceType};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{service_types, services};

use super::models::{ServiceRow, ServiceTypeRow};

#[derive(Clone)]
pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for DieselCatalogRepository {
    fn list_service_types(&self) -> Result<Vec<ServiceType>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = service_types::table
            .select(ServiceTypeRow::as_select())
            .order(service_types::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(ServiceType::from).collect())
    }

    fn create_service_type(&self, new: NewServiceType) -> Result<ServiceType, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(service_types::table)
            .values(&ServiceTypeRow {
                id: Uuid::new_v4(),
                name: new.name,
                description: new.description,
            })
            .returning(ServiceTypeRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn delete_service_type(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(service_types::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound("Service type"));
        }
        Ok(())
    }

    fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>, DomainError> {
        let mut conn = self.pool.get()?;
        let mut query = services::table
            .select(ServiceRow::as_select())
            .order(services::name.asc())
            .into_boxed();
        if let Some(type_id) = filter.service_type_id {
            query = query.filter(services::service_type_id.eq(type_id));
        }
        if let Some(min) = &filter.price_gt {
            query = query.filter(services::price.gt(min.clone()));
        }
        if let Some(max) = &filter.price_lt {
            query = query.filter(services::price.lt(max.clone()));
        }
        if filter.active_only {
            query = query.filter(services::is_active.eq(true));
        }
        let rows = query.load(&mut conn)?;
        Ok(rows.into_iter().map(Service::from).collect())
    }

    fn find_services(&self, ids: &[Uuid]) -> Result<Vec<Service>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = services::table
            .filter(services::id.eq_any(ids))
            .select(ServiceRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Service::from).collect())
    }

    fn create_service(&self, draft: ServiceDraft) -> Result<Service, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(services::table)
            .values(&row_from_draft(Uuid::new_v4(), draft))
            .returning(ServiceRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update_service(&self, id: Uuid, draft: ServiceDraft) -> Result<Service, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::update(services::table.find(id))
            .set(&row_from_draft(id, draft))
            .returning(ServiceRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        row.map(Service::from).ok_or(DomainError::NotFound("Service"))
    }

    fn delete_service(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(services::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound("Service"));
        }
        Ok(())
    }
}

fn row_from_draft(id: Uuid, draft: ServiceDraft) -> ServiceRow {
    ServiceRow {
        id,
        service_type_id: draft.service_type_id,
        name: draft.name,
        description: draft.description,
        price: draft.price,
        notes: draft.notes,
        is_active: draft.is_active,
    }
}
