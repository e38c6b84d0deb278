use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::catalog::{NewServiceType, Service, ServiceDraft, ServiceFilter, ServiceType};
use crate::domain::errors::DomainError;
use crate::domain::identity::Role;
use crate::domain::ports::CatalogRepository;

pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_service_types(&self) -> Result<Vec<ServiceType>, DomainError> {
        self.repo.list_service_types()
    }

    /// Only admins see retired services.
    pub fn list_services(
        &self,
        principal: &Principal,
        mut filter: ServiceFilter,
    ) -> Result<Vec<Service>, DomainError> {
        let is_admin = principal.identity().is_some_and(|i| i.role == Role::Admin);
        if !is_admin {
            filter.active_only = true;
        }
        self.repo.list_services(&filter)
    }

    pub fn create_service_type(
        &self,
        principal: &Principal,
        new: NewServiceType,
    ) -> Result<ServiceType, DomainError> {
        principal.require_admin()?;
        new.validate()?;
        self.repo.create_service_type(new)
    }

    pub fn delete_service_type(&self, principal: &Principal, id: Uuid) -> Result<(), DomainError> {
        principal.require_admin()?;
        self.repo.delete_service_type(id)
    }

    pub fn create_service(
        &self,
        principal: &Principal,
        draft: ServiceDraft,
    ) -> Result<Service, DomainError> {
        principal.require_admin()?;
        draft.validate()?;
        let service = self.repo.create_service(draft)?;
        log::info!("Service {} '{}' created", service.id, service.name);
        Ok(service)
    }

    /// Price and active flag changes only affect orders placed afterwards.
    pub fn update_service(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: ServiceDraft,
    ) -> Result<Service, DomainError> {
        principal.require_admin()?;
        draft.validate()?;
        self.repo.update_service(id, draft)
    }

    pub fn delete_service(&self, principal: &Principal, id: Uuid) -> Result<(), DomainError> {
        principal.require_admin()?;
        self.repo.delete_service(id)?;
        log::info!("Service {} deleted", id);
        Ok(())
    }
}
