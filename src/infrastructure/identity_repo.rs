use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use diesel::dsl::exists;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::access::Identity;
use crate::domain::errors::DomainError;
use crate::domain::identity::{
    parse_timezone, Account, Client, ClientProfile, NewAccount, NewStaff, Role, Session, Staff,
    StoredCredentials,
};
use crate::domain::ports::IdentityRepository;
use crate::schema::{accounts, clients, sessions, staff, staff_specializations};

use super::models::{
    AccountRow, ClientProfileRow, ClientRow, NewAccountRow, NewSpecializationRow, SessionRow,
    StaffRow,
};

#[derive(Clone)]
pub struct DieselIdentityRepository {
    pool: DbPool,
}

impl DieselIdentityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<ClientProfile> for ClientProfileRow {
    fn from(profile: ClientProfile) -> Self {
        ClientProfileRow {
            name: profile.name,
            contact_person: profile.contact_person,
            contact_number: profile.contact_number,
            email: profile.email,
            client_type: profile.client_type.as_str().to_string(),
            address: profile.address,
            timezone: profile.timezone,
        }
    }
}

fn load_client(conn: &mut PgConnection, account_id: Uuid) -> Result<Option<Client>, DomainError> {
    clients::table
        .filter(clients::account_id.eq(account_id))
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?
        .map(Client::try_from)
        .transpose()
}

fn load_staff(conn: &mut PgConnection, account_id: Uuid) -> Result<Option<Staff>, DomainError> {
    Ok(staff::table
        .filter(staff::account_id.eq(account_id))
        .select(StaffRow::as_select())
        .first(conn)
        .optional()?
        .map(Staff::from))
}

impl IdentityRepository for DieselIdentityRepository {
    fn register(
        &self,
        account: NewAccount,
        profile: ClientProfile,
    ) -> Result<(Account, Client), DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let (account, _) = diesel::insert_into(accounts::table)
                .values(&NewAccountRow {
                    id: Uuid::new_v4(),
                    username: account.username,
                    email: account.email,
                    first_name: account.first_name,
                    last_name: account.last_name,
                    password_hash: account.password_hash,
                    role: account.role.as_str().to_string(),
                })
                .returning(AccountRow::as_returning())
                .get_result(conn)?
                .into_account()?;

            let client = diesel::insert_into(clients::table)
                .values((
                    clients::id.eq(Uuid::new_v4()),
                    clients::account_id.eq(account.id),
                    ClientProfileRow::from(profile),
                ))
                .returning(ClientRow::as_returning())
                .get_result(conn)?;

            Ok((account, Client::try_from(client)?))
        })
    }

    fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let on_account: bool = diesel::select(exists(
            accounts::table.filter(accounts::email.eq(email)),
        ))
        .get_result(&mut conn)?;
        let on_client: bool = diesel::select(exists(
            clients::table.filter(clients::email.eq(email)),
        ))
        .get_result(&mut conn)?;
        Ok(on_account || on_client)
    }

    fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = accounts::table
            .filter(accounts::username.eq(username))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .optional()?;
        let Some(row) = row else {
            return Ok(None);
        };
        let (account, password_hash) = row.into_account()?;
        Ok(Some(StoredCredentials {
            account,
            password_hash,
        }))
    }

    fn create_session(
        &self,
        account_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(sessions::table)
            .values(&SessionRow {
                token: Uuid::new_v4(),
                account_id,
                expires_at,
            })
            .returning(SessionRow::as_returning())
            .get_result(&mut conn)?;
        Ok(Session {
            token: row.token,
            account_id: row.account_id,
            expires_at: row.expires_at,
        })
    }

    fn delete_session(&self, token: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::delete(sessions::table.find(token)).execute(&mut conn)?;
        Ok(())
    }

    fn resolve_session(
        &self,
        token: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<Identity>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = sessions::table
            .inner_join(accounts::table)
            .filter(sessions::token.eq(token))
            .filter(sessions::expires_at.gt(now))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .optional()?;
        let Some(row) = row else {
            return Ok(None);
        };
        let (account, _) = row.into_account()?;
        let client = load_client(&mut conn, account.id)?;
        let staff = load_staff(&mut conn, account.id)?;

        let timezone = staff
            .as_ref()
            .map(|s| s.timezone.as_str())
            .or(client.as_ref().map(|c| c.timezone.as_str()))
            .and_then(parse_timezone)
            .unwrap_or(Tz::UTC);

        Ok(Some(Identity {
            account_id: account.id,
            username: account.username,
            role: account.role,
            client_id: client.map(|c| c.id),
            staff_id: staff.map(|s| s.id),
            timezone,
        }))
    }

    fn find_client(&self, id: Uuid) -> Result<Option<Client>, DomainError> {
        let mut conn = self.pool.get()?;
        clients::table
            .find(id)
            .select(ClientRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Client::try_from)
            .transpose()
    }

    fn find_client_by_account(&self, account_id: Uuid) -> Result<Option<Client>, DomainError> {
        let mut conn = self.pool.get()?;
        load_client(&mut conn, account_id)
    }

    fn update_client(&self, id: Uuid, profile: ClientProfile) -> Result<Client, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::update(clients::table.find(id))
            .set((
                ClientProfileRow::from(profile),
                clients::updated_at.eq(Utc::now()),
            ))
            .returning(ClientRow::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or(DomainError::NotFound("Client"))?;
        Client::try_from(row)
    }

    fn delete_client(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let account_id: Option<Uuid> = diesel::delete(clients::table.find(id))
                .returning(clients::account_id)
                .get_result(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Client"))?;
            if let Some(account_id) = account_id {
                diesel::delete(accounts::table.find(account_id)).execute(conn)?;
            }
            Ok(())
        })
    }

    fn find_account(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = accounts::table
            .find(id)
            .select(AccountRow::as_select())
            .first(&mut conn)
            .optional()?;
        row.map(|r| r.into_account().map(|(account, _)| account))
            .transpose()
    }

    fn create_staff(&self, new: NewStaff) -> Result<Staff, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(staff::table)
                .values(&StaffRow {
                    id: Uuid::new_v4(),
                    account_id: new.account_id,
                    contact_number: new.contact_number,
                    hire_date: new.hire_date,
                    role: new.role,
                    is_active: true,
                    timezone: new.timezone,
                })
                .returning(StaffRow::as_returning())
                .get_result(conn)?;
            // Only client accounts are promoted; admins keep their role.
            diesel::update(
                accounts::table
                    .find(new.account_id)
                    .filter(accounts::role.eq(Role::Client.as_str())),
            )
            .set(accounts::role.eq(Role::Staff.as_str()))
            .execute(conn)?;
            Ok(row.into())
        })
    }

    fn find_staff(&self, ids: &[Uuid]) -> Result<Vec<Staff>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = staff::table
            .filter(staff::id.eq_any(ids))
            .select(StaffRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Staff::from).collect())
    }

    fn add_specialization(&self, staff_id: Uuid, service_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::insert_into(staff_specializations::table)
            .values(&NewSpecializationRow {
                staff_id,
                service_id,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn remove_specialization(&self, staff_id: Uuid, service_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::delete(staff_specializations::table.find((staff_id, service_id)))
            .execute(&mut conn)?;
        Ok(())
    }

    fn specializations(&self, staff_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(staff_specializations::table
            .filter(staff_specializations::staff_id.eq(staff_id))
            .order(staff_specializations::added_on.asc())
            .select(staff_specializations::service_id)
            .load(&mut conn)?)
    }

    fn delete_staff(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(staff::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound("Staff"));
        }
        Ok(())
    }
}
