//! PostgreSQL-backed store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / PoolTimedOut / other | N/A | `Backend` |
//!
//! ## Atomicity
//!
//! `record_attendance` and `register_member` each run in one transaction. The
//! find-or-create of a member is an `INSERT ... ON CONFLICT (email) DO NOTHING`
//! followed by a re-read, so two concurrent RSVPs for a new address converge
//! on the same member row.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction};
use tracing::instrument;
use uuid::Uuid;

use bierklub_auth::{Account, NewAccount, PasswordHash};
use bierklub_club::{Event, Member, NewEvent, NewMember};
use bierklub_core::{AccountId, Email, EventId, MemberId};

use super::r#trait::{AttendanceRecord, ClubStore, StoreError};
use crate::config::DatabaseConfig;

const EVENT_COLUMNS: &str = "id, name, description, preamble, additional_notes, date, \
                             published_date, number, location";
const MEMBER_COLUMNS: &str = "id, name, email, join_date, account_id";
const ACCOUNT_COLUMNS: &str =
    "id, username, email, given_name, family_name, password_hash, created_at";

#[derive(Debug, Clone)]
pub struct PostgresClubStore {
    pool: Arc<PgPool>,
}

impl PostgresClubStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool sized by `config` and bring the schema up to date.
    #[instrument(skip(config), fields(max_connections = config.max_connections), err)]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&*self.pool)
            .await
            .map_err(|e| StoreError::Backend(format!("migration failed: {e}")))?;
        tracing::info!("database migrations applied");
        Ok(())
    }

    async fn begin(&self, operation: &str) -> Result<Transaction<'static, Postgres>, StoreError> {
        self.pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(operation, e))
    }
}

#[async_trait]
impl ClubStore for PostgresClubStore {
    #[instrument(skip(self, event), fields(name = %event.name), err)]
    async fn create_event(
        &self,
        event: NewEvent,
        now: DateTime<Utc>,
    ) -> Result<Event, StoreError> {
        let event = event.into_event(EventId::new(), now);
        sqlx::query(
            r#"
            INSERT INTO events
                (id, name, description, preamble, additional_notes, date, published_date, number, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.preamble)
        .bind(&event.additional_notes)
        .bind(event.date)
        .bind(event.published_date)
        .bind(event.number)
        .bind(&event.location)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_event", e))?;

        Ok(event)
    }

    #[instrument(skip(self), err)]
    async fn list_published_events(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE published_date <= $1
             ORDER BY published_date DESC, id DESC
             LIMIT $2"
        ))
        .bind(now)
        .bind(limit)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_published_events", e))?;

        rows.iter().map(event_from_row).collect()
    }

    #[instrument(skip(self), fields(event_id = %id), err)]
    async fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let row = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_event", e))?;

        row.as_ref().map(event_from_row).transpose()
    }

    #[instrument(skip(self), fields(member_id = %id), err)]
    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        let row = sqlx::query(&format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_member", e))?;

        row.as_ref().map(member_from_row).transpose()
    }

    #[instrument(skip(self, email), err)]
    async fn find_member_by_email(&self, email: &Email) -> Result<Option<Member>, StoreError> {
        let row = sqlx::query(&format!("SELECT {MEMBER_COLUMNS} FROM members WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_member_by_email", e))?;

        row.as_ref().map(member_from_row).transpose()
    }

    #[instrument(skip(self), fields(event_id = %event_id), err)]
    async fn attendees(&self, event_id: EventId) -> Result<Vec<Member>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.name, m.email, m.join_date, m.account_id
            FROM members m
            JOIN event_members em ON em.member_id = m.id
            WHERE em.event_id = $1
            ORDER BY m.name ASC, m.id ASC
            "#,
        )
        .bind(event_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("attendees", e))?;

        rows.iter().map(member_from_row).collect()
    }

    #[instrument(skip(self, attendee), fields(event_id = %event_id), err)]
    async fn record_attendance(
        &self,
        event_id: EventId,
        attendee: NewMember,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut tx = self.begin("record_attendance").await?;

        let candidate = attendee.into_member(MemberId::new(), None);
        let inserted = sqlx::query(&format!(
            "INSERT INTO members (id, name, email, join_date, account_id)
             VALUES ($1, $2, $3, $4, NULL)
             ON CONFLICT (email) DO NOTHING
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(candidate.id.as_uuid())
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(candidate.join_date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("record_attendance.insert_member", e))?;

        let (member, member_created) = match inserted {
            Some(row) => (member_from_row(&row)?, true),
            None => {
                let row = sqlx::query(&format!(
                    "SELECT {MEMBER_COLUMNS} FROM members WHERE email = $1"
                ))
                .bind(&candidate.email)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("record_attendance.select_member", e))?;
                (member_from_row(&row)?, false)
            }
        };

        let linked = sqlx::query(
            r#"
            INSERT INTO event_members (event_id, member_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(member.id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("record_attendance.link", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("record_attendance.commit", e))?;

        Ok(AttendanceRecord {
            member,
            member_created,
            already_attending: linked.rows_affected() == 0,
        })
    }

    #[instrument(skip(self, email), err)]
    async fn find_account_by_email(&self, email: &Email) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_account_by_email", e))?;

        row.as_ref().map(account_from_row).transpose()
    }

    #[instrument(skip(self, account, member), err)]
    async fn register_member(
        &self,
        account: NewAccount,
        member: NewMember,
        now: DateTime<Utc>,
    ) -> Result<(Account, Member), StoreError> {
        let account = account.into_account(AccountId::new(), now);
        let member = member.into_member(MemberId::new(), Some(account.id));

        let mut tx = self.begin("register_member").await?;

        sqlx::query(
            r#"
            INSERT INTO accounts
                (id, username, email, given_name, family_name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.given_name)
        .bind(&account.family_name)
        .bind(account.password_hash.as_str())
        .bind(account.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("register_member.insert_account", e))?;

        sqlx::query(
            r#"
            INSERT INTO members (id, name, email, join_date, account_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.name)
        .bind(&member.email)
        .bind(member.join_date)
        .bind(account.id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("register_member.insert_member", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("register_member.commit", e))?;

        Ok((account, member))
    }
}

/// Map SQLx errors to `StoreError`.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    if is_unique_violation(&err) {
        let detail = match &err {
            sqlx::Error::Database(db_err) => db_err.message().to_string(),
            other => other.to_string(),
        };
        return StoreError::Conflict(format!("unique violation in {operation}: {detail}"));
    }

    match err {
        sqlx::Error::Database(db_err) => {
            StoreError::Backend(format!("database error in {operation}: {}", db_err.message()))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Backend(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Backend(format!("timed out acquiring a connection in {operation}"))
        }
        other => StoreError::Backend(format!("sqlx error in {operation}: {other}")),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23505";
        }
    }
    false
}

// SQLx row types

#[derive(Debug)]
struct EventRow {
    id: Uuid,
    name: String,
    description: String,
    preamble: String,
    additional_notes: String,
    date: DateTime<Utc>,
    published_date: DateTime<Utc>,
    number: i32,
    location: String,
}

impl<'r> FromRow<'r, PgRow> for EventRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(EventRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            preamble: row.try_get("preamble")?,
            additional_notes: row.try_get("additional_notes")?,
            date: row.try_get("date")?,
            published_date: row.try_get("published_date")?,
            number: row.try_get("number")?,
            location: row.try_get("location")?,
        })
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: EventId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            preamble: row.preamble,
            additional_notes: row.additional_notes,
            date: row.date,
            published_date: row.published_date,
            number: row.number,
            location: row.location,
        }
    }
}

#[derive(Debug)]
struct MemberRow {
    id: Uuid,
    name: String,
    email: String,
    join_date: NaiveDate,
    account_id: Option<Uuid>,
}

impl<'r> FromRow<'r, PgRow> for MemberRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(MemberRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            join_date: row.try_get("join_date")?,
            account_id: row.try_get("account_id")?,
        })
    }
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            join_date: row.join_date,
            account_id: row.account_id.map(AccountId::from_uuid),
        }
    }
}

#[derive(Debug)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    given_name: String,
    family_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for AccountRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(AccountRow {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            given_name: row.try_get("given_name")?,
            family_name: row.try_get("family_name")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: AccountId::from_uuid(row.id),
            username: row.username,
            email: row.email,
            given_name: row.given_name,
            family_name: row.family_name,
            password_hash: PasswordHash::from_phc(row.password_hash),
            created_at: row.created_at,
        }
    }
}

fn event_from_row(row: &PgRow) -> Result<Event, StoreError> {
    EventRow::from_row(row)
        .map(Event::from)
        .map_err(|e| StoreError::Backend(format!("failed to deserialize event row: {e}")))
}

fn member_from_row(row: &PgRow) -> Result<Member, StoreError> {
    MemberRow::from_row(row)
        .map(Member::from)
        .map_err(|e| StoreError::Backend(format!("failed to deserialize member row: {e}")))
}

fn account_from_row(row: &PgRow) -> Result<Account, StoreError> {
    AccountRow::from_row(row)
        .map(Account::from)
        .map_err(|e| StoreError::Backend(format!("failed to deserialize account row: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_map_to_backend() {
        assert!(matches!(
            map_sqlx_error("get_event", sqlx::Error::PoolTimedOut),
            StoreError::Backend(msg) if msg.contains("get_event")
        ));
        assert!(matches!(
            map_sqlx_error("attendees", sqlx::Error::PoolClosed),
            StoreError::Backend(_)
        ));
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
