use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bierklub_auth::{Account, NewAccount};
use bierklub_club::{Event, Member, NewEvent, NewMember, latest_published};
use bierklub_core::{AccountId, Email, EventId, MemberId};

use super::r#trait::{AttendanceRecord, ClubStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    events: BTreeMap<EventId, Event>,
    members: BTreeMap<MemberId, Member>,
    accounts: BTreeMap<AccountId, Account>,
    attendance: BTreeSet<(EventId, MemberId)>,
}

impl Tables {
    fn member_by_email(&self, email: &str) -> Option<&Member> {
        self.members.values().find(|m| m.email == email)
    }
}

/// In-process store.
///
/// Intended for tests/dev. A single lock guards all tables, so every compound
/// write is atomic with respect to other requests.
#[derive(Debug, Default)]
pub struct InMemoryClubStore {
    tables: RwLock<Tables>,
}

impl InMemoryClubStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }
}

#[async_trait]
impl ClubStore for InMemoryClubStore {
    async fn create_event(
        &self,
        event: NewEvent,
        now: DateTime<Utc>,
    ) -> Result<Event, StoreError> {
        let event = event.into_event(EventId::new(), now);
        self.write()?.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn list_published_events(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, StoreError> {
        let tables = self.read()?;
        Ok(latest_published(tables.events.values().cloned(), now, limit))
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        Ok(self.read()?.events.get(&id).cloned())
    }

    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.read()?.members.get(&id).cloned())
    }

    async fn find_member_by_email(&self, email: &Email) -> Result<Option<Member>, StoreError> {
        Ok(self.read()?.member_by_email(email.as_str()).cloned())
    }

    async fn attendees(&self, event_id: EventId) -> Result<Vec<Member>, StoreError> {
        let tables = self.read()?;
        let mut members: Vec<Member> = tables
            .attendance
            .range((event_id, MemberId::from_uuid(uuid::Uuid::nil()))..)
            .take_while(|(e, _)| *e == event_id)
            .filter_map(|(_, m)| tables.members.get(m).cloned())
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(members)
    }

    async fn record_attendance(
        &self,
        event_id: EventId,
        attendee: NewMember,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut tables = self.write()?;
        if !tables.events.contains_key(&event_id) {
            return Err(StoreError::Backend(format!("event {event_id} does not exist")));
        }

        let (member, member_created) = match tables.member_by_email(attendee.email.as_str()) {
            Some(existing) => (existing.clone(), false),
            None => {
                let member = attendee.into_member(MemberId::new(), None);
                tables.members.insert(member.id, member.clone());
                (member, true)
            }
        };

        let already_attending = !tables.attendance.insert((event_id, member.id));

        Ok(AttendanceRecord {
            member,
            member_created,
            already_attending,
        })
    }

    async fn find_account_by_email(&self, email: &Email) -> Result<Option<Account>, StoreError> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|a| a.email == email.as_str())
            .cloned())
    }

    async fn register_member(
        &self,
        account: NewAccount,
        member: NewMember,
        now: DateTime<Utc>,
    ) -> Result<(Account, Member), StoreError> {
        let mut tables = self.write()?;

        if tables.accounts.values().any(|a| a.email == account.email.as_str()) {
            return Err(StoreError::Conflict(format!(
                "account email {} already exists",
                account.email
            )));
        }
        if tables.member_by_email(member.email.as_str()).is_some() {
            return Err(StoreError::Conflict(format!(
                "member email {} already exists",
                member.email
            )));
        }

        let account = account.into_account(AccountId::new(), now);
        let member = member.into_member(MemberId::new(), Some(account.id));
        tables.accounts.insert(account.id, account.clone());
        tables.members.insert(member.id, member.clone());

        Ok((account, member))
    }
}
