//! Club events and the rules deciding which ones visitors may see.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use bierklub_core::EventId;

/// How many events the landing page lists.
pub const LATEST_EVENTS_LIMIT: usize = 5;

/// An event counts as "new" for this long after its invite goes out.
pub const RECENTLY_PUBLISHED_DAYS: i64 = 1;

/// An event counts as "soon" when it starts within this many days.
pub const SOON_DAYS: i64 = 7;

/// A club gathering at a brewery.
///
/// `published_date` gates visibility: organizers stage the invite ahead of
/// time and it only becomes discoverable once that moment has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub preamble: String,
    pub additional_notes: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// When the invite becomes publicly visible. Fixed at creation.
    pub published_date: DateTime<Utc>,
    /// Ordinal among all club events (the 12th meetup, ...).
    pub number: i32,
    /// Address of the brewery.
    pub location: String,
}

impl Event {
    /// Visible to the public once the publish moment is not in the future.
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.published_date <= now
    }

    /// Published within the last day, and not in the future.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(RECENTLY_PUBLISHED_DAYS) <= self.published_date
            && self.published_date <= now
    }

    /// Takes place after `now` and no later than a week from `now`.
    pub fn is_soon(&self, now: DateTime<Utc>) -> bool {
        now < self.date && self.date <= now + Duration::days(SOON_DAYS)
    }
}

impl core::fmt::Display for Event {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} at {} on {}",
            self.name,
            self.location,
            self.date.format("%Y-%m-%d")
        )
    }
}

/// Input of the authoring process that creates events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preamble: String,
    #[serde(default)]
    pub additional_notes: String,
    pub date: DateTime<Utc>,
    /// Defaults to the creation time when absent.
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    pub number: i32,
    pub location: String,
}

impl NewEvent {
    pub fn into_event(self, id: EventId, now: DateTime<Utc>) -> Event {
        Event {
            id,
            name: self.name,
            description: self.description,
            preamble: self.preamble,
            additional_notes: self.additional_notes,
            date: self.date,
            published_date: self.published_date.unwrap_or(now),
            number: self.number,
            location: self.location,
        }
    }
}

/// The public landing list: visible events, most recently published first,
/// truncated to `limit`. Ties on the publish moment go to the newer id.
pub fn latest_published(
    events: impl IntoIterator<Item = Event>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<Event> {
    let mut visible: Vec<Event> = events.into_iter().filter(|e| e.is_visible(now)).collect();
    visible.sort_by(|a, b| {
        b.published_date
            .cmp(&a.published_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    visible.truncate(limit);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    fn event(published_date: DateTime<Utc>, date: DateTime<Utc>) -> Event {
        NewEvent {
            name: "Past Test".to_string(),
            description: "Test".to_string(),
            preamble: String::new(),
            additional_notes: String::new(),
            date,
            published_date: Some(published_date),
            number: 1,
            location: "123 Fake Street".to_string(),
        }
        .into_event(EventId::new(), now())
    }

    #[test]
    fn published_date_defaults_to_creation_time() {
        let e = NewEvent {
            name: "Launch".to_string(),
            description: String::new(),
            preamble: String::new(),
            additional_notes: String::new(),
            date: now() + Duration::days(3),
            published_date: None,
            number: 1,
            location: "Brewery".to_string(),
        }
        .into_event(EventId::new(), now());

        assert_eq!(e.published_date, now());
        assert!(e.is_visible(now()));
    }

    #[test]
    fn was_published_recently_with_future_event() {
        let e = event(now() + Duration::days(30), now() + Duration::days(31));
        assert!(!e.was_published_recently(now()));
    }

    #[test]
    fn was_published_recently_with_old_event() {
        let e = event(now() - Duration::days(30), now());
        assert!(!e.was_published_recently(now()));
    }

    #[test]
    fn was_published_recently_with_recent_event() {
        let e = event(now() - Duration::hours(1), now());
        assert!(e.was_published_recently(now()));
    }

    #[test]
    fn was_published_recently_boundaries_are_inclusive() {
        assert!(event(now() - Duration::days(1), now()).was_published_recently(now()));
        assert!(event(now(), now()).was_published_recently(now()));
        assert!(!event(now() - Duration::days(1) - Duration::seconds(1), now())
            .was_published_recently(now()));
    }

    #[test]
    fn is_soon_with_past_event() {
        let e = event(now() - Duration::days(8), now() - Duration::days(7));
        assert!(!e.is_soon(now()));
    }

    #[test]
    fn is_soon_out_of_range() {
        let e = event(now(), now() + Duration::days(8));
        assert!(!e.is_soon(now()));
    }

    #[test]
    fn is_soon_within_a_week() {
        let e = event(now(), now() + Duration::days(6));
        assert!(e.is_soon(now()));
    }

    #[test]
    fn is_soon_boundaries() {
        assert!(!event(now(), now()).is_soon(now()));
        assert!(event(now(), now() + Duration::days(7)).is_soon(now()));
    }

    #[test]
    fn display_names_place_and_day() {
        let e = event(now(), Utc.with_ymd_and_hms(2024, 6, 3, 19, 30, 0).unwrap());
        assert_eq!(e.to_string(), "Past Test at 123 Fake Street on 2024-06-03");
    }

    #[test]
    fn latest_published_hides_future_invites() {
        let past = event(now() - Duration::days(1), now() + Duration::days(2));
        let future = event(now() + Duration::days(7), now() + Duration::days(2));

        let listed = latest_published(vec![past.clone(), future], now(), LATEST_EVENTS_LIMIT);
        assert_eq!(listed, vec![past]);
    }

    #[test]
    fn latest_published_keeps_the_five_most_recent() {
        let events: Vec<Event> = (1..=6)
            .map(|i| event(now() - Duration::days(i), now() + Duration::days(i)))
            .collect();

        let listed = latest_published(events.clone(), now(), LATEST_EVENTS_LIMIT);
        assert_eq!(listed, events[..5].to_vec());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// The landing list is bounded, ordered newest-first and never leaks
        /// an invite whose publish moment is still ahead.
        #[test]
        fn latest_published_is_bounded_ordered_and_visible(
            offsets in prop::collection::vec(-10_000i64..10_000i64, 0..20)
        ) {
            let events: Vec<Event> = offsets
                .iter()
                .map(|m| event(now() + Duration::minutes(*m), now()))
                .collect();

            let listed = latest_published(events, now(), LATEST_EVENTS_LIMIT);
            let expected_len = offsets.iter().filter(|m| **m <= 0).count().min(LATEST_EVENTS_LIMIT);

            prop_assert_eq!(listed.len(), expected_len);
            prop_assert!(listed.iter().all(|e| e.published_date <= now()));
            prop_assert!(listed.windows(2).all(|w| w[0].published_date >= w[1].published_date));
        }

        #[test]
        fn was_published_recently_matches_the_window(offset_secs in -200_000i64..200_000i64) {
            let e = event(now() + Duration::seconds(offset_secs), now());
            let expected = (-86_400..=0).contains(&offset_secs);
            prop_assert_eq!(e.was_published_recently(now()), expected);
        }

        #[test]
        fn is_soon_matches_the_window(offset_secs in -1_000_000i64..1_000_000i64) {
            let e = event(now(), now() + Duration::seconds(offset_secs));
            let expected = offset_secs > 0 && offset_secs <= 7 * 86_400;
            prop_assert_eq!(e.is_soon(now()), expected);
        }
    }
}
