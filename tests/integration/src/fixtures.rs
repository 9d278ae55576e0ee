//! Test fixtures and seeded data
//!
//! A venue open Mondays 09:00-17:00 UTC, one supported event, and three
//! users. Timestamps are in the first week of 2024; 2024-01-01 was a
//! Monday.

use std::sync::Arc;

use meetup_common::JwtService;
use meetup_core::{Event, FixedClock, SupportedEvent, User, Venue};
use meetup_service::{ServiceContext, ServiceContextBuilder};

use crate::fakes::{
    InMemoryEventRepository, InMemoryMeetupRepository, InMemoryMembershipRepository,
    InMemoryStore, InMemoryUserRepository, InMemoryVenueRepository, RecordingNotifier,
};

// Epoch seconds in the venue's (UTC) local week
pub const MON_09_00: i64 = 1_704_099_600;
pub const MON_10_00: i64 = 1_704_103_200;
pub const MON_11_00: i64 = 1_704_106_800;
pub const MON_12_00: i64 = 1_704_110_400;
pub const MON_13_00: i64 = 1_704_114_000;
pub const MON_14_00: i64 = 1_704_117_600;
pub const MON_17_00: i64 = 1_704_128_400;
pub const SUN_12_00: i64 = MON_12_00 - 86_400;

pub const VENUE_ID: i64 = 1;
pub const EVENT_ID: i64 = 1;
pub const ALICE: i64 = 1;
pub const BOB: i64 = 2;
pub const CAROL: i64 = 3;

/// Monday-only venue with the chess event at the given capacity
pub fn monday_venue(capacity: i32) -> Venue {
    Venue {
        id: VENUE_ID,
        name: "Community Hall".to_string(),
        open_days: vec![1],
        open_at: "09:00".parse().unwrap(),
        closed_at: "17:00".parse().unwrap(),
        timezone: "UTC".to_string(),
        supported_events: vec![SupportedEvent {
            id: EVENT_ID,
            name: "Chess".to_string(),
            meetups_capacity: capacity,
        }],
    }
}

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: format!("{username}-password"),
        created_at: 1_700_000_000,
    }
}

/// Store seeded with the Monday venue and users alice, bob, and carol
pub fn seeded_store(capacity: i32) -> Arc<InMemoryStore> {
    let store = InMemoryStore::new();
    store.add_venue(monday_venue(capacity));
    store.add_event(Event {
        id: EVENT_ID,
        name: "Chess".to_string(),
    });
    store.add_user(user(ALICE, "alice"));
    store.add_user(user(BOB, "bob"));
    store.add_user(user(CAROL, "carol"));
    store
}

/// Build a service context over the fakes
pub fn test_context(
    store: &Arc<InMemoryStore>,
    notifier: &Arc<RecordingNotifier>,
    clock: &Arc<FixedClock>,
) -> ServiceContext {
    ServiceContextBuilder::new()
        .meetup_repo(Arc::new(InMemoryMeetupRepository::new(store.clone())))
        .venue_repo(Arc::new(InMemoryVenueRepository::new(store.clone())))
        .event_repo(Arc::new(InMemoryEventRepository::new(store.clone())))
        .user_repo(Arc::new(InMemoryUserRepository::new(store.clone())))
        .membership_repo(Arc::new(InMemoryMembershipRepository::new(store.clone())))
        .notifier(notifier.clone())
        .clock(clock.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
        .build()
        .expect("all test dependencies are provided")
}
