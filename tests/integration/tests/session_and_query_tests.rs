//! Session and read-path tests
//!
//! Login, meetup listings, viewer-dependent redaction, incoming meetups,
//! and the event and venue catalogs.

use std::sync::Arc;

use integration_tests::{
    seeded_store, test_context, InMemoryStore, RecordingNotifier, ALICE, BOB, CAROL, EVENT_ID,
    MON_10_00, MON_11_00, MON_12_00, MON_13_00, MON_14_00, SUN_12_00, VENUE_ID,
};
use meetup_core::{DomainError, FixedClock, SupportedEvent, Venue};
use meetup_service::dto::{
    CancelMeetupRequest, CreateMeetupRequest, CreateSessionRequest, IncomingMeetupsQuery,
    ListMeetupsQuery, ListVenuesQuery,
};
use meetup_service::{
    EventService, MeetupService, ServiceContext, ServiceError, SessionService, VenueService,
};

struct Harness {
    ctx: ServiceContext,
    store: Arc<InMemoryStore>,
    clock: Arc<FixedClock>,
}

fn harness(capacity: i32) -> Harness {
    let store = seeded_store(capacity);
    let notifier = RecordingNotifier::new();
    let clock = Arc::new(FixedClock::at(SUN_12_00));
    let ctx = test_context(&store, &notifier, &clock);
    Harness { ctx, store, clock }
}

fn create_request(start_ts: i64, end_ts: i64, max_persons: i32) -> CreateMeetupRequest {
    CreateMeetupRequest {
        name: "Monday Chess".to_string(),
        venue_id: VENUE_ID,
        event_id: EVENT_ID,
        start_ts,
        end_ts,
        max_persons,
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_create_session_succeeds() {
    let h = harness(2);
    let service = SessionService::new(&h.ctx);

    let session = service
        .create_session(CreateSessionRequest {
            username: "alice".to_string(),
            password: "alice-password".to_string(),
        })
        .await
        .unwrap();

    assert!(!session.access_token.is_empty());
    assert_eq!(session.token_type, "Bearer");
    assert_eq!(session.expires_in, 3600);
}

#[tokio::test]
async fn test_create_session_rejects_bad_credentials() {
    let h = harness(2);
    let service = SessionService::new(&h.ctx);

    let err = service
        .create_session(CreateSessionRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvalidCredentials)
    ));

    // Unknown username looks the same as a wrong password
    let err = service
        .create_session(CreateSessionRequest {
            username: "mallory".to_string(),
            password: "mallory-password".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvalidCredentials)
    ));
}

// ============================================================================
// Meetup detail and listing
// ============================================================================

#[tokio::test]
async fn test_get_meetup_redacts_for_outsiders() {
    let h = harness(2);
    let service = MeetupService::new(&h.ctx);

    let meetup = service
        .create_meetup(ALICE, create_request(MON_10_00, MON_12_00, 10))
        .await
        .unwrap();
    service.join_meetup(meetup.id, BOB).await.unwrap();

    // Carol never joined and sees neither the roster nor is_joined
    let outsider_view = service.get_meetup(meetup.id, CAROL).await.unwrap();
    assert!(!outsider_view.is_joined);
    let json = serde_json::to_value(&outsider_view).unwrap();
    assert!(json.get("joined_persons").is_none());
    assert!(json.get("cancelled_reason").is_none());
    assert!(json.get("cancelled_at").is_none());
    assert_eq!(json["joined_persons_count"], 1);

    // The organizer sees the roster
    let organizer_view = service.get_meetup(meetup.id, ALICE).await.unwrap();
    let persons = organizer_view.joined_persons.expect("organizer sees roster");
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].username, "bob");

    // So does a participant, with is_joined set
    let participant_view = service.get_meetup(meetup.id, BOB).await.unwrap();
    assert!(participant_view.is_joined);
    assert!(participant_view.joined_persons.is_some());
}

#[tokio::test]
async fn test_get_meetup_not_found() {
    let h = harness(2);
    let service = MeetupService::new(&h.ctx);

    let err = service.get_meetup(404, ALICE).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::MeetupNotFound(404))
    ));
}

#[tokio::test]
async fn test_get_meetups_lists_open_sorted_by_start() {
    let h = harness(3);
    let service = MeetupService::new(&h.ctx);

    let late = service
        .create_meetup(ALICE, create_request(MON_12_00, MON_14_00, 10))
        .await
        .unwrap();
    let early = service
        .create_meetup(BOB, create_request(MON_10_00, MON_12_00, 10))
        .await
        .unwrap();
    let cancelled = service
        .create_meetup(CAROL, create_request(MON_11_00, MON_13_00, 10))
        .await
        .unwrap();
    service
        .cancel_meetup(
            cancelled.id,
            CAROL,
            CancelMeetupRequest {
                cancelled_reason: "rain".to_string(),
            },
        )
        .await
        .unwrap();

    let listed = service.get_meetups(ListMeetupsQuery::default()).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![early.id, late.id]);

    let limited = service
        .get_meetups(ListMeetupsQuery {
            event_id: None,
            limit: Some(1),
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, early.id);

    let none = service
        .get_meetups(ListMeetupsQuery {
            event_id: Some(99),
            limit: None,
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

// ============================================================================
// Incoming meetups
// ============================================================================

#[tokio::test]
async fn test_incoming_meetups_filters_by_status_and_horizon() {
    let h = harness(3);
    let service = MeetupService::new(&h.ctx);

    let morning = service
        .create_meetup(ALICE, create_request(MON_10_00, MON_12_00, 10))
        .await
        .unwrap();
    let afternoon = service
        .create_meetup(ALICE, create_request(MON_12_00, MON_14_00, 10))
        .await
        .unwrap();
    service.join_meetup(morning.id, BOB).await.unwrap();
    service.join_meetup(afternoon.id, BOB).await.unwrap();
    service
        .cancel_meetup(
            morning.id,
            ALICE,
            CancelMeetupRequest {
                cancelled_reason: "rain".to_string(),
            },
        )
        .await
        .unwrap();

    let all = service
        .get_incoming_meetups(BOB, IncomingMeetupsQuery::default())
        .await
        .unwrap();
    let ids: Vec<i64> = all.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![morning.id, afternoon.id]);

    let open = service
        .get_incoming_meetups(
            BOB,
            IncomingMeetupsQuery {
                status: Some("open".to_string()),
                ..IncomingMeetupsQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, afternoon.id);

    let cancelled = service
        .get_incoming_meetups(
            BOB,
            IncomingMeetupsQuery {
                status: Some("cancelled".to_string()),
                ..IncomingMeetupsQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, morning.id);

    // Past the morning meetup's end only the afternoon one remains
    h.clock.set(MON_13_00);
    let remaining = service
        .get_incoming_meetups(BOB, IncomingMeetupsQuery::default())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, afternoon.id);
}

#[tokio::test]
async fn test_incoming_meetups_rejects_unknown_status() {
    let h = harness(2);
    let service = MeetupService::new(&h.ctx);

    let err = service
        .get_incoming_meetups(
            BOB,
            IncomingMeetupsQuery {
                status: Some("upcoming".to_string()),
                ..IncomingMeetupsQuery::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(_)));
}

#[tokio::test]
async fn test_incoming_meetups_filters_by_id_lists() {
    let h = harness(2);
    let service = MeetupService::new(&h.ctx);

    let meetup = service
        .create_meetup(ALICE, create_request(MON_10_00, MON_12_00, 10))
        .await
        .unwrap();
    service.join_meetup(meetup.id, BOB).await.unwrap();

    let matching = service
        .get_incoming_meetups(
            BOB,
            IncomingMeetupsQuery {
                event_ids: Some("1,99".to_string()),
                venue_ids: Some("1".to_string()),
                ..IncomingMeetupsQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(matching.len(), 1);

    let none = service
        .get_incoming_meetups(
            BOB,
            IncomingMeetupsQuery {
                event_ids: Some("99".to_string()),
                ..IncomingMeetupsQuery::default()
            },
        )
        .await
        .unwrap();
    assert!(none.is_empty());
}

// ============================================================================
// Catalogs
// ============================================================================

#[tokio::test]
async fn test_get_events_lists_the_catalog() {
    let h = harness(2);
    let service = EventService::new(&h.ctx);

    let events = service.get_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, EVENT_ID);
    assert_eq!(events[0].name, "Chess");
}

#[tokio::test]
async fn test_get_venues_filters_by_event_and_hours() {
    let h = harness(2);
    h.store.add_venue(Venue {
        id: 2,
        name: "Evening Club".to_string(),
        open_days: vec![1, 2, 3, 4, 5],
        open_at: "12:00".parse().unwrap(),
        closed_at: "20:00".parse().unwrap(),
        timezone: "UTC".to_string(),
        supported_events: vec![SupportedEvent {
            id: 2,
            name: "Go".to_string(),
            meetups_capacity: 4,
        }],
    });
    let service = VenueService::new(&h.ctx);

    let all = service.get_venues(ListVenuesQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let chess_venues = service
        .get_venues(ListVenuesQuery {
            event_id: Some(EVENT_ID),
            ..ListVenuesQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(chess_venues.len(), 1);
    assert_eq!(chess_venues[0].id, VENUE_ID);

    // Only the hall is already open at 11:00
    let open_early = service
        .get_venues(ListVenuesQuery {
            meetup_start: Some("11:00".to_string()),
            ..ListVenuesQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(open_early.len(), 1);
    assert_eq!(open_early[0].id, VENUE_ID);

    // Only the club is still open at 19:00
    let open_late = service
        .get_venues(ListVenuesQuery {
            meetup_end: Some("19:00".to_string()),
            ..ListVenuesQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(open_late.len(), 1);
    assert_eq!(open_late[0].id, 2);

    let err = service
        .get_venues(ListVenuesQuery {
            meetup_start: Some("25:00".to_string()),
            ..ListVenuesQuery::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_get_venue_exposes_supported_events() {
    let h = harness(3);
    let service = VenueService::new(&h.ctx);

    let venue = service.get_venue(VENUE_ID).await.unwrap();
    assert_eq!(venue.name, "Community Hall");
    assert_eq!(venue.open_days, vec![1]);
    assert_eq!(venue.open_at, "09:00");
    assert_eq!(venue.closed_at, "17:00");
    assert_eq!(venue.supported_events.len(), 1);
    assert_eq!(venue.supported_events[0].meetups_capacity, 3);

    let err = service.get_venue(404).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::VenueNotFound(404))
    ));
}
