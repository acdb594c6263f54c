//! # Golden Path Test
//!
//! A whole session through the console transport: join, browse, book a ride,
//! race, and get refused a second race the same day.
//!
//! Run with: cargo test -p paddock --test golden_path_test

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use paddock::app::initial_state;
use paddock::config::GameConfig;
use paddock::transport::ConsoleTransport;
use paddock::{Dispatcher, EventBus, Runtime, Shutdown, StopReason};
use paddock_core::GameStore;
use paddock_race::{RaceDay, RaceSimulator};
use paddock_shared::ChatUser;

const SESSION: &str = "\
/start
role:jockey
/profile
/market
buy:Blue Horizon
/ride Thunder Road
/tracks
/race
/race
/help
/gallop
";

fn race_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 14).unwrap()
}

#[tokio::test]
async fn console_session_golden_path() {
    let store = Arc::new(GameStore::new(initial_state(&GameConfig::default()).unwrap()));
    let bus = EventBus::new(64);
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&store),
        RaceSimulator::seeded(31),
        RaceDay::default(),
        bus.sender(),
    ));
    let user = ChatUser {
        id: 1,
        display_name: "Lester".into(),
    };
    let transport = ConsoleTransport::new(SESSION.as_bytes(), Vec::new(), user);

    let mut runtime = Runtime::new(
        transport,
        dispatcher,
        bus.receiver(),
        Arc::new(Shutdown::new()),
        Duration::from_millis(10),
    )
    .with_clock(race_day);

    assert_eq!(runtime.run().await, StopReason::TransportClosed);
    let output = String::from_utf8(runtime.transport().writer().clone()).unwrap();

    // Role menu, then enrollment.
    assert!(output.contains("[Horse Owner] role:owner"));
    assert!(output.contains("You joined as Jockey"));
    assert!(output.contains("Money: $10,000"));

    // Market with buy buttons; purchases closed.
    assert!(output.contains("[Buy Blue Horizon] buy:Blue Horizon"));
    assert!(output.contains("Market purchases are not open yet."));

    // Ride, tracks, one race.
    assert!(output.contains("booked to ride Thunder Road"));
    assert!(output.contains("Riverside Park"));
    assert!(output.contains("Race day 2024-09-14"));
    assert!(output.contains("Today's race has already been run"));

    assert!(output.contains("/ride <horse>"));
    assert!(output.contains("Unknown command, try /help."));

    let state = store.read();
    assert!(!state.can_run_daily_race(race_day()));
    assert_eq!(state.horses().map(paddock_core::Horse::wins).sum::<u32>(), 1);
    assert_eq!(state.jockey_for("Thunder Road").unwrap().user_id, 1);
}
