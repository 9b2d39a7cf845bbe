//! Log list panel: formatted messages, fallback for unknown actions, dates.

use kittest::Queryable;
use warden_business::logs::LogSortKey;
use warden_business::{Database, Log, LogAction, LogId, SortState, User, UserId, format_timestamp};

use crate::common::{DEMO_ADMIN_ID, app_harness, panel_harness, settle};

mod common;

fn logs_harness<'a>(seed: Database) -> egui_kittest::Harness<'a, warden_ui::state::State> {
    let mut harness = panel_harness(seed, |ctx, ui| warden_ui::widgets::logs_panel(ctx, ui));
    settle(&mut harness);
    harness
}

#[test]
fn test_logs_tab_shows_formatted_messages() {
    let mut harness = app_harness(Some(DEMO_ADMIN_ID));
    settle(&mut harness);

    harness.get_by_label("Logs").click();
    settle(&mut harness);

    assert!(
        harness.query_by_label("6 entries").is_some(),
        "all demo entries should be counted"
    );
    assert!(harness.query_by_label("login to account").is_some());
    assert!(harness.query_by_label("blocked account \"bob\"").is_some());
    assert!(
        harness
            .query_by_label("enable limit for account \"alice\"")
            .is_some()
    );
}

#[test]
fn test_unknown_action_renders_fallback() {
    let mut entry = Log::new(
        LogId::new("1"),
        User::new(UserId::new("1"), "alice"),
        LogAction::Login,
        0,
    );
    entry.action = "wipe_disk".into();
    let seed = Database {
        logs: vec![entry],
        ..Database::demo()
    };

    let harness = logs_harness(seed);

    assert!(
        harness
            .query_by_label("unknown action \"wipe_disk\"")
            .is_some(),
        "unknown tag should render the fallback message"
    );
}

#[test]
fn test_dates_use_local_time() {
    let harness = logs_harness(Database::demo());
    let expected = format_timestamp(1_700_000_000_000, &chrono::Local);

    assert!(
        harness.query_by_label(&expected).is_some(),
        "first demo entry should show {expected}"
    );
}

#[test]
fn test_sorted_header_shows_arrow() {
    let mut harness = logs_harness(Database::demo());

    harness
        .state_mut()
        .ctx
        .update::<SortState<LogSortKey>>(|sort| sort.toggle(LogSortKey::Timestamp));
    settle(&mut harness);

    assert!(harness.query_by_label("Date ⏶").is_some());
    assert!(harness.query_by_label("Who").is_some());
}
