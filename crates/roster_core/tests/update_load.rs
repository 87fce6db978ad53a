use std::sync::Once;

use pretty_assertions::assert_eq;
use roster_core::{update, AppState, Effect, Msg, Notification, User, MSG_USERS_LOADED};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(roster_logging::initialize_for_tests);
}

fn john_and_mark() -> Vec<User> {
    vec![
        User::new(1, "John", "email@jhon.com"),
        User::new(2, "Mark", "email@Mark.com"),
    ]
}

#[test]
fn activation_requests_the_full_list() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Activated);

    assert_eq!(effects, vec![Effect::LoadUsers]);
    assert_eq!(state.in_flight(), 1);
    assert!(state.users().is_empty());
}

#[test]
fn loaded_users_replace_the_local_list() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Activated);
    let (mut state, effects) = update(state, Msg::UsersLoaded(Ok(john_and_mark())));

    assert_eq!(state.users(), john_and_mark().as_slice());
    assert_eq!(state.view().user_count, 2);
    assert_eq!(state.in_flight(), 0);
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::success(MSG_USERS_LOADED))]
    );
    assert!(state.consume_dirty());
}

#[test]
fn reload_keeps_service_order_and_drops_stale_entries() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::UsersLoaded(Ok(john_and_mark())));
    let reordered = vec![
        User::new(7, "Zed", "zed@example.com"),
        User::new(2, "Mark", "email@Mark.com"),
    ];

    let (state, _) = update(state, Msg::UsersLoaded(Ok(reordered.clone())));

    assert_eq!(state.users(), reordered.as_slice());
}

#[test]
fn load_failure_reports_text_and_keeps_list() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::UsersLoaded(Ok(john_and_mark())));
    let (state, _) = update(state, Msg::Activated);

    let (state, effects) = update(
        state,
        Msg::UsersLoaded(Err("connection refused".to_string())),
    );

    assert_eq!(state.users().len(), 2);
    assert_eq!(state.in_flight(), 0);
    assert_eq!(
        effects,
        vec![Effect::Notify(Notification::error("connection refused"))]
    );
}

#[test]
fn first_load_failure_leaves_list_empty() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Activated);
    let (state, effects) = update(state, Msg::UsersLoaded(Err("boom".to_string())));

    assert!(state.users().is_empty());
    assert_eq!(effects, vec![Effect::Notify(Notification::error("boom"))]);
}
