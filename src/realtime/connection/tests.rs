use super::*;

fn policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        backoff_ms: 100,
    }
}

#[test]
fn connect_is_idempotent_while_live() {
    let mut core = ConnectionCore::new();
    assert!(core.request_connect());
    // second call while connecting is a no-op
    assert!(!core.request_connect());

    core.mark_open();
    // and while connected
    assert!(!core.request_connect());
    assert!(core.is_connected());
}

#[test]
fn reconnect_allowed_after_shutdown() {
    let mut core = ConnectionCore::new();
    assert!(core.request_connect());
    core.mark_open();
    core.shutdown();
    assert_eq!(core.state(), ConnectionState::Disconnected);
    assert!(core.request_connect());
}

#[test]
fn lost_connection_retries_with_fixed_backoff() {
    let mut core = ConnectionCore::new();
    core.request_connect();
    core.mark_open();

    assert_eq!(core.connection_lost(&policy(3)), LostAction::RetryAfter(100));
    assert_eq!(core.state(), ConnectionState::Retrying { attempt: 1 });
    core.begin_retry();
    assert_eq!(core.state(), ConnectionState::Connecting);
}

#[test]
fn retries_are_capped_then_failed() {
    let mut core = ConnectionCore::new();
    core.request_connect();

    let p = policy(3);
    for attempt in 1..=3 {
        assert_eq!(core.connection_lost(&p), LostAction::RetryAfter(100));
        assert_eq!(core.state(), ConnectionState::Retrying { attempt });
        core.begin_retry();
    }
    // fourth loss exhausts the budget
    assert_eq!(core.connection_lost(&p), LostAction::GiveUp);
    assert_eq!(core.state(), ConnectionState::Failed);
    assert!(!core.is_connected());

    // failed is terminal for the automatic path, but an explicit
    // reconnect request starts over
    assert!(core.request_connect());
}

#[test]
fn successful_open_resets_the_retry_budget() {
    let mut core = ConnectionCore::new();
    core.request_connect();

    let p = policy(2);
    assert_eq!(core.connection_lost(&p), LostAction::RetryAfter(100));
    core.begin_retry();
    core.mark_open();
    assert_eq!(core.attempts(), 0);

    // budget is full again
    assert_eq!(core.connection_lost(&p), LostAction::RetryAfter(100));
    assert_eq!(core.connection_lost(&p), LostAction::RetryAfter(100));
    assert_eq!(core.connection_lost(&p), LostAction::GiveUp);
}
