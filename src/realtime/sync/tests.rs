use super::*;

#[test]
fn backoff_doubles_per_consecutive_failure() {
    let mut backoff = PollBackoff::new(1_000);
    assert_eq!(backoff.register_failure(), BackoffVerdict::RetryIn(2_000));
    assert_eq!(backoff.register_failure(), BackoffVerdict::RetryIn(4_000));
    assert_eq!(backoff.register_failure(), BackoffVerdict::RetryIn(8_000));
}

#[test]
fn backoff_delay_is_capped() {
    let mut backoff = PollBackoff::new(200_000);
    // 200s * 2 = 400s would exceed the 300s ceiling
    assert_eq!(backoff.register_failure(), BackoffVerdict::RetryIn(300_000));
}

#[test]
fn backoff_gives_up_after_the_failure_ceiling() {
    let mut backoff = PollBackoff::new(1_000);
    for _ in 0..5 {
        assert!(matches!(
            backoff.register_failure(),
            BackoffVerdict::RetryIn(_)
        ));
    }
    assert_eq!(backoff.register_failure(), BackoffVerdict::GiveUp);
}

#[test]
fn success_resets_the_failure_count() {
    let mut backoff = PollBackoff::new(1_000);
    let _ = backoff.register_failure();
    let _ = backoff.register_failure();
    assert_eq!(backoff.failures(), 2);

    backoff.reset();
    assert_eq!(backoff.failures(), 0);
    // delay sequence starts over
    assert_eq!(backoff.register_failure(), BackoffVerdict::RetryIn(2_000));
}
