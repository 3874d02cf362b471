use super::DeadlineSignal;
use futures::FutureExt;
use std::future::IntoFuture;
use std::time::Duration;

#[tokio::test]
async fn test_new_signal_is_unfired() {
  let signal = DeadlineSignal::new();
  assert!(!signal.is_fired());
  assert!(signal.fired().now_or_never().is_none());
}

#[tokio::test]
async fn test_fire_is_observed_by_every_clone() {
  let signal = DeadlineSignal::new();
  let observer = signal.clone();

  signal.fire();

  assert!(observer.is_fired());
  assert!(observer.fired().now_or_never().is_some());
  // Observing does not consume the state.
  assert!(observer.fired().now_or_never().is_some());
  assert!(signal.is_fired());
}

#[tokio::test]
async fn test_fire_twice_is_noop() {
  let signal = DeadlineSignal::new();
  signal.fire();
  signal.fire();
  assert!(signal.is_fired());
}

#[tokio::test]
async fn test_fire_wakes_all_waiters() {
  let signal = DeadlineSignal::new();
  let mut waiters = Vec::new();
  for _ in 0..8 {
    let signal = signal.clone();
    waiters.push(tokio::spawn(async move { signal.fired().await }));
  }

  tokio::task::yield_now().await;
  signal.fire();

  for waiter in waiters {
    tokio::time::timeout(Duration::from_secs(1), waiter)
      .await
      .expect("waiter was not woken")
      .unwrap();
  }
}

#[tokio::test]
async fn test_identity() {
  let a = DeadlineSignal::new();
  let b = DeadlineSignal::new();
  assert_eq!(a, a.clone());
  assert!(a.same_identity(&a.clone()));
  assert_ne!(a, b);
}

#[tokio::test]
async fn test_into_future_in_select() {
  let signal = DeadlineSignal::new();
  signal.fire();

  let branch = tokio::select! {
    _ = signal.clone().into_future() => "signal",
    _ = tokio::time::sleep(Duration::from_secs(1)) => "sleep",
  };
  assert_eq!(branch, "signal");
}
