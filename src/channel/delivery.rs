//! Single bounded delivery attempt

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};

use super::error::DeliveryError;

/// Try to place `value` into one consumer queue.
///
/// A zero `timeout` makes a single non-blocking attempt. Otherwise the
/// enqueue races a deadline of `timeout`. No retries and no registry
/// side effects; the caller decides what a failure means.
pub(crate) async fn attempt<T>(
    queue: &mpsc::Sender<T>,
    value: T,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    if timeout.is_zero() {
        return queue.try_send(value).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::Full,
            TrySendError::Closed(_) => DeliveryError::Closed,
        });
    }

    match tokio::time::timeout(timeout, queue.send(value)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(_)) => Err(DeliveryError::Closed),
        Err(_) => Err(DeliveryError::TimedOut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_blocking_accepts_when_space() {
        let (tx, mut rx) = mpsc::channel(1);

        assert_eq!(attempt(&tx, 1, Duration::ZERO).await, Ok(()));
        assert_eq!(rx.recv().await, Some(1));
    }

    #[tokio::test]
    async fn test_non_blocking_fails_when_full() {
        let (tx, _rx) = mpsc::channel(1);

        attempt(&tx, 1, Duration::ZERO).await.unwrap();
        assert_eq!(
            attempt(&tx, 2, Duration::ZERO).await,
            Err(DeliveryError::Full)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_until_deadline() {
        let (tx, _rx) = mpsc::channel(1);
        tx.send(0).await.unwrap();

        let start = tokio::time::Instant::now();
        let result = attempt(&tx, 1, Duration::from_millis(30)).await;

        assert_eq!(result, Err(DeliveryError::TimedOut));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_once_reader_drains() {
        let (tx, mut rx) = mpsc::channel(1);
        tx.send(0).await.unwrap();

        let reader = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let first = rx.recv().await;
            let second = rx.recv().await;
            (first, second)
        });

        assert_eq!(attempt(&tx, 1, Duration::from_millis(50)).await, Ok(()));
        assert_eq!(reader.await.unwrap(), (Some(0), Some(1)));
    }

    #[tokio::test]
    async fn test_closed_reader() {
        let (tx, rx) = mpsc::channel::<u8>(1);
        drop(rx);

        assert_eq!(
            attempt(&tx, 1, Duration::ZERO).await,
            Err(DeliveryError::Closed)
        );
        assert_eq!(
            attempt(&tx, 1, Duration::from_millis(10)).await,
            Err(DeliveryError::Closed)
        );
    }
}
