use std::future::Future;
use std::time::Duration;

use crate::error::{Result, VoiceError};

/// Default deadline for every outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Run `request` under a cancellation deadline.
///
/// When the deadline fires the request future is dropped, which aborts the
/// underlying connection. The timer itself is owned by the timeout future and
/// is released as soon as either side settles.
pub async fn with_deadline<T, F>(deadline: Duration, request: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, request).await {
        Ok(result) => result,
        Err(_) => Err(VoiceError::Timeout(deadline)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_a_fast_result() {
        let value = with_deadline(Duration::from_secs(1), async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn reports_timeout_for_a_slow_request() {
        let result: Result<()> = with_deadline(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(VoiceError::Timeout(d)) if d == Duration::from_millis(20)));
    }
}
