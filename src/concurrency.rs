//! Running two independent mutations at once
//!
//! Both futures are driven to completion before returning, even when the
//! first one fails, so a failed delete never leaves a create half-observed.

use crate::error::{Error, Result};
use std::future::Future;

/// Drive `a` and `b` concurrently and wait for both
///
/// If exactly one fails its error is returned. If both fail the errors are
/// wrapped in [`Error::Multiple`], `a`'s first.
pub async fn run_pair<A, B, FA, FB>(a: FA, b: FB) -> Result<(A, B)>
where
    FA: Future<Output = Result<A>>,
    FB: Future<Output = Result<B>>,
{
    match futures::future::join(a, b).await {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(first), Err(second)) => Err(Error::Multiple {
            first: Box::new(first),
            second: Box::new(second),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_both_succeed() {
        let (a, b) = run_pair(async { Ok(1) }, async { Ok("two") }).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
    }

    #[tokio::test]
    async fn test_runs_concurrently() {
        let started = std::time::Instant::now();
        run_pair(
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(())
            },
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(())
            },
        )
        .await
        .unwrap();
        assert!(started.elapsed() < Duration::from_millis(190));
    }

    #[tokio::test]
    async fn test_one_failure_still_waits_for_other() {
        let finished = AtomicBool::new(false);

        let result: Result<((), ())> = run_pair(
            async { Err(Error::from_status(400, "rejected")) },
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                finished.store(true, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;

        assert!(matches!(result, Err(Error::ClientApi { status: 400, .. })));
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_both_failures_reported() {
        let result: Result<((), ())> = run_pair(
            async { Err(Error::from_status(409, "create")) },
            async { Err(Error::from_status(503, "delete")) },
        )
        .await;

        match result.unwrap_err() {
            Error::Multiple { first, second } => {
                assert_eq!(first.status(), Some(409));
                assert_eq!(second.status(), Some(503));
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }
}
