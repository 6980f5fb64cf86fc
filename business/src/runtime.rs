//! Spawning of background requests.

use std::future::Future;

use tokio_util::sync::CancellationToken;

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Run `future` unless `token` is cancelled first.
pub async fn until_cancelled<T>(
    token: &CancellationToken,
    future: impl Future<Output = T>,
) -> Option<T> {
    tokio::select! {
        biased;
        () = token.cancelled() => None,
        value = future => Some(value),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finished_future_wins() {
        let token = CancellationToken::new();
        assert_eq!(until_cancelled(&token, async { 3 }).await, Some(3));
    }

    #[tokio::test]
    async fn cancelled_token_wins() {
        let token = CancellationToken::new();
        token.cancel();
        let value = until_cancelled(&token, std::future::pending::<u8>()).await;
        assert_eq!(value, None);
    }
}
