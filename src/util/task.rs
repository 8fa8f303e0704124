//! Browser task helpers.
//!
//! Page code spawns fetches and timers unconditionally; outside the browser
//! there is no executor, so tasks are dropped and sleeps return at once.

use std::future::Future;
use std::time::Duration;

/// Run `fut` on the browser's local executor.
pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(fut);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(fut);
    }
}

/// Wait for `duration` on the browser timer queue.
pub async fn sleep(duration: Duration) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::sleep(duration).await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = duration;
    }
}
