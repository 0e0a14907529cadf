//! Cancellation shared by every request a view issues.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{AbortHandle, Abortable};

use crate::error::ApiError;

#[derive(Debug, Default)]
struct SignalState {
    aborted: bool,
    next_id: u64,
    handles: HashMap<u64, AbortHandle>,
}

/// Unregisters a guarded future's handle once it finishes or is dropped.
struct Enrolled<'a> {
    signal: &'a AbortSignal,
    id: u64,
}

impl Drop for Enrolled<'_> {
    fn drop(&mut self) {
        self.signal.lock().handles.remove(&self.id);
    }
}

/// One-shot cancellation flag for a group of requests.
///
/// A view creates one signal, passes it to every request it starts, and calls
/// [`abort`](AbortSignal::abort) when it goes away. Each guarded request then
/// resolves to [`ApiError::Cancelled`]. Requests guarded after the abort are
/// cancelled before they are sent.
#[derive(Clone, Debug, Default)]
pub struct AbortSignal {
    state: Arc<Mutex<SignalState>>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SignalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancel every in-flight request registered with this signal.
    pub fn abort(&self) {
        let handles = {
            let mut state = self.lock();
            state.aborted = true;
            std::mem::take(&mut state.handles)
        };
        for handle in handles.into_values() {
            handle.abort();
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.lock().aborted
    }

    /// Run `fut` until it completes or the signal fires.
    pub async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, ApiError> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut state = self.lock();
            if state.aborted {
                return Err(ApiError::Cancelled);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.handles.insert(id, handle);
            id
        };
        let _enrolled = Enrolled { signal: self, id };
        Abortable::new(fut, registration)
            .await
            .map_err(|_| ApiError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guard_passes_through() {
        let signal = AbortSignal::new();
        let value = signal.guard(async { 7 }).await.unwrap();
        assert_eq!(value, 7);
        assert!(!signal.is_aborted());
    }

    #[tokio::test]
    async fn test_finished_requests_are_unregistered() {
        let signal = AbortSignal::new();
        for _ in 0..100 {
            signal.guard(async { 1 }).await.unwrap();
        }
        assert!(signal.lock().handles.is_empty());

        let dropped = signal.guard(futures::future::pending::<()>());
        {
            let mut dropped = Box::pin(dropped);
            assert!(futures::poll!(dropped.as_mut()).is_pending());
            assert_eq!(signal.lock().handles.len(), 1);
        }
        assert!(signal.lock().handles.is_empty());
    }

    #[tokio::test]
    async fn test_abort_cancels_pending() {
        let signal = AbortSignal::new();
        let pending = signal.guard(futures::future::pending::<()>());
        let aborter = async {
            tokio::task::yield_now().await;
            signal.abort();
        };

        let (result, ()) = futures::join!(pending, aborter);
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }

    #[tokio::test]
    async fn test_aborted_signal_rejects_new_work() {
        let signal = AbortSignal::new();
        signal.abort();

        let result = signal.guard(async { 1 }).await;
        assert!(result.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_abort_reaches_every_clone() {
        let signal = AbortSignal::new();
        let first = signal.clone();
        let second = signal.clone();

        let (a, b, ()) = futures::join!(
            first.guard(futures::future::pending::<()>()),
            second.guard(futures::future::pending::<()>()),
            async {
                tokio::task::yield_now().await;
                signal.abort();
            }
        );
        assert!(a.is_err());
        assert!(b.is_err());
    }
}
