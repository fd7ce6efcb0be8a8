//! Cancellation for requests tied to a view's lifetime.
//!
//! A view creates one [`RequestScope`] and runs its requests through
//! [`RequestScope::run`]. When the view is torn down it calls
//! [`RequestScope::cancel`]: every pending request resolves to
//! [`ApiError::Cancelled`] and any later call short-circuits the same way, so
//! a slow response can never write into an unmounted component.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

use crate::error::ApiError;

#[derive(Clone, Debug, Default)]
pub struct RequestScope {
    inner: Rc<ScopeInner>,
}

#[derive(Debug, Default)]
struct ScopeInner {
    cancelled: Cell<bool>,
    next_id: Cell<u64>,
    pending: RefCell<HashMap<u64, AbortHandle>>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Number of requests currently in flight through this scope.
    pub fn pending(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    pub async fn run<F, T>(&self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let (handle, registration) = AbortHandle::new_pair();
        self.inner.pending.borrow_mut().insert(id, handle);

        let outcome = Abortable::new(fut, registration).await;
        self.inner.pending.borrow_mut().remove(&id);

        match outcome {
            Ok(_) if self.is_cancelled() => Err(ApiError::Cancelled),
            Ok(result) => result,
            Err(_aborted) => Err(ApiError::Cancelled),
        }
    }

    /// Abort everything in flight. Idempotent.
    pub fn cancel(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let pending: Vec<AbortHandle> = self.inner.pending.borrow_mut().drain().map(|(_, h)| h).collect();
        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "cancelling in-flight requests");
        }
        for handle in pending {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::pending;

    #[tokio::test]
    async fn test_completed_request_passes_through() {
        let scope = RequestScope::new();
        let value = scope.run(async { Ok::<_, ApiError>(42) }).await;
        assert_eq!(value, Ok(42));
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_request() {
        let scope = RequestScope::new();
        let canceller = scope.clone();

        let (outcome, ()) = futures::join!(
            scope.run(pending::<Result<u32, ApiError>>()),
            async move { canceller.cancel() }
        );

        assert_eq!(outcome, Err(ApiError::Cancelled));
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_scope_rejects_new_requests() {
        let scope = RequestScope::new();
        scope.cancel();
        scope.cancel();
        let mut polled = false;
        let outcome = scope
            .run(async {
                polled = true;
                Ok::<_, ApiError>(())
            })
            .await;
        assert_eq!(outcome, Err(ApiError::Cancelled));
        assert!(!polled);
    }
}
