//! Keeping local lists in step with the server.
//!
//! A list shown in a dashboard changes only after the server confirmed the
//! change. [`apply_delete`] takes the request outcome and either applies it
//! or leaves the list alone, returning the notice to show either way.

use std::future::Future;

use api::{ApiError, Category, Course, CoursePdf, User};
use dioxus::prelude::*;

use crate::notify::{use_notifier, Notice, Operation};
use crate::session::{use_api, use_request_scope, AppClient};

pub trait Identified {
    fn id(&self) -> i64;
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

identified!(User, Category, Course, CoursePdf);

/// Replace the item with the same id, or append it.
pub fn upsert<T: Identified>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|i| i.id() == item.id()) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: i64) -> Option<T> {
    let index = items.iter().position(|i| i.id() == id)?;
    Some(items.remove(index))
}

/// Apply a delete outcome. The list is untouched on failure.
pub fn apply_delete<T: Identified>(
    items: &mut Vec<T>,
    id: i64,
    outcome: Result<(), ApiError>,
    op: Operation,
) -> Option<Notice> {
    match outcome {
        Ok(()) => {
            remove_by_id(items, id);
            Some(Notice::success(op))
        }
        Err(e) => Notice::failure(op, &e),
    }
}

/// Load a list once on mount. Returns the list and a loading flag; a
/// failure leaves the list empty and raises a notification titled by `op`.
pub fn use_remote_list<T, F, Fut>(op: Operation, fetch: F) -> (Signal<Vec<T>>, Signal<bool>)
where
    T: 'static,
    F: FnOnce(AppClient) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let api = use_api();
    let scope = use_request_scope();
    let notifier = use_notifier();
    let mut items = use_signal(Vec::new);
    let mut loading = use_signal(|| true);

    use_hook(move || {
        spawn(async move {
            match scope.run(fetch(api)).await {
                Ok(list) => items.set(list),
                Err(e) if e.is_cancelled() => return,
                Err(e) => notifier.failure(op, &e),
            }
            loading.set(false);
        });
    });

    (items, loading)
}
