use std::{cell::RefCell, collections::HashMap, future::Future, rc::Rc};

use futures::future::{abortable, AbortHandle};
use leptos::*;

#[derive(Default)]
struct LifetimeInner {
    ended: bool,
    next_id: u64,
    handles: HashMap<u64, AbortHandle>,
}

/// Drops a request's abort handle once its bound future is finished or dropped.
struct Registration {
    inner: Rc<RefCell<LifetimeInner>>,
    id: u64,
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.handles.remove(&self.id);
        }
    }
}

/// Ties in-flight requests to the view that started them.
///
/// Futures wrapped with [`Lifetime::bind`] resolve to `None` once the view
/// is torn down, so late responses never reach disposed state.
#[derive(Clone, Default)]
pub struct Lifetime {
    inner: Rc<RefCell<LifetimeInner>>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        !self.inner.borrow().ended
    }

    pub fn bind<F>(&self, fut: F) -> impl Future<Output = Option<F::Output>>
    where
        F: Future,
    {
        let (fut, handle) = abortable(fut);
        let registration = {
            let mut inner = self.inner.borrow_mut();
            if inner.ended {
                handle.abort();
                None
            } else {
                let id = inner.next_id;
                inner.next_id += 1;
                inner.handles.insert(id, handle);
                Some(Registration {
                    inner: self.inner.clone(),
                    id,
                })
            }
        };
        let lifetime = self.clone();
        async move {
            let _registration = registration;
            match fut.await {
                Ok(output) if lifetime.is_alive() => Some(output),
                _ => None,
            }
        }
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.inner.borrow().handles.len()
    }

    pub fn end(&self) {
        let handles = {
            let mut inner = self.inner.borrow_mut();
            inner.ended = true;
            std::mem::take(&mut inner.handles)
        };
        if !handles.is_empty() {
            log::debug!("cancelling {} in-flight request(s)", handles.len());
        }
        for handle in handles.into_values() {
            handle.abort();
        }
    }
}

/// A lifetime ended by the current reactive owner's cleanup.
pub fn use_lifetime() -> Lifetime {
    let lifetime = Lifetime::new();
    let on_drop = lifetime.clone();
    on_cleanup(move || on_drop.end());
    lifetime
}

/// Spawns `fut` bound to `lifetime`; the result is dropped if the view is gone.
pub fn spawn_bound<F>(lifetime: &Lifetime, fut: F)
where
    F: Future<Output = ()> + 'static,
{
    let bound = lifetime.bind(fut);
    spawn_local(async move {
        let _ = bound.await;
    });
}
