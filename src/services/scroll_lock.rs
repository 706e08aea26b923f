//! Shared page scroll lock.
//!
//! Several overlays may need background scrolling suppressed at once. Each
//! holds a [`ViewportLease`]; the body's `overflow` is forced to `hidden` while
//! any lease is alive and restored to its previous inline value when the last
//! one drops. The holder count lives in the page's [`ScrollLockSlot`], so every
//! lock built over the same page shares it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::bindings::PageHost;

const LOCKED_OVERFLOW: &str = "hidden";

/// Per-page scroll lock bookkeeping, owned by the [`PageHost`].
#[derive(Debug, Default)]
pub struct ScrollLockSlot {
    holders: Cell<usize>,
    saved_overflow: RefCell<Option<String>>,
}

impl ScrollLockSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holders(&self) -> usize {
        self.holders.get()
    }
}

fn release<H: PageHost>(host: &H) {
    let slot = host.scroll_lock_slot();
    let holders = slot.holders.get().saturating_sub(1);
    slot.holders.set(holders);
    if holders == 0 {
        let previous = slot.saved_overflow.borrow_mut().take().unwrap_or_default();
        host.set_body_overflow(&previous);
        log::debug!("Viewport scroll unlocked (restored overflow {previous:?})");
    }
}

/// Handle to the scroll lock of a page.
pub struct ViewportLock<H: PageHost> {
    host: Rc<H>,
}

impl<H: PageHost> Clone for ViewportLock<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
        }
    }
}

impl<H: PageHost> fmt::Debug for ViewportLock<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportLock")
            .field("holders", &self.holders())
            .finish()
    }
}

impl<H: PageHost> ViewportLock<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self { host }
    }

    /// Take a lease, locking the viewport if nobody else holds it.
    pub fn acquire(&self) -> ViewportLease<H> {
        let slot = self.host.scroll_lock_slot();
        let holders = slot.holders.get();
        if holders == 0 {
            let previous = self.host.body_overflow();
            self.host.set_body_overflow(LOCKED_OVERFLOW);
            *slot.saved_overflow.borrow_mut() = Some(previous);
            log::debug!("Viewport scroll locked");
        }
        slot.holders.set(holders + 1);
        ViewportLease {
            host: Rc::clone(&self.host),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    pub fn holders(&self) -> usize {
        self.host.scroll_lock_slot().holders()
    }
}

/// Outstanding hold on a [`ViewportLock`]; releases on drop.
#[must_use = "the viewport unlocks as soon as the lease is dropped"]
pub struct ViewportLease<H: PageHost> {
    host: Rc<H>,
}

impl<H: PageHost> fmt::Debug for ViewportLease<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportLease").finish_non_exhaustive()
    }
}

impl<H: PageHost> Drop for ViewportLease<H> {
    fn drop(&mut self) {
        release(self.host.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::memory::MemoryPage;

    #[test]
    fn test_single_lease_locks_and_unlocks() {
        let page = Rc::new(MemoryPage::new());
        let lock = ViewportLock::new(Rc::clone(&page));
        assert!(!lock.is_locked());

        let lease = lock.acquire();
        assert!(lock.is_locked());
        assert_eq!(page.body_overflow(), "hidden");

        drop(lease);
        assert!(!lock.is_locked());
        assert_eq!(page.body_overflow(), "");
    }

    #[test]
    fn test_restores_previous_inline_value() {
        let page = Rc::new(MemoryPage::new());
        page.set_body_overflow("scroll");
        let lock = ViewportLock::new(Rc::clone(&page));

        let lease = lock.acquire();
        assert_eq!(page.body_overflow(), "hidden");
        drop(lease);
        assert_eq!(page.body_overflow(), "scroll");
    }

    #[test]
    fn test_nested_leases_hold_until_last_drop() {
        let page = Rc::new(MemoryPage::new());
        let lock = ViewportLock::new(Rc::clone(&page));
        let shared = lock.clone();

        let first = lock.acquire();
        let second = shared.acquire();
        assert_eq!(lock.holders(), 2);

        drop(first);
        assert!(shared.is_locked());
        assert_eq!(page.body_overflow(), "hidden");

        drop(second);
        assert_eq!(lock.holders(), 0);
        assert_eq!(page.body_overflow(), "");
    }

    #[test]
    fn test_independent_locks_share_page_count() {
        let page = Rc::new(MemoryPage::new());
        let modal_lock = ViewportLock::new(Rc::clone(&page));
        let drawer_lock = ViewportLock::new(Rc::clone(&page));

        let modal = modal_lock.acquire();
        let drawer = drawer_lock.acquire();
        assert_eq!(modal_lock.holders(), 2);
        assert_eq!(page.scroll_lock_slot().holders(), 2);

        drop(modal);
        assert_eq!(page.body_overflow(), "hidden");
        drop(drawer);
        assert_eq!(page.body_overflow(), "");
    }

    #[test]
    fn test_relock_saves_fresh_value() {
        let page = Rc::new(MemoryPage::new());
        let lock = ViewportLock::new(Rc::clone(&page));

        drop(lock.acquire());
        page.set_body_overflow("auto");
        let lease = lock.acquire();
        drop(lease);
        assert_eq!(page.body_overflow(), "auto");
    }
}
