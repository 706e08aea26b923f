pub mod journal_route;
pub mod modal_controller;
pub mod scroll_lock;

pub use journal_route::JournalRoute;
pub use modal_controller::ModalController;
pub use scroll_lock::{ScrollLockSlot, ViewportLease, ViewportLock};
