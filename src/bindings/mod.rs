pub mod host;
pub mod memory;
pub mod web;

pub use host::{EventHandler, EventKind, EventOutcome, ListenTarget, PageEvent, PageHost};
pub use memory::{Dispatch, ElementSpec, MemoryPage, NodeId};
pub use web::WebPage;
