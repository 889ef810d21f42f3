//! Link discovery.
//!
//! Discovery runs in two steps:
//!
//! 1. [`collector::collect`] fetches every seed page and gathers its links
//! 2. [`router::LinkRouter::route`] keeps the links shaped like articles,
//!    in category order, and drops blacklisted sections
//!
//! [`classifier`] holds the structural URL test both steps build on.

pub mod classifier;
pub mod collector;
pub mod router;

pub use classifier::{Category, matches};
pub use collector::collect;
pub use router::LinkRouter;
