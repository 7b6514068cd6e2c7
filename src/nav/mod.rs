//! Search box state, result activation and arrival on the target page.

pub mod handoff;
pub mod navigator;
pub mod search_box;

pub use handoff::{Handoff, Navigation};
pub use navigator::{DEFAULT_SETTLE, Navigator, ScrollReason, ScrollTarget};
pub use search_box::{DropdownState, SearchBox, SearchKey};
