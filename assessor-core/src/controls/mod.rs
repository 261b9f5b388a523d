//! Reusable interactive form primitives.
//!
//! These are toolkit-independent state machines: the terminal front-end
//! renders them and feeds them events, but every behavioral rule (what a
//! click toggles, when a list closes, how a set changes) lives here.

mod disclosure;
mod dropdown;
mod region;
mod toggle_set;

pub use disclosure::Disclosure;
pub use dropdown::{Dropdown, DropdownControl, DropdownOption, PLACEHOLDER};
pub use region::{Point, PointerListener, Region};
pub use toggle_set::ToggleSet;
