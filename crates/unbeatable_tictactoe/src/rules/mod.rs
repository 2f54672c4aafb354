//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the search and the invariants can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, has_line, winner};
