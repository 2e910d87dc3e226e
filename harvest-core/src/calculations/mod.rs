//! Pure calculations behind the planning form.
//!
//! Nothing in here talks to the mapping SDK or the user; these are the
//! formatting, parsing, snapping and area rules the widgets are built on.

pub mod area;
pub mod budget;
pub mod common;

pub use area::{MeasuredAreas, format_area, open_space_area};
pub use budget::{format_amount, parse_amount, snap_to_recommended, snap_tolerance};
