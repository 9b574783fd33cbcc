//! Tag cloud layout.
//!
//! Lays out short text labels ("tags") inside a fixed canvas so that they fill
//! it without overlapping. Tags earlier in the list get the larger, emphasized
//! spots; copies of all tags are then packed into the remaining space at
//! shrinking sizes, and leftover slivers receive tags of matching length.
//!
//! Use [`layout::compute_layout`] to run a layout synchronously, or a [`TagWall`]
//! to have layouts computed on a background worker whenever the tags, colours
//! or canvas change. Text is measured through the [`TextMeasurer`] trait, with
//! implementations for real fonts ([`Font`]) and fixed-cell text
//! ([`MonospaceMeasurer`]).

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// The placement passes and the free-space selector
pub mod layout;

mod measure;
pub use measure::*;

mod placement;
pub use placement::*;

mod random;
pub use random::*;

mod rect;
pub use rect::*;

mod region;
pub use region::*;

mod scheduler;
pub use scheduler::*;

mod units;
pub use units::*;
