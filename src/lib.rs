//! Spin Wheel - a terminal wheel of names.
//!
//! Type a list of names, spin the wheel, and let an eased random spin pick a
//! winner. Entries and past winners are kept between sessions in a small JSON
//! store.

pub mod app;
pub mod config;
pub mod entries;
pub mod logging;
pub mod results;
pub mod spin;
pub mod store;
pub mod ui;
pub mod wheel;
