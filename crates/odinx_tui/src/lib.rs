//! odinx-tui — interactive formula lab and playground.
//!
//! State in [state], drawing in [view], colours in [theme]. Run with [run_tui].

pub mod run;
pub mod state;
pub mod theme;
pub mod view;

pub use run::run_tui;
pub use state::{Focus, Screen, TuiState};
pub use view::draw as draw_view;
