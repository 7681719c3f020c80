//! odinx-core — tone catalog, formula selection and playground mixing models.
//!
//! Everything here is synchronous and side-effect free. The runtime crate owns
//! the request lifecycle; surfaces (CLI, TUI) only drive these models.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod mixing;
pub mod mode;
pub mod selection;
pub mod tone;

pub use error::{Result, ValidationError};
pub use mixing::{DEFAULT_GRAMS, MixInput, MixedTone, Mixing, parse_grams};
pub use mode::Mode;
pub use selection::{FormulaInput, Selection, ToneRole, ToneSlot};
pub use tone::{GrayPercentage, HairCondition, Tone, ToneFamily, parse_hex};
