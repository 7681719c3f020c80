//! Application metadata constants

pub const NAME: &str = "odinx";
pub const DISPLAY_NAME: &str = "OdinX Color Lab";
pub const TAGLINE: &str = "Asistente de Formulación Visual";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Visual hair-colour formulation assistant for the CAV Professional line";

/// Product line the catalog describes.
pub const PRODUCT_LINE: &str = "CAV Professional";

/// Directory name for user-level configuration (`~/.odinx/env`).
pub const DATA_DIR: &str = ".odinx";
