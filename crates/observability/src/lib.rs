//! OdinX observability: tracing subscriber setup shared by the CLI and TUI.
//!
//! - console output through `tracing-subscriber`'s fmt layer
//! - optional OTLP span export when an endpoint is configured
//! - an optional [LogSink] that receives every formatted line (the TUI log screen)
//!
//! ```no_run
//! use odinx_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("odinx").with_log_level("info");
//! init(config)?;
//! tracing::info!("ready");
//! # Ok::<(), odinx_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` - Service name
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint (export disabled when unset)
//! - `ODINX_LOG` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod log_layer;
pub mod telemetry;
pub mod tracing;

pub use config::{LogSink, ObservabilityConfig};
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use tracing::{record_duration, record_error};
