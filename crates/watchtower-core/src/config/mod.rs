pub mod alerts;
pub mod watchtower;

pub use alerts::AlertConfig;
pub use watchtower::{ExportConfig, WatchtowerConfig};
