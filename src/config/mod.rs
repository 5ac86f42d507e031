//! Configuration loaded from `.ironvault.toml`.

pub mod settings;

pub use settings::Settings;
