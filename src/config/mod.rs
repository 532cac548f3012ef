//! Configuration: schema, presets and override loading.

pub mod preset;
pub mod schema;

pub use schema::{GraphConfig, JsonScopeConfig, PresetName};
