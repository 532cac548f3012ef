//! Preset definitions: compact, balanced, full.
//!
//! Each preset bundles graph limits sized for a kind of document. Explicit
//! config fields override the preset's values.

use super::schema::{GraphConfig, PresetName};

// ---------------------------------------------------------------------------
// PresetDefinition
// ---------------------------------------------------------------------------

/// Describes a single preset's characteristics.
#[derive(Debug, Clone)]
pub struct PresetDefinition {
    /// Which preset this describes.
    pub name: PresetName,
    /// Human-readable description.
    pub description: &'static str,
    /// Graph limits this preset applies.
    pub graph: GraphConfig,
}

// ---------------------------------------------------------------------------
// Preset constructors
// ---------------------------------------------------------------------------

/// Get the preset definition for a given name.
pub fn get_preset(name: &PresetName) -> PresetDefinition {
    match name {
        PresetName::Compact => compact_preset(),
        PresetName::Balanced => balanced_preset(),
        PresetName::Full => full_preset(),
    }
}

/// Compact preset: a few hundred bubbles, four levels deep.
pub fn compact_preset() -> PresetDefinition {
    PresetDefinition {
        name: PresetName::Compact,
        description: "Small, shallow graphs that stay readable on any document",
        graph: GraphConfig {
            max_nodes: 500,
            max_depth: 4,
            preview_max_len: 40,
            show_value_previews: true,
        },
    }
}

/// Balanced preset: the default.
pub fn balanced_preset() -> PresetDefinition {
    PresetDefinition {
        name: PresetName::Balanced,
        description: "Good defaults for typical API responses and config files",
        graph: GraphConfig {
            max_nodes: 1_500,
            max_depth: 8,
            preview_max_len: 80,
            show_value_previews: true,
        },
    }
}

/// Full preset: large budgets for deep documents.
pub fn full_preset() -> PresetDefinition {
    PresetDefinition {
        name: PresetName::Full,
        description: "Large, deep graphs for thorough exploration of big documents",
        graph: GraphConfig {
            max_nodes: 5_000,
            max_depth: 16,
            preview_max_len: 120,
            show_value_previews: true,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
