//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::CldConfig;

/// Configuration source, lowest precedence first.
#[derive(Debug, Clone, Copy)]
pub enum Layer {
    Defaults,
    File,
    Environment,
    Cli,
}

/// Merges `(layer, value)` pairs into a [`CldConfig`] in the given order.
pub fn build_config_from_layers(layers: &[(Layer, Value)]) -> CldConfig {
    let mut composer = MergeComposer::new();

    for (layer, value) in layers {
        let layer_value = value.clone();
        match layer {
            Layer::Defaults => composer.push_defaults(layer_value),
            Layer::File => composer.push_file(layer_value, None),
            Layer::Environment => composer.push_environment(layer_value),
            Layer::Cli => composer.push_cli(layer_value),
        }
    }

    CldConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}
