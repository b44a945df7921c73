pub mod decode;
pub mod lookup;
pub mod resolve;
pub mod scan;
pub mod serve;

use gate_config::GateConfig;
use gate_decode::Decoder;

/// Decoder wired up with the configured code policy and URL parameter.
pub fn decoder_from(config: &GateConfig) -> Decoder {
    Decoder::new(config.policy.code_policy(), config.policy.param.clone())
}
