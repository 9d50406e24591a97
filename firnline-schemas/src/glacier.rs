use crate::params::ModelParameters;
use serde::Deserialize;

/// A tracked glacier as defined in the scenario library.
///
/// Each glacier gets its own independent model instance; `parameters`
/// overrides any subset of the model defaults for this glacier only.
#[derive(Debug, Clone, Deserialize)]
pub struct GlacierDefinition {
    pub glacier_id: String,
    pub glacier_name: String,
    pub region: String,
    pub elevation_m: f64,
    pub parameters: Option<ModelParameters>,
}
