use crate::{glacier::GlacierDefinition, scenario::Scenario};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GlacierFile {
    pub schema_version: String,
    pub glaciers: Vec<GlacierDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioFile {
    pub schema_version: String,
    pub scenarios: Vec<Scenario>,
}
