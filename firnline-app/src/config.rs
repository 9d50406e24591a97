use anyhow::{Context, Result};
use firnline_schemas::{
    file_formats::{GlacierFile, ScenarioFile},
    glacier::GlacierDefinition,
    scenario::Scenario,
};
use std::{collections::HashMap, fs, path::Path};

/// All glacier definitions and weather scenarios loaded from YAML files.
/// This is the complete static input for a tracking run.
pub struct ScenarioLibrary {
    pub glaciers: HashMap<String, GlacierDefinition>,
    pub scenarios: HashMap<String, Scenario>,
}

impl ScenarioLibrary {
    /// Loads all data from the specified base directory.
    pub fn load(base_path: &str) -> Result<Self> {
        println!("Loading scenario library from '{}'...", base_path);

        let glaciers = load_yaml_files_into_map(
            Path::new(base_path).join("1_glaciers"),
            |file: GlacierFile| file.glaciers,
            |item: &GlacierDefinition| item.glacier_id.clone(),
        )?;
        let scenarios = load_yaml_files_into_map(
            Path::new(base_path).join("2_scenarios"),
            |file: ScenarioFile| file.scenarios,
            |item: &Scenario| item.scenario_id.clone(),
        )?;

        println!("Scenario library loaded successfully.");
        Ok(Self {
            glaciers,
            scenarios,
        })
    }
}

/// Generic helper to load all YAML files in a directory into a HashMap.
fn load_yaml_files_into_map<P, F, E, T, K>(
    dir_path: P,
    extract_vec: E,
    get_key: K,
) -> Result<HashMap<String, T>>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., GlacierFile)
    E: Fn(F) -> Vec<T>,                  // A closure to extract the Vec<T> from the wrapper
    K: Fn(&T) -> String,                 // A closure to get the key for the map from an item T
{
    let mut map = HashMap::new();
    for entry in fs::read_dir(dir_path.as_ref())
        .with_context(|| format!("Failed to read directory: {:?}", dir_path.as_ref()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            let content = fs::read_to_string(&path)?;
            let file_wrapper: F = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

            for item in extract_vec(file_wrapper) {
                map.insert(get_key(&item), item);
            }
        }
    }
    Ok(map)
}
