//! Runtime configuration file loading.

use std::fs;
use std::io;
use std::path::Path;

use planet_defense_sim::SimConfig;

use crate::store::StoreError;

/// Read a JSON `SimConfig`. Absent fields take their defaults and an absent
/// file yields the default config.
pub fn load_config(path: &Path) -> Result<SimConfig, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(SimConfig::default()),
        Err(err) => Err(err.into()),
    }
}
