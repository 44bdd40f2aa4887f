// src/config.rs

//! Named search profiles, stored as pretty-printed JSON on disk.
//!
//! A profile is just a [`SearchConfig`]: one concrete combination of feature
//! toggles and tuning margins. Keeping them as files makes it easy to pit
//! two configurations against each other from the command line.

use crate::game::search::SearchConfig;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const PROFILES_DIR: &str = "profiles";

pub fn save_profile(name: &str, config: &SearchConfig) -> io::Result<()> {
    fs::create_dir_all(PROFILES_DIR)?;
    let path = Path::new(PROFILES_DIR).join(format!("{name}.json"));
    let json = serde_json::to_string_pretty(config)?;
    fs::File::create(path)?.write_all(json.as_bytes())
}

pub fn load_profile(name: &str) -> io::Result<SearchConfig> {
    let path = Path::new(PROFILES_DIR).join(format!("{name}.json"));
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(io::Error::from)
}

pub fn get_profiles() -> io::Result<Vec<String>> {
    let mut profiles = Vec::new();
    if !Path::new(PROFILES_DIR).exists() {
        return Ok(profiles);
    }
    for entry in fs::read_dir(PROFILES_DIR)? {
        let path = entry?.path();
        if path.is_file() {
            if let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) {
                profiles.push(name.to_string());
            }
        }
    }
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = SearchConfig::default();
        config.use_razoring = true;
        config.aspiration_window = 40;

        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.use_razoring, config.use_razoring);
        assert_eq!(restored.aspiration_window, config.aspiration_window);
        assert_eq!(restored.max_depth, config.max_depth);
    }
}
