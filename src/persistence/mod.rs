use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::DashboardError;

const APP_NAME: &str = "pbdash";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        if let Err(e) = fs::create_dir_all(&app_dir) {
            log::warn!("Failed to create {}: {}", app_dir.display(), e);
        }
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<(), DashboardError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    log::info!("Data saved to: {}", path.display());
    Ok(())
}

/// Reads `path`, or returns `None` when the file does not exist.
pub fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>, DashboardError> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    log::info!("Data loaded from: {}", path.display());
    Ok(Some(data))
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    match load_json::<T>(path) {
        Ok(Some(data)) => data,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        values: Vec<u32>,
    }

    #[test]
    fn test_json_round_trip_and_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.json");

        assert_eq!(load_json::<Sample>(&path).unwrap(), None);

        let sample = Sample { name: "피코크".to_string(), values: vec![1, 2] };
        save_json(&sample, &path).unwrap();
        assert_eq!(load_json::<Sample>(&path).unwrap(), Some(sample));

        fs::write(&path, "{ not json").unwrap();
        assert!(load_json::<Sample>(&path).is_err());
        assert_eq!(load_json_or_default::<Sample>(&path), Sample::default());
    }
}
