use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use log;

use crate::interface::{RemoteConfig, DEFAULT_ENTITY_ID};

const APP_NAME : &str = "tv-remote-panel";

/// On-disk shape of the configuration. Field names match the record the
/// settings surface has always written; `entityId` was added later, older
/// files without it fall back to the default entity.
#[derive(Serialize, Deserialize, Default)]
struct PersistedConfig {
  #[serde(rename = "haUrl")]
  ha_url : String,
  token : String,
  #[serde(rename = "entityId", default = "default_entity_id")]
  entity_id : String,
}

fn default_entity_id() -> String {
  DEFAULT_ENTITY_ID.to_string()
}

impl From<PersistedConfig> for RemoteConfig {
  fn from(persisted : PersistedConfig) -> Self {
    RemoteConfig {
      ha_url : persisted.ha_url,
      token : persisted.token,
      entity_id : persisted.entity_id,
    }
  }
}

/// Sole reader/writer of the durable configuration file.
pub struct ConfigStore {
  path : PathBuf,
}

impl ConfigStore {
  pub fn new(path : PathBuf) -> Self {
    ConfigStore { path }
  }

  pub fn from_default_location() -> Result<Self, confy::ConfyError> {
    let path = confy::get_configuration_file_path(APP_NAME, None)?;
    Ok( ConfigStore::new(path) )
  }

  /// Writes all three fields as one blob, overwriting any prior value.
  pub fn save(&self, config : &RemoteConfig) -> Result<(), confy::ConfyError> {
    let persisted = PersistedConfig {
      ha_url : config.ha_url.clone(),
      token : config.token.clone(),
      entity_id : config.entity_id.clone(),
    };
    confy::store_path(&self.path, persisted)
  }

  /// None when nothing was ever saved or the file does not decode. A broken
  /// file is the same as no file, the panel just starts unconfigured.
  pub fn load(&self) -> Option<RemoteConfig> {
    if !self.path.exists() {
      log::debug!("No saved configuration at {}", self.path.display());
      return None;
    }

    match confy::load_path::<PersistedConfig>(&self.path) {
      Ok( persisted ) => Some( persisted.into() ),
      Err( e ) => {
        log::warn!("Failed to read saved configuration from {} : {}. Starting unconfigured.", self.path.display(), e);
        None
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  fn store_in(dir : &tempfile::TempDir) -> ConfigStore {
    ConfigStore::new(dir.path().join("config.toml"))
  }

  #[test]
  fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let config = RemoteConfig {
      ha_url : "http://x".to_string(),
      token : "tokA".to_string(),
      entity_id : "remote.tv2".to_string(),
    };
    store.save(&config).unwrap();

    assert_eq!(store.load(), Some( config ));
  }

  #[test]
  fn load_without_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.load(), None);
    // a load must not create the file either
    assert!(!dir.path().join("config.toml").exists());
  }

  #[test]
  fn load_of_garbage_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    fs::write(dir.path().join("config.toml"), "{ not toml at all").unwrap();
    assert_eq!(store.load(), None);
  }

  #[test]
  fn load_with_missing_required_field_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    fs::write(dir.path().join("config.toml"), "haUrl = \"http://x\"\n").unwrap();
    assert_eq!(store.load(), None);
  }

  #[test]
  fn missing_entity_id_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    fs::write(
      dir.path().join("config.toml"),
      "haUrl = \"http://ha.local:8123\"\ntoken = \"tok123\"\n",
    )
    .unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.ha_url, "http://ha.local:8123");
    assert_eq!(loaded.token, "tok123");
    assert_eq!(loaded.entity_id, DEFAULT_ENTITY_ID);
  }

  #[test]
  fn save_overwrites_previous_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let first = RemoteConfig {
      ha_url : "http://first".to_string(),
      token : "t1".to_string(),
      entity_id : "remote.one".to_string(),
    };
    let second = RemoteConfig {
      ha_url : "http://second".to_string(),
      token : "t2".to_string(),
      entity_id : "remote.two".to_string(),
    };

    store.save(&first).unwrap();
    store.save(&second).unwrap();
    assert_eq!(store.load(), Some( second ));
  }
}
