use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::constants::*;

#[cfg(test)]
use mockall::automock;

/// File-backed key-value store playing the role the device key-value
/// storage plays for the mobile client. One JSON object per install,
/// persisted on every write.
pub struct LocalStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

#[cfg_attr(test, automock)]
impl LocalStorage {
    pub fn new() -> Self {
        let path = std::env::var("STORAGE_FILE_PATH").unwrap_or(DEFAULT_STORAGE_FILE.to_owned());
        Self::with_path(PathBuf::from(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Read failures degrade to "key absent"
    pub async fn get_item(&self, key: &str) -> Option<String> {
        let map = self.read_map().await;
        map.get(key).cloned()
    }

    pub async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map).await
    }

    pub async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await;
        map.remove(key);
        self.write_map(&map).await
    }
}

impl LocalStorage {
    async fn read_map(&self) -> HashMap<String, String> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(map)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}
