use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::PrettyFormatter;

use crate::{Res, types::FavoritesSnapshot};

pub struct SnapshotManager {
    snapshot: FavoritesSnapshot,
}

impl SnapshotManager {
    pub fn new(snapshot: FavoritesSnapshot) -> Self {
        Self { snapshot }
    }

    /// Reads the snapshot file at `path` into `T`.
    ///
    /// Backup writes [`FavoritesSnapshot`]; restore reads the looser
    /// [`RestoreSnapshot`](crate::types::RestoreSnapshot).
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid JSON for `T`.
    pub async fn read<T: DeserializeOwned>(path: &Path) -> Res<T> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        let snapshot = serde_json::from_str(&content)
            .map_err(|e| format!("Malformed snapshot {}: {}", path.display(), e))?;
        Ok(snapshot)
    }

    /// Writes the snapshot as JSON indented by four spaces to `dir/filename`,
    /// creating `dir` when needed. Returns the written path.
    pub async fn persist(&self, dir: &Path, filename: &str) -> Res<PathBuf> {
        async_fs::create_dir_all(dir).await?;

        let mut json = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
        self.snapshot.serialize(&mut serializer)?;

        let path = dir.join(filename);
        async_fs::write(&path, json).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Entry, RestoreSnapshot};

    #[tokio::test]
    async fn persists_with_four_space_indent_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let snapshot = FavoritesSnapshot {
            artists: vec![Entry::new("Artist One", 1u64)],
            ..Default::default()
        };

        let path = SnapshotManager::new(snapshot.clone())
            .persist(&target, "favorites.json")
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n    \"albums\": []"));

        let loaded: FavoritesSnapshot = SnapshotManager::read(&path).await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn reads_a_hand_written_restore_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hand.json");
        std::fs::write(&path, r#"{"artists":[{"id":"A1","name":"Artist One"}]}"#).unwrap();

        let loaded: RestoreSnapshot = SnapshotManager::read(&path).await.unwrap();
        assert_eq!(loaded.artists, vec![Entry::new("Artist One", "A1")]);
        assert!(loaded.playlists.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"artists\": [").unwrap();

        assert!(SnapshotManager::read::<RestoreSnapshot>(&path).await.is_err());
        assert!(
            SnapshotManager::read::<RestoreSnapshot>(&dir.path().join("missing.json"))
                .await
                .is_err()
        );
    }
}
