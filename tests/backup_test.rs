mod common;

use common::{Call, FakeTidal, artist, items, playlist, track};
use serde_json::{Value, json};
use tidalfav::cli;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn item_calls(fake: &FakeTidal) -> Vec<(u32, u32)> {
    fake.calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::PlaylistItems { limit, offset, .. } => Some((limit, offset)),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_backup_writes_single_artist_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let backup_dir = dir.path().join("backup");
    let mut fake = FakeTidal::new();
    fake.artists = vec![artist("A1", "Artist One")];

    cli::backup(&fake, "tidal_favorites.json", &backup_dir)
        .await
        .unwrap();

    assert_eq!(
        read_json(&backup_dir.join("tidal_favorites.json")),
        json!({
            "albums": [],
            "artists": [{"name": "Artist One", "id": "A1"}],
            "tracks": [],
            "playlists": []
        })
    );
}

#[tokio::test]
async fn test_backup_lists_favorites_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTidal::new();

    cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    assert_eq!(
        fake.calls(),
        vec![
            Call::FavoriteArtists,
            Call::FavoriteTracks,
            Call::FavoriteAlbums,
            Call::FavoritePlaylists,
        ]
    );
}

#[tokio::test]
async fn test_backup_keeps_numeric_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    fake.tracks = vec![track(77, "Song")];

    let snapshot = cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    assert_eq!(snapshot.tracks.len(), 1);
    assert_eq!(
        read_json(&dir.path().join("out.json"))["tracks"],
        json!([{"name": "Song", "id": 77}])
    );
}

#[tokio::test]
async fn test_backup_pages_exactly_one_hundred_items_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    fake.playlists = vec![playlist("p1", "me", 100, 0)];
    fake.items.insert("p1".to_string(), items(100));

    let snapshot = cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    assert_eq!(item_calls(&fake), vec![(100, 0)]);
    let details = snapshot.playlists[0].owned_details().unwrap();
    assert_eq!(details.items.as_ref().unwrap().len(), 100);
}

#[tokio::test]
async fn test_backup_pages_second_call_from_offset_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    fake.playlists = vec![playlist("p1", "me", 100, 1)];
    fake.items.insert("p1".to_string(), items(101));

    cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    assert_eq!(item_calls(&fake), vec![(100, 0), (100, 1)]);
}

#[tokio::test]
async fn test_backup_skips_items_of_empty_owned_playlist() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    fake.playlists = vec![playlist("p1", "me", 0, 0)];

    cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    assert!(item_calls(&fake).is_empty());
    let written = read_json(&dir.path().join("out.json"));
    assert_eq!(written["playlists"][0]["owned"], json!(true));
    assert_eq!(written["playlists"][0]["description"], json!("Description of p1"));
    assert!(written["playlists"][0].get("items").is_none());
}

#[tokio::test]
async fn test_backup_ignores_details_of_foreign_playlists() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    let mut foreign = playlist("p2", "someone else", 12, 0);
    foreign.image = Some("aaaa-bbbb".to_string());
    foreign.square_image = Some("cccc-dddd".to_string());
    fake.playlists = vec![foreign];
    fake.items.insert("p2".to_string(), items(12));

    cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    assert!(
        fake.calls()
            .iter()
            .all(|c| !matches!(c, Call::PlaylistItems { .. } | Call::Download(_)))
    );
    assert_eq!(
        read_json(&dir.path().join("out.json"))["playlists"],
        json!([{"name": "Playlist p2", "id": "p2", "owned": false, "public": true}])
    );
}

#[tokio::test]
async fn test_backup_writes_covers_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    let mut owned = playlist("p3", "me", 0, 0);
    owned.image = Some("aaaa-bbbb".to_string());
    owned.square_image = Some("cccc-dddd".to_string());
    fake.playlists = vec![owned];

    let snapshot = cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    let square = "https://img.test/cccc-dddd/1080x1080.jpg";
    let wide = "https://img.test/aaaa-bbbb/1080x720.jpg";
    let downloads: Vec<Call> = fake
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Download(_)))
        .collect();
    assert_eq!(
        downloads,
        vec![
            Call::Download(square.to_string()),
            Call::Download(wide.to_string())
        ]
    );

    assert_eq!(std::fs::read(dir.path().join("p3.jpg")).unwrap(), square.as_bytes());
    assert_eq!(std::fs::read(dir.path().join("p3_wide.jpg")).unwrap(), wide.as_bytes());
    assert_eq!(
        snapshot.playlists[0].owned_details().unwrap().images,
        vec!["p3.jpg".to_string(), "p3_wide.jpg".to_string()]
    );
}

#[tokio::test]
async fn test_backup_skips_covers_on_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    fake.image_status = 404;
    let mut owned = playlist("p4", "me", 0, 0);
    owned.image = Some("aaaa-bbbb".to_string());
    owned.square_image = Some("cccc-dddd".to_string());
    fake.playlists = vec![owned];

    let snapshot = cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    assert!(!dir.path().join("p4.jpg").exists());
    assert!(!dir.path().join("p4_wide.jpg").exists());
    assert!(snapshot.playlists[0].owned_details().unwrap().images.is_empty());
}

#[tokio::test]
async fn test_backup_uses_wide_picture_when_square_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    let mut owned = playlist("p5", "me", 0, 0);
    owned.image = Some("aaaa-bbbb".to_string());
    fake.playlists = vec![owned];

    cli::backup(&fake, "out.json", dir.path()).await.unwrap();

    assert!(
        fake.calls()
            .contains(&Call::Download("https://img.test/aaaa-bbbb/1080x720.jpg".to_string()))
    );
    assert!(dir.path().join("p5.jpg").exists());
    assert!(!dir.path().join("p5_wide.jpg").exists());
}

#[tokio::test]
async fn test_backup_failure_leaves_no_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeTidal::new();
    fake.fail_listing = true;

    let result = cli::backup(&fake, "out.json", dir.path()).await;

    assert!(result.is_err());
    assert!(!dir.path().join("out.json").exists());
}
