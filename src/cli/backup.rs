use std::path::Path;

use tabled::Table;

use crate::{
    Res,
    management::SnapshotManager,
    success,
    tidal::{OWNER_NAME, TidalApi, images},
    types::{
        Entry, EntryKind, FavoritesSnapshot, OwnedPlaylist, Playlist, PlaylistRecord,
        SnapshotTableRow,
    },
    utils, warning,
};

/// Exports all favorites to `backup_dir/filename`.
///
/// Listing happens in order: artists, tracks, albums, playlists. Playlists
/// the user owns additionally get their description, their items and up to
/// two cover images (`<id>.jpg`, `<id>_wide.jpg`, only written on HTTP 200).
/// The snapshot file is written once everything has been fetched.
pub async fn backup<A: TidalApi + ?Sized>(
    api: &A,
    filename: &str,
    backup_dir: &Path,
) -> Res<FavoritesSnapshot> {
    async_fs::create_dir_all(backup_dir).await?;

    let mut snapshot = FavoritesSnapshot::default();

    let pb = utils::spinner("Fetching favorite artists...");
    let artists = api.favorite_artists().await;
    pb.finish_and_clear();
    snapshot.artists = artists?
        .into_iter()
        .map(|a| Entry::new(a.name, a.id))
        .collect();
    success!("Fetched {} artists", snapshot.artists.len());

    let pb = utils::spinner("Fetching favorite tracks...");
    let tracks = api.favorite_tracks().await;
    pb.finish_and_clear();
    snapshot.tracks = tracks?
        .into_iter()
        .map(|t| Entry::new(t.name, t.id))
        .collect();
    success!("Fetched {} tracks", snapshot.tracks.len());

    let pb = utils::spinner("Fetching favorite albums...");
    let albums = api.favorite_albums().await;
    pb.finish_and_clear();
    snapshot.albums = albums?
        .into_iter()
        .map(|a| Entry::new(a.name, a.id))
        .collect();
    success!("Fetched {} albums", snapshot.albums.len());

    let pb = utils::spinner("Fetching favorite playlists...");
    let playlists = api.favorite_playlists().await;
    pb.finish_and_clear();
    for playlist in playlists? {
        snapshot
            .playlists
            .push(playlist_record(api, &playlist, backup_dir).await?);
    }
    success!("Fetched {} playlists", snapshot.playlists.len());

    let path = SnapshotManager::new(snapshot.clone())
        .persist(backup_dir, filename)
        .await?;

    print_snapshot(&snapshot);
    success!("Favorites written to {}", path.display());

    Ok(snapshot)
}

async fn playlist_record<A: TidalApi + ?Sized>(
    api: &A,
    playlist: &Playlist,
    backup_dir: &Path,
) -> Res<PlaylistRecord> {
    let owned = playlist.creator_name() == Some(OWNER_NAME);
    let details = if owned {
        Some(owned_details(api, playlist, backup_dir).await?)
    } else {
        None
    };

    Ok(PlaylistRecord {
        name: playlist.title.clone(),
        id: playlist.uuid.clone(),
        owned,
        public: playlist.public_playlist,
        details,
    })
}

async fn owned_details<A: TidalApi + ?Sized>(
    api: &A,
    playlist: &Playlist,
    backup_dir: &Path,
) -> Res<OwnedPlaylist> {
    let mut details = OwnedPlaylist {
        description: playlist.description.clone(),
        ..Default::default()
    };

    if playlist.image.is_some() {
        let url = images::image(api, playlist, 1080)?;
        let file = format!("{}.jpg", playlist.uuid);
        if save_image(api, &url, &backup_dir.join(&file)).await? {
            details.images.push(file);
        }
    }

    if playlist.square_image.is_some() {
        let (width, height) = images::WIDE_DEFAULT;
        match images::wide_image(api, playlist, width, height) {
            Ok(url) => {
                let file = format!("{}_wide.jpg", playlist.uuid);
                if save_image(api, &url, &backup_dir.join(&file)).await? {
                    details.images.push(file);
                }
            }
            Err(e) => warning!("Skipping wide cover of {}: {}", playlist.title, e),
        }
    }

    let total = playlist.item_count();
    if total > 0 {
        let mut items = Vec::new();
        for offset in utils::playlist_item_offsets(total) {
            let page = api
                .playlist_items(&playlist.uuid, utils::PLAYLIST_PAGE_SIZE, offset)
                .await?;
            items.extend(page.into_iter().map(|i| Entry::new(i.name, i.id)));
        }
        details.items = Some(items);
    }

    Ok(details)
}

/// Downloads `url` into `path`. Returns `false` without writing anything when
/// the response is not HTTP 200.
async fn save_image<A: TidalApi + ?Sized>(api: &A, url: &str, path: &Path) -> Res<bool> {
    let download = api.download(url).await?;
    if download.status != 200 {
        return Ok(false);
    }

    async_fs::write(path, download.body).await?;
    Ok(true)
}

fn print_snapshot(snapshot: &FavoritesSnapshot) {
    let entries = [
        (EntryKind::Artist, &snapshot.artists),
        (EntryKind::Track, &snapshot.tracks),
        (EntryKind::Album, &snapshot.albums),
    ];

    let mut rows: Vec<SnapshotTableRow> = entries
        .iter()
        .flat_map(|(kind, list)| {
            list.iter().map(move |e| SnapshotTableRow {
                kind: kind.to_string(),
                name: e.name.clone(),
                id: e.id.to_string(),
                owned: String::new(),
            })
        })
        .collect();

    rows.extend(snapshot.playlists.iter().map(|p| SnapshotTableRow {
        kind: EntryKind::Playlist.to_string(),
        name: p.name.clone(),
        id: p.id.clone(),
        owned: if p.owned { "yes" } else { "no" }.to_string(),
    }));

    if rows.is_empty() {
        warning!("No favorites found");
        return;
    }

    println!("{}", Table::new(rows));
}
