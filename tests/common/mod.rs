#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use tidalfav::{
    Res,
    tidal::TidalApi,
    types::{Album, Artist, Creator, Download, ItemId, Playlist, PlaylistItem, Track},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FavoriteArtists,
    FavoriteTracks,
    FavoriteAlbums,
    FavoritePlaylists,
    PlaylistItems { id: String, limit: u32, offset: u32 },
    AddArtist(ItemId),
    AddTrack(ItemId),
    AddAlbum(ItemId),
    Download(String),
}

/// In-memory favorites store recording every call made against it.
#[derive(Default)]
pub struct FakeTidal {
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
    pub playlists: Vec<Playlist>,
    pub items: HashMap<String, Vec<PlaylistItem>>,
    pub image_status: u16,
    pub fail_listing: bool,
    pub favorited: Mutex<HashSet<String>>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeTidal {
    pub fn new() -> Self {
        Self {
            image_status: 200,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn add(&self, kind: &str, id: &ItemId) -> Res<()> {
        let key = format!("{}:{}", kind, id);
        if self.favorited.lock().unwrap().insert(key) {
            Ok(())
        } else {
            Err(format!("{} {} is already a favorite", kind, id).into())
        }
    }
}

#[async_trait]
impl TidalApi for FakeTidal {
    async fn favorite_artists(&self) -> Res<Vec<Artist>> {
        self.record(Call::FavoriteArtists);
        if self.fail_listing {
            return Err("connection reset".into());
        }
        Ok(self.artists.clone())
    }

    async fn favorite_tracks(&self) -> Res<Vec<Track>> {
        self.record(Call::FavoriteTracks);
        Ok(self.tracks.clone())
    }

    async fn favorite_albums(&self) -> Res<Vec<Album>> {
        self.record(Call::FavoriteAlbums);
        Ok(self.albums.clone())
    }

    async fn favorite_playlists(&self) -> Res<Vec<Playlist>> {
        self.record(Call::FavoritePlaylists);
        Ok(self.playlists.clone())
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Vec<PlaylistItem>> {
        self.record(Call::PlaylistItems {
            id: playlist_id.to_string(),
            limit,
            offset,
        });
        let items = self.items.get(playlist_id).cloned().unwrap_or_default();
        Ok(items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn add_favorite_artist(&self, id: &ItemId) -> Res<()> {
        self.record(Call::AddArtist(id.clone()));
        self.add("artist", id)
    }

    async fn add_favorite_track(&self, id: &ItemId) -> Res<()> {
        self.record(Call::AddTrack(id.clone()));
        self.add("track", id)
    }

    async fn add_favorite_album(&self, id: &ItemId) -> Res<()> {
        self.record(Call::AddAlbum(id.clone()));
        self.add("album", id)
    }

    fn image_url(&self, picture: &str, width: u32, height: u32) -> String {
        format!("https://img.test/{}/{}x{}.jpg", picture, width, height)
    }

    async fn download(&self, url: &str) -> Res<Download> {
        self.record(Call::Download(url.to_string()));
        Ok(Download {
            status: self.image_status,
            body: if self.image_status == 200 {
                url.as_bytes().to_vec()
            } else {
                b"not found".to_vec()
            },
        })
    }
}

pub fn artist(id: &str, name: &str) -> Artist {
    Artist {
        id: ItemId::from(id),
        name: name.to_string(),
    }
}

pub fn track(id: u64, name: &str) -> Track {
    Track {
        id: ItemId::from(id),
        name: name.to_string(),
    }
}

pub fn album(id: u64, name: &str) -> Album {
    Album {
        id: ItemId::from(id),
        name: name.to_string(),
    }
}

pub fn playlist(uuid: &str, creator: &str, tracks: u32, videos: u32) -> Playlist {
    Playlist {
        uuid: uuid.to_string(),
        title: format!("Playlist {}", uuid),
        description: Some(format!("Description of {}", uuid)),
        creator: Some(Creator {
            id: 1,
            name: Some(creator.to_string()),
        }),
        public_playlist: true,
        number_of_tracks: tracks,
        number_of_videos: videos,
        image: None,
        square_image: None,
    }
}

pub fn items(count: u32) -> Vec<PlaylistItem> {
    (0..count)
        .map(|i| PlaylistItem {
            id: ItemId::from(1000 + i as u64),
            name: format!("Item {}", i),
        })
        .collect()
}
