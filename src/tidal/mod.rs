//! # TIDAL Integration Module
//!
//! This module is the boundary between the backup/restore logic and TIDAL's
//! v1 REST API. Everything the rest of the crate needs from the service goes
//! through the [`TidalApi`] trait, which [`Tidal`] implements over HTTP:
//!
//! ```text
//! cli (bootstrap, backup, restore)
//!          ↓
//! TidalApi trait
//!     ├── favorites listing (artists, tracks, albums, playlists)
//!     ├── playlist item paging
//!     ├── favorite-add calls
//!     └── image URL resolution and download
//!          ↓
//! Tidal (reqwest) ──→ api.tidal.com / resources.tidal.com
//! ```
//!
//! Authentication lives in [`auth`]: the liveness check, token refresh and
//! the interactive device login. Image URL rules live in [`images`].
//!
//! ## API Coverage
//!
//! - `GET sessions` - liveness check, yields user id and country code
//! - `GET users/{id}/favorites/{kind}` - paged favorites listing
//! - `POST users/{id}/favorites/{kind}` - add a favorite by id
//! - `GET playlists/{uuid}/items` - paged playlist items
//!
//! Every call is awaited in sequence; there is no retry or rate limiting.

pub mod auth;
pub mod images;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    Res,
    config::ApiSettings,
    types::{
        Album, Artist, Download, ItemId, Page, Playlist, PlaylistItem, SessionCredentials,
        SessionUser, Track,
    },
};

/// Creator name TIDAL clients show for playlists made by the signed-in user.
pub const OWNER_NAME: &str = "me";

/// Creator name for editorial playlists (creator id 0).
pub const EDITORIAL_NAME: &str = "TIDAL";

const LISTING_PAGE_SIZE: u32 = 100;

/// Operations the backup and restore flows need from the streaming service.
#[async_trait]
pub trait TidalApi: Send + Sync {
    async fn favorite_artists(&self) -> Res<Vec<Artist>>;

    async fn favorite_tracks(&self) -> Res<Vec<Track>>;

    async fn favorite_albums(&self) -> Res<Vec<Album>>;

    /// Favorite playlists. A creator equal to the signed-in user is named
    /// [`OWNER_NAME`].
    async fn favorite_playlists(&self) -> Res<Vec<Playlist>>;

    async fn playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Vec<PlaylistItem>>;

    async fn add_favorite_artist(&self, id: &ItemId) -> Res<()>;

    async fn add_favorite_track(&self, id: &ItemId) -> Res<()>;

    async fn add_favorite_album(&self, id: &ItemId) -> Res<()>;

    /// Resource URL for an image UUID at the given size.
    fn image_url(&self, picture: &str, width: u32, height: u32) -> String;

    /// Fetches `url` without interpreting the status code.
    async fn download(&self, url: &str) -> Res<Download>;
}

/// An authenticated TIDAL session.
pub struct Tidal {
    client: Client,
    settings: ApiSettings,
    credentials: SessionCredentials,
    user: SessionUser,
}

impl Tidal {
    /// Builds a session from credentials that already passed
    /// [`auth::check_login`]. No network traffic happens here.
    pub fn new(settings: ApiSettings, credentials: SessionCredentials, user: SessionUser) -> Self {
        Self {
            client: Client::new(),
            settings,
            credentials,
            user,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.settings.api_url.trim_end_matches('/'), path)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Page<T>> {
        let response = self
            .client
            .get(self.url(path))
            .header(reqwest::header::AUTHORIZATION, self.credentials.authorization())
            .query(&[
                ("countryCode", self.user.country_code.clone()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Page<T>>().await?)
    }

    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Res<Vec<T>> {
        let mut all = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.get_page::<T>(path, LISTING_PAGE_SIZE, offset).await?;
            let fetched = page.items.len() as u32;
            all.extend(page.items.into_iter().map(|w| w.item));
            offset += fetched;

            if fetched == 0 || offset >= page.total_number_of_items {
                break;
            }
        }

        Ok(all)
    }

    async fn add_favorite(&self, kind: &str, key: &str, id: &ItemId) -> Res<()> {
        let id = id.to_string();
        self.client
            .post(self.url(&self.favorites_path(kind)))
            .header(reqwest::header::AUTHORIZATION, self.credentials.authorization())
            .query(&[("countryCode", self.user.country_code.as_str())])
            .form(&[
                (key, id.as_str()),
                ("onArtifactNotFound", "FAIL"),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn favorites_path(&self, kind: &str) -> String {
        format!("users/{}/favorites/{}", self.user.user_id, kind)
    }
}

/// Names the creator of `playlist` the way TIDAL clients do: [`OWNER_NAME`]
/// when it is the signed-in user `user_id`, [`EDITORIAL_NAME`] for creator id 0.
/// Other creators are left as they came.
pub fn resolve_creator(mut playlist: Playlist, user_id: u64) -> Playlist {
    if let Some(creator) = playlist.creator.as_mut() {
        if creator.id == user_id {
            creator.name = Some(OWNER_NAME.to_string());
        } else if creator.id == 0 {
            creator.name = Some(EDITORIAL_NAME.to_string());
        }
    }
    playlist
}

#[async_trait]
impl TidalApi for Tidal {
    async fn favorite_artists(&self) -> Res<Vec<Artist>> {
        self.get_all(&self.favorites_path("artists")).await
    }

    async fn favorite_tracks(&self) -> Res<Vec<Track>> {
        self.get_all(&self.favorites_path("tracks")).await
    }

    async fn favorite_albums(&self) -> Res<Vec<Album>> {
        self.get_all(&self.favorites_path("albums")).await
    }

    async fn favorite_playlists(&self) -> Res<Vec<Playlist>> {
        let playlists: Vec<Playlist> = self.get_all(&self.favorites_path("playlists")).await?;
        Ok(playlists
            .into_iter()
            .map(|p| resolve_creator(p, self.user.user_id))
            .collect())
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Res<Vec<PlaylistItem>> {
        let path = format!("playlists/{}/items", playlist_id);
        let page = self.get_page::<PlaylistItem>(&path, limit, offset).await?;
        Ok(page.items.into_iter().map(|w| w.item).collect())
    }

    async fn add_favorite_artist(&self, id: &ItemId) -> Res<()> {
        self.add_favorite("artists", "artistIds", id).await
    }

    async fn add_favorite_track(&self, id: &ItemId) -> Res<()> {
        self.add_favorite("tracks", "trackIds", id).await
    }

    async fn add_favorite_album(&self, id: &ItemId) -> Res<()> {
        self.add_favorite("albums", "albumIds", id).await
    }

    fn image_url(&self, picture: &str, width: u32, height: u32) -> String {
        crate::utils::image_resource_url(&self.settings.image_url, picture, width, height)
    }

    async fn download(&self, url: &str) -> Res<Download> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(Download { status, body })
    }
}
