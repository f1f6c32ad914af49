//! Data structures shared across the crate.
//!
//! Three groups of types live here:
//!
//! - **Snapshot records** ([`FavoritesSnapshot`], [`PlaylistRecord`], [`Entry`])
//!   written by backup and read back by restore ([`RestoreSnapshot`])
//! - **Wire types** mirroring TIDAL API payloads ([`Playlist`], [`Page`],
//!   [`TokenResponse`], ...)
//! - **Outcome and table types** used for console output

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Identifier assigned by TIDAL.
///
/// Artists, tracks and albums use numeric ids while playlists use UUIDs. The
/// JSON type is kept as received so snapshots look like the API payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        ItemId::Number(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

/// A `{name, id}` pair as stored in a snapshot.
///
/// Used for favorite artists, tracks and albums as well as for the items of
/// an owned playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub id: ItemId,
}

impl Entry {
    pub fn new(name: impl Into<String>, id: impl Into<ItemId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// The document written by a backup.
///
/// Fields serialize in the order albums, artists, tracks, playlists. There is
/// no schema version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesSnapshot {
    #[serde(default)]
    pub albums: Vec<Entry>,
    #[serde(default)]
    pub artists: Vec<Entry>,
    #[serde(default)]
    pub tracks: Vec<Entry>,
    #[serde(default)]
    pub playlists: Vec<PlaylistRecord>,
}

/// What restore reads from a snapshot file.
///
/// Artists, tracks and albums must be `{name, id}` entries; each list may be
/// missing. Playlist entries are kept as raw JSON of any shape since they are
/// only counted, never restored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RestoreSnapshot {
    #[serde(default)]
    pub artists: Vec<Entry>,
    #[serde(default)]
    pub tracks: Vec<Entry>,
    #[serde(default)]
    pub albums: Vec<Entry>,
    #[serde(default)]
    pub playlists: Vec<serde_json::Value>,
}

/// One favorite playlist in a snapshot.
///
/// `details` is only present for playlists the user created (`owned`) and is
/// flattened into the record, so a foreign playlist serializes to just
/// `{name, id, owned, public}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub owned: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(flatten)]
    pub details: Option<OwnedPlaylist>,
}

impl PlaylistRecord {
    /// Details exported for playlists the user created; `None` for the rest.
    pub fn owned_details(&self) -> Option<&OwnedPlaylist> {
        if self.owned { self.details.as_ref() } else { None }
    }
}

/// Fields exported only for owned playlists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnedPlaylist {
    /// Always written for owned playlists, `null` when TIDAL has none.
    pub description: Option<String>,
    /// Cover files written next to the snapshot (`<id>.jpg`, `<id>_wide.jpg`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Playlist tracks and videos; absent when the playlist is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Entry>>,
}

/// OAuth credentials of a session, as kept in the `[session]` INI block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expiry_time: Option<DateTime<Utc>>,
}

impl SessionCredentials {
    /// Value of the `Authorization` header, e.g. `Bearer abc`.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Account behind a session, as returned by `GET sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: u64,
    pub country_code: String,
}

/// A favorite artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ItemId,
    pub name: String,
}

/// A favorite track; TIDAL calls the name `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: ItemId,
    #[serde(rename = "title")]
    pub name: String,
}

/// A favorite album; TIDAL calls the name `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: ItemId,
    #[serde(rename = "title")]
    pub name: String,
}

/// A track or video inside a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: ItemId,
    #[serde(rename = "title")]
    pub name: String,
}

/// Playlist creator. TIDAL usually sends only the id; the client fills in
/// `name` for the signed-in user and for editorial playlists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
}

/// A favorite playlist as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
    pub creator: Option<Creator>,
    #[serde(default)]
    pub public_playlist: bool,
    #[serde(default)]
    pub number_of_tracks: u32,
    #[serde(default)]
    pub number_of_videos: u32,
    /// Wide picture.
    pub image: Option<String>,
    pub square_image: Option<String>,
}

impl Playlist {
    pub fn creator_name(&self) -> Option<&str> {
        self.creator.as_ref().and_then(|c| c.name.as_deref())
    }

    /// Tracks plus videos.
    pub fn item_count(&self) -> u32 {
        self.number_of_tracks + self.number_of_videos
    }
}

/// Envelope around every element of a paged listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wrapped<T> {
    pub item: T,
}

/// One page of a listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total_number_of_items: u32,
    pub items: Vec<Wrapped<T>>,
}

/// Response of the device authorization endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    /// Link including the user code, usually without a scheme.
    pub verification_uri_complete: String,
    /// Seconds until `device_code` expires.
    pub expires_in: u64,
    /// Seconds to wait between token polls.
    pub interval: u64,
}

/// Response of the token endpoint for device and refresh grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_in: i64,
}

/// Raw result of an image download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Category of a favorite, used in log lines and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Artist,
    Track,
    Album,
    Playlist,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::Artist => "Artist",
            EntryKind::Track => "Track",
            EntryKind::Album => "Album",
            EntryKind::Playlist => "Playlist",
        })
    }
}

/// Result of re-adding one favorite. `Failed` carries the error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreStatus {
    Added,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub kind: EntryKind,
    pub entry: Entry,
    pub status: RestoreStatus,
}

/// Everything a restore run did.
///
/// Outcomes are kept in call order: artists, then tracks, then albums.
/// `skipped_playlists` counts the playlist entries present in the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub outcomes: Vec<RestoreOutcome>,
    pub skipped_playlists: usize,
}

impl RestoreSummary {
    pub fn added(&self) -> impl Iterator<Item = &RestoreOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == RestoreStatus::Added)
    }

    pub fn failed(&self) -> impl Iterator<Item = &RestoreOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RestoreStatus::Failed(_)))
    }

    /// Number of outcomes of `kind` that were added (`added == true`) or failed.
    pub fn count(&self, kind: EntryKind, added: bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.kind == kind && (o.status == RestoreStatus::Added) == added)
            .count()
    }
}

/// Row of the table printed after a backup.
#[derive(Tabled)]
pub struct SnapshotTableRow {
    pub kind: String,
    pub name: String,
    pub id: String,
    pub owned: String,
}

/// Per-kind totals printed after a restore.
#[derive(Tabled)]
pub struct RestoreTableRow {
    pub kind: String,
    pub added: usize,
    pub failed: usize,
}
