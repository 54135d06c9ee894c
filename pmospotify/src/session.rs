//! Contract of a live Spotify session
//!
//! The translator never talks to the service directly. It reads everything
//! through [`RemoteSession`], which is injected at construction. Handles
//! returned by the session ([`RemotePlaylist`]) mirror the remote objects and
//! may not be loaded yet.

use crate::error::SessionError;
use crate::models::Track;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A connected session to the remote service
pub trait RemoteSession {
    /// Playlist handle type produced by this session
    type Playlist: RemotePlaylist;

    /// Canonical name of the logged-in user
    fn user_name(&self) -> &str;

    /// Resolves a playlist by URI.
    ///
    /// Fails with [`SessionError::NotFound`] when the URI is unknown to the
    /// service. The returned handle may still be unloaded.
    fn get_playlist(&self, uri: &str) -> Result<Self::Playlist, SessionError>;

    /// The user's playlist container, in display order.
    ///
    /// `None` while the container itself is not loaded.
    fn playlist_container(&self) -> Option<Vec<ContainerEntry<Self::Playlist>>>;
}

impl<S: RemoteSession> RemoteSession for &S {
    type Playlist = S::Playlist;

    fn user_name(&self) -> &str {
        (**self).user_name()
    }

    fn get_playlist(&self, uri: &str) -> Result<Self::Playlist, SessionError> {
        (**self).get_playlist(uri)
    }

    fn playlist_container(&self) -> Option<Vec<ContainerEntry<Self::Playlist>>> {
        (**self).playlist_container()
    }
}

impl<S: RemoteSession> RemoteSession for Arc<S> {
    type Playlist = S::Playlist;

    fn user_name(&self) -> &str {
        (**self).user_name()
    }

    fn get_playlist(&self, uri: &str) -> Result<Self::Playlist, SessionError> {
        (**self).get_playlist(uri)
    }

    fn playlist_container(&self) -> Option<Vec<ContainerEntry<Self::Playlist>>> {
        (**self).playlist_container()
    }
}

/// Handle to a remote playlist
pub trait RemotePlaylist {
    fn is_loaded(&self) -> bool;

    /// Blocks until the playlist is loaded. Idempotent once loaded.
    fn load(&self) -> Result<(), SessionError>;

    fn owner(&self) -> RemoteUser;

    fn uri(&self) -> String;

    fn name(&self) -> String;

    fn tracks(&self) -> Vec<RemoteTrack>;
}

/// Remote user, only used for ownership comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub canonical_name: String,
}

impl RemoteUser {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
        }
    }
}

/// Remote track as exposed by a loaded playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTrack {
    pub uri: String,
    pub name: String,
    /// Duration in milliseconds
    pub length: u64,
    pub track_no: u32,
}

impl From<&RemoteTrack> for Track {
    fn from(track: &RemoteTrack) -> Self {
        Track::new(
            track.uri.clone(),
            track.name.clone(),
            track.length,
            track.track_no,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderKind {
    Start,
    End,
}

/// Start or end of a named folder in the playlist container
///
/// Start and end markers of the same folder share their `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMarker {
    pub kind: FolderKind,
    /// Folder name, empty on end markers
    #[serde(default)]
    pub name: String,
    pub id: u64,
}

impl FolderMarker {
    pub fn start(id: u64, name: impl Into<String>) -> Self {
        Self {
            kind: FolderKind::Start,
            name: name.into(),
            id,
        }
    }

    pub fn end(id: u64) -> Self {
        Self {
            kind: FolderKind::End,
            name: String::new(),
            id,
        }
    }
}

/// One entry of the flat playlist container
#[derive(Debug, Clone)]
pub enum ContainerEntry<P> {
    Playlist(P),
    Folder(FolderMarker),
}
