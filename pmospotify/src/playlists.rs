//! Translation of Spotify playlists into the host playlist model
//!
//! Spotify stores the user's playlists as a flat container where folders are
//! delimited by start/end markers. The provider walks that container once,
//! keeps track of the open folders and names every playlist after them:
//!
//! ```text
//! Foo                      -> "Foo"
//! [start 17 "Bar"]
//!   Baz (owned by bob)     -> "Bar/Baz by bob"
//! [end 17]
//! <not loaded>             -> skipped
//! ```

use crate::error::{Result, SpotifyError};
use crate::folders::FolderPath;
use crate::models::{Playlist, Track};
use crate::provider::PlaylistsProvider;
use crate::session::{ContainerEntry, FolderKind, RemotePlaylist, RemoteSession};
use std::convert::Infallible;
use tracing::{debug, warn};

/// Default separator between folder names
pub const DEFAULT_FOLDER_SEPARATOR: &str = "/";

/// Translation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistOptions {
    /// Inserted between folder names and before the playlist name
    pub folder_separator: String,
}

impl Default for PlaylistOptions {
    fn default() -> Self {
        Self {
            folder_separator: DEFAULT_FOLDER_SEPARATOR.to_string(),
        }
    }
}

/// Playlists provider backed by a Spotify session
///
/// The session is injected at construction; the provider keeps no other
/// state and can be reused across calls.
#[derive(Debug)]
pub struct SpotifyPlaylistsProvider<S> {
    session: S,
    options: PlaylistOptions,
}

impl<S: RemoteSession> SpotifyPlaylistsProvider<S> {
    pub fn new(session: S) -> Self {
        Self::with_options(session, PlaylistOptions::default())
    }

    pub fn with_options(session: S, options: PlaylistOptions) -> Self {
        Self { session, options }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn options(&self) -> &PlaylistOptions {
        &self.options
    }

    /// Lists the playlists like [`PlaylistsProvider::playlists`] but fails
    /// with [`SpotifyError::MalformedContainer`] as soon as the folder
    /// markers are unbalanced or mismatched.
    pub fn try_playlists(&self) -> Result<Vec<Playlist>> {
        self.collect(Err)
    }

    /// Walks the container once. Every unbalanced folder marker is handed
    /// to `on_malformed`, which either absorbs it or stops the traversal.
    fn collect<E>(
        &self,
        mut on_malformed: impl FnMut(SpotifyError) -> std::result::Result<(), E>,
    ) -> std::result::Result<Vec<Playlist>, E> {
        let Some(container) = self.session.playlist_container() else {
            debug!("Playlist container not loaded yet");
            return Ok(Vec::new());
        };

        let mut folders = FolderPath::default();
        let mut playlists = Vec::new();

        for entry in container {
            match entry {
                ContainerEntry::Folder(marker) => match marker.kind {
                    FolderKind::Start => folders.push(marker.id, marker.name),
                    FolderKind::End => {
                        if let Err(err) = folders.pop(marker.id) {
                            on_malformed(err)?;
                        }
                    }
                },
                ContainerEntry::Playlist(playlist) => {
                    if !playlist.is_loaded() {
                        debug!("Skipping playlist not loaded yet");
                        continue;
                    }
                    playlists.push(self.translate(&playlist, &folders));
                }
            }
        }

        if let Err(err) = folders.finish() {
            on_malformed(err)?;
        }

        debug!(count = playlists.len(), "Listed playlists");
        Ok(playlists)
    }

    fn translate(&self, playlist: &S::Playlist, folders: &FolderPath) -> Playlist {
        let owner = playlist.owner();
        let mut name = playlist.name();
        if owner.canonical_name != self.session.user_name() {
            name = format!("{name} by {}", owner.canonical_name);
        }

        Playlist {
            name: folders.qualify(&name, &self.options.folder_separator),
            uri: playlist.uri(),
            tracks: playlist.tracks().iter().map(Track::from).collect(),
        }
    }
}

impl<S: RemoteSession> PlaylistsProvider for SpotifyPlaylistsProvider<S> {
    fn lookup(&self, uri: &str) -> Result<Option<Playlist>> {
        let playlist = match self.session.get_playlist(uri) {
            Ok(playlist) => playlist,
            Err(err) if err.is_not_found() => {
                debug!(uri, "Playlist not found");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        if !playlist.is_loaded() {
            debug!(uri, "Loading playlist");
            playlist.load().map_err(|source| SpotifyError::Load {
                uri: uri.to_string(),
                source,
            })?;
            if !playlist.is_loaded() {
                debug!(uri, "Playlist still not loaded");
                return Ok(None);
            }
        }

        Ok(Some(self.translate(&playlist, &FolderPath::default())))
    }

    fn playlists(&self) -> Vec<Playlist> {
        let Ok(playlists) = self.collect(|err| {
            warn!(error = %err, "Unbalanced folder marker");
            Ok::<(), Infallible>(())
        });
        playlists
    }
}
