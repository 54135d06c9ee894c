//! In-memory Spotify session
//!
//! Stands in for a live session in tests and demos. Playlist handles share
//! their state, so a playlist loaded through [`RemoteSession::get_playlist`]
//! is seen as loaded by the container too.
//!
//! A session can be built programmatically or from a YAML fixture:
//!
//! ```yaml
//! user_name: alice
//! playlists:
//!   - uri: spotify:playlist:alice:foo
//!     name: Foo
//!     owner: alice
//!     tracks:
//!       - { uri: "spotify:track:abc", name: ABC 123, length: 174300, track_no: 7 }
//!   - uri: spotify:playlist:alice:later
//!     name: Later
//!     owner: alice
//!     state: pending
//! container:
//!   - playlist: spotify:playlist:alice:foo
//!   - start_folder: { id: 17, name: Bar }
//!   - end_folder: 17
//! ```

use crate::error::{Result, SessionError, SpotifyError};
use crate::session::{
    ContainerEntry, FolderMarker, RemotePlaylist, RemoteSession, RemoteTrack, RemoteUser,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Loading behaviour of an in-memory playlist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Already loaded
    #[default]
    Loaded,
    /// Not loaded, `load()` completes it
    Pending,
    /// Not loaded, `load()` returns without completing
    Stuck,
    /// Not loaded, `load()` fails
    Failing,
}

#[derive(Debug, Clone)]
struct PlaylistData {
    uri: String,
    name: String,
    owner: RemoteUser,
    tracks: Vec<RemoteTrack>,
    state: LoadState,
}

/// Shared handle to an in-memory playlist
#[derive(Debug, Clone)]
pub struct MemoryPlaylist {
    data: Arc<PlaylistData>,
    loaded: Arc<AtomicBool>,
    load_calls: Arc<AtomicUsize>,
}

impl MemoryPlaylist {
    /// Creates a loaded playlist without tracks
    pub fn new(uri: impl Into<String>, name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            data: Arc::new(PlaylistData {
                uri: uri.into(),
                name: name.into(),
                owner: RemoteUser::new(owner),
                tracks: Vec::new(),
                state: LoadState::Loaded,
            }),
            loaded: Arc::new(AtomicBool::new(true)),
            load_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_tracks(mut self, tracks: Vec<RemoteTrack>) -> Self {
        Arc::make_mut(&mut self.data).tracks = tracks;
        self
    }

    /// Sets the loading behaviour. Detaches the handle from its previous
    /// clones.
    pub fn with_state(mut self, state: LoadState) -> Self {
        Arc::make_mut(&mut self.data).state = state;
        self.loaded = Arc::new(AtomicBool::new(state == LoadState::Loaded));
        self.load_calls = Arc::new(AtomicUsize::new(0));
        self
    }

    /// Number of `load()` calls received so far
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }
}

impl RemotePlaylist for MemoryPlaylist {
    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    fn load(&self) -> std::result::Result<(), SessionError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        match self.data.state {
            LoadState::Loaded | LoadState::Pending => {
                self.loaded.store(true, Ordering::SeqCst);
                Ok(())
            }
            LoadState::Stuck => Ok(()),
            LoadState::Failing => Err(SessionError::LoadFailed(self.data.uri.clone())),
        }
    }

    fn owner(&self) -> RemoteUser {
        self.data.owner.clone()
    }

    fn uri(&self) -> String {
        self.data.uri.clone()
    }

    fn name(&self) -> String {
        self.data.name.clone()
    }

    fn tracks(&self) -> Vec<RemoteTrack> {
        self.data.tracks.clone()
    }
}

/// In-memory session
#[derive(Debug, Clone)]
pub struct MemorySession {
    user_name: String,
    playlists: HashMap<String, MemoryPlaylist>,
    container: Option<Vec<ContainerEntry<MemoryPlaylist>>>,
    unavailable: Option<String>,
}

impl MemorySession {
    /// Creates a session for `user_name` with an empty, loaded container
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            playlists: HashMap::new(),
            container: Some(Vec::new()),
            unavailable: None,
        }
    }

    /// Marks the container as not loaded yet
    pub fn without_container(mut self) -> Self {
        self.container = None;
        self
    }

    /// Makes every `get_playlist` call fail with
    /// [`SessionError::Unavailable`], as a disconnected session would
    pub fn with_unavailable(mut self, reason: impl Into<String>) -> Self {
        self.unavailable = Some(reason.into());
        self
    }

    /// Makes a playlist resolvable by URI without adding it to the container
    pub fn with_playlist(mut self, playlist: MemoryPlaylist) -> Self {
        self.playlists.insert(playlist.uri(), playlist);
        self
    }

    /// Appends an entry to the container, registering playlists for lookup
    pub fn with_entry(mut self, entry: ContainerEntry<MemoryPlaylist>) -> Self {
        if let ContainerEntry::Playlist(playlist) = &entry {
            self.playlists.insert(playlist.uri(), playlist.clone());
        }
        self.container.get_or_insert_with(Vec::new).push(entry);
        self
    }

    /// Replaces the container, registering its playlists for lookup
    pub fn with_container(mut self, entries: Vec<ContainerEntry<MemoryPlaylist>>) -> Self {
        self.container = Some(Vec::with_capacity(entries.len()));
        entries
            .into_iter()
            .fold(self, |session, entry| session.with_entry(entry))
    }

    /// Builds a session from a YAML fixture (see the module documentation)
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let fixture: SessionFixture = serde_yaml::from_str(yaml)?;

        let mut session = Self::new(fixture.user_name);
        for playlist in fixture.playlists {
            session = session.with_playlist(
                MemoryPlaylist::new(playlist.uri, playlist.name, playlist.owner)
                    .with_tracks(playlist.tracks)
                    .with_state(playlist.state),
            );
        }

        let Some(entries) = fixture.container else {
            return Ok(session.without_container());
        };

        let mut container = Vec::with_capacity(entries.len());
        for entry in entries {
            container.push(match entry {
                EntryFixture::Playlist(uri) => {
                    let playlist = session.playlists.get(&uri).cloned().ok_or_else(|| {
                        SpotifyError::Fixture(serde::de::Error::custom(format!(
                            "container references unknown playlist {uri}"
                        )))
                    })?;
                    ContainerEntry::Playlist(playlist)
                }
                EntryFixture::StartFolder { id, name } => {
                    ContainerEntry::Folder(FolderMarker::start(id, name))
                }
                EntryFixture::EndFolder(id) => ContainerEntry::Folder(FolderMarker::end(id)),
            });
        }
        session.container = Some(container);
        Ok(session)
    }

    /// Looks up a registered playlist handle without going through the
    /// session contract
    pub fn playlist(&self, uri: &str) -> Option<&MemoryPlaylist> {
        self.playlists.get(uri)
    }
}

impl RemoteSession for MemorySession {
    type Playlist = MemoryPlaylist;

    fn user_name(&self) -> &str {
        &self.user_name
    }

    fn get_playlist(&self, uri: &str) -> std::result::Result<MemoryPlaylist, SessionError> {
        if let Some(reason) = &self.unavailable {
            return Err(SessionError::Unavailable(reason.clone()));
        }
        self.playlists
            .get(uri)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(uri.to_string()))
    }

    fn playlist_container(&self) -> Option<Vec<ContainerEntry<MemoryPlaylist>>> {
        self.container.clone()
    }
}

#[derive(Debug, Deserialize)]
struct SessionFixture {
    user_name: String,
    #[serde(default)]
    playlists: Vec<PlaylistFixture>,
    // `- playlist: uri` plutôt que les tags YAML `!playlist uri`
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    container: Option<Vec<EntryFixture>>,
}

#[derive(Debug, Deserialize)]
struct PlaylistFixture {
    uri: String,
    name: String,
    owner: String,
    #[serde(default)]
    tracks: Vec<RemoteTrack>,
    #[serde(default)]
    state: LoadState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EntryFixture {
    Playlist(String),
    StartFolder { id: u64, name: String },
    EndFolder(u64),
}
