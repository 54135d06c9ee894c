//! Host-facing playlists contract

use crate::error::Result;
use crate::models::Playlist;

/// Read-only playlists provider consumed by the media server
///
/// Expected absence is never an error: an unknown URI yields `Ok(None)` and
/// a listing with nothing to show yields an empty vector.
pub trait PlaylistsProvider {
    /// Resolves a single playlist by URI.
    ///
    /// May block while the remote playlist loads. Only remote failures other
    /// than "not found" are returned as errors.
    fn lookup(&self, uri: &str) -> Result<Option<Playlist>>;

    /// Lists every playlist ready to be shown, in container order.
    ///
    /// Never blocks and never fails.
    fn playlists(&self) -> Vec<Playlist>;
}
