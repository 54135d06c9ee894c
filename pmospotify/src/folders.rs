//! Folder nesting while walking a playlist container

use crate::error::{Result, SpotifyError};

/// Stack of the folders currently open during a container traversal
///
/// Lives for a single traversal and is never shared.
#[derive(Debug, Default)]
pub(crate) struct FolderPath {
    folders: Vec<(u64, String)>,
}

impl FolderPath {
    pub(crate) fn push(&mut self, id: u64, name: String) {
        self.folders.push((id, name));
    }

    /// Closes the innermost folder.
    ///
    /// An end marker without any open folder leaves the stack untouched. An
    /// end marker whose id differs from the innermost folder still closes it.
    /// Both cases are reported as [`SpotifyError::MalformedContainer`].
    pub(crate) fn pop(&mut self, id: u64) -> Result<()> {
        match self.folders.pop() {
            None => Err(SpotifyError::MalformedContainer(format!(
                "end of folder {id} without any open folder"
            ))),
            Some((open_id, name)) if open_id != id => {
                Err(SpotifyError::MalformedContainer(format!(
                    "end of folder {id} while folder {open_id} ({name}) is open"
                )))
            }
            Some(_) => Ok(()),
        }
    }

    /// Checks that every folder has been closed
    pub(crate) fn finish(&self) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let open = self
            .folders
            .iter()
            .map(|(_, name)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(SpotifyError::MalformedContainer(format!(
            "folders left open: {open}"
        )))
    }

    /// Prefixes `name` with the open folders, outermost first
    pub(crate) fn qualify(&self, name: &str, separator: &str) -> String {
        if self.folders.is_empty() {
            return name.to_string();
        }
        let mut qualified = String::new();
        for (_, folder) in &self.folders {
            qualified.push_str(folder);
            qualified.push_str(separator);
        }
        qualified.push_str(name);
        qualified
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_without_folders() {
        let path = FolderPath::default();
        assert_eq!(path.qualify("Foo", "/"), "Foo");
    }

    #[test]
    fn test_qualify_nested_folders() {
        let mut path = FolderPath::default();
        path.push(1, "Rock".to_string());
        path.push(2, "70s".to_string());
        assert_eq!(path.qualify("Live", "/"), "Rock/70s/Live");
        assert_eq!(path.qualify("Live", " > "), "Rock > 70s > Live");

        path.pop(2).unwrap();
        assert_eq!(path.qualify("Live", "/"), "Rock/Live");
    }

    #[test]
    fn test_pop_on_empty_stack_is_malformed() {
        let mut path = FolderPath::default();
        let err = path.pop(17).unwrap_err();
        assert!(matches!(err, SpotifyError::MalformedContainer(_)));
        assert!(path.is_empty());
    }

    #[test]
    fn test_pop_with_mismatched_id_still_closes() {
        let mut path = FolderPath::default();
        path.push(17, "Bar".to_string());
        assert!(path.pop(18).is_err());
        assert!(path.is_empty());
    }

    #[test]
    fn test_finish_reports_open_folders() {
        let mut path = FolderPath::default();
        path.push(1, "Bar".to_string());
        path.push(2, "Baz".to_string());
        let err = path.finish().unwrap_err();
        assert!(err.to_string().contains("Bar, Baz"));
    }
}
