// THEORY:
// Track backgrounds are recognized purely by file name: a prefix such as
// `background_` and an image extension such as `.png`, both compared without
// regard to case. The filter is a pure predicate and never touches the disk.

use std::path::Path;

/// Decides which files under the walked root are track backgrounds.
#[derive(Debug, Clone)]
pub struct TrackFilter {
    prefix: String,
    extension: String,
}

impl TrackFilter {
    pub fn new(prefix: &str, extension: &str) -> Self {
        Self {
            prefix: prefix.to_lowercase(),
            extension: extension.to_lowercase(),
        }
    }

    pub fn accepts_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        name.starts_with(&self.prefix) && name.ends_with(&self.extension)
    }

    /// Applies [`TrackFilter::accepts_name`] to the last path component.
    /// Paths without a UTF-8 file name are rejected.
    pub fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.accepts_name(name))
    }
}
