//! The config document: one file on disk, its format, and the tree loaded
//! from it.
//!
//! A [`ConfigFile`] is created by [`ConfigFileBuilder::load`](crate::ConfigFileBuilder::load)
//! and owns its root node exclusively. Edits happen in memory through
//! [`node_mut`](ConfigFile::node_mut) / [`set_node`](ConfigFile::set_node) and
//! reach the disk only on [`save`](ConfigFile::save). [`reload`](ConfigFile::reload)
//! replaces the root wholesale, discarding unsaved edits.
//!
//! No OS handle is held between calls; dropping the value is all the cleanup
//! there is.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::builder::ConfigFileBuilder;
use crate::error::ConfigError;
use crate::merge::merge_missing;
use crate::node::{self, Node};
use crate::registry::SharedConfigFile;
use crate::types::{ConfigFormat, Location, Segment};

#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    format: ConfigFormat,
    root: Node,
    /// Text as last read from or written to disk; the TOML engine patches it.
    source: String,
}

impl ConfigFile {
    /// Start building a config file at `path`.
    pub fn builder(path: impl Into<PathBuf>) -> ConfigFileBuilder {
        ConfigFileBuilder::new(path.into())
    }

    /// Start building a config file named `file_name` inside `location`.
    ///
    /// `app_name` is used by [`Location::Platform`] to pick the platform config
    /// directory (e.g. `~/.config/{app_name}/` on Linux).
    pub fn builder_in(
        location: &Location,
        app_name: &str,
        file_name: &str,
    ) -> Result<ConfigFileBuilder, ConfigError> {
        let dir = resolve_location(location, app_name)
            .ok_or_else(|| ConfigError::UnresolvedLocation(format!("{location:?}")))?;
        Ok(Self::builder(dir.join(file_name)))
    }

    /// Open `path` with the format inferred from its extension, creating an
    /// empty file if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::builder(path).load()
    }

    pub(crate) fn from_parts(path: PathBuf, format: ConfigFormat, root: Node, source: String) -> Self {
        Self {
            path,
            format,
            root,
            source,
        }
    }

    /// Location of the file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the file.
    pub fn directory(&self) -> Option<&Path> {
        self.path.parent()
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The node at `path`, or a `Null` node if nothing is there.
    pub fn node(&self, path: impl AsRef<[Segment]>) -> &Node {
        node::node_at(&self.root, path.as_ref())
    }

    /// The node at `path`, creating intermediate structure as needed.
    ///
    /// Fails with [`ConfigError::InvalidValue`] if reaching it would leave a
    /// hole in a list.
    pub fn node_mut(&mut self, path: impl AsRef<[Segment]>) -> Result<&mut Node, ConfigError> {
        node::node_at_mut(&mut self.root, path.as_ref())
    }

    /// Put `value` at `path` in memory. A `Null` value removes the node instead.
    pub fn set_node(&mut self, path: impl AsRef<[Segment]>, value: Node) -> Result<(), ConfigError> {
        if value.is_null() {
            self.remove(path);
        } else {
            *self.node_mut(path)? = value;
        }
        Ok(())
    }

    /// Remove the node at `path` in memory, returning it.
    pub fn remove(&mut self, path: impl AsRef<[Segment]>) -> Option<Node> {
        node::remove_at(&mut self.root, path.as_ref())
    }

    /// Adopt values from `template` wherever this file lacks a matching one.
    /// Does not save.
    pub fn merge_from(&mut self, template: &Node) {
        merge_missing(&mut self.root, template);
    }

    /// Every leaf value as a dotted key, in document order.
    pub fn entries(&self) -> Vec<(String, Node)> {
        node::flatten(&self.root)
    }

    /// Write the in-memory tree to disk.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        let text = self
            .format
            .render(&self.root, &self.source)
            .map_err(|e| ConfigError::RenderError {
                path: self.path.clone(),
                format: self.format,
                source: e,
            })?;
        std::fs::write(&self.path, &text).map_err(|e| ConfigError::IoError {
            path: self.path.clone(),
            source: e,
        })?;
        debug!(path = %self.path.display(), format = %self.format, "saved config file");
        self.source = text;
        Ok(())
    }

    /// Replace the in-memory tree with the file's current contents.
    /// Unsaved edits are lost.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let (root, source) = read_document(&self.path, self.format)?;
        self.root = root;
        self.source = source;
        debug!(path = %self.path.display(), "reloaded config file");
        Ok(())
    }

    /// Wrap the file for sharing, e.g. as the default config.
    pub fn into_shared(self) -> SharedConfigFile {
        Arc::new(Mutex::new(self))
    }
}

/// Read and parse `path` as `format`.
pub(crate) fn read_document(path: &Path, format: ConfigFormat) -> Result<(Node, String), ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let root = format.parse(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        format,
        source: e,
    })?;
    Ok((root, text))
}

/// Resolve a [`Location`] to a concrete directory.
///
/// Returns `None` if the directory cannot be determined (e.g. no home directory).
pub fn resolve_location(location: &Location, app_name: &str) -> Option<PathBuf> {
    match location {
        Location::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        Location::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        Location::Cwd => std::env::current_dir().ok(),
        Location::Path(p) => Some(p.clone()),
    }
}
