use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// On-disk syntax of a config file. Fixed when the file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// TOML. Comments and layout survive a save.
    Toml,
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON.
    JsonCompact,
    /// YAML.
    Yaml,
}

impl ConfigFormat {
    /// Infer the format from a file extension (`toml`, `json`, `yaml`, `yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Toml => write!(f, "TOML"),
            ConfigFormat::Json => write!(f, "JSON"),
            ConfigFormat::JsonCompact => write!(f, "compact JSON"),
            ConfigFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// One step of a [`ConfigPath`]: a map key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A non-empty sequence of segments locating a node from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath(Vec<Segment>);

impl ConfigPath {
    /// A one-segment path on the top level.
    pub fn single(segment: impl Into<Segment>) -> Self {
        ConfigPath(vec![segment.into()])
    }

    /// A path on any level. Fails with [`ConfigError::EmptyPath`] if `segments` is empty.
    pub fn new<I, S>(segments: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        let segments: Vec<Segment> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        Ok(ConfigPath(segments))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl AsRef<[Segment]> for ConfigPath {
    fn as_ref(&self) -> &[Segment] {
        &self.0
    }
}

/// Parses dotted keys such as `"server.port"` or `"hosts.0"`.
/// All-digit segments become [`Segment::Index`], which also matches a map key
/// spelled the same way.
impl FromStr for ConfigPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        ConfigPath::new(s.split('.').map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                segment
                    .parse::<usize>()
                    .map(Segment::Index)
                    .unwrap_or_else(|_| Segment::from(segment))
            } else {
                Segment::from(segment)
            }
        }))
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Initial contents for a config file that doesn't exist yet, and the source
/// of values for a merge.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Text bundled into the binary, typically via `include_str!`.
    Embedded(&'static str),
    /// A template file on disk.
    File(PathBuf),
}

impl Template {
    /// Path used in error messages and logs.
    pub fn label(&self) -> PathBuf {
        match self {
            Template::Embedded(_) => PathBuf::from("<embedded template>"),
            Template::File(path) => path.clone(),
        }
    }

    pub(crate) fn contents(&self) -> Result<Cow<'static, str>, ConfigError> {
        match self {
            Template::Embedded(text) => Ok(Cow::Borrowed(text)),
            Template::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|e| ConfigError::IoError {
                    path: path.clone(),
                    source: e,
                }),
        }
    }
}

/// Directory a config file lives in.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}
