use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::ConfigError;
use crate::file::{ConfigFile, read_document};
use crate::types::{ConfigFormat, Template};

/// Builder for loading (and if necessary creating) a [`ConfigFile`].
///
/// Three independent switches control what happens on disk before the file is
/// read:
///
/// - **Overwrite**: [`overwrite(true)`](Self::overwrite) deletes an existing
///   file first, so it is recreated from the template (or empty).
/// - **Template**: [`template()`](Self::template) seeds a file that doesn't
///   exist yet. Without one, a missing file is created empty.
/// - **Merge**: [`merge(true)`](Self::merge) adopts template values into an
///   *existing* file wherever the file lacks them, then saves. Values already in
///   the file are never clobbered. A freshly created file is not merged.
#[derive(Debug, Clone)]
pub struct ConfigFileBuilder {
    path: PathBuf,
    format: Option<ConfigFormat>,
    template: Option<Template>,
    overwrite: bool,
    merge: bool,
}

impl ConfigFileBuilder {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            format: None,
            template: None,
            overwrite: false,
            merge: false,
        }
    }

    /// Set the format explicitly (default: inferred from the file extension).
    pub fn format(mut self, format: ConfigFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Seed new files from `template`, and merge from it if [`merge`](Self::merge) is on.
    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Delete an existing file before loading (default: `false`).
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Merge template values into an existing file (default: `false`).
    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Resolve the effective format, or error if it can't be inferred.
    fn effective_format(&self) -> Result<ConfigFormat, ConfigError> {
        self.format
            .or_else(|| ConfigFormat::from_path(&self.path))
            .ok_or_else(|| ConfigError::UnknownFormat {
                path: self.path.clone(),
            })
    }

    /// Create, seed, read and optionally merge the file.
    pub fn load(self) -> Result<ConfigFile, ConfigError> {
        let format = self.effective_format()?;
        let path = self.path;

        if self.overwrite {
            remove_if_exists(&path)?;
        }

        let fresh = !path.try_exists().map_err(|e| ConfigError::IoError {
            path: path.clone(),
            source: e,
        })?;
        if fresh {
            create_file(&path, self.template.as_ref())?;
        }

        let (root, source) = read_document(&path, format)?;
        let mut file = ConfigFile::from_parts(path, format, root, source);
        debug!(path = %file.path().display(), %format, fresh, "loaded config file");

        if !fresh
            && self.merge
            && let Some(template) = &self.template
        {
            let text = template.contents()?;
            let template_root = format.parse(&text).map_err(|e| ConfigError::ParseError {
                path: template.label(),
                format,
                source: e,
            })?;
            file.merge_from(&template_root);
            file.save()?;
            debug!(
                path = %file.path().display(),
                template = %template.label().display(),
                "merged template into config file"
            );
        }

        Ok(file)
    }

    /// Like [`load`](Self::load), but logs the failure and returns `None`
    /// instead of an error.
    pub fn load_or_log(self) -> Option<ConfigFile> {
        let path = self.path.clone();
        match self.load() {
            Ok(file) => Some(file),
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load config file");
                None
            }
        }
    }
}

fn remove_if_exists(path: &Path) -> Result<(), ConfigError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Create parent directories and write the template (or nothing) to `path`.
fn create_file(path: &Path, template: Option<&Template>) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let contents = match template {
        Some(template) => template.contents()?,
        None => "".into(),
    };
    std::fs::write(path, contents.as_bytes()).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(
        path = %path.display(),
        seeded = template.is_some(),
        "created config file"
    );
    Ok(())
}
