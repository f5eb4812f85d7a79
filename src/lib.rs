//! Typed keys over hierarchical config files. Open a file, declare your keys,
//! and read and write values without touching the tree by hand.
//!
//! Keyfig loads a config document in one of four formats, optionally seeds it
//! from a template and merges template values into it, and hands out typed
//! access through [`ConfigKey`]s that know where their value lives and what
//! to fall back to.
//!
//! ```ignore
//! let mut file = ConfigFile::builder("cfg.yaml").load()?;
//!
//! let level = ConfigKey::of_single("level").with_default(42);
//! assert_eq!(level.get(&file), Some(42));
//!
//! level.set(&mut file, 7)?; // written and saved
//! ```
//!
//! # Documents
//!
//! A [`ConfigFile`] is one file on disk plus the tree parsed from it. It is
//! created through [`ConfigFileBuilder`], which decides what happens on disk
//! before the file is read:
//!
//! - a missing file (and its parent directories) is created, either empty or as
//!   a copy of the [`Template`];
//! - [`overwrite(true)`](ConfigFileBuilder::overwrite) deletes an existing file
//!   first so it is recreated;
//! - [`merge(true)`](ConfigFileBuilder::merge) adopts template values into an
//!   existing file wherever the file lacks them, then saves.
//!
//! Edits are made in memory and reach the disk on [`save`](ConfigFile::save).
//! [`reload`](ConfigFile::reload) replaces the tree with what is on disk,
//! discarding unsaved edits.
//!
//! # Formats
//!
//! The format is chosen once, when the document is built, from the file
//! extension or an explicit [`ConfigFormat`]:
//!
//! | Format | Extension | Notes |
//! |--------|-----------|-------|
//! | [`Toml`](ConfigFormat::Toml) | `.toml` | Comments and formatting survive a save |
//! | [`Json`](ConfigFormat::Json) | `.json` | Pretty-printed |
//! | [`JsonCompact`](ConfigFormat::JsonCompact) | (explicit) | One line |
//! | [`Yaml`](ConfigFormat::Yaml) | `.yaml`, `.yml` | |
//!
//! Every format parses into the same [`Node`] tree, so keys and merging work
//! identically across them.
//!
//! # Merging
//!
//! Merging walks the template and, for every path the document lacks (or holds
//! with a different kind of value), adopts the template's value. Values the
//! document already has are never replaced, so a user's edits survive template
//! upgrades and merging the same template twice changes nothing the second time.
//!
//! ```text
//! template   { version = "1.0", debug = false }
//! file       { version = "2.0" }
//! merged     { version = "2.0", debug = false }
//! ```
//!
//! # Keys
//!
//! A [`ConfigKey<T>`] is a path, an optional default and an optional
//! [`Transformer`]. Build one with [`of_single`](ConfigKey::of_single),
//! [`of_path`](ConfigKey::of_path) or [`dotted`](ConfigKey::dotted). Keys hold
//! no document, so one key works against any number of files.
//!
//! Reads never fail because of the data: a missing value, a null, or a value of
//! the wrong shape resolves to the default (logged with `tracing::warn!` when a
//! value was present but unusable). [`ConfigKey::try_get`] is the strict
//! variant. Writes save immediately and return any I/O error.
//!
//! # Transformers
//!
//! Collections go through a [`Transformer`]: [`ListTransformer`],
//! [`SetTransformer`], [`MapTransformer`], or [`NodeTransformer`] for the raw
//! subtree. The [`transformers`] module has constants for common element types.
//!
//! ```ignore
//! let ports = ConfigKey::dotted("server.ports")?.with_transformer(transformers::I32_LIST);
//! let ports: Vec<i32> = ports.get(&file).unwrap_or_default();
//! ```
//!
//! # The default document
//!
//! Keys can also be read and written without naming a file. They then use a
//! registered default document: either a [`DefaultConfig`] the application owns
//! ([`Source::Registry`], [`Target::Registry`]) or the process-wide one set
//! with [`set_default_config`] ([`Source::Global`], [`Target::Global`]).
//!
//! Using a keyless operation with nothing registered is a programming error and
//! is reported as [`ConfigError::NoDefaultConfig`] rather than papered over with
//! a default value.
//!
//! ```ignore
//! set_default_config(ConfigFile::open("app.toml")?.into_shared());
//! let port = ConfigKey::dotted("server.port")?.with_default(8080_u16);
//! let port = port.read(ReadOptions::global())?;
//! ```
//!
//! # Errors and logging
//!
//! Loading, saving, reloading and key writes return [`ConfigError`];
//! [`ConfigFileBuilder::load_or_log`] is the fail-soft load that logs and
//! returns `None`. Events are emitted through `tracing`; install whatever
//! subscriber the application uses.

pub mod error;
pub mod types;

mod builder;
mod file;
mod format;
mod key;
pub(crate) mod merge;
pub mod node;
mod persist;
mod registry;
mod transform;

#[cfg(test)]
mod fixtures;

pub use builder::ConfigFileBuilder;
pub use error::{ConfigError, TransformError};
pub use file::{ConfigFile, resolve_location};
pub use key::{ConfigKey, ReadOptions, Source, Target};
pub use node::Node;
pub use registry::{
    DefaultConfig, SharedConfigFile, clear_default_config, default_config, has_default_config,
    set_default_config,
};
pub use transform::{
    ListTransformer, MapTransformer, NodeTransformer, SetTransformer, Transformer, transformers,
};
pub use types::{ConfigFormat, ConfigPath, Location, Segment, Template};
