//! Typed access to one location in a config tree.
//!
//! A [`ConfigKey<T>`] pairs a [`ConfigPath`] with an optional default value and
//! an optional [`Transformer`]. It holds no document; the same key can be read
//! from and written to any number of files.
//!
//! # Reads are fail-soft
//!
//! A missing path, an explicit null, a value of the wrong shape, or a
//! transformer that rejects the node all resolve to the default. Failures are
//! logged with `warn!`, never raised. The default is, in order: the value
//! passed for this call, the key's bound default, or `None`.
//! [`try_get`](ConfigKey::try_get) is the strict counterpart that returns the
//! coercion error instead.
//!
//! # Writes are strict
//!
//! [`write`](ConfigKey::write) stores the value in memory and saves the file
//! immediately. If saving fails the in-memory tree keeps the new value.
//!
//! # Documents
//!
//! Every verb takes a [`Source`] or [`Target`] naming the document: a file the
//! caller holds, a [`DefaultConfig`] registry, or the process-wide default. The
//! only error a keyless read can produce is [`ConfigError::NoDefaultConfig`],
//! raised when nothing has been registered.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ConfigError;
use crate::file::ConfigFile;
use crate::node::{self, Node};
use crate::registry::{self, DefaultConfig};
use crate::transform::Transformer;
use crate::types::{ConfigPath, Segment};

pub struct ConfigKey<T> {
    path: ConfigPath,
    default: Option<T>,
    transformer: Option<Arc<dyn Transformer<Output = T>>>,
}

/// Where a read looks for its document.
#[derive(Debug, Clone, Copy, Default)]
pub enum Source<'a> {
    File(&'a ConfigFile),
    Registry(&'a DefaultConfig),
    /// The document registered with [`set_default_config`](crate::set_default_config).
    #[default]
    Global,
}

/// Where a write or unset goes.
#[derive(Debug, Default)]
pub enum Target<'a> {
    File(&'a mut ConfigFile),
    Registry(&'a DefaultConfig),
    #[default]
    Global,
}

/// Options for [`ConfigKey::read`].
#[derive(Debug)]
pub struct ReadOptions<'a, T> {
    pub source: Source<'a>,
    /// Replaces the key's bound default for this read only.
    pub default: Option<T>,
}

impl<T> Default for ReadOptions<'_, T> {
    fn default() -> Self {
        Self {
            source: Source::Global,
            default: None,
        }
    }
}

impl<'a, T> ReadOptions<'a, T> {
    pub fn file(file: &'a ConfigFile) -> Self {
        Self {
            source: Source::File(file),
            default: None,
        }
    }

    pub fn registry(registry: &'a DefaultConfig) -> Self {
        Self {
            source: Source::Registry(registry),
            default: None,
        }
    }

    pub fn global() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }
}

impl<T> ConfigKey<T> {
    /// A key for a top-level entry.
    pub fn of_single(segment: impl Into<Segment>) -> Self {
        Self::at(ConfigPath::single(segment))
    }

    /// A key for a nested entry, one segment per level.
    pub fn of_path<I, S>(segments: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        ConfigPath::new(segments).map(Self::at)
    }

    /// A key for a dotted path such as `"server.port"`.
    pub fn dotted(path: &str) -> Result<Self, ConfigError> {
        path.parse().map(Self::at)
    }

    pub fn at(path: ConfigPath) -> Self {
        Self {
            path,
            default: None,
            transformer: None,
        }
    }

    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    /// Resolve nodes through `transformer` instead of coercing them directly.
    pub fn with_transformer(mut self, transformer: impl Transformer<Output = T> + 'static) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    pub fn path(&self) -> &ConfigPath {
        &self.path
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// Remove the entry from the target document and save it.
    pub fn unset(&self, target: Target<'_>) -> Result<(), ConfigError> {
        self.store(target, Node::Null)
    }

    fn store(&self, target: Target<'_>, value: Node) -> Result<(), ConfigError> {
        match target {
            Target::File(file) => self.store_in(file, value),
            Target::Registry(registry) => self.with_registered(registry, |file| self.store_in(file, value))?,
            Target::Global => self.with_registered(registry::global(), |file| self.store_in(file, value))?,
        }
    }

    fn store_in(&self, file: &mut ConfigFile, value: Node) -> Result<(), ConfigError> {
        file.set_node(&self.path, value)?;
        file.save()
    }

    /// Run `f` on the document registered in `registry`, holding its lock.
    fn with_registered<R>(
        &self,
        registry: &DefaultConfig,
        f: impl FnOnce(&mut ConfigFile) -> R,
    ) -> Result<R, ConfigError> {
        let shared = registry.require(&self.path.to_string())?;
        let mut file = shared.lock();
        Ok(f(&mut file))
    }
}

impl<T: DeserializeOwned + Clone> ConfigKey<T> {
    /// Read the value from `options.source`, falling back to a default.
    pub fn read(&self, options: ReadOptions<'_, T>) -> Result<Option<T>, ConfigError> {
        let ReadOptions { source, default } = options;
        let value = match source {
            Source::File(file) => self.lookup(file),
            Source::Registry(registry) => self.with_registered(registry, |file| self.lookup(file))?,
            Source::Global => self.with_registered(registry::global(), |file| self.lookup(file))?,
        };
        Ok(value.or(default).or_else(|| self.default.clone()))
    }

    /// The value in `file`, or the key's default.
    pub fn get(&self, file: &ConfigFile) -> Option<T> {
        self.lookup(file).or_else(|| self.default.clone())
    }

    /// The value in `file`, or `default` (which wins over the key's own).
    pub fn get_or(&self, file: &ConfigFile, default: T) -> T {
        self.lookup(file).unwrap_or(default)
    }

    /// Like [`get`](Self::get), but a value that cannot be coerced is an error.
    /// A missing value still resolves to the key's default.
    pub fn try_get(&self, file: &ConfigFile) -> Result<Option<T>, ConfigError> {
        Ok(self.resolve(file)?.or_else(|| self.default.clone()))
    }

    fn lookup(&self, file: &ConfigFile) -> Option<T> {
        self.resolve(file).unwrap_or_else(|e| {
            warn!(
                key = %self.path,
                path = %file.path().display(),
                error = %e,
                "config value unusable, falling back to default"
            );
            None
        })
    }

    /// `Ok(None)` when nothing (or null) is stored at the path.
    fn resolve(&self, file: &ConfigFile) -> Result<Option<T>, ConfigError> {
        let found = file.node(&self.path);
        if found.is_null() {
            return Ok(None);
        }
        let key = || self.path.to_string();
        match &self.transformer {
            Some(transformer) => transformer
                .transform(found)
                .map(Some)
                .map_err(|source| ConfigError::Transform { key: key(), source }),
            None => node::coerce(found).map(Some).map_err(|e| ConfigError::InvalidValue {
                key: key(),
                reason: e.to_string(),
            }),
        }
    }
}

impl<T: Serialize> ConfigKey<T> {
    /// Store `value` in the target document and save it.
    pub fn write(&self, target: Target<'_>, value: T) -> Result<(), ConfigError> {
        let encoded = serde_json::to_value(&value).map_err(|e| ConfigError::InvalidValue {
            key: self.path.to_string(),
            reason: e.to_string(),
        })?;
        self.store(target, encoded)
    }

    /// Shortcut for `write(Target::File(file), value)`.
    pub fn set(&self, file: &mut ConfigFile, value: T) -> Result<(), ConfigError> {
        self.write(Target::File(file), value)
    }
}

impl<T: Clone> Clone for ConfigKey<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            default: self.default.clone(),
            transformer: self.transformer.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConfigKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigKey")
            .field("path", &self.path.to_string())
            .field("default", &self.default)
            .field("transformer", &self.transformer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{YAML_TEMPLATE, write_file};
    use crate::transform::transformers::{I32_LIST, I32_SET, NODE, STRING_MAP};
    use crate::types::{ConfigFormat, Template};
    use serde_json::json;
    use std::collections::{HashMap, HashSet};
    use std::fs;
    use tempfile::TempDir;

    fn empty(dir: &TempDir, name: &str) -> ConfigFile {
        ConfigFile::open(dir.path().join(name)).unwrap()
    }

    fn sample(dir: &TempDir) -> ConfigFile {
        let p = write_file(dir.path(), "app.yaml", YAML_TEMPLATE);
        ConfigFile::open(p).unwrap()
    }

    #[test]
    fn absent_path_yields_default() {
        let dir = TempDir::new().unwrap();
        let file = empty(&dir, "app.yaml");
        for dotted in ["level", "a.b.c", "list.3"] {
            let key = ConfigKey::dotted(dotted).unwrap().with_default(5_i64);
            assert_eq!(key.get(&file), Some(5), "{dotted}");
        }
    }

    #[test]
    fn absent_path_without_default_is_none() {
        let dir = TempDir::new().unwrap();
        let file = empty(&dir, "app.yaml");
        assert_eq!(ConfigKey::<String>::of_single("name").get(&file), None);
    }

    #[test]
    fn explicit_null_counts_as_missing() {
        let dir = TempDir::new().unwrap();
        let p = write_file(dir.path(), "app.yaml", "level: ~\n");
        let file = ConfigFile::open(p).unwrap();
        let key = ConfigKey::of_single("level").with_default(3_u8);
        assert_eq!(key.get(&file), Some(3));
        assert_eq!(key.try_get(&file).unwrap(), Some(3));
    }

    #[test]
    fn reads_existing_values() {
        let dir = TempDir::new().unwrap();
        let file = sample(&dir);
        assert_eq!(ConfigKey::<u16>::dotted("server.port").unwrap().get(&file), Some(8080));
        assert_eq!(
            ConfigKey::<String>::of_path(["server", "host"]).unwrap().get(&file),
            Some("localhost".to_string())
        );
        assert_eq!(ConfigKey::<bool>::of_single("debug").get(&file), Some(false));
        assert_eq!(
            ConfigKey::<String>::dotted("tags.1").unwrap().get(&file),
            Some("beta".to_string())
        );
    }

    #[test]
    fn scalar_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut file = empty(&dir, "app.json");

        let int = ConfigKey::<i64>::dotted("limits.max").unwrap();
        int.set(&mut file, -12).unwrap();
        assert_eq!(int.get(&file), Some(-12));

        let float = ConfigKey::<f64>::dotted("limits.ratio").unwrap();
        float.set(&mut file, 0.25).unwrap();
        assert_eq!(float.get(&file), Some(0.25));

        let text = ConfigKey::<String>::of_single("name").with_default("x".into());
        text.set(&mut file, "keyfig".into()).unwrap();
        assert_eq!(text.get(&file), Some("keyfig".to_string()));

        let flag = ConfigKey::<bool>::of_single("enabled");
        flag.set(&mut file, true).unwrap();
        assert_eq!(flag.get(&file), Some(true));
    }

    #[test]
    fn fresh_yaml_file_scenario() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("cfg.yaml");
        let mut file = ConfigFile::builder(&p)
            .overwrite(false)
            .merge(false)
            .load()
            .unwrap();
        assert!(p.exists());
        assert_eq!(fs::read_to_string(&p).unwrap(), "");

        let level = ConfigKey::of_single("level").with_default(42_i32);
        assert_eq!(level.get(&file), Some(42));

        level.set(&mut file, 7).unwrap();
        assert_eq!(level.get(&file), Some(7));

        file.reload().unwrap();
        assert_eq!(level.get(&file), Some(7));
        let reopened = ConfigFile::open(&p).unwrap();
        assert_eq!(level.get(&reopened), Some(7));
    }

    #[test]
    fn list_and_set_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut file = empty(&dir, "app.toml");
        let written = vec![5, 3, 9, 1, 3];

        ConfigKey::<Vec<i32>>::dotted("numbers.values")
            .unwrap()
            .set(&mut file, written.clone())
            .unwrap();
        file.reload().unwrap();

        let as_list = ConfigKey::dotted("numbers.values").unwrap().with_transformer(I32_LIST);
        assert_eq!(as_list.get(&file), Some(written));

        let as_set = ConfigKey::dotted("numbers.values").unwrap().with_transformer(I32_SET);
        assert_eq!(as_set.get(&file), Some(HashSet::from([1, 3, 5, 9])));
    }

    #[test]
    fn transformer_failure_yields_default() {
        let dir = TempDir::new().unwrap();
        let file = sample(&dir);
        let key = ConfigKey::dotted("server.port")
            .unwrap()
            .with_transformer(I32_LIST)
            .with_default(vec![1, 2]);
        assert_eq!(key.get(&file), Some(vec![1, 2]));
    }

    #[test]
    fn transformer_failure_is_raised_by_try_get() {
        let dir = TempDir::new().unwrap();
        let file = sample(&dir);
        let key = ConfigKey::dotted("server.port")
            .unwrap()
            .with_transformer(I32_LIST)
            .with_default(vec![1, 2]);
        match key.try_get(&file) {
            Err(ConfigError::Transform { key, .. }) => assert_eq!(key, "server.port"),
            other => panic!("Expected Transform, got {other:?}"),
        }
    }

    #[test]
    fn coercion_failure_yields_default() {
        let dir = TempDir::new().unwrap();
        let file = sample(&dir);
        let key = ConfigKey::of_single("server").with_default(0_u32);
        assert_eq!(key.get(&file), Some(0));
        assert!(matches!(key.try_get(&file), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn per_call_default_overrides_bound_default() {
        let dir = TempDir::new().unwrap();
        let file = empty(&dir, "app.yaml");
        let key = ConfigKey::of_single("level").with_default(1_i32);

        assert_eq!(key.get_or(&file, 9), 9);
        let read = key.read(ReadOptions::file(&file).with_default(9)).unwrap();
        assert_eq!(read, Some(9));
        assert_eq!(key.read(ReadOptions::file(&file)).unwrap(), Some(1));
    }

    #[test]
    fn stored_value_wins_over_every_default() {
        let dir = TempDir::new().unwrap();
        let file = sample(&dir);
        let key = ConfigKey::dotted("server.port").unwrap().with_default(1_u16);
        assert_eq!(key.get_or(&file, 2), 8080);
        let read = key.read(ReadOptions::file(&file).with_default(3)).unwrap();
        assert_eq!(read, Some(8080));
    }

    #[test]
    fn set_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let mut file = sample(&dir);
        ConfigKey::dotted("server.port").unwrap().set(&mut file, 9090_u16).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("port: 9090"));
    }

    #[test]
    fn failed_save_keeps_in_memory_write() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("sub");
        let mut file = ConfigFile::open(nested.join("app.yaml")).unwrap();
        fs::remove_dir_all(&nested).unwrap();

        let key = ConfigKey::of_single("level");
        assert!(matches!(key.set(&mut file, 7_i32), Err(ConfigError::IoError { .. })));
        assert_eq!(key.get(&file), Some(7));
    }

    #[test]
    fn unset_removes_and_saves() {
        let dir = TempDir::new().unwrap();
        let mut file = sample(&dir);
        let key = ConfigKey::dotted("server.host").unwrap().with_default("0.0.0.0".to_string());

        key.unset(Target::File(&mut file)).unwrap();
        assert_eq!(key.get(&file), Some("0.0.0.0".to_string()));
        assert!(!fs::read_to_string(file.path()).unwrap().contains("localhost"));
    }

    #[test]
    fn numeric_map_keys_read_and_write() {
        let dir = TempDir::new().unwrap();
        let p = write_file(dir.path(), "medals.yaml", "years:\n  2024: gold\n  2025: silver\n");
        let mut file = ConfigFile::open(&p).unwrap();

        let gold = ConfigKey::<String>::dotted("years.2024").unwrap();
        assert_eq!(gold.get(&file), Some("gold".to_string()));

        let bronze = ConfigKey::<String>::dotted("years.3").unwrap();
        bronze.set(&mut file, "bronze".into()).unwrap();

        let reopened = ConfigFile::open(&p).unwrap();
        assert_eq!(gold.get(&reopened), Some("gold".to_string()));
        assert_eq!(bronze.get(&reopened), Some("bronze".to_string()));
        assert_eq!(
            ConfigKey::<String>::dotted("years.2025").unwrap().get(&reopened),
            Some("silver".to_string())
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let dir = TempDir::new().unwrap();
        let p = write_file(dir.path(), "app.yaml", "list: [1]\n");
        let mut file = ConfigFile::open(&p).unwrap();

        for dotted in ["list.18446744073709551615", "list.4000000000", "list.2", "fresh.1"] {
            let key = ConfigKey::<i32>::dotted(dotted).unwrap();
            assert!(
                matches!(key.set(&mut file, 1), Err(ConfigError::InvalidValue { .. })),
                "{dotted}"
            );
        }
        assert_eq!(file.root(), &json!({"list": [1]}));
        assert_eq!(fs::read_to_string(&p).unwrap(), "list: [1]\n");
    }

    #[test]
    fn toml_list_index_survives_reload() {
        let dir = TempDir::new().unwrap();
        let p = write_file(dir.path(), "app.toml", "hosts = [\"a\", \"b\"]\n");
        let mut file = ConfigFile::open(&p).unwrap();

        let third = ConfigKey::<String>::dotted("hosts.2").unwrap();
        third.set(&mut file, "c".into()).unwrap();
        file.reload().unwrap();
        assert_eq!(third.get(&file), Some("c".to_string()));
        assert_eq!(
            ConfigKey::<String>::dotted("hosts.0").unwrap().get(&file),
            Some("a".to_string())
        );

        let gap = ConfigKey::<String>::dotted("hosts.5").unwrap();
        assert!(gap.set(&mut file, "x".into()).is_err());
        assert_eq!(file.node(gap.path()), &Node::Null);
    }

    #[test]
    fn toml_rejects_integers_beyond_i64() {
        let dir = TempDir::new().unwrap();
        let mut file = empty(&dir, "app.toml");
        let key = ConfigKey::of_single("big");
        assert!(matches!(
            key.set(&mut file, u64::MAX),
            Err(ConfigError::RenderError { .. })
        ));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "");
    }

    #[test]
    fn one_key_many_files() {
        let dir = TempDir::new().unwrap();
        let mut first = empty(&dir, "a.yaml");
        let mut second = empty(&dir, "b.json");
        let key = ConfigKey::of_single("level").with_default(0_i32);

        key.set(&mut first, 1).unwrap();
        key.set(&mut second, 2).unwrap();
        assert_eq!(key.get(&first), Some(1));
        assert_eq!(key.get(&second), Some(2));
    }

    #[test]
    fn map_key_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut file = empty(&dir, "app.yaml");
        let greetings = HashMap::from([
            ("en".to_string(), "hello".to_string()),
            ("fr".to_string(), "bonjour".to_string()),
        ]);

        let key = ConfigKey::of_single("greetings").with_transformer(STRING_MAP);
        key.set(&mut file, greetings.clone()).unwrap();
        file.reload().unwrap();
        assert_eq!(key.get(&file), Some(greetings));
    }

    #[test]
    fn node_transformer_returns_subtree() {
        let dir = TempDir::new().unwrap();
        let file = sample(&dir);
        let key = ConfigKey::of_single("server").with_transformer(NODE);
        assert_eq!(
            key.get(&file),
            Some(json!({"host": "localhost", "port": 8080}))
        );
    }

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Server {
        host: String,
        port: u16,
    }

    #[test]
    fn struct_valued_key() {
        let dir = TempDir::new().unwrap();
        let mut file = sample(&dir);
        let key = ConfigKey::<Server>::of_single("server");
        assert_eq!(
            key.get(&file),
            Some(Server {
                host: "localhost".into(),
                port: 8080
            })
        );

        key.set(
            &mut file,
            Server {
                host: "0.0.0.0".into(),
                port: 80,
            },
        )
        .unwrap();
        let port = ConfigKey::<u16>::dotted("server.port").unwrap();
        assert_eq!(port.get(&file), Some(80));
    }

    #[test]
    fn merged_template_values_are_readable() {
        let dir = TempDir::new().unwrap();
        let p = write_file(dir.path(), "app.json", r#"{"version": "2.0"}"#);
        let file = ConfigFile::builder(&p)
            .template(Template::Embedded(r#"{"version": "1.0", "debug": false}"#))
            .merge(true)
            .load()
            .unwrap();
        assert_eq!(file.format(), ConfigFormat::Json);
        assert_eq!(
            ConfigKey::<String>::of_single("version").get(&file),
            Some("2.0".to_string())
        );
        assert_eq!(ConfigKey::<bool>::of_single("debug").get(&file), Some(false));
    }

    #[test]
    fn private_registry_read_and_write() {
        let dir = TempDir::new().unwrap();
        let registry = DefaultConfig::new();
        let key = ConfigKey::dotted("server.port").unwrap().with_default(1_u16);

        let missing = key.read(ReadOptions::registry(&registry));
        assert!(matches!(missing, Err(ConfigError::NoDefaultConfig { .. })));
        assert!(matches!(
            key.write(Target::Registry(&registry), 2),
            Err(ConfigError::NoDefaultConfig { .. })
        ));

        registry.set(sample(&dir).into_shared());
        assert_eq!(key.read(ReadOptions::registry(&registry)).unwrap(), Some(8080));

        key.write(Target::Registry(&registry), 9090).unwrap();
        assert_eq!(key.read(ReadOptions::registry(&registry)).unwrap(), Some(9090));

        let reopened = ConfigFile::open(dir.path().join("app.yaml")).unwrap();
        assert_eq!(key.get(&reopened), Some(9090));
    }

    #[test]
    fn registry_swap_redirects_reads() {
        let dir = TempDir::new().unwrap();
        let registry = DefaultConfig::new();
        let key = ConfigKey::of_single("level").with_default(0_i32);

        let mut first = empty(&dir, "a.yaml");
        key.set(&mut first, 1).unwrap();
        let mut second = empty(&dir, "b.yaml");
        key.set(&mut second, 2).unwrap();

        registry.set(first.into_shared());
        assert_eq!(key.read(ReadOptions::registry(&registry)).unwrap(), Some(1));
        registry.set(second.into_shared());
        assert_eq!(key.read(ReadOptions::registry(&registry)).unwrap(), Some(2));
    }

    // The only test that touches the process-wide default.
    #[test]
    fn keyless_access_uses_process_default() {
        let dir = TempDir::new().unwrap();
        let key = ConfigKey::of_single("level").with_default(42_i32);
        registry::clear_default_config();

        assert!(!registry::has_default_config());
        match key.read(ReadOptions::global()) {
            Err(ConfigError::NoDefaultConfig { key }) => assert_eq!(key, "level"),
            other => panic!("Expected NoDefaultConfig, got {other:?}"),
        }
        assert!(key.unset(Target::Global).is_err());

        registry::set_default_config(empty(&dir, "cfg.yaml").into_shared());
        assert!(registry::has_default_config());
        assert_eq!(key.read(ReadOptions::default()).unwrap(), Some(42));

        key.write(Target::Global, 7).unwrap();
        assert_eq!(key.read(ReadOptions::global()).unwrap(), Some(7));
        let shared = registry::default_config().unwrap();
        assert_eq!(key.get(&shared.lock()), Some(7));

        key.unset(Target::default()).unwrap();
        assert_eq!(key.read(ReadOptions::global()).unwrap(), Some(42));

        assert!(registry::clear_default_config().is_some());
        assert!(!registry::has_default_config());
    }

    #[test]
    fn debug_shows_dotted_path() {
        let key = ConfigKey::dotted("server.port").unwrap().with_default(1_u16);
        let shown = format!("{key:?}");
        assert!(shown.contains("server.port"));
        assert!(shown.contains("transformer: false"));
    }

    #[test]
    fn empty_path_rejected() {
        assert!(matches!(
            ConfigKey::<i32>::of_path(Vec::<String>::new()),
            Err(ConfigError::EmptyPath)
        ));
        assert!(matches!(ConfigKey::<i32>::dotted(""), Err(ConfigError::EmptyPath)));
    }
}
