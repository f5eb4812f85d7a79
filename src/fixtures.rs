#[cfg(test)]
pub mod test {
    use std::path::{Path, PathBuf};

    /// The same document in every supported format.
    pub const TOML_TEMPLATE: &str = r#"# Application settings
version = "1.0"
debug = false
tags = ["alpha", "beta"]

# Network settings
[server]
host = "localhost" # bind address
port = 8080
"#;

    pub const JSON_TEMPLATE: &str = r#"{
  "version": "1.0",
  "debug": false,
  "server": { "host": "localhost", "port": 8080 },
  "tags": ["alpha", "beta"]
}
"#;

    pub const YAML_TEMPLATE: &str = r#"# Application settings
version: "1.0"
debug: false
server:
  host: localhost
  port: 8080
tags:
  - alpha
  - beta
"#;

    /// Write `contents` to `dir/name`, returning the full path.
    pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}
