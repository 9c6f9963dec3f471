use anyhow::ensure;
use anyhow::Context;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    #[serde(rename = "bind-address")]
    pub bind_address: SocketAddr,

    /// The upstream api, defaulting to the public gomanga api
    #[serde(rename = "upstream-url")]
    pub upstream_url: Option<Url>,

    /// Static files served for any path no page claims
    #[serde(rename = "public-directory")]
    pub public_directory: Option<PathBuf>,

    #[serde(default)]
    pub hints: ConfigHints,

    #[serde(default)]
    pub logging: ConfigLogging,
}

impl Config {
    /// Load and validate a config.
    pub fn load_path<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to load config file at \"{}\"", path.display()))?;
        let config = Self::parse(&data)
            .with_context(|| format!("failed to parse config file at \"{}\"", path.display()))?;

        if let Some(public_directory) = config.public_directory.as_ref() {
            let public_directory_exists = public_directory.try_exists().with_context(|| {
                format!(
                    "failed to check if the public directory path \"{}\" exists",
                    public_directory.display()
                )
            })?;
            ensure!(
                public_directory_exists,
                "the public directory path \"{}\" does not exist",
                public_directory.display()
            );
        }

        Ok(config)
    }

    /// Parse and validate a config, without touching the filesystem.
    pub fn parse(data: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(data)?;

        if let Some(upstream_url) = config.upstream_url.as_ref() {
            ensure!(
                matches!(upstream_url.scheme(), "http" | "https"),
                "the upstream url \"{upstream_url}\" must use http or https"
            );
            ensure!(
                upstream_url.path().ends_with('/'),
                "the upstream url \"{upstream_url}\" must end with a '/'"
            );
        }
        ensure!(config.hints.capacity > 0, "the hint capacity must not be 0");

        Ok(config)
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct ConfigHints {
    #[serde(default = "default_hint_capacity")]
    pub capacity: usize,

    #[serde(rename = "ttl-secs", default = "default_hint_ttl_secs")]
    pub ttl_secs: u64,
}

impl ConfigHints {
    /// The capacity, if it is valid
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.capacity)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for ConfigHints {
    fn default() -> Self {
        Self {
            capacity: default_hint_capacity(),
            ttl_secs: default_hint_ttl_secs(),
        }
    }
}

fn default_hint_capacity() -> usize {
    manga_view::DEFAULT_HINT_CAPACITY.get()
}

fn default_hint_ttl_secs() -> u64 {
    manga_view::DEFAULT_HINT_TTL.as_secs()
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ConfigLogging {
    #[serde(rename = "include-headers", default)]
    pub include_headers: bool,

    #[serde(default)]
    pub directives: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minimal() {
        let config = Config::parse("bind-address = \"127.0.0.1:8080\"").expect("failed to parse");
        assert_eq!(config.upstream_url, None);
        assert_eq!(config.public_directory, None);
        assert_eq!(config.hints.capacity, 1024);
        assert_eq!(config.hints.ttl(), Duration::from_secs(30 * 60));
        assert!(!config.logging.include_headers);
        assert!(config.logging.directives.is_empty());
    }

    #[test]
    fn full() {
        let config = Config::parse(include_str!("../config.example.toml"))
            .expect("failed to parse example config");
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(
            config.upstream_url.as_ref().map(Url::as_str),
            Some(gomanga::DEFAULT_BASE_URL)
        );
        assert_eq!(config.public_directory, Some(PathBuf::from("server/public")));
        assert_eq!(config.hints.ttl_secs, 1800);
        assert_eq!(config.logging.directives, ["manga_view=debug"]);
    }

    #[test]
    fn invalid() {
        let bad = [
            "upstream-url = \"https://example.com/api/\"",
            "bind-address = \"127.0.0.1:8080\"\nupstream-url = \"ftp://example.com/api/\"",
            "bind-address = \"127.0.0.1:8080\"\nupstream-url = \"https://example.com/api\"",
            "bind-address = \"127.0.0.1:8080\"\n[hints]\ncapacity = 0",
        ];
        for data in bad {
            assert!(Config::parse(data).is_err(), "{data}");
        }
    }
}
