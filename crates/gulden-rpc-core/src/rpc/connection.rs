use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;

use crate::error::CoreError;

pub const DEFAULT_HOST: &str = "http://127.0.0.1";
pub const DEFAULT_PORT: u16 = 9232;

// ==============================================================================
// Node Configuration
// ==============================================================================

/// Where the node listens and how to authenticate against it.
///
/// `port` is wider than `u16`; values outside `1..=65535` are reset to
/// [`DEFAULT_PORT`] when the client is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub host: String,
    pub port: u32,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Cookie file written by the node (`user:password` on the first line),
    /// used when no explicit credentials are set.
    pub cookie_file: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: u32::from(DEFAULT_PORT),
            username: None,
            password: None,
            cookie_file: None,
        }
    }
}

impl NodeConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u32) -> Self {
        self.port = port;
        self
    }

    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }
}

/// Basic-auth credentials. The password is kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ==============================================================================
// Normalization
// ==============================================================================

/// Prefix `http://` unless the host already starts with `http`
/// (case-insensitive), which also covers `https://`.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let has_scheme = host
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("http"));
    if has_scheme {
        host.to_owned()
    } else {
        format!("http://{host}")
    }
}

/// Ports outside `1..=65535` fall back to [`DEFAULT_PORT`].
pub fn normalize_port(port: u32) -> u16 {
    match u16::try_from(port) {
        Ok(0) | Err(_) => DEFAULT_PORT,
        Ok(port) => port,
    }
}

/// Build `{host}:{port}` from the normalized parts and check that it is a
/// usable HTTP(S) URL.
pub(crate) fn endpoint_url(host: &str, port: u32) -> Result<String, CoreError> {
    let url = format!("{}:{}", normalize_host(host), normalize_port(port));
    let parsed = Url::parse(&url)
        .map_err(|e| CoreError::Config(format!("invalid node endpoint `{url}` ({e})")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CoreError::Config(format!(
            "unsupported endpoint scheme `{other}`; expected http or https"
        ))),
    }
}

/// Pick the Basic-auth pair for the node.
///
/// An explicit username and password win. Without either, the node's cookie
/// file is used when configured, and empty credentials otherwise.
pub(crate) fn resolve_credentials(
    username: Option<&str>,
    password: Option<&str>,
    cookie_file: Option<&Path>,
) -> Result<Credentials, CoreError> {
    match (username, password, cookie_file) {
        (Some(username), Some(password), _) => Ok(Credentials::new(username, password)),
        (Some(_), None, _) => Err(CoreError::Config(
            "node username is set but the password is missing".to_owned(),
        )),
        (None, Some(_), _) => Err(CoreError::Config(
            "node password is set but the username is missing".to_owned(),
        )),
        (None, None, Some(path)) => Credentials::from_cookie_file(path),
        (None, None, None) => Ok(Credentials::default()),
    }
}

impl Credentials {
    /// Read the `user:password` pair the node writes to its `.cookie` file.
    pub fn from_cookie_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read node cookie {}: {e}", path.display()))
        })?;
        Self::parse_cookie(&content).ok_or_else(|| {
            CoreError::Config(format!(
                "node cookie {} is not a `user:password` line",
                path.display()
            ))
        })
    }

    fn parse_cookie(content: &str) -> Option<Self> {
        let (username, password) = content.lines().next()?.trim().split_once(':')?;
        (!username.is_empty() && !password.is_empty()).then(|| Self::new(username, password))
    }
}
