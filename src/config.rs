//! Client configuration.
//!
//! A [`ClientConfig`] is either built in code with [`ClientConfig::new`] and
//! the `with_*` methods, or loaded from a TOML file:
//!
//! ```toml
//! server = "irc.libera.chat"
//! port = 6667
//! nickname = "slircbot"
//! realname = "slirc example bot"
//! channels = ["#slirc"]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

fn default_port() -> u16 {
    6667
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_idle_timeout_secs() -> u64 {
    300
}

fn default_max_line_len() -> usize {
    512
}

/// Settings for one client connection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Server host name or address.
    pub server: String,
    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Nickname to register with.
    pub nickname: String,
    /// Username for USER; defaults to the nickname.
    #[serde(default)]
    pub username: Option<String>,
    /// Real name for USER; defaults to the nickname.
    #[serde(default)]
    pub realname: Option<String>,
    /// Any encoding label understood by `encoding_rs`.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Seconds without inbound data before an idle timeout is reported.
    /// Zero disables the timeout.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// Maximum inbound line length in bytes.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Channels joined once registration completes.
    #[serde(default)]
    pub channels: Vec<String>,
}

impl ClientConfig {
    /// Configuration with defaults for everything but server and nickname.
    pub fn new(server: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port: default_port(),
            nickname: nickname.into(),
            username: None,
            realname: None,
            encoding: default_encoding(),
            idle_timeout_secs: default_idle_timeout_secs(),
            max_line_len: default_max_line_len(),
            channels: Vec::new(),
        }
    }

    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        content.parse()
    }

    /// Set the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the real name.
    #[must_use]
    pub fn with_realname(mut self, realname: impl Into<String>) -> Self {
        self.realname = Some(realname.into());
        self
    }

    /// Set the character encoding label.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set the idle timeout in seconds (0 disables it).
    #[must_use]
    pub fn with_idle_timeout_secs(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    /// Add a channel to join after registration.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channels.push(channel.into());
        self
    }

    /// Username sent in USER.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nickname)
    }

    /// Real name sent in USER.
    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or(&self.nickname)
    }

    /// `host:port` string suitable for resolving.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Idle timeout, or `None` when disabled.
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    /// Check field values that the schema alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "server",
                reason: "must not be empty".into(),
            });
        }
        if self.nickname.is_empty() || self.nickname.contains([' ', '\r', '\n']) {
            return Err(ConfigError::Invalid {
                field: "nickname",
                reason: format!("{:?} is not a usable nickname", self.nickname),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                field: "port",
                reason: "must be non-zero".into(),
            });
        }
        if encoding::Encoding::for_label(self.encoding.as_bytes()).is_none() {
            return Err(ConfigError::Invalid {
                field: "encoding",
                reason: format!("unknown encoding label {:?}", self.encoding),
            });
        }
        // Room for at least the command, a short argument, and CRLF.
        if self.max_line_len < 16 {
            return Err(ConfigError::Invalid {
                field: "max_line_len",
                reason: format!("{} is too small", self.max_line_len),
            });
        }
        Ok(())
    }
}

impl std::str::FromStr for ClientConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ClientConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
