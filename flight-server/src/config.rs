//! Server configuration from environment.

use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use crate::aviation::AviationConfig;
use crate::reference::OpenFlightsConfig;

/// Process-level settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub static_assets: StaticConfig,
    pub preload_on_startup: bool,
    pub openflights: OpenFlightsConfig,
    pub aviation: AviationConfig,
}

impl ServerConfig {
    /// Read configuration from environment variables, with defaults.
    ///
    /// A `.env` file in the working directory fills in anything the process
    /// environment leaves unset.
    pub fn from_env() -> Self {
        Self::from_env_and_file(Path::new(".env"))
    }

    /// Like [`from_env`](Self::from_env) with an explicit dotenv path.
    /// A missing or unreadable file is ignored.
    pub fn from_env_and_file(path: &Path) -> Self {
        let file: HashMap<String, String> = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter.filter_map(Result::ok).collect(),
            Err(_) => HashMap::new(),
        };
        Self::from_lookup(|key| env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut openflights = OpenFlightsConfig::default();
        if let Some(url) = get("OPENFLIGHTS_BASE_URL") {
            openflights = openflights.with_base_url(url);
        }

        let mut aviation = AviationConfig::new(get("AVIATIONSTACK_API_KEY").unwrap_or_default());
        if let Some(url) = get("AVIATIONSTACK_BASE_URL") {
            aviation = aviation.with_base_url(url);
        }

        Self {
            bind_addr: get("BIND_ADDR")
                .and_then(|s| s.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: get("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000),
            static_assets: StaticConfig::from_lookup(&get),
            preload_on_startup: get("PRELOAD_ON_STARTUP")
                .is_some_and(|s| matches!(s.as_str(), "1" | "true" | "yes")),
            openflights,
            aviation,
        }
    }

    /// Socket address to listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Where front-end assets live and how long browsers may cache them.
///
/// `APP_ENV=production` switches the defaults to `dist` with a one-day
/// max-age; `STATIC_DIR` and `STATIC_MAX_AGE_SECS` override either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticConfig {
    pub dir: String,
    pub max_age_secs: u64,
}

const PRODUCTION_MAX_AGE_SECS: u64 = 24 * 60 * 60;

impl StaticConfig {
    fn from_lookup(get: &impl Fn(&str) -> Option<String>) -> Self {
        let production = get("APP_ENV").is_some_and(|s| s == "production");
        let (dir, max_age_secs) = if production {
            ("dist", PRODUCTION_MAX_AGE_SECS)
        } else {
            ("public", 0)
        };

        Self {
            dir: get("STATIC_DIR").unwrap_or_else(|| dir.to_string()),
            max_age_secs: get("STATIC_MAX_AGE_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(max_age_secs),
        }
    }

    /// `Cache-Control` value for static responses.
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.max_age_secs)
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            dir: "public".to_string(),
            max_age_secs: 0,
        }
    }
}
