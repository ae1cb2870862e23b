use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Session token lifetime.
    pub ttl_minutes: i64,
}

/// How write requests are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Writes mutate the in-memory store.
    Dynamic,
    /// Writes are logged and dropped, mirroring the pre-baked static site.
    Static,
}

impl std::str::FromStr for CatalogMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamic" => Ok(Self::Dynamic),
            "static" => Ok(Self::Static),
            other => anyhow::bail!("unknown CATALOG_MODE {other:?}, expected dynamic or static"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub mode: CatalogMode,
    pub seed_sample_data: bool,
    /// Served at `/data` and `/games`; `export` writes into `<public_dir>/data`.
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "playhub".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "playhub-players".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let mode = match std::env::var("CATALOG_MODE") {
            Ok(v) => v.parse()?,
            Err(_) => CatalogMode::Dynamic,
        };
        let seed_sample_data = std::env::var("SEED_SAMPLE_DATA")
            .map(|v| !matches!(v.trim(), "0" | "false" | "no"))
            .unwrap_or(true);
        let public_dir = std::env::var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));
        Ok(Self {
            jwt,
            mode,
            seed_sample_data,
            public_dir,
        })
    }

    pub fn is_static(&self) -> bool {
        self.mode == CatalogMode::Static
    }

    pub fn data_dir(&self) -> PathBuf {
        self.public_dir.join("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_mode_parses_case_insensitively() {
        assert_eq!("Static".parse::<CatalogMode>().unwrap(), CatalogMode::Static);
        assert_eq!(" dynamic ".parse::<CatalogMode>().unwrap(), CatalogMode::Dynamic);
        assert!("readonly".parse::<CatalogMode>().is_err());
    }
}
