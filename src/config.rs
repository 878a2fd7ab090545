use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpoonacularConfig {
    /// Missing key is not fatal at startup; recipe routes report it per request.
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub spoonacular: SpoonacularConfig,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: env_or("JWT_ISSUER", "flavor-finder"),
            audience: env_or("JWT_AUDIENCE", "flavor-finder-users"),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60),
        };
        let spoonacular = SpoonacularConfig {
            api_key: std::env::var("SPOONACULAR_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            base_url: env_or("SPOONACULAR_BASE_URL", "https://api.spoonacular.com"),
        };
        Ok(Self {
            database_url,
            database_max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10),
            jwt,
            spoonacular,
            host: env_or("APP_HOST", "0.0.0.0"),
            port: env_parse("PORT", 3000),
            static_dir: env_or("STATIC_DIR", "public"),
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_combines_host_and_port() {
        let cfg = AppConfig {
            database_url: "postgres://localhost/test".into(),
            database_max_connections: 1,
            jwt: JwtConfig {
                secret: "s".into(),
                issuer: "i".into(),
                audience: "a".into(),
                ttl_minutes: 60,
            },
            spoonacular: SpoonacularConfig {
                api_key: None,
                base_url: "http://localhost".into(),
            },
            host: "127.0.0.1".into(),
            port: 3000,
            static_dir: "public".into(),
        };
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        std::env::set_var("FLAVOR_TEST_PORT_GARBAGE", "not-a-number");
        assert_eq!(env_parse::<u16>("FLAVOR_TEST_PORT_GARBAGE", 3000), 3000);
        std::env::remove_var("FLAVOR_TEST_PORT_GARBAGE");
    }
}
