use std::net::SocketAddr;

pub const PRODUCTS_API_ENV: &str = "PRODUCTS_API";
pub const INVENTORY_API_ENV: &str = "INVENTORY_API";
pub const BIND_ENV: &str = "STOREFRONT_BIND";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Backend locations and listen address, read once at start.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the product service; empty when unset.
    pub products_api: String,
    /// Base URL of the inventory service; empty when unset.
    pub inventory_api: String,
    pub bind_addr: SocketAddr,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset backend URLs become
    /// empty strings, so requests to them fail rather than the server.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|e| format!("Invalid {BIND_ENV} '{bind}': {e}"))?;
        Ok(Self {
            products_api: lookup(PRODUCTS_API_ENV).unwrap_or_default(),
            inventory_api: lookup(INVENTORY_API_ENV).unwrap_or_default(),
            bind_addr,
        })
    }

    pub fn products_url(&self, suffix: &str) -> String {
        join(&self.products_api, suffix)
    }

    pub fn inventory_url(&self, suffix: &str) -> String {
        join(&self.inventory_api, suffix)
    }
}

fn join(base: &str, suffix: &str) -> String {
    let base = base.trim_end_matches('/');
    if suffix.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{}", suffix.trim_start_matches('/'))
    }
}
