// HTTP client utilities
use crate::domain::error::CsError;
use crate::infrastructure::config::Config;
use reqwest::Client;
use std::time::Duration;

/// Create the shared HTTP client, honouring the configured timeout and proxy.
pub fn create_client(config: &Config) -> Result<Client, CsError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("cinesearch/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = config.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| CsError::Config(format!("Invalid http_proxy '{}': {}", proxy, e)))?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_with_proxy() {
        let mut config = Config::default();
        config.http_proxy = Some("http://127.0.0.1:8080".to_string());
        assert!(create_client(&config).is_ok());
    }

    #[test]
    fn test_client_rejects_bad_proxy() {
        let mut config = Config::default();
        config.http_proxy = Some("::not a url::".to_string());
        assert!(matches!(create_client(&config), Err(CsError::Config(_))));
    }
}
