use gemini_proxy::config::{GeminiSettings, ProxyConfig};
use gemini_proxy::Application;
use secrecy::Secret;
use service_core::config::Config;
use std::net::{IpAddr, Ipv4Addr};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-1.0-pro";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the proxy on a random port, pointed at `upstream_base_url`.
    pub async fn spawn(api_key: Option<&str>, upstream_base_url: &str) -> Self {
        let config = ProxyConfig {
            common: Config {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0,
            },
            gemini: GeminiSettings {
                api_key: api_key.map(|k| Secret::new(k.to_string())),
                api_base_url: upstream_base_url.to_string(),
                model: TEST_MODEL.to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        }
    }
}
