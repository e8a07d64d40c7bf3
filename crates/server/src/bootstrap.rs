use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;
use tracing::info;

use voicecart_core::config::{AppConfig, ConfigError, LoadOptions};
use voicecart_core::Catalog;
use voicecart_store::MemoryStore;
use voicecart_telegram::{BotApi, UpdateHandler};

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub store: Arc<MemoryStore>,
    pub bot: BotApi,
    pub handler: Arc<UpdateHandler<MemoryStore>>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = Arc::new(Catalog::demo());
    let store = Arc::new(MemoryStore::new());
    let bot = BotApi::new(
        config.telegram.api_base_url.clone(),
        clone_secret(&config.telegram.bot_token),
    );
    let handler = Arc::new(UpdateHandler::new(catalog.clone(), store.clone()));

    info!(
        event_name = "system.bootstrap.ready",
        correlation_id = "bootstrap",
        catalog_size = catalog.products().len(),
        "application components wired"
    );

    Ok(Application { config, catalog, store, bot, handler })
}

fn clone_secret(secret: &SecretString) -> SecretString {
    use secrecy::ExposeSecret;
    secret.expose_secret().to_owned().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicecart_core::config::ConfigOverrides;

    #[test]
    fn bootstrap_fails_fast_without_a_bot_token() {
        let result = bootstrap(LoadOptions {
            config_path: Some("/nonexistent/voicecart.toml".into()),
            require_file: false,
            overrides: ConfigOverrides::default(),
        });
        // Default config carries no token; validation must reject it
        // unless the environment supplies one.
        if std::env::var("TELEGRAM_BOT_TOKEN").is_err()
            && std::env::var("VOICECART_TELEGRAM_BOT_TOKEN").is_err()
        {
            let message = result.err().expect("bootstrap should fail").to_string();
            assert!(message.contains("telegram.bot_token"));
        }
    }

    #[tokio::test]
    async fn bootstrap_succeeds_with_overrides() {
        use voicecart_store::{SessionId, SessionStore};

        let app = bootstrap(LoadOptions {
            config_path: Some("/nonexistent/voicecart.toml".into()),
            require_file: false,
            overrides: ConfigOverrides {
                bot_token: Some("123456:test-secret".to_owned()),
                ..ConfigOverrides::default()
            },
        })
        .expect("bootstrap with overrides");

        assert!(!app.catalog.is_empty());
        assert_eq!(app.config.server.port, 8080);
        // Fresh store: no session state yet.
        let cart = app.store.cart(&SessionId::new("42")).await.expect("read cart");
        assert!(cart.is_empty());
    }
}
