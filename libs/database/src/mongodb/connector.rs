use async_trait::async_trait;
use mongodb::{
    Client, Database,
    bson::doc,
    error::{Error, ErrorKind},
    options::{ClientOptions, ServerApi, ServerApiVersion},
};
use tracing::{debug, instrument};

use super::MongoConfig;
use crate::lifecycle::{ConnectFailure, Connector, FailureKind};

/// One-shot MongoDB connector used by the connection manager.
///
/// Each call builds a fresh client with the stable server API (v1, strict)
/// and verifies it with a `ping` against `admin`, so a returned [`Database`]
/// is known to be reachable.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    config: MongoConfig,
}

impl MongoConnector {
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    async fn client_options(&self) -> Result<ClientOptions, Error> {
        let mut options = ClientOptions::parse(&self.config.url).await?;

        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.connect_timeout = Some(self.config.connect_timeout());
        options.server_selection_timeout = Some(self.config.server_selection_timeout());

        if let Some(ref app_name) = self.config.app_name {
            options.app_name = Some(app_name.clone());
        }

        Ok(options)
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = Database;

    #[instrument(skip(self), fields(url = %self.config.redacted_url(), database = %self.config.database))]
    async fn connect(&self) -> Result<Database, ConnectFailure> {
        let options = self.client_options().await.map_err(|e| classify_error(&e))?;
        let client = Client::with_options(options).map_err(|e| classify_error(&e))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| classify_error(&e))?;

        debug!("Ping acknowledged");
        Ok(client.database(&self.config.database))
    }
}

/// Map a driver error onto a [`ConnectFailure`].
///
/// Structured error kinds win; everything else falls back to the message text,
/// which is where TLS rejections and selection timeouts show up.
pub fn classify_error(err: &Error) -> ConnectFailure {
    let message = err.to_string();

    let kind = match err.kind.as_ref() {
        ErrorKind::Authentication { .. } => FailureKind::AuthenticationFailure,
        ErrorKind::DnsResolve { .. } => FailureKind::NetworkResolutionFailure,
        ErrorKind::InvalidTlsConfig { .. } => FailureKind::TlsHandshakeFailure,
        _ => FailureKind::classify(&message),
    };

    ConnectFailure::new(kind, message)
}
