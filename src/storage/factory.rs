use std::sync::Arc;

use super::adapter::DriveAdapter;
use super::config::DriveConfig;
use super::error::DriveResult;
use super::provider::FileSystemAdapter;
use super::session::{AccessToken, SessionProvider, StaticTokenProvider};
use super::transport::ReqwestTransport;

/// Factory for creating drive adapters
pub struct DriveAdapterFactory;

impl DriveAdapterFactory {
    /// Create an adapter from a configuration and a session provider.
    ///
    /// The raw HTTP transport is a reqwest client built from the connection
    /// options in `config`.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * An endpoint option is not a valid base URL
    /// * The HTTP client cannot be built
    pub fn from_config(
        config: DriveConfig,
        session: Arc<dyn SessionProvider>,
    ) -> DriveResult<Arc<dyn FileSystemAdapter>> {
        config.validate()?;
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Arc::new(DriveAdapter::new(
            config,
            session,
            Arc::new(transport),
        )))
    }

    /// Create an adapter that authenticates every call with a fixed token.
    ///
    /// One reqwest client is shared by the metadata API and the media transport.
    pub fn with_token(
        config: DriveConfig,
        token: AccessToken,
    ) -> DriveResult<Arc<dyn FileSystemAdapter>> {
        config.validate()?;
        let transport = ReqwestTransport::from_config(&config)?;
        let session = StaticTokenProvider::new(token, transport.client().clone(), &config);
        Ok(Arc::new(DriveAdapter::new(
            config,
            Arc::new(session),
            Arc::new(transport),
        )))
    }
}
