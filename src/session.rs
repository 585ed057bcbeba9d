//! Session lifecycle
//!
//! A `Session` owns the pooled transport, the credential and the rate
//! state for one API key. It is `Send + Sync`, so one session can serve
//! concurrent calls; independent sessions share nothing.
//!
//! Dropping a session releases its connection pool, so the pool is freed on
//! every exit path. [`Session::with_session`] brackets a block of calls with
//! open and close.

use crate::auth::{Authenticator, Credential};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{Dispatcher, HttpTransport, RateState, Transport};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::info;

/// Open a session with the default HTTP transport
pub fn open_session(credential: Credential, config: ClientConfig) -> Result<Session> {
    Session::open(credential, config)
}

/// Connected client for one API key
#[derive(Debug)]
pub struct Session {
    dispatcher: Dispatcher,
    config: ClientConfig,
}

impl Session {
    /// Validate the config and build the pooled HTTP transport
    pub fn open(credential: Credential, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::open_with_transport(credential, config, Arc::new(transport))
    }

    /// Open a session over a caller-supplied transport
    pub fn open_with_transport(
        credential: Credential,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;
        let authenticator = Authenticator::new(credential, config.auth.clone());
        let dispatcher = Dispatcher::new(transport, authenticator, &config);

        info!("Opened session against {}", config.base_url);
        Ok(Self { dispatcher, config })
    }

    /// Run `f` with an open session and close it afterwards, whatever `f` returns
    ///
    /// ```rust,ignore
    /// let sites = Session::with_session(credential, config, |session| {
    ///     Box::pin(async move { session.list_sites().try_collect::<Vec<_>>().await })
    /// })
    /// .await?;
    /// ```
    pub async fn with_session<T, F>(credential: Credential, config: ClientConfig, f: F) -> Result<T>
    where
        F: for<'s> FnOnce(&'s Session) -> BoxFuture<'s, Result<T>>,
    {
        let session = Self::open(credential, config)?;
        let result = f(&session).await;
        session.close();
        result
    }

    /// Release the connection pool
    pub fn close(self) {
        drop(self);
    }

    /// Configuration in effect
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the shared rate state
    pub fn rate_state(&self) -> RateState {
        self.dispatcher.rate_state()
    }

    pub(crate) fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!("Closed session against {}", self.config.base_url);
    }
}
