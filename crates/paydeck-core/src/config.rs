//! Client configuration handed to [`Backoffice::new`](crate::Backoffice::new).

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification policy (mirrored by `paydeck_api::TlsMode`).
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// Use the system certificate store.
    #[default]
    SystemDefaults,
    /// Trust a custom CA certificate (internal staging CA).
    CustomCa(PathBuf),
    /// Accept any certificate. Only for throwaway local stacks.
    DangerAcceptInvalid,
}

/// Everything needed to talk to one back-office environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the back office (the `/api/admin/` prefix is appended
    /// by the client).
    pub base_url: Url,
    /// Bearer token for the operator account.
    pub token: SecretString,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ClientConfig {
    pub(crate) fn transport(&self) -> paydeck_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => paydeck_api::TlsMode::System,
            TlsVerification::CustomCa(path) => paydeck_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => paydeck_api::TlsMode::DangerAcceptInvalid,
        };
        paydeck_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
