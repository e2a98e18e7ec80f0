//! Conversions from external infrastructure errors into domain errors.

use konexus_domain::KonexusError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub KonexusError);

impl From<InfraError> for KonexusError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<KonexusError> for InfraError {
    fn from(value: KonexusError) -> Self {
        InfraError(value)
    }
}

trait IntoKonexusError {
    fn into_konexus(self) -> KonexusError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → KonexusError */
/* -------------------------------------------------------------------------- */

impl IntoKonexusError for HttpError {
    fn into_konexus(self) -> KonexusError {
        if self.is_timeout() {
            return KonexusError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return KonexusError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return KonexusError::Config(format!("Invalid HTTP request: {self}"));
        }

        KonexusError::Network(self.to_string())
    }
}

/// Domain error for a non-success HTTP status.
pub(crate) fn status_error(code: u16, message: String) -> KonexusError {
    match code {
        401 | 403 => KonexusError::Auth(message),
        404 => KonexusError::NotFound(message),
        _ => KonexusError::Api { status: code, message },
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_konexus())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::Client;

    use super::*;

    #[test]
    fn status_codes_map_to_domain_errors() {
        assert!(matches!(status_error(401, "HTTP 401".into()), KonexusError::Auth(ref m) if m == "HTTP 401"));
        assert!(matches!(status_error(403, String::new()), KonexusError::Auth(_)));
        assert!(matches!(status_error(404, String::new()), KonexusError::NotFound(_)));
        assert_eq!(status_error(500, String::new()).status(), Some(500));
    }

    #[test]
    fn invalid_request_maps_to_config_error() {
        let error = Client::new().get("not a url").build().unwrap_err();

        let mapped: KonexusError = InfraError::from(error).into();
        assert!(matches!(mapped, KonexusError::Config(_)), "got {mapped:?}");
    }

    #[tokio::test]
    async fn refused_connection_maps_to_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: KonexusError = InfraError::from(error).into();
        assert!(matches!(mapped, KonexusError::Network(_)), "got {mapped:?}");
    }
}
