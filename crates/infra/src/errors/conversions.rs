//! Conversions from external infrastructure errors into domain errors.

use courier_domain::CourierError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CourierError);

impl From<InfraError> for CourierError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

trait IntoCourierError {
    fn into_courier(self) -> CourierError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CourierError */
/* -------------------------------------------------------------------------- */

impl IntoCourierError for HttpError {
    fn into_courier(self) -> CourierError {
        if self.is_builder() {
            return CourierError::MalformedTarget(format!("invalid HTTP request: {self}"));
        }

        if self.is_timeout() {
            return CourierError::Transport("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return CourierError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_body() || self.is_decode() {
            return CourierError::Transport(format!("failed to read HTTP response body: {self}"));
        }

        CourierError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_courier())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → CourierError */
/* -------------------------------------------------------------------------- */

impl IntoCourierError for UrlError {
    fn into_courier(self) -> CourierError {
        match self {
            UrlError::EmptyHost => CourierError::MalformedTarget("target host is empty".into()),
            UrlError::InvalidPort => CourierError::MalformedTarget("target port is invalid".into()),
            other => CourierError::MalformedTarget(format!("invalid request URL: {other}")),
        }
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_courier())
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
    fn url_empty_host_maps_to_malformed_target() {
        let err = url::Url::parse("https://").unwrap_err();
        let mapped: CourierError = InfraError::from(err).into();
        assert!(matches!(mapped, CourierError::MalformedTarget(_)));
    }

    #[tokio::test]
    async fn connection_refused_maps_to_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: CourierError = InfraError::from(error).into();
        assert!(matches!(mapped, CourierError::Transport(_)), "got {mapped:?}");
    }
}
