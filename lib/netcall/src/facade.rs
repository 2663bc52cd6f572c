//! Best-effort and safe entry points.
//!
//! Both send a [`Descriptor`] through a [`Networking`] provider and decode the
//! response body. The best-effort pair collapses every failure to `None`; the
//! safe pair reports exactly one [`NetworkError`].

use crate::executor::execute;
use crate::{Decoder, Descriptor, Json, NetworkError, Networking, Transport};

/// Send `descriptor` and decode the body into `T`, best-effort.
///
/// Returns `Some` only for a 2xx answer with a body that decodes into `T`.
pub async fn request<T, C>(networking: &Networking<C>, descriptor: Descriptor<C>) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    C: Transport,
{
    request_with(networking, descriptor, Json::new()).await
}

/// Send `descriptor` and decode the body with `decoder`, best-effort.
pub async fn request_with<T, C, D>(
    networking: &Networking<C>,
    descriptor: Descriptor<C>,
    decoder: D,
) -> Option<T>
where
    C: Transport,
    D: Decoder<T>,
{
    let envelope = execute(networking, descriptor).await.ok()?;
    if !envelope.success {
        return None;
    }
    decoder.decode(envelope.raw_body?).ok()
}

/// Send `descriptor` and decode the body into `T`, classifying failures.
///
/// # Errors
///
/// See [`safe_request_with`].
pub async fn safe_request<T, C>(
    networking: &Networking<C>,
    descriptor: Descriptor<C>,
) -> Result<T, NetworkError>
where
    T: serde::de::DeserializeOwned,
    C: Transport,
{
    safe_request_with(networking, descriptor, Json::new()).await
}

/// Send `descriptor` and decode the body with `decoder`, classifying failures.
///
/// # Errors
///
/// Checked in this order:
/// - a transport or address fault is classified with [`NetworkError::classify`];
/// - a non-2xx answer gives [`NetworkError::StatusCode`];
/// - a 2xx answer without body gives [`NetworkError::Api`];
/// - a body the decoder rejects gives [`NetworkError::Decoding`].
pub async fn safe_request_with<T, C, D>(
    networking: &Networking<C>,
    descriptor: Descriptor<C>,
    decoder: D,
) -> Result<T, NetworkError>
where
    C: Transport,
    D: Decoder<T>,
{
    let envelope = execute(networking, descriptor).await?;

    if !envelope.success {
        return Err(NetworkError::from_status(
            envelope.status,
            &envelope.status_message,
        ));
    }

    let Some(raw_body) = envelope.raw_body else {
        return Err(NetworkError::missing_body(&envelope.status_message));
    };

    decoder
        .decode(raw_body)
        .map_err(|err| NetworkError::Decoding(err.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::testing::FakeTransport;
    use crate::{Error, Method};

    fn networking(transport: FakeTransport) -> Networking<FakeTransport> {
        Networking::with_base_url(transport, "https://example.test/").expect("base url")
    }

    fn get(networking: &Networking<FakeTransport>) -> Descriptor<FakeTransport> {
        networking.request("posts/").build().expect("descriptor")
    }

    #[tokio::test]
    async fn success_decodes_the_same_value_in_both_modes() {
        let networking = networking(FakeTransport::replying(200, r#"{"key":"value"}"#));
        let expected = HashMap::from([("key".to_string(), "value".to_string())]);

        let best_effort: Option<HashMap<String, String>> =
            request(&networking, get(&networking)).await;
        let safe: Result<HashMap<String, String>, NetworkError> =
            safe_request(&networking, get(&networking)).await;

        assert_eq!(best_effort, Some(expected.clone()));
        assert_eq!(safe, Ok(expected));
    }

    #[tokio::test]
    async fn error_statuses_use_the_reason_table() {
        let cases = [
            (401, "Unauthorized".to_string()),
            (404, "Not Found".to_string()),
            (500, "Internal Server Error".to_string()),
            (503, "Unknown Error: Service Unavailable".to_string()),
            (418, "Unknown Error: I'm a teapot".to_string()),
        ];

        for (code, message) in cases {
            let networking = networking(FakeTransport::replying(code, r#"{"key":"value"}"#));

            let best_effort: Option<serde_json::Value> =
                request(&networking, get(&networking)).await;
            assert_eq!(best_effort, None, "status {code}");

            let err = safe_request::<serde_json::Value, _>(&networking, get(&networking))
                .await
                .expect_err("should fail");
            assert_eq!(err, NetworkError::StatusCode { code, message });
        }
    }

    #[tokio::test]
    async fn missing_body_is_an_api_error() {
        for body in ["", "null"] {
            let networking = networking(FakeTransport::replying(200, body));

            let best_effort: Option<serde_json::Value> =
                request(&networking, get(&networking)).await;
            assert_eq!(best_effort, None);

            let err = safe_request::<serde_json::Value, _>(&networking, get(&networking))
                .await
                .expect_err("should fail");
            assert_eq!(
                err,
                NetworkError::Api("Error: Body expected but found null instead OK".to_string())
            );
        }
    }

    #[tokio::test]
    async fn shape_mismatch_is_a_decoding_error() {
        let networking = networking(FakeTransport::replying(200, r#"{"key":"value"}"#));

        let best_effort: Option<Vec<String>> = request(&networking, get(&networking)).await;
        assert_eq!(best_effort, None);

        let err = safe_request::<Vec<String>, _>(&networking, get(&networking))
            .await
            .expect_err("should fail");
        assert!(matches!(err, NetworkError::Decoding(_)), "{err:?}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decoding_error() {
        let networking = networking(FakeTransport::replying(200, "{not json"));

        let err = safe_request::<serde_json::Value, _>(&networking, get(&networking))
            .await
            .expect_err("should fail");
        assert!(matches!(err, NetworkError::Decoding(_)), "{err:?}");
    }

    #[tokio::test]
    async fn transport_faults_are_api_errors() {
        for fault in [
            (|| Error::Timeout) as fn() -> Error,
            || Error::connection("connection refused"),
            || Error::tls("bad certificate"),
        ] {
            let networking = networking(FakeTransport::failing(fault));

            let best_effort: Option<serde_json::Value> =
                request(&networking, get(&networking)).await;
            assert_eq!(best_effort, None);

            let err = safe_request::<serde_json::Value, _>(&networking, get(&networking))
                .await
                .expect_err("should fail");
            assert!(matches!(err, NetworkError::Api(_)), "{err:?}");
        }
    }

    #[tokio::test]
    async fn custom_decoder_is_used() {
        let networking = networking(FakeTransport::replying(200, r#"{"count":3}"#));

        let count = safe_request_with(&networking, get(&networking), |value: serde_json::Value| {
            Ok::<_, Error>(value["count"].as_u64().unwrap_or_default())
        })
        .await;
        assert_eq!(count, Ok(3));

        let rejected = safe_request_with(&networking, get(&networking), |_: serde_json::Value| {
            Err::<u64, _>(Error::json_deserialization("count", "rejected"))
        })
        .await;
        assert!(matches!(rejected, Err(NetworkError::Decoding(_))));
    }

    #[tokio::test]
    async fn post_with_header_override_echoes_body() {
        let networking = networking(FakeTransport::echoing());
        let body = HashMap::from([("title", "foo"), ("body", "bar"), ("userId", "1")]);

        let descriptor = networking
            .request("posts/")
            .with_method(Method::Post)
            .with_headers([("Content-type", "application/json; charset=UTF-8")])
            .with_body(&body)
            .build()
            .expect("descriptor");
        let echoed: HashMap<String, String> = safe_request(&networking, descriptor)
            .await
            .expect("echoed body");

        assert_eq!(echoed.get("title").map(String::as_str), Some("foo"));
        assert_eq!(echoed.get("body").map(String::as_str), Some("bar"));
        assert_eq!(echoed.get("userId").map(String::as_str), Some("1"));

        let sent = networking.transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].header("content-type"),
            Some("application/json; charset=UTF-8")
        );
    }
}
