use std::convert::Infallible;
use std::net::SocketAddr;

use serde::de::DeserializeOwned;
use uuid::Uuid;
use warp::hyper::body::Bytes;
use warp::reply::{Reply, Response};
use warp::{Filter, Rejection};

use crate::AppState;
use crate::error::ApiError;

pub fn with_state(
    state: &AppState,
) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone + use<> {
    let state = state.clone();
    warp::any().map(move || state.clone())
}

/// Largest JSON body any endpoint accepts.
pub const MAX_JSON_BODY_BYTES: u64 = 16 * 1024;

/// Reads the body as JSON, leaving malformed input for the handler to report.
///
/// Handlers get a `Result` so that validation order (body first, then
/// admin gate or lookups) stays under their control. Oversized bodies are
/// rejected before they are buffered.
pub fn json_body<T>() -> impl Filter<Extract = (Result<T, ApiError>,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_JSON_BODY_BYTES)
        .and(warp::body::bytes())
        .map(|bytes: Bytes| parse_json(&bytes))
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request("No data provided"));
    }

    serde_json::from_slice(bytes)
        .map_err(|err| ApiError::bad_request(format!("Invalid JSON body: {}", err)))
}

/// The caller's address: first `X-Forwarded-For` hop, else the socket peer.
pub fn client_ip() -> impl Filter<Extract = (Option<String>,), Error = Rejection> + Clone {
    warp::header::optional::<String>("x-forwarded-for")
        .and(warp::addr::remote())
        .map(|forwarded: Option<String>, remote: Option<SocketAddr>| {
            forwarded
                .as_deref()
                .and_then(|chain| chain.split(',').next())
                .map(str::trim)
                .filter(|hop| !hop.is_empty())
                .map(str::to_string)
                .or_else(|| remote.map(|addr| addr.ip().to_string()))
        })
}

pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} ID", what)))
}

/// Turns rejections left over after routing into JSON errors.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let error = if err.is_not_found() {
        ApiError::not_found("Not found")
    } else if let Some(invalid) = err.find::<warp::reject::InvalidQuery>() {
        ApiError::bad_request(format!("Invalid query string: {}", invalid))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ApiError::PayloadTooLarge
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        ApiError::LengthRequired
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::MethodNotAllowed
    } else if let Some(missing) = err.find::<warp::reject::MissingHeader>() {
        ApiError::bad_request(missing.to_string())
    } else {
        ApiError::Internal(anyhow::anyhow!("Unhandled rejection: {:?}", err))
    };

    Ok(error.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use typing_types::RegisterPlayerRequest;

    #[test]
    fn test_empty_body_is_missing_data() {
        let result = parse_json::<RegisterPlayerRequest>(b"  ");
        assert!(matches!(result, Err(ApiError::BadRequest(message)) if message == "No data provided"));
    }

    #[test]
    fn test_malformed_body() {
        let result = parse_json::<RegisterPlayerRequest>(b"{nickname");
        assert!(
            matches!(result, Err(ApiError::BadRequest(message)) if message.starts_with("Invalid JSON body"))
        );
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "player").unwrap(), id);
        assert!(
            matches!(parse_id("42", "player"), Err(ApiError::BadRequest(message)) if message == "Invalid player ID")
        );
    }

    #[tokio::test]
    async fn test_client_ip_prefers_forwarded_header() {
        let filter = client_ip();

        let forwarded = warp::test::request()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .remote_addr("127.0.0.1:4000".parse().unwrap())
            .filter(&filter)
            .await
            .unwrap();
        assert_eq!(forwarded.as_deref(), Some("203.0.113.7"));

        let direct = warp::test::request()
            .remote_addr("127.0.0.1:4000".parse().unwrap())
            .filter(&filter)
            .await
            .unwrap();
        assert_eq!(direct.as_deref(), Some("127.0.0.1"));
    }
}
