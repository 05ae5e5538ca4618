//! Unwrapping of response envelopes and normalization of HTTP failures.

use crate::error::{GENERIC_HTTP_ERROR, ProviderError};
use models::envelope::{ItemResponse, ListResponse};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Converts a non-2xx response body into [`ProviderError::Http`]
///
/// The message is taken from the body's `message` field when the body is
/// JSON and the field is a non-empty string, and is `"Request failed"`
/// otherwise. This never fails.
pub fn build_http_error(status: StatusCode, body: &[u8]) -> ProviderError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|payload| payload.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_HTTP_ERROR.to_string());

    ProviderError::Http {
        status_code: status.as_u16(),
        message,
    }
}

/// Reads the body of a response, turning non-success statuses into errors
pub async fn read_body(response: Response) -> Result<Vec<u8>, ProviderError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        Ok(body.to_vec())
    } else {
        Err(build_http_error(status, &body))
    }
}

/// Records of a list envelope, empty when `data` is missing
pub fn map_list_response(body: &[u8]) -> Result<Vec<Value>, ProviderError> {
    let payload: ListResponse<Value> = serde_json::from_slice(body)?;
    Ok(payload.into_records())
}

/// `pagination.total` of a list envelope, else the number of records, else 0
pub fn get_total_count(body: &[u8]) -> Result<u64, ProviderError> {
    let payload: ListResponse<Value> = serde_json::from_slice(body)?;
    Ok(payload.total())
}

/// The single record of a `{ data }` envelope, `None` when it is missing or null
pub fn map_item_response(body: &[u8]) -> Result<Option<Value>, ProviderError> {
    let payload: ItemResponse<Value> = serde_json::from_slice(body)?;
    Ok(payload.data.filter(|data| !data.is_null()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_envelope() {
        let body = br#"{"data":[{"id":1}],"pagination":{"total":5}}"#;

        assert_eq!(map_list_response(body).unwrap(), vec![json!({ "id": 1 })]);
        assert_eq!(get_total_count(body).unwrap(), 5);
    }

    #[test]
    fn test_total_without_pagination() {
        let body = br#"{"data":[{"id":1},{"id":2}]}"#;
        assert_eq!(get_total_count(body).unwrap(), 2);
    }

    #[test]
    fn test_list_without_data() {
        let body = br#"{"pagination":{"total":0,"page":1,"limit":10,"totalPages":0}}"#;

        assert!(map_list_response(body).unwrap().is_empty());
        assert_eq!(get_total_count(body).unwrap(), 0);
    }

    #[test]
    fn test_malformed_list_is_a_decode_error() {
        assert!(matches!(
            map_list_response(b"<html>"),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn test_item_envelope() {
        assert_eq!(
            map_item_response(br#"{"data":{"id":3,"name":"Chemistry"}}"#).unwrap(),
            Some(json!({ "id": 3, "name": "Chemistry" }))
        );
        assert_eq!(map_item_response(br#"{}"#).unwrap(), None);
        assert_eq!(map_item_response(br#"{"data":null}"#).unwrap(), None);
    }

    #[test]
    fn test_http_error_with_message() {
        let error = build_http_error(StatusCode::NOT_FOUND, br#"{"message":"Not found"}"#);

        assert!(matches!(
            error,
            ProviderError::Http { status_code: 404, ref message } if message == "Not found"
        ));
    }

    #[test]
    fn test_http_error_falls_back_to_generic_message() {
        let bodies: [&[u8]; 5] = [
            b"Internal Server Error",
            br#"{"error":"boom"}"#,
            br#"{"message":""}"#,
            br#"{"message":42}"#,
            b"",
        ];

        for body in bodies {
            let error = build_http_error(StatusCode::INTERNAL_SERVER_ERROR, body);

            assert!(matches!(
                error,
                ProviderError::Http { status_code: 500, ref message } if message == GENERIC_HTTP_ERROR
            ));
        }
    }
}
