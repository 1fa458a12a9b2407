use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Sent by the kiosk front end to tell terminals apart in shared logs.
pub const KIOSK_ID_HEADER: &str = "x-kiosk-id";

#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Scopes every log line of a request under its request id and the
/// terminal that sent it. The request id is echoed back to the kiosk.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = header_text(request.headers(), REQUEST_ID_HEADER)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let kiosk_id = header_text(request.headers(), KIOSK_ID_HEADER);

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        kiosk_id = kiosk_id.as_deref().unwrap_or("unknown"),
        method = %request.method(),
        path = %request.uri().path()
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
