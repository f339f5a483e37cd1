use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use wirecast_core::{Failure, Reply, intercept};

use crate::context::RequestContext;

/// Successful replies: a converted value (200) or an empty body (204).
pub fn reply_to_response(reply: Reply) -> Response {
    match reply {
        Reply::Value(value) => (StatusCode::OK, Json(value)).into_response(),
        Reply::NoContent => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Failures never produce an error body; the client is redirected instead.
pub fn failure_to_response(ctx: &RequestContext, failure: Failure) -> Response {
    let redirect = intercept(&failure);
    tracing::warn!(
        request_id = %ctx.request_id(),
        status = failure.status(),
        location = redirect.location(),
        detail = failure.detail().unwrap_or(""),
        "request failed; redirecting"
    );
    Redirect::temporary(redirect.location()).into_response()
}
