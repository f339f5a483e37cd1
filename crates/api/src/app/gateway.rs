use std::sync::Arc;

use axum::{
    extract::{Extension, RawQuery, State},
    http::{Method, Uri},
    response::Response,
};

use wirecast_core::{Dispatcher, Failure, RequestInput};

use crate::app::errors;
use crate::context::RequestContext;

/// Feed a request through the dispatcher and map the outcome to HTTP.
pub async fn handle(
    State(dispatcher): State<Arc<Dispatcher>>,
    Extension(ctx): Extension<RequestContext>,
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Response {
    let input = match RequestInput::parse_query(query.as_deref().unwrap_or_default()) {
        Ok(input) => input,
        Err(err) => return errors::failure_to_response(&ctx, Failure::from(err)),
    };

    match dispatcher.dispatch(&method, uri.path(), input) {
        Ok(reply) => errors::reply_to_response(reply),
        Err(failure) => errors::failure_to_response(&ctx, failure),
    }
}
