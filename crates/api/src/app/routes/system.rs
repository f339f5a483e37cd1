use wirecast_core::{Failure, GatewayResult, Reply, RequestInput, Value};

pub fn welcome() -> Value {
    Value::from("Welcome to API Development")
}

/// Error display target of the failure redirects (`/error/{status}`).
///
/// A status that is not a three-digit HTTP code is treated as an unknown path.
pub fn error_display(input: &RequestInput) -> GatewayResult<Reply> {
    let status = input
        .get("status")
        .and_then(|raw| raw.parse::<u16>().ok())
        .filter(|s| (100..=999).contains(s))
        .ok_or(Failure::NotFound)?;

    Ok(Reply::Value(Value::from(format!(
        "Request failed with status {status}"
    ))))
}
