//! Request dispatch: resolve one endpoint, run it once, hand back its reply.

use http::Method;

use crate::error::GatewayResult;
use crate::input::RequestInput;
use crate::registry::Registry;
use crate::value::Value;

/// Outcome of a successful request.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A value to be converted to its wire form.
    Value(Value),
    /// Nothing to convert; answered with an empty body.
    NoContent,
}

/// Conversion of handler return types into a [`Reply`].
pub trait IntoReply {
    fn into_reply(self) -> Reply;
}

impl IntoReply for Reply {
    fn into_reply(self) -> Reply {
        self
    }
}

impl IntoReply for Value {
    fn into_reply(self) -> Reply {
        Reply::Value(self)
    }
}

/// Routes requests through an immutable [`Registry`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Handle one request. Path parameters are appended to `input`.
    pub fn dispatch(&self, method: &Method, path: &str, mut input: RequestInput) -> GatewayResult<Reply> {
        let resolved = self.registry.resolve(method, path)?;
        if let (Some(name), Some(value)) = (resolved.endpoint.param_name(), resolved.param) {
            input.push(name, value);
        }

        let reply = resolved.endpoint.call(&input)?;
        let kind = match &reply {
            Reply::Value(v) => v.kind(),
            Reply::NoContent => "no_content",
        };
        tracing::debug!(endpoint = resolved.endpoint.pattern(), kind, "endpoint produced reply");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Failure;
    use crate::input::{FieldKind, FieldSpec};
    use crate::record::NameRecord;
    use crate::registry::Endpoint;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        let registry = Registry::builder()
            .endpoint(Endpoint::get("/int", || Value::from(100)))
            .endpoint(Endpoint::get("/empty", || Reply::NoContent))
            .endpoint(Endpoint::get_with("/model", |r: NameRecord| Value::from(r)))
            .endpoint(Endpoint::raw("/echo/{code}", Method::GET, |input| {
                let fields = input.extract(&[FieldSpec::required("code", FieldKind::Integer)])?;
                Ok(Reply::Value(fields.get("code").cloned().unwrap_or(Value::Absent)))
            }))
            .build()
            .unwrap();
        Dispatcher::new(registry)
    }

    #[test]
    fn dispatches_plain_producer() {
        let reply = dispatcher()
            .dispatch(&Method::GET, "/int", RequestInput::new())
            .unwrap();
        assert_eq!(reply, Reply::Value(Value::Integer(100)));
    }

    #[test]
    fn no_content_is_passed_through() {
        let reply = dispatcher()
            .dispatch(&Method::GET, "/empty", RequestInput::new())
            .unwrap();
        assert_eq!(reply, Reply::NoContent);
    }

    #[test]
    fn record_handler_receives_constructed_record() {
        let input = RequestInput::from_pairs([("name", "Avinash")]);
        let Reply::Value(v) = dispatcher().dispatch(&Method::GET, "/model", input).unwrap() else {
            panic!("expected a value");
        };
        assert_eq!(v.to_wire(), json!({"name": "Avinash"}));
    }

    #[test]
    fn record_handler_not_invoked_on_validation_failure() {
        let err = dispatcher()
            .dispatch(&Method::GET, "/model", RequestInput::new())
            .unwrap_err();
        assert_eq!(err.status(), 422);
    }

    #[test]
    fn path_parameter_reaches_handler() {
        let reply = dispatcher()
            .dispatch(&Method::GET, "/echo/418", RequestInput::new())
            .unwrap();
        assert_eq!(reply, Reply::Value(Value::Integer(418)));

        let err = dispatcher()
            .dispatch(&Method::GET, "/echo/teapot", RequestInput::new())
            .unwrap_err();
        assert!(matches!(err, Failure::Validation { .. }));
    }

    #[test]
    fn repeated_dispatch_is_idempotent() {
        let d = dispatcher();
        let first = d.dispatch(&Method::GET, "/int", RequestInput::new()).unwrap();
        for _ in 0..10 {
            assert_eq!(d.dispatch(&Method::GET, "/int", RequestInput::new()).unwrap(), first);
        }
    }

    #[test]
    fn unknown_paths_and_methods_fail() {
        let d = dispatcher();
        assert_eq!(
            d.dispatch(&Method::GET, "/nope", RequestInput::new()).unwrap_err(),
            Failure::NotFound
        );
        assert_eq!(
            d.dispatch(&Method::DELETE, "/int", RequestInput::new()).unwrap_err(),
            Failure::MethodNotAllowed
        );
    }
}
