//! Endpoint registration table.
//!
//! Endpoints are collected by a [`RegistryBuilder`] at startup and frozen into
//! a [`Registry`]. Nothing mutates a registry after `build()`.

use std::fmt;
use std::sync::Arc;

use http::Method;
use thiserror::Error;

use crate::dispatcher::{IntoReply, Reply};
use crate::error::{Failure, GatewayResult};
use crate::input::RequestInput;
use crate::record::Record;

/// Type-erased endpoint handler.
pub type Handler = Arc<dyn Fn(&RequestInput) -> GatewayResult<Reply> + Send + Sync>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("route {method} {path} registered twice")]
    Duplicate { method: Method, path: String },

    #[error("invalid route pattern `{0}`")]
    InvalidPattern(String),
}

/// Path shape of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    /// Exact path.
    Static(String),
    /// `prefix` followed by one non-empty segment bound to `param`.
    Param { prefix: String, param: String },
}

impl Route {
    /// Two routes overlap when they match the same paths; parameter names don't matter.
    fn overlaps(&self, other: &Route) -> bool {
        match (self, other) {
            (Route::Static(a), Route::Static(b)) => a == b,
            (Route::Param { prefix: a, .. }, Route::Param { prefix: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// One registered endpoint.
#[derive(Clone)]
pub struct Endpoint {
    pattern: String,
    route: Route,
    method: Method,
    handler: Handler,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    /// GET endpoint without input.
    pub fn get<F, R>(pattern: &str, producer: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        Self::raw(pattern, Method::GET, move |_input| Ok(producer().into_reply()))
    }

    /// GET endpoint whose handler receives a record built from the request.
    pub fn get_with<T, F, R>(pattern: &str, handler: F) -> Self
    where
        T: Record,
        F: Fn(T) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        Self::raw(pattern, Method::GET, move |input| {
            let record = T::from_input(input)?;
            Ok(handler(record).into_reply())
        })
    }

    /// Endpoint with direct access to the request input.
    pub fn raw<F>(pattern: &str, method: Method, handler: F) -> Self
    where
        F: Fn(&RequestInput) -> GatewayResult<Reply> + Send + Sync + 'static,
    {
        Self {
            pattern: pattern.to_string(),
            route: Route::Static(pattern.to_string()),
            method,
            handler: Arc::new(handler),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn call(&self, input: &RequestInput) -> GatewayResult<Reply> {
        (self.handler)(input)
    }

    /// Name of the path parameter, for parameterised routes.
    pub fn param_name(&self) -> Option<&str> {
        match &self.route {
            Route::Static(_) => None,
            Route::Param { param, .. } => Some(param),
        }
    }

    /// Match `path`, returning the bound parameter value (if any).
    fn matches<'p>(&self, path: &'p str) -> Option<Option<&'p str>> {
        match &self.route {
            Route::Static(p) => (p == path).then_some(None),
            Route::Param { prefix, .. } => path
                .strip_prefix(prefix.as_str())
                .filter(|rest| !rest.is_empty() && !rest.contains('/'))
                .map(Some),
        }
    }
}

fn parse_route(pattern: &str) -> Result<Route, RegistryError> {
    let invalid = || RegistryError::InvalidPattern(pattern.to_string());
    if !pattern.starts_with('/') {
        return Err(invalid());
    }

    match pattern.find('{') {
        None if pattern.contains('}') => Err(invalid()),
        None => Ok(Route::Static(pattern.to_string())),
        Some(open) => {
            let (prefix, rest) = pattern.split_at(open);
            let param = rest
                .strip_prefix('{')
                .and_then(|r| r.strip_suffix('}'))
                .ok_or_else(invalid)?;
            let valid_param = !param.is_empty()
                && param.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !prefix.ends_with('/') || !valid_param {
                return Err(invalid());
            }
            Ok(Route::Param {
                prefix: prefix.to_string(),
                param: param.to_string(),
            })
        }
    }
}

/// Collects endpoints at startup.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    endpoints: Vec<Endpoint>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Validate patterns and freeze the table.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut endpoints: Vec<Endpoint> = Vec::with_capacity(self.endpoints.len());
        for mut endpoint in self.endpoints {
            endpoint.route = parse_route(&endpoint.pattern)?;
            let duplicate = endpoints
                .iter()
                .any(|e| e.method == endpoint.method && e.route.overlaps(&endpoint.route));
            if duplicate {
                return Err(RegistryError::Duplicate {
                    method: endpoint.method,
                    path: endpoint.pattern,
                });
            }
            endpoints.push(endpoint);
        }

        // Exact paths win over parameterised ones.
        endpoints.sort_by_key(|e| matches!(e.route, Route::Param { .. }));

        Ok(Registry {
            endpoints: endpoints.into(),
        })
    }
}

/// Immutable endpoint table.
#[derive(Debug, Clone)]
pub struct Registry {
    endpoints: Arc<[Endpoint]>,
}

/// Endpoint selected for a request.
#[derive(Debug)]
pub struct Resolved<'r, 'p> {
    pub endpoint: &'r Endpoint,
    pub param: Option<&'p str>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    /// Resolve exactly one endpoint for `method` and `path`.
    pub fn resolve<'r, 'p>(&'r self, method: &Method, path: &'p str) -> Result<Resolved<'r, 'p>, Failure> {
        let mut path_known = false;
        for endpoint in self.endpoints.iter() {
            let Some(param) = endpoint.matches(path) else {
                continue;
            };
            if endpoint.method == *method {
                return Ok(Resolved { endpoint, param });
            }
            path_known = true;
        }

        if path_known {
            Err(Failure::MethodNotAllowed)
        } else {
            Err(Failure::NotFound)
        }
    }
}
