//! Method override - lets HTML forms issue PUT and DELETE.
//!
//! A `POST` whose query string carries `_method=put` or `_method=delete`
//! is rewritten to that verb before routing, so handlers only ever see the
//! logical method.

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use serde::Deserialize;
use std::future::{Ready, ready};

/// Query parameter naming the overriding verb.
pub const METHOD_OVERRIDE_PARAM: &str = "_method";

#[derive(Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

fn overridden_method(query: &str) -> Option<Method> {
    let query = web::Query::<OverrideQuery>::from_query(query).ok()?;
    match query.method.as_deref()?.to_ascii_lowercase().as_str() {
        "put" => Some(Method::PUT),
        "delete" => Some(Method::DELETE),
        _ => None,
    }
}

/// Middleware translating `POST ?_method=<verb>` into `<verb>`.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService { service }))
    }
}

pub struct MethodOverrideService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = overridden_method(req.query_string()) {
                tracing::debug!(path = %req.path(), method = %method, "method override");
                req.head_mut().method = method;
            }
        }

        self.service.call(req)
    }
}
