//! Query-string sanitization applied before routing.
//!
//! Every value of every query parameter is passed through
//! [`sanitize_request_parameters`] and the request URI is rewritten, so
//! handlers and extractors only ever observe escaped parameter values.
//! Parameter names are left untouched.

use std::collections::BTreeMap;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::uri::{PathAndQuery, Uri};
use actix_web::{Error, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;
use url::form_urlencoded;

use crate::domain::sanitize_request_parameters;

/// Middleware escaping HTML-significant characters in query parameters.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use cake_manager::middleware::SanitizeQuery;
///
/// let app = App::new().wrap(SanitizeQuery);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SanitizeQuery;

impl<S, B> Transform<S, ServiceRequest> for SanitizeQuery
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SanitizeQueryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SanitizeQueryMiddleware { service }))
    }
}

/// Service wrapper produced by [`SanitizeQuery`].
pub struct SanitizeQueryMiddleware<S> {
    service: S,
}

/// Decode, sanitize and re-encode a raw query string.
fn sanitize_query(query: &str) -> String {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    let cleaned = sanitize_request_parameters(&params);
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &cleaned {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

fn with_query(uri: &Uri, query: &str) -> Result<Uri, String> {
    let path_and_query = if query.is_empty() {
        uri.path().to_owned()
    } else {
        format!("{}?{query}", uri.path())
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query =
        Some(PathAndQuery::try_from(path_and_query).map_err(|err| err.to_string())?);
    Uri::from_parts(parts).map_err(|err| err.to_string())
}

impl<S, B> Service<ServiceRequest> for SanitizeQueryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let query = req.uri().query().unwrap_or_default().to_owned();
        if !query.is_empty() {
            match with_query(req.uri(), &sanitize_query(&query)) {
                Ok(uri) => {
                    req.match_info_mut().get_mut().update(&uri);
                    req.head_mut().uri = uri;
                }
                Err(error) => {
                    warn!(%error, "failed to rewrite sanitized query string");
                    return Box::pin(async move {
                        let response =
                            crate::domain::Error::invalid_request("Malformed query string")
                                .error_response();
                        Ok(req.into_response(response).map_into_right_body())
                    });
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
