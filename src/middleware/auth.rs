//! Bearer-token guard.
//!
//! Requests without an `Authorization: Bearer` header are rejected before
//! the handler runs. The token itself is not validated against anything;
//! login issues a static token and this guard only checks it is presented.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::errors::AppError;

pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = BearerAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BearerAuthService {
            service: Rc::new(service),
        })
    }
}

pub struct BearerAuthService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_owned);

        Box::pin(async move {
            match token {
                Some(token) if !token.is_empty() => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                _ => {
                    let (req, _) = req.into_parts();
                    let res = AppError::AuthenticationError
                        .error_response()
                        .map_into_right_body();
                    Ok(ServiceResponse::new(req, res))
                }
            }
        })
    }
}
