use std::sync::Arc;
use std::time::Duration;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::grpc_timeout;
use super::handlers::is_admin;
use super::handlers::login;
use super::handlers::register;
use crate::domain::auth::context::RequestContext;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth as AuthProto;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

/// gRPC adapter exposing an [`AuthServicePort`].
///
/// Each call runs under a deadline of the configured timeout, shortened by the
/// client's `grpc-timeout` header when that is smaller.
pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
    timeout: Duration,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    fn request_context<T>(&self, request: &Request<T>) -> RequestContext {
        let timeout = grpc_timeout(request.metadata())
            .map_or(self.timeout, |client_timeout| client_timeout.min(self.timeout));

        RequestContext::with_timeout(timeout)
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> AuthProto for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let ctx = self.request_context(&request);
        let response = register::register(&*self.service, &ctx, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let ctx = self.request_context(&request);
        let response = login::login(&*self.service, &ctx, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let ctx = self.request_context(&request);
        let response = is_admin::is_admin(&*self.service, &ctx, request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
