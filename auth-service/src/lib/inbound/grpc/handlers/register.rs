use tonic::Status;

use super::validate_email;
use super::validate_password;
use crate::domain::auth::context::RequestContext;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    ctx: &RequestContext,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let email = validate_email(request.email)?;
    validate_password(&request.password)?;

    let user_id = service
        .register(ctx, email.as_str(), &request.password)
        .await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}
