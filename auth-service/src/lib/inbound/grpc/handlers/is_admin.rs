use tonic::Status;

use crate::domain::auth::context::RequestContext;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: &S,
    ctx: &RequestContext,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, Status> {
    if request.user_id <= 0 {
        return Err(Status::invalid_argument("user_id is required"));
    }

    let is_admin = service.is_admin(ctx, UserId(request.user_id)).await?;

    Ok(IsAdminResponse { is_admin })
}
