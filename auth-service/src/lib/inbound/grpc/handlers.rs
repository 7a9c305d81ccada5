use std::time::Duration;

use tonic::metadata::MetadataMap;
use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;

pub mod is_admin;
pub mod login;
pub mod register;

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials { .. } => {
                Status::unauthenticated("invalid email or password")
            }
            AuthError::UserAlreadyExists { .. } => Status::already_exists("user already exists"),
            AuthError::InvalidAppId { .. } => Status::invalid_argument("invalid app id"),
            AuthError::UserNotFound { .. } => Status::not_found("user not found"),
            AuthError::Cancelled { .. } => Status::cancelled("request cancelled"),
            AuthError::DeadlineExceeded { .. } => Status::deadline_exceeded("deadline exceeded"),
            AuthError::Internal { .. } => Status::internal("internal error"),
        }
    }
}

pub(crate) fn validate_email(email: String) -> Result<EmailAddress, Status> {
    if email.is_empty() {
        return Err(Status::invalid_argument("email is required"));
    }

    EmailAddress::new(email).map_err(|e| Status::invalid_argument(format!("Invalid email: {}", e)))
}

pub(crate) fn validate_password(password: &str) -> Result<(), Status> {
    if password.is_empty() {
        return Err(Status::invalid_argument("password is required"));
    }
    if password.len() > auth::MAX_PASSWORD_BYTES {
        return Err(Status::invalid_argument(format!(
            "password must be at most {} bytes",
            auth::MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}

/// Parse the `grpc-timeout` request header.
///
/// Format is at most 8 ASCII digits followed by a unit: `H`, `M`, `S`, `m`, `u` or `n`.
pub(crate) fn grpc_timeout(metadata: &MetadataMap) -> Option<Duration> {
    let value = metadata.get("grpc-timeout")?.to_str().ok()?;
    if value.len() < 2 || value.len() > 9 {
        return None;
    }

    let (amount, unit) = value.split_at(value.len() - 1);
    if !amount.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = amount.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(amount * 60 * 60)),
        "M" => Some(Duration::from_secs(amount * 60)),
        "S" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_millis(amount)),
        "u" => Some(Duration::from_micros(amount)),
        "n" => Some(Duration::from_nanos(amount)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;
    use crate::domain::auth::errors::StorageError;
    use crate::domain::auth::models::AppId;
    use crate::domain::auth::models::UserId;

    fn metadata(timeout: &str) -> MetadataMap {
        let mut metadata = MetadataMap::new();
        metadata.insert("grpc-timeout", timeout.parse().unwrap());
        metadata
    }

    const OP: &str = "auth.login";

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthError::InvalidCredentials { op: OP }, Code::Unauthenticated),
            (AuthError::UserAlreadyExists { op: OP }, Code::AlreadyExists),
            (
                AuthError::InvalidAppId {
                    op: OP,
                    app_id: AppId(1),
                },
                Code::InvalidArgument,
            ),
            (
                AuthError::UserNotFound {
                    op: OP,
                    user_id: UserId(1),
                },
                Code::NotFound,
            ),
            (AuthError::Cancelled { op: OP }, Code::Cancelled),
            (AuthError::DeadlineExceeded { op: OP }, Code::DeadlineExceeded),
        ];

        for (err, code) in cases {
            assert_eq!(Status::from(err).code(), code);
        }
    }

    #[test]
    fn test_internal_status_hides_cause() {
        let err = AuthError::internal(
            "auth.login",
            StorageError::Database("password=hunter2 host=db".to_string()),
        );

        let status = Status::from(err);
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com".to_string()).is_ok());
        assert_eq!(
            validate_email(String::new()).unwrap_err().code(),
            Code::InvalidArgument
        );
        assert_eq!(
            validate_email("nope".to_string()).unwrap_err().code(),
            Code::InvalidArgument
        );
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret123").is_ok());
        assert_eq!(
            validate_password("").unwrap_err().code(),
            Code::InvalidArgument
        );
        assert_eq!(
            validate_password(&"x".repeat(auth::MAX_PASSWORD_BYTES + 1))
                .unwrap_err()
                .code(),
            Code::InvalidArgument
        );
    }

    #[test]
    fn test_grpc_timeout_units() {
        assert_eq!(grpc_timeout(&metadata("2H")), Some(Duration::from_secs(7200)));
        assert_eq!(grpc_timeout(&metadata("3M")), Some(Duration::from_secs(180)));
        assert_eq!(grpc_timeout(&metadata("5S")), Some(Duration::from_secs(5)));
        assert_eq!(grpc_timeout(&metadata("250m")), Some(Duration::from_millis(250)));
        assert_eq!(grpc_timeout(&metadata("10u")), Some(Duration::from_micros(10)));
        assert_eq!(grpc_timeout(&metadata("99n")), Some(Duration::from_nanos(99)));
    }

    #[test]
    fn test_grpc_timeout_rejects_malformed() {
        assert_eq!(grpc_timeout(&MetadataMap::new()), None);
        assert_eq!(grpc_timeout(&metadata("S")), None);
        assert_eq!(grpc_timeout(&metadata("10x")), None);
        assert_eq!(grpc_timeout(&metadata("-1S")), None);
        assert_eq!(grpc_timeout(&metadata("123456789S")), None);
    }
}
