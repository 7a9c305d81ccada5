pub mod repositories;
pub mod token;

pub use repositories::PostgresStorage;
pub use token::JwtTokenIssuer;
