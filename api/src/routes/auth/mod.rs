//! Token endpoints
//!
//! - `POST /api/jwt/create` - exchange credentials for a token pair
//! - `POST /api/jwt/refresh` - rotate a refresh token
//! - `POST /api/jwt/verify` - check an access token
//! - `POST /api/logout` - revoke a refresh token

pub mod create;
pub mod logout;
pub mod refresh;
pub mod verify;

pub use create::create_token;
pub use logout::logout;
pub use refresh::refresh_token;
pub use verify::verify_token;
