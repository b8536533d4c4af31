pub mod client;
pub mod model;
pub mod signin;
pub mod signup;

pub use client::{map_auth_error, AuthClient};
pub use model::{AuthUser, IdTokenClaims};
pub use signin::{sign_in_user, SigninReq};
pub use signup::{sign_up_user, SignupReq};
