// handlers/auth/mod.rs - Account handlers
//
// Signup is public. me, change-password and deleteuser require Basic
// credentials; the middleware has already resolved the caller into an
// AuthUser extension by the time these run.

pub mod change_password; // PUT /auth/change-password
pub mod delete_user;     // DELETE /auth/deleteuser/:username
pub mod me;              // GET /auth/me
pub mod signup;          // POST /auth/signup

pub use change_password::change_password;
pub use delete_user::delete_user;
pub use me::me;
pub use signup::signup;
