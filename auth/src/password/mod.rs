pub mod bcrypt;
pub mod errors;

pub use bcrypt::PasswordHasher;
pub use errors::PasswordError;
