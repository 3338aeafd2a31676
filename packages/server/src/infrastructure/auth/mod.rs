//! Identity verification.

pub mod jwt;

pub use jwt::JwtIdentityVerifier;
