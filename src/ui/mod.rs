pub mod auth;
pub mod landing;
pub mod pricing;
pub mod workspace;
