pub mod adaptors;
pub mod auth;
pub mod filters;
pub mod sqlgen;
