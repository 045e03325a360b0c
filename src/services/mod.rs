pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, AuthenticatedIdentity};
pub use auth_service_impl::SeaOrmAuthService;

pub mod status_service;
pub mod status_service_impl;
pub use status_service::{StatusError, StatusService, StatusValue};
pub use status_service_impl::SeaOrmStatusService;
