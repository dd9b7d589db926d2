//! Error types for the administrative surface.

#[derive(Debug, thiserror::Error)]
pub enum AdminSurfaceError {
    #[error("session lacks the '{0}' capability")]
    MissingCapability(&'static str),

    #[error("invalid or expired form token")]
    InvalidToken,
}
