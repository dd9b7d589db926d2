//! # Foyer Core Platform Extension Points
//!
//! Thin registration sinks for the host surfaces modules extend: API routes,
//! inline content tags, and UI panels. The host owns dispatching, rendering
//! and form handling; these registries only collect and expose declarations.

pub mod content;
pub mod routes;
pub mod ui;

pub use content::{ContentTag, ContentTagRegistry};
pub use routes::{HttpMethod, RouteDef, RouteRegistry};
pub use ui::{UiPanel, UiPanelKind, UiPanelRegistry};
