use crate::kernel::constants::APP_VERSION;
use crate::module_system::error::ModuleSystemError;
use crate::module_system::traits::{ExtensionModule, ModuleContext};
use crate::platform::routes::{HttpMethod, RouteDef, RouteRegistry};

/// Platform status endpoints under the shared API namespace. Feature
/// modules contribute their own routes; this module only covers the common
/// surface.
pub struct RestApiModule;

impl RestApiModule {
    pub const ID: &'static str = "rest_api";

    pub fn new() -> Self {
        Self
    }
}

impl Default for RestApiModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionModule for RestApiModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "REST API"
    }

    fn description(&self) -> &str {
        "Status and version endpoints"
    }

    fn version(&self) -> &str {
        APP_VERSION
    }

    fn default_enabled(&self) -> bool {
        true
    }

    fn init(&self, _ctx: &mut ModuleContext<'_>) -> Result<(), ModuleSystemError> {
        Ok(())
    }

    fn register_api_routes(&self, routes: &mut RouteRegistry) -> Result<(), ModuleSystemError> {
        routes.add(RouteDef::new(HttpMethod::Get, "/status", "rest_api.status", Self::ID));
        routes.add(RouteDef::new(
            HttpMethod::Get,
            "/version",
            "rest_api.version",
            Self::ID,
        ));
        Ok(())
    }
}
