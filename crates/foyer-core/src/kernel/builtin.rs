//! Compile-time table of built-in modules.
//!
//! Each built-in is guarded by a cargo feature; a disabled feature leaves
//! the table entry without a constructor, and the bootloader records the id
//! in its skipped-builtins list instead of failing.

use std::sync::Arc;

use crate::module_system::traits::ExtensionModule;

type Constructor = fn() -> Arc<dyn ExtensionModule>;

/// One entry in the built-in module table
pub struct BuiltinModuleDef {
    id: &'static str,
    constructor: Option<Constructor>,
}

impl BuiltinModuleDef {
    fn resolvable(id: &'static str, constructor: Constructor) -> Self {
        Self {
            id,
            constructor: Some(constructor),
        }
    }

    fn unresolvable(id: &'static str) -> Self {
        Self {
            id,
            constructor: None,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Whether this built-in's backing definition is compiled in
    pub fn is_resolvable(&self) -> bool {
        self.constructor.is_some()
    }

    /// Instantiate the module, if its backing definition is compiled in
    pub fn construct(&self) -> Option<Arc<dyn ExtensionModule>> {
        self.constructor.map(|ctor| ctor())
    }
}

/// The fixed table of built-ins, in registration order
pub fn builtin_modules() -> Vec<BuiltinModuleDef> {
    vec![
        events_entry(),
        tickets_entry(),
        notifications_entry(),
        rest_api_entry(),
        seo_entry(),
        pwa_entry(),
    ]
}

#[cfg(feature = "mod-events")]
fn events_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::resolvable("events", || {
        Arc::new(crate::modules::events::EventsModule::new())
    })
}

#[cfg(not(feature = "mod-events"))]
fn events_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::unresolvable("events")
}

#[cfg(feature = "mod-tickets")]
fn tickets_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::resolvable("tickets", || {
        Arc::new(crate::modules::tickets::TicketsModule::new())
    })
}

#[cfg(not(feature = "mod-tickets"))]
fn tickets_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::unresolvable("tickets")
}

#[cfg(feature = "mod-notifications")]
fn notifications_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::resolvable("notifications", || {
        Arc::new(crate::modules::notifications::NotificationsModule::new())
    })
}

#[cfg(not(feature = "mod-notifications"))]
fn notifications_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::unresolvable("notifications")
}

#[cfg(feature = "mod-rest-api")]
fn rest_api_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::resolvable("rest_api", || {
        Arc::new(crate::modules::rest_api::RestApiModule::new())
    })
}

#[cfg(not(feature = "mod-rest-api"))]
fn rest_api_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::unresolvable("rest_api")
}

#[cfg(feature = "mod-seo")]
fn seo_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::resolvable("seo", || Arc::new(crate::modules::seo::SeoModule::new()))
}

#[cfg(not(feature = "mod-seo"))]
fn seo_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::unresolvable("seo")
}

#[cfg(feature = "mod-pwa")]
fn pwa_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::resolvable("pwa", || Arc::new(crate::modules::pwa::PwaModule::new()))
}

#[cfg(not(feature = "mod-pwa"))]
fn pwa_entry() -> BuiltinModuleDef {
    BuiltinModuleDef::unresolvable("pwa")
}
