//! # Foyer Built-in Modules
//!
//! The feature modules shipped with the platform extension. Each is guarded
//! by a cargo feature and instantiated through the kernel's built-in table;
//! disabling a feature removes the backing definition and the bootloader
//! reports the id as skipped.

#[cfg(feature = "mod-events")]
pub mod events;
#[cfg(feature = "mod-notifications")]
pub mod notifications;
#[cfg(feature = "mod-pwa")]
pub mod pwa;
#[cfg(feature = "mod-rest-api")]
pub mod rest_api;
#[cfg(feature = "mod-seo")]
pub mod seo;
#[cfg(feature = "mod-tickets")]
pub mod tickets;
