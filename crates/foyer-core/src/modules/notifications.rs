use std::collections::BTreeMap;

use crate::module_system::error::ModuleSystemError;
use crate::module_system::settings::SettingDescriptor;
use crate::module_system::traits::{ExtensionModule, ModuleContext};
use crate::storage::provider::KeyValueStore;

/// Order confirmations and event reminders, queued for the host mailer.
pub struct NotificationsModule;

impl NotificationsModule {
    pub const ID: &'static str = "notifications";

    /// Pending messages waiting on the host mailer; transient.
    pub const OUTBOX_KEY: &'static str = "notifications.outbox";

    pub fn new() -> Self {
        Self
    }
}

impl Default for NotificationsModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionModule for NotificationsModule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Notifications"
    }

    fn description(&self) -> &str {
        "Order confirmations and event reminders"
    }

    fn version(&self) -> &str {
        "0.9.4"
    }

    fn dependencies(&self) -> Vec<String> {
        vec!["tickets".to_string()]
    }

    fn init(&self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleSystemError> {
        let settings = ctx.settings();
        let sender: String = settings.get_or("sender_address", "events@example.org".to_string());
        if !sender.contains('@') {
            return Err(ModuleSystemError::init(
                Self::ID,
                format!("sender_address '{}' is not an address", sender),
            ));
        }
        log::debug!("notification sender: {}", sender);
        Ok(())
    }

    fn settings_schema(&self) -> BTreeMap<String, SettingDescriptor> {
        BTreeMap::from([
            (
                "sender_name".to_string(),
                SettingDescriptor::text("Sender name", "Foyer Events"),
            ),
            (
                "sender_address".to_string(),
                SettingDescriptor::text("Sender address", "events@example.org"),
            ),
            (
                "reminder_days".to_string(),
                SettingDescriptor::number("Reminder lead time (days)", 2),
            ),
        ])
    }

    fn on_deactivate(&self, store: &dyn KeyValueStore) -> Result<(), ModuleSystemError> {
        // Drop the queued outbox; anything undelivered is stale by the time
        // the module comes back.
        store
            .remove(Self::OUTBOX_KEY)
            .map(|_| ())
            .map_err(|e| ModuleSystemError::DeactivationHook {
                module: Self::ID.to_string(),
                message: e.to_string(),
            })
    }
}
