//! Visual plugin registration for BI dashboard hosts.
//!
//! A host discovers visuals through a registry it owns. [`register`] writes
//! this crate's [`PluginDescriptor`] under its fixed key when a registry is
//! available and does nothing otherwise (standalone runs have no host).
//!
//! The descriptor carries two constructors for the host to call later:
//! [`PluginDescriptor::create`] builds a [`ChatVisual`], and
//! [`PluginDescriptor::create_modal_dialog`] opens a host dialog by id.

pub mod dialog;
pub mod registry;
pub mod visual;

pub use dialog::{DialogConstructorOptions, DialogCtor, DialogRegistry, DialogTable, ModalDialog};
pub use registry::{InMemoryRegistry, PluginRegistry};
pub use visual::{ChatVisual, VisualConstructorOptions};

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

pub const PLUGIN_GUID: &str = "chatbot5D9D82DEE4964BBE9CB1A8945935DADA";
pub const DISPLAY_NAME: &str = "chatbot";
pub const VISUAL_CLASS: &str = "Visual";
pub const API_VERSION: &str = "5.3.0";

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("visual component not available")]
    ComponentUnavailable,
}

pub type VisualCtor = fn(VisualConstructorOptions) -> ChatVisual;

/// Registry key for this build.
pub fn plugin_key(debug: bool) -> String {
    if debug {
        format!("{PLUGIN_GUID}_DEBUG")
    } else {
        PLUGIN_GUID.to_string()
    }
}

// ── Descriptor ────────────────────────────────────────────────────────────────

/// Static metadata plus the constructors a host calls.
pub struct PluginDescriptor {
    name: String,
    visual: Option<VisualCtor>,
    dialogs: Arc<dyn DialogRegistry>,
}

/// Serializable part of the descriptor, with the host's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    pub name: String,
    pub display_name: String,
    pub class: String,
    pub api_version: String,
    pub custom: bool,
}

impl PluginDescriptor {
    pub fn new(debug: bool, visual: Option<VisualCtor>, dialogs: Arc<dyn DialogRegistry>) -> Self {
        Self { name: plugin_key(debug), visual, dialogs }
    }

    /// Descriptor wired to [`ChatVisual::new`].
    pub fn chatbot(debug: bool, dialogs: Arc<dyn DialogRegistry>) -> Self {
        Self::new(debug, Some(ChatVisual::new as VisualCtor), dialogs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    pub fn class(&self) -> &'static str {
        VISUAL_CLASS
    }

    pub fn api_version(&self) -> &'static str {
        API_VERSION
    }

    pub fn custom(&self) -> bool {
        true
    }

    pub fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: self.name.clone(),
            display_name: self.display_name().to_string(),
            class: self.class().to_string(),
            api_version: self.api_version().to_string(),
            custom: self.custom(),
        }
    }

    /// Build a new visual instance.
    pub fn create(&self, options: VisualConstructorOptions) -> Result<ChatVisual, PluginError> {
        let ctor = self.visual.ok_or(PluginError::ComponentUnavailable)?;
        debug!(plugin = %self.name, "creating visual");
        Ok(ctor(options))
    }

    /// Open the dialog registered under `dialog_id`, if the host knows it.
    pub fn create_modal_dialog(
        &self,
        dialog_id: &str,
        options: DialogConstructorOptions,
        initial_state: Value,
    ) -> Option<Box<dyn ModalDialog>> {
        match self.dialogs.get(dialog_id) {
            Some(ctor) => Some(ctor(options, initial_state)),
            None => {
                debug!(plugin = %self.name, dialog_id, "dialog not registered");
                None
            }
        }
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .field("visual", &self.visual.is_some())
            .finish_non_exhaustive()
    }
}

// ── Registration ──────────────────────────────────────────────────────────────

/// Insert `descriptor` under its key if a host registry is present.
///
/// Returns `true` when an entry was written. A later call replaces the
/// earlier entry.
pub fn register(host: Option<&dyn PluginRegistry>, descriptor: PluginDescriptor) -> bool {
    let Some(registry) = host else {
        debug!(plugin = %descriptor.name, "no host registry, skipping registration");
        return false;
    };
    let key = descriptor.name.clone();
    let replaced = registry.has(&key);
    registry.set(&key, descriptor);
    info!(plugin = %key, replaced, "visual registered with host");
    true
}
