//! Host-side modal dialogs.
//!
//! The host keeps its own table of dialog constructors; the descriptor only
//! looks ids up in it.

use std::collections::HashMap;

use serde_json::Value;

/// Options the host passes when opening a dialog.
#[derive(Debug, Clone, Default)]
pub struct DialogConstructorOptions {
    pub title: String,
}

pub trait ModalDialog: Send {
    fn dialog_id(&self) -> &str;
}

pub type DialogCtor = fn(DialogConstructorOptions, Value) -> Box<dyn ModalDialog>;

pub trait DialogRegistry: Send + Sync {
    fn get(&self, dialog_id: &str) -> Option<DialogCtor>;
}

/// Fixed table of dialog constructors, filled before the descriptor is built.
#[derive(Debug, Default)]
pub struct DialogTable {
    dialogs: HashMap<String, DialogCtor>,
}

impl DialogTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dialog_id: impl Into<String>, ctor: DialogCtor) -> Self {
        self.dialogs.insert(dialog_id.into(), ctor);
        self
    }
}

impl DialogRegistry for DialogTable {
    fn get(&self, dialog_id: &str) -> Option<DialogCtor> {
        self.dialogs.get(dialog_id).copied()
    }
}
