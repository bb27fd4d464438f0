//! Registration against a host-provided registry implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use datachat::answer::Answerer;
use datachat::answer::providers::dummy::DummyAnswerer;
use datachat::config::ChatConfig;
use datachat::conversation::SubmitOutcome;
use datachat::plugin::{
    self, DialogTable, PluginDescriptor, PluginError, PluginRegistry, VisualConstructorOptions,
};

/// A host that records every write.
#[derive(Default)]
struct HostPlugins {
    entries: Mutex<HashMap<String, Arc<PluginDescriptor>>>,
    writes: Mutex<Vec<String>>,
}

impl PluginRegistry for HostPlugins {
    fn has(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    fn set(&self, key: &str, descriptor: PluginDescriptor) {
        self.writes.lock().unwrap().push(key.to_string());
        self.entries.lock().unwrap().insert(key.to_string(), Arc::new(descriptor));
    }
}

fn options() -> VisualConstructorOptions {
    VisualConstructorOptions {
        answerer: Answerer::Dummy(DummyAnswerer),
        chat: ChatConfig::default(),
    }
}

#[tokio::test]
async fn host_builds_working_visual_from_registered_descriptor() {
    let host = HostPlugins::default();
    let descriptor = PluginDescriptor::chatbot(true, Arc::new(DialogTable::new()));

    assert!(plugin::register(Some(&host), descriptor));

    let key = "chatbot5D9D82DEE4964BBE9CB1A8945935DADA_DEBUG";
    let entry = host.entries.lock().unwrap().get(key).cloned().unwrap();
    assert_eq!(entry.display_name(), "chatbot");
    assert_eq!(entry.api_version(), "5.3.0");
    assert!(entry.custom());

    let visual = entry.create(options()).unwrap();
    let conversation = visual.conversation();
    assert_eq!(conversation.submit("oi").await, SubmitOutcome::Answered);
    assert_eq!(conversation.transcript().last().unwrap().text(), "[echo] oi");
}

#[test]
fn repeated_registration_overwrites_single_key() {
    let host = HostPlugins::default();
    plugin::register(Some(&host), PluginDescriptor::chatbot(false, Arc::new(DialogTable::new())));
    plugin::register(Some(&host), PluginDescriptor::new(false, None, Arc::new(DialogTable::new())));

    assert_eq!(host.writes.lock().unwrap().len(), 2);
    let entries = host.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    let entry = entries.get(plugin::PLUGIN_GUID).unwrap();
    assert!(matches!(entry.create(options()), Err(PluginError::ComponentUnavailable)));
}

#[test]
fn absent_host_is_silent() {
    let host: Option<&dyn PluginRegistry> = None;
    assert!(!plugin::register(host, PluginDescriptor::chatbot(false, Arc::new(DialogTable::new()))));
}
