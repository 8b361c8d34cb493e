//! Native-to-script function bindings.
//!
//! Flow: page script calls a bound name -> the injected stub serializes the
//! call arguments into a JSON array and posts one message to the native
//! side -> routing looks the name up here and invokes the registered handler
//! with the sequence id and the argument array -> the handler eventually
//! passes that id to [`WebView::resolve`](crate::webview::WebView::resolve),
//! completing or rejecting the originating script promise.

pub(crate) mod js;
pub mod protocol;

pub use protocol::parse_args;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::webview::WebView;

/// Handler invoked for each script call: (webview, sequence id, JSON args).
pub(crate) type BindHandler = dyn FnMut(&mut WebView, &str, &str) + 'static;

/// Name-keyed registry of script-callable handlers.
///
/// A second bind under the same name overwrites the prior entry
/// (last-write-wins); the replacement is visible to the page already active
/// and to every subsequent page load. The caller-supplied context of the
/// classic C-style bridge is carried by closure capture, so the registry
/// owns everything it references.
#[derive(Default)]
pub(crate) struct BindingRegistry {
    entries: HashMap<String, Rc<RefCell<BindHandler>>>,
}

impl BindingRegistry {
    pub fn insert<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&mut WebView, &str, &str) + 'static,
    {
        self.entries
            .insert(name.to_string(), Rc::new(RefCell::new(handler)));
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Cloned handler cell so routing can invoke it without holding a
    /// registry borrow; handlers may bind or unbind reentrantly.
    pub fn get(&self, name: &str) -> Option<Rc<RefCell<BindHandler>>> {
        self.entries.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
