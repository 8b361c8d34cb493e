//! # webframe
//!
//! Embeds a script-capable rendering surface in a native window and bridges
//! calls between native code and page script.
//!
//! The heart of the crate is the binding bridge: native handlers registered
//! under script-visible names, a sequence id correlating every script-side
//! invocation with its eventual native completion, and a blocking run loop
//! fed by a thread-safe submission channel.
//!
//! ```no_run
//! use webframe::{WebView, STATUS_ERROR, STATUS_OK};
//!
//! let mut webview = WebView::builder().title("adder").build();
//! webview.bind("add", |webview, seq, args| {
//!     match webframe::parse_args::<(f64, f64)>(args) {
//!         Ok((a, b)) => webview.resolve(seq, STATUS_OK, &(a + b).to_string()),
//!         Err(err) => webview.resolve(seq, STATUS_ERROR, &err.to_string()),
//!     }
//! });
//! let handle = webview.handle();
//! std::thread::spawn(move || handle.terminate());
//! webview.run();
//! ```
//!
//! ## Threading contract
//!
//! One designated thread, whichever calls [`WebView::run`], owns the
//! instance; [`Handle::dispatch`] and [`Handle::terminate`] are the only
//! operations safe from other threads. The wrapper is deliberately `!Send`,
//! so the compiler enforces the rest of the contract.

/// Script-callable function bindings and the bridge wire protocol
pub mod bindings;
/// Surface configuration
pub mod config;
/// Lifecycle, errors and version metadata
pub mod core;
/// The wrapped script engine and the platform backend interface
pub mod engine;
/// Run-loop event queue and cross-thread handle
pub mod runloop;
/// The wrapper object
pub mod webview;

pub use raw_window_handle;

pub use crate::bindings::parse_args;
pub use crate::bindings::protocol::{ScriptCall, STATUS_ERROR, STATUS_OK};
pub use crate::config::{ConfigError, WindowConfig};
pub use crate::core::error::{ArgsError, CreationError};
pub use crate::core::lifecycle::Lifecycle;
pub use crate::core::version::{version, Version};
pub use crate::engine::backend::{HeadlessBackend, PlatformBackend, SizeHint};
pub use crate::runloop::Handle;
pub use crate::webview::{Builder, WebView};
