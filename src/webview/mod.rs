//! The wrapper object: one embedded surface, its bindings, its run loop.

use raw_window_handle::RawWindowHandle;

use crate::bindings::protocol::{STATUS_ERROR, STATUS_OK};
use crate::bindings::{js, protocol, BindingRegistry};
use crate::config::WindowConfig;
use crate::core::lifecycle::Lifecycle;
use crate::engine::backend::{HeadlessBackend, PlatformBackend, SizeHint};
use crate::engine::ScriptHost;
use crate::runloop::{EventQueue, Handle, LoopEvent};

/// Builder for [`WebView`].
///
/// `build()` never fails structurally: when the backend or the script
/// runtime cannot be created, the returned instance is permanently
/// [`Lifecycle::Unset`] and every operation on it is a no-op. That state is
/// the only creation-failure signal.
pub struct Builder {
    config: WindowConfig,
    backend: Option<Box<dyn PlatformBackend>>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            config: WindowConfig::default(),
            backend: None,
        }
    }

    pub fn config(mut self, config: WindowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enables backend developer tooling where the platform supports it.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Replaces the default [`HeadlessBackend`].
    pub fn backend<B: PlatformBackend + 'static>(mut self, backend: B) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    pub fn build(self) -> WebView {
        let queue = EventQueue::new();
        let mut backend = self
            .backend
            .unwrap_or_else(|| Box::new(HeadlessBackend::new()) as Box<dyn PlatformBackend>);
        let created = backend
            .initialize(&self.config)
            .and_then(|()| ScriptHost::new(queue.sender()));
        match created {
            Ok(host) => WebView {
                state: Lifecycle::Created,
                queue,
                bindings: BindingRegistry::default(),
                init_scripts: Vec::new(),
                host: Some(host),
                backend: Some(backend),
                config: self.config,
            },
            Err(err) => {
                tracing::warn!(
                    target: "webframe",
                    "surface creation failed, instance is unset: {err}"
                );
                WebView {
                    state: Lifecycle::Unset,
                    queue,
                    bindings: BindingRegistry::default(),
                    init_scripts: Vec::new(),
                    host: None,
                    backend: None,
                    config: self.config,
                }
            }
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// One embedded script-capable surface.
///
/// All operations belong to the thread that calls [`WebView::run`] (the
/// loop thread); the type is deliberately `!Send`. Cross-thread work goes
/// through [`WebView::handle`].
pub struct WebView {
    state: Lifecycle,
    queue: EventQueue,
    bindings: BindingRegistry,
    init_scripts: Vec<String>,
    host: Option<ScriptHost>,
    backend: Option<Box<dyn PlatformBackend>>,
    config: WindowConfig,
}

impl WebView {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Current lifecycle state. [`Lifecycle::Unset`] after a failed
    /// creation is the only creation-failure signal.
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Registers `handler` under `name` as a script-callable function.
    ///
    /// The page already active sees the global immediately; every future
    /// page load re-installs it before page script runs. A second bind with
    /// the same name overwrites the first.
    ///
    /// The handler receives the sequence id of the invocation and its
    /// arguments serialized as a JSON array (see
    /// [`parse_args`](crate::bindings::parse_args) for typed decoding). It
    /// must eventually pass that same id to [`WebView::resolve`]; until it
    /// does, the originating script promise stays pending.
    pub fn bind<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&mut WebView, &str, &str) + 'static,
    {
        if !self.state.is_valid() {
            return;
        }
        self.bindings.insert(name, handler);
        if let Some(host) = self.host.as_ref() {
            host.eval_discard(&js::binding_stub(name));
        }
    }

    /// Removes a binding. Later script calls to `name` fail; they never
    /// reach the old handler and never hang.
    pub fn unbind(&mut self, name: &str) {
        if !self.state.is_valid() {
            return;
        }
        if self.bindings.remove(name) {
            if let Some(host) = self.host.as_ref() {
                host.eval_discard(&js::binding_teardown(name));
            }
        }
    }

    /// Completes one pending script call by sequence id.
    ///
    /// `status == 0` resolves the promise: a non-empty `result` must be
    /// valid JSON text and becomes the resolved value; an empty `result`
    /// resolves with the script "no value" primitive. Any other status
    /// rejects the promise with `result` verbatim as the payload.
    ///
    /// Each sequence id must be consumed exactly once; resolving an unknown
    /// or already-consumed id is a caller error with no effect. There is no
    /// timeout anywhere in the bridge: a call whose handler never resolves
    /// stays pending forever.
    pub fn resolve(&mut self, seq: &str, status: i32, result: &str) {
        if !self.state.is_valid() {
            return;
        }
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let script = if status == STATUS_OK {
            if result.is_empty() {
                js::resolve_undefined(seq)
            } else {
                match serde_json::from_str::<serde_json::Value>(result) {
                    Ok(value) => js::resolve_value(seq, &value),
                    Err(err) => {
                        tracing::warn!(
                            target: "webframe.bridge",
                            seq,
                            "resolve result is not valid JSON, call left pending: {err}"
                        );
                        return;
                    }
                }
            }
        } else {
            js::reject(seq, status, result)
        };
        host.eval_discard(&script);
    }

    /// Registers an init script: it runs on every subsequent page load,
    /// before any page script, in registration order. Binding stubs are
    /// installed first, so init scripts can call bound names.
    pub fn init(&mut self, script: &str) {
        if !self.state.is_valid() {
            return;
        }
        self.init_scripts.push(script.to_string());
    }

    /// Evaluates script in the current page, fire-and-forget: the result is
    /// discarded, failures are logged, and no sequence id is produced.
    pub fn eval(&mut self, script: &str) {
        if !self.state.is_valid() {
            return;
        }
        if let Some(host) = self.host.as_ref() {
            host.eval_discard(script);
        }
    }

    pub fn navigate(&mut self, url: &str) {
        if !self.state.is_valid() {
            return;
        }
        tracing::debug!(target: "webframe", url, "navigate");
        if let Some(backend) = self.backend.as_mut() {
            backend.navigate(url);
        }
        self.reset_page();
    }

    pub fn set_html(&mut self, html: &str) {
        if !self.state.is_valid() {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.set_html(html);
        }
        self.reset_page();
    }

    pub fn set_title(&mut self, title: &str) {
        if !self.state.is_valid() {
            return;
        }
        self.config.title = title.to_string();
        if let Some(backend) = self.backend.as_mut() {
            backend.set_title(title);
        }
    }

    pub fn set_size(&mut self, width: u32, height: u32, hint: SizeHint) {
        if !self.state.is_valid() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        if let Some(backend) = self.backend.as_mut() {
            backend.set_size(width, height, hint);
        }
    }

    /// Toolkit-specific opaque window handle, or `None` when the instance
    /// is invalid or the backend is windowless.
    pub fn window_handle(&self) -> Option<RawWindowHandle> {
        if !self.state.is_valid() {
            return None;
        }
        self.backend.as_ref().and_then(|b| b.window_handle())
    }

    /// Cross-thread handle for [`Handle::dispatch`] and
    /// [`Handle::terminate`].
    pub fn handle(&self) -> Handle {
        Handle::new(self.queue.sender())
    }

    /// Loop-thread stop request; see [`Handle::terminate`] for the
    /// cross-thread variant.
    pub fn terminate(&mut self) {
        if !self.state.is_valid() {
            return;
        }
        self.queue.send(LoopEvent::Quit);
    }

    /// Runs the blocking UI loop on the calling thread until a stop request
    /// arrives, executing dispatched tasks and routing script calls in FIFO
    /// order. Legal exactly once, from the Created state; any other state is
    /// a no-op. After return the instance is Terminated and must be
    /// destroyed, not re-run.
    pub fn run(&mut self) {
        if self.state != Lifecycle::Created {
            return;
        }
        self.state = Lifecycle::Running;
        tracing::debug!(target: "webframe.runloop", "run loop started");
        while let Some(event) = self.queue.recv() {
            if !self.handle_event(event) {
                break;
            }
        }
        if self.state == Lifecycle::Running {
            self.state = Lifecycle::Terminated;
        }
        tracing::debug!(target: "webframe.runloop", "run loop stopped");
    }

    /// Tears down the instance. Idempotent; every operation afterwards is a
    /// no-op.
    pub fn destroy(&mut self) {
        if matches!(self.state, Lifecycle::Unset | Lifecycle::Destroyed) {
            return;
        }
        self.host = None;
        self.backend = None;
        self.bindings.clear();
        self.init_scripts.clear();
        self.state = Lifecycle::Destroyed;
    }

    fn handle_event(&mut self, event: LoopEvent) -> bool {
        match event {
            LoopEvent::Task(work) => work(self),
            LoopEvent::ScriptCall(raw) => self.route_call(&raw),
            LoopEvent::Quit => return false,
        }
        if let Some(host) = self.host.as_ref() {
            host.pump_jobs();
        }
        true
    }

    fn route_call(&mut self, raw: &str) {
        if !self.state.is_valid() {
            return;
        }
        let call = match protocol::decode_call(raw) {
            Ok(call) => call,
            Err(err) => {
                tracing::warn!(
                    target: "webframe.bridge",
                    "malformed bridge message: {}",
                    err.reason
                );
                if let Some(seq) = err.seq {
                    self.resolve(
                        &seq,
                        STATUS_ERROR,
                        &format!("malformed call payload: {}", err.reason),
                    );
                }
                return;
            }
        };
        let args = serde_json::to_string(&call.args).unwrap_or_else(|_| "[]".to_string());
        match self.bindings.get(&call.name) {
            Some(handler) => {
                tracing::trace!(
                    target: "webframe.bridge",
                    name = %call.name,
                    seq = %call.seq,
                    "routing call"
                );
                (&mut *handler.borrow_mut())(self, &call.seq, &args);
            }
            None => {
                self.resolve(
                    &call.seq,
                    STATUS_ERROR,
                    &format!("no binding registered for '{}'", call.name),
                );
            }
        }
    }

    fn reset_page(&mut self) {
        let stubs: Vec<String> = self.bindings.names().map(js::binding_stub).collect();
        if let Some(host) = self.host.as_mut() {
            if let Err(err) = host.reset_page(&self.init_scripts, &stubs) {
                tracing::error!(target: "webframe", "page context reset failed: {err}");
            }
        }
    }

    /// Drains queued events without blocking; test-only stand-in for the
    /// run loop.
    #[cfg(test)]
    pub(crate) fn pump(&mut self) {
        while let Some(event) = self.queue.try_recv() {
            if !self.handle_event(event) {
                break;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn script_global<V>(&self, name: &str) -> Option<V>
    where
        V: for<'js> rquickjs::FromJs<'js> + Send,
    {
        self.host.as_ref().and_then(|host| host.global(name))
    }
}

impl Drop for WebView {
    fn drop(&mut self) {
        self.destroy();
    }
}
