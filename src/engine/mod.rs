//! The wrapped script engine.
//!
//! [`ScriptHost`] owns one QuickJS runtime and the current page context. A
//! navigation discards the context and builds a fresh one: bridge bootstrap
//! first, then one stub per registered binding, then user init scripts in
//! registration order. All of it runs before any page script, and init
//! scripts can already call bound names.

pub mod backend;

use std::sync::Arc;

use crossbeam_channel::Sender;
use rquickjs::function::Rest;
use rquickjs::{Context, Function, Object, Runtime};

use crate::bindings::js;
use crate::bindings::protocol::SequenceAllocator;
use crate::core::error::CreationError;
use crate::runloop::LoopEvent;

pub(crate) struct ScriptHost {
    runtime: Runtime,
    context: Context,
    events: Sender<LoopEvent>,
    sequences: Arc<SequenceAllocator>,
}

impl ScriptHost {
    pub fn new(events: Sender<LoopEvent>) -> Result<Self, CreationError> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;
        let host = Self {
            runtime,
            context,
            events,
            sequences: Arc::new(SequenceAllocator::new()),
        };
        host.install_bridge()?;
        Ok(host)
    }

    /// Discards the page context and rebuilds it for a new document. The
    /// sequence allocator is shared across contexts, so ids stay monotonic
    /// over navigations.
    pub fn reset_page(
        &mut self,
        init_scripts: &[String],
        stubs: &[String],
    ) -> Result<(), CreationError> {
        self.context = Context::full(&self.runtime)?;
        self.install_bridge()?;
        for script in stubs.iter().chain(init_scripts) {
            self.eval_discard(script);
        }
        Ok(())
    }

    fn install_bridge(&self) -> Result<(), CreationError> {
        let sequences = Arc::clone(&self.sequences);
        let events = self.events.clone();
        self.context.with(|ctx| -> rquickjs::Result<()> {
            let globals = ctx.globals();

            globals.set(
                "__webframe_seq",
                Function::new(ctx.clone(), move || -> String {
                    sequences.allocate().to_string()
                })?,
            )?;

            globals.set(
                "__webframe_post",
                Function::new(ctx.clone(), move |message: String| {
                    let _ = events.send(LoopEvent::ScriptCall(message));
                })?,
            )?;

            let console = Object::new(ctx.clone())?;
            console.set(
                "log",
                Function::new(ctx.clone(), |args: Rest<String>| {
                    tracing::info!(target: "webframe.console", "{}", args.0.join(" "));
                })?,
            )?;
            console.set(
                "warn",
                Function::new(ctx.clone(), |args: Rest<String>| {
                    tracing::warn!(target: "webframe.console", "{}", args.0.join(" "));
                })?,
            )?;
            console.set(
                "error",
                Function::new(ctx.clone(), |args: Rest<String>| {
                    tracing::error!(target: "webframe.console", "{}", args.0.join(" "));
                })?,
            )?;
            globals.set("console", console)?;

            ctx.eval::<(), _>(js::BOOTSTRAP)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Fire-and-forget evaluation: the result is discarded, failures are
    /// logged, and any promise jobs the script queued are run.
    pub fn eval_discard(&self, code: &str) {
        let result: Result<(), String> = self.context.with(|ctx| {
            ctx.eval::<(), _>(code).map_err(|err| match err {
                rquickjs::Error::Exception => format!("{:?}", ctx.catch()),
                other => other.to_string(),
            })
        });
        if let Err(err) = result {
            tracing::warn!(target: "webframe.script", "script evaluation failed: {err}");
        }
        self.pump_jobs();
    }

    /// Runs queued promise continuations until the job queue drains.
    pub fn pump_jobs(&self) {
        while self.runtime.is_job_pending() {
            if self.runtime.execute_pending_job().is_err() {
                tracing::warn!(
                    target: "webframe.script",
                    "pending job raised an uncaught exception"
                );
            }
        }
    }

    #[cfg(test)]
    pub fn global<V>(&self, name: &str) -> Option<V>
    where
        V: for<'js> rquickjs::FromJs<'js> + Send,
    {
        self.context.with(|ctx| ctx.globals().get::<_, V>(name).ok())
    }
}
