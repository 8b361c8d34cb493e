use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use webframe::raw_window_handle::RawWindowHandle;
use webframe::{
    CreationError, HeadlessBackend, Lifecycle, PlatformBackend, SizeHint, WebView, WindowConfig,
    STATUS_OK,
};

#[test]
fn test_cross_thread_terminate_unblocks_run() {
    let mut wv = WebView::builder().build();
    assert_eq!(wv.state(), Lifecycle::Created);

    let handle = wv.handle();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        handle.terminate();
    });

    wv.run();
    stopper.join().unwrap();
    assert_eq!(wv.state(), Lifecycle::Terminated);
}

#[test]
fn test_dispatch_executes_on_loop_thread_exactly_once() {
    let mut wv = WebView::builder().build();
    let handle = wv.handle();
    let loop_thread = thread::current().id();

    let runs = Arc::new(AtomicUsize::new(0));
    let observed = Arc::new(Mutex::new(None));
    let runs_in = Arc::clone(&runs);
    let observed_in = Arc::clone(&observed);

    let worker = thread::spawn(move || {
        handle.dispatch(move |_wv| {
            runs_in.fetch_add(1, Ordering::SeqCst);
            *observed_in.lock().unwrap() = Some(thread::current().id());
        });
        handle.terminate();
    });

    wv.run();
    worker.join().unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(observed.lock().unwrap().unwrap(), loop_thread);
}

#[test]
fn test_bridge_round_trip_through_the_run_loop() {
    let mut wv = WebView::builder().build();

    wv.bind("add", |wv, seq, args| {
        let (a, b): (f64, f64) = webframe::parse_args(args).expect("two numbers");
        wv.resolve(seq, STATUS_OK, &(a + b).to_string());
    });

    let results = Arc::new(Mutex::new(Vec::new()));
    let results_in = Arc::clone(&results);
    wv.bind("report", move |wv, seq, args| {
        let (value,): (f64,) = webframe::parse_args(args).expect("one number");
        results_in.lock().unwrap().push(value);
        wv.resolve(seq, STATUS_OK, "");
    });

    let handle = wv.handle();
    let driver = thread::spawn(move || {
        handle.dispatch(|wv| {
            wv.eval("add(2, 40).then(function (v) { report(v); });");
        });
        thread::sleep(Duration::from_millis(100));
        handle.terminate();
    });

    wv.run();
    driver.join().unwrap();
    assert_eq!(results.lock().unwrap().as_slice(), &[42.0]);
}

struct FailingBackend;

impl PlatformBackend for FailingBackend {
    fn initialize(&mut self, _config: &WindowConfig) -> Result<(), CreationError> {
        Err(CreationError::Window("no display available".to_string()))
    }

    fn set_title(&mut self, _title: &str) {
        unreachable!("native side effect on an unset instance");
    }

    fn set_size(&mut self, _width: u32, _height: u32, _hint: SizeHint) {
        unreachable!("native side effect on an unset instance");
    }

    fn navigate(&mut self, _url: &str) {
        unreachable!("native side effect on an unset instance");
    }

    fn set_html(&mut self, _html: &str) {
        unreachable!("native side effect on an unset instance");
    }

    fn window_handle(&self) -> Option<RawWindowHandle> {
        unreachable!("native side effect on an unset instance");
    }
}

#[test]
fn test_construction_failure_degrades_every_operation() {
    let mut wv = WebView::builder().backend(FailingBackend).build();
    assert_eq!(wv.state(), Lifecycle::Unset);

    wv.bind("noop", |_wv, _seq, _args| {});
    wv.init("globalThis.x = 1;");
    wv.eval("1 + 1;");
    wv.navigate("https://example.com");
    wv.set_html("<p>hi</p>");
    wv.set_title("ignored");
    wv.set_size(10, 10, SizeHint::None);
    wv.resolve("1", STATUS_OK, "");
    wv.terminate();
    wv.run();

    assert!(wv.window_handle().is_none());
    assert_eq!(wv.state(), Lifecycle::Unset);

    // Unset is terminal; destroy does not change it.
    wv.destroy();
    assert_eq!(wv.state(), Lifecycle::Unset);
}

struct RecordingBackend {
    ops: Arc<Mutex<Vec<String>>>,
}

impl PlatformBackend for RecordingBackend {
    fn initialize(&mut self, config: &WindowConfig) -> Result<(), CreationError> {
        self.ops.lock().unwrap().push(format!("init:{}", config.title));
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.ops.lock().unwrap().push(format!("title:{title}"));
    }

    fn set_size(&mut self, width: u32, height: u32, hint: SizeHint) {
        self.ops
            .lock()
            .unwrap()
            .push(format!("size:{width}x{height}:{hint:?}"));
    }

    fn navigate(&mut self, url: &str) {
        self.ops.lock().unwrap().push(format!("navigate:{url}"));
    }

    fn set_html(&mut self, html: &str) {
        self.ops.lock().unwrap().push(format!("html:{html}"));
    }

    fn window_handle(&self) -> Option<RawWindowHandle> {
        None
    }
}

#[test]
fn test_passthroughs_reach_backend_until_destroy() {
    let ops = Arc::new(Mutex::new(Vec::new()));
    let mut wv = WebView::builder()
        .title("demo")
        .backend(RecordingBackend {
            ops: Arc::clone(&ops),
        })
        .build();

    wv.set_title("renamed");
    wv.set_size(320, 240, SizeHint::Min);
    wv.navigate("https://example.com");
    wv.set_html("<p></p>");
    wv.destroy();
    wv.set_title("after destroy");

    assert_eq!(
        ops.lock().unwrap().as_slice(),
        &[
            "init:demo".to_string(),
            "title:renamed".to_string(),
            "size:320x240:Min".to_string(),
            "navigate:https://example.com".to_string(),
            "html:<p></p>".to_string(),
        ]
    );
}

#[test]
fn test_headless_backend_is_the_default() {
    let wv = WebView::builder().backend(HeadlessBackend::new()).build();
    assert_eq!(wv.state(), Lifecycle::Created);
    assert!(wv.window_handle().is_none());
}

#[test]
fn test_version_query_is_stateless() {
    let v = webframe::version();
    assert_eq!(v.to_string(), env!("CARGO_PKG_VERSION"));
}
