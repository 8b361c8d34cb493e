//! Minimal end-to-end demo: one bound native function, an init script, a
//! background thread driving the loop, and a clean shutdown.
//!
//! Run with `cargo run --example calculator`.

use std::thread;
use std::time::Duration;

use webframe::{WebView, STATUS_ERROR, STATUS_OK};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut webview = WebView::builder().title("calculator").size(480, 320).build();

    webview.bind("add", |webview, seq, args| {
        match webframe::parse_args::<(f64, f64)>(args) {
            Ok((a, b)) => webview.resolve(seq, STATUS_OK, &(a + b).to_string()),
            Err(err) => webview.resolve(seq, STATUS_ERROR, &err.to_string()),
        }
    });

    webview.init("console.log('bridge ready');");
    webview.set_html("<!doctype html><p>calculator</p>");
    webview.eval("add(2, 40).then(function (sum) { console.log('sum: ' + sum); });");

    let handle = webview.handle();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        handle.terminate();
    });

    webview.run();
    Ok(())
}
