//! JavaScript injected into every page context.
//!
//! The bootstrap runs before any page script and installs the `__webframe`
//! bridge object: a pending-promise table keyed by sequence id, the `call`
//! entry used by binding stubs, and the `resolve` entry driven from native
//! code. Two native functions back it: `__webframe_seq()` hands out sequence
//! ids and `__webframe_post(message)` delivers one serialized invocation to
//! the native side.

pub(crate) const BOOTSTRAP: &str = r#"
globalThis.__webframe = {
    pending: {},
    call: function (name, args) {
        var seq = __webframe_seq();
        var entry = {};
        var promise = new Promise(function (resolve, reject) {
            entry.resolve = resolve;
            entry.reject = reject;
        });
        this.pending[seq] = entry;
        __webframe_post(JSON.stringify({ seq: seq, name: name, args: args }));
        return promise;
    },
    resolve: function (seq, status, value) {
        var entry = this.pending[seq];
        if (!entry) { return; }
        delete this.pending[seq];
        if (status === 0) { entry.resolve(value); } else { entry.reject(value); }
    }
};
"#;

/// Global stub exposing a bound name to page script.
pub(crate) fn binding_stub(name: &str) -> String {
    let quoted = js_quote(name);
    format!(
        "globalThis[{quoted}] = function () {{ \
         return __webframe.call({quoted}, Array.prototype.slice.call(arguments)); }};"
    )
}

/// Removes the page-global stub for an unbound name.
pub(crate) fn binding_teardown(name: &str) -> String {
    format!("delete globalThis[{}];", js_quote(name))
}

/// Completion script: resolve with the script "no value" primitive.
pub(crate) fn resolve_undefined(seq: &str) -> String {
    format!("__webframe.resolve({}, 0, undefined);", js_quote(seq))
}

/// Completion script: resolve with an already-validated JSON value.
pub(crate) fn resolve_value(seq: &str, value: &serde_json::Value) -> String {
    format!("__webframe.resolve({}, 0, ({}));", js_quote(seq), value)
}

/// Completion script: reject with the raw payload string.
pub(crate) fn reject(seq: &str, status: i32, payload: &str) -> String {
    format!(
        "__webframe.resolve({}, {}, {});",
        js_quote(seq),
        status,
        js_quote(payload)
    )
}

/// Escapes a string into a double-quoted JS literal. The escaping is
/// JSON-compatible, so the output is also a valid JSON string.
pub(crate) fn js_quote(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('"');
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stub_routes_through_the_bridge() {
        let stub = binding_stub("add");
        assert!(stub.contains("globalThis[\"add\"]"));
        assert!(stub.contains("__webframe.call(\"add\""));
    }

    #[test]
    fn test_reject_script_quotes_payload() {
        let script = reject("5", 7, "boom");
        assert_eq!(script, "__webframe.resolve(\"5\", 7, \"boom\");");
    }

    #[test]
    fn test_quote_escapes_specials() {
        assert_eq!(js_quote("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"");
    }

    proptest! {
        #[test]
        fn test_quoting_round_trips(s in ".*") {
            let quoted = js_quote(&s);
            let parsed: String = serde_json::from_str(&quoted).unwrap();
            prop_assert_eq!(parsed, s);
        }
    }
}
