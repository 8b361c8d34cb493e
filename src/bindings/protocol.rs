//! Bridge wire protocol.
//!
//! The page posts exactly one JSON message per invocation of a bound name:
//! `{"seq": "<id>", "name": "<binding>", "args": [...]}`. Native routing
//! decodes it here, hands the handler the argument array re-serialized as
//! JSON text, and correlates the eventual completion through the sequence
//! id.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::error::ArgsError;

/// Completion status for a successfully resolved call.
pub const STATUS_OK: i32 = 0;
/// Rejection status used by internal routing failures; any nonzero status
/// rejects.
pub const STATUS_ERROR: i32 = 1;

/// One script-side invocation of a bound name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptCall {
    pub seq: String,
    pub name: String,
    pub args: Vec<Value>,
}

/// Decode failure for an inbound bridge message.
///
/// Carries the sequence id when it could be recovered from the payload so
/// the call can be rejected instead of silently dropped.
#[derive(Debug)]
pub(crate) struct CallDecodeError {
    pub seq: Option<String>,
    pub reason: String,
}

pub(crate) fn decode_call(raw: &str) -> Result<ScriptCall, CallDecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(|err| CallDecodeError {
        seq: None,
        reason: err.to_string(),
    })?;
    let seq = value
        .get("seq")
        .and_then(Value::as_str)
        .map(str::to_string);
    serde_json::from_value(value).map_err(|err| CallDecodeError {
        seq,
        reason: err.to_string(),
    })
}

/// Session-wide sequence id allocator.
///
/// Ids are unique, strictly increasing and never reused; the allocator
/// survives page navigations, so ids stay monotonic for the lifetime of the
/// instance.
#[derive(Debug)]
pub(crate) struct SequenceAllocator {
    next: AtomicU64,
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

/// Decodes a JSON argument array into typed handler arguments.
///
/// Tuples map onto the array positionally, so a binding taking two numbers
/// is decoded with `parse_args::<(f64, f64)>(args)`. Malformed or missing
/// arguments surface as [`ArgsError`]; the handler should reject the call
/// with the error message rather than panic.
pub fn parse_args<'a, T>(raw: &'a str) -> Result<T, ArgsError>
where
    T: Deserialize<'a>,
{
    serde_json::from_str(raw).map_err(ArgsError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_call() {
        let call = decode_call(r#"{"seq":"7","name":"add","args":[2,3]}"#).unwrap();
        assert_eq!(call.seq, "7");
        assert_eq!(call.name, "add");
        assert_eq!(call.args.len(), 2);
    }

    #[test]
    fn test_decode_recovers_seq_from_bad_args() {
        let err = decode_call(r#"{"seq":"9","name":"add","args":5}"#).unwrap_err();
        assert_eq!(err.seq.as_deref(), Some("9"));
    }

    #[test]
    fn test_decode_missing_args_is_an_error() {
        let err = decode_call(r#"{"seq":"3","name":"add"}"#).unwrap_err();
        assert_eq!(err.seq.as_deref(), Some("3"));
    }

    #[test]
    fn test_decode_garbage_has_no_seq() {
        let err = decode_call("not json").unwrap_err();
        assert!(err.seq.is_none());
    }

    #[test]
    fn test_sequence_ids_are_strictly_increasing() {
        let alloc = SequenceAllocator::new();
        let ids: Vec<u64> = (0..100).map(|_| alloc.allocate()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_parse_args_tuple() {
        let (a, b): (f64, String) = parse_args(r#"[1.5, "x"]"#).unwrap();
        assert_eq!(a, 1.5);
        assert_eq!(b, "x");
    }

    #[test]
    fn test_parse_args_rejects_malformed_payload() {
        assert!(parse_args::<(f64, f64)>("[1]").is_err());
        assert!(parse_args::<(f64,)>("not json").is_err());
    }
}
