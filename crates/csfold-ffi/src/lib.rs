//! C FFI bindings for csfold-core
//!
//! This crate lets a host build system run a merge and forward the outcome to
//! its own log. The host passes a JSON-encoded `GenerateRequest` and reads back
//! a list of messages tagged with build-log severities.

use csfold_core::{generate, GenerateRequest};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Severity of a message, mirroring host build-log levels
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiMessageLevel {
    Info = 0,
    Warning = 1,
    Error = 2,
}

struct Message {
    level: FfiMessageLevel,
    text: String,
}

/// Opaque handle to the outcome of a generate run
pub struct FfiGenerateResult {
    succeeded: bool,
    messages: Vec<Message>,
}

impl FfiGenerateResult {
    fn from_request(request: &GenerateRequest) -> Self {
        match generate(request) {
            Ok(report) => {
                let mut messages: Vec<Message> = report
                    .warnings()
                    .into_iter()
                    .map(|text| Message {
                        level: FfiMessageLevel::Warning,
                        text,
                    })
                    .collect();
                messages.push(Message {
                    level: FfiMessageLevel::Info,
                    text: format!("Created merged C# file: {}", report.output_file.display()),
                });
                Self {
                    succeeded: true,
                    messages,
                }
            }
            Err(e) => Self::failed(e.to_string()),
        }
    }

    fn failed(text: String) -> Self {
        Self {
            succeeded: false,
            messages: vec![Message {
                level: FfiMessageLevel::Error,
                text,
            }],
        }
    }

    fn error(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.level == FfiMessageLevel::Error)
            .map(|m| m.text.as_str())
    }
}

/// Run a merge described by a JSON `GenerateRequest`
///
/// # Safety
/// - `request_json` must be a valid C string
/// - Returns null only if the pointer is null; a request that is not UTF-8 or
///   not valid JSON yields a failed result carrying the error message
/// - Caller must free the result with `csfold_free_result`
#[no_mangle]
pub unsafe extern "C" fn csfold_generate(request_json: *const c_char) -> *mut FfiGenerateResult {
    if request_json.is_null() {
        return ptr::null_mut();
    }

    let result = match CStr::from_ptr(request_json).to_str() {
        Ok(json) => match serde_json::from_str::<GenerateRequest>(json) {
            Ok(request) => FfiGenerateResult::from_request(&request),
            Err(e) => FfiGenerateResult::failed(format!("invalid generate request: {e}")),
        },
        Err(e) => FfiGenerateResult::failed(format!("generate request is not valid UTF-8: {e}")),
    };

    Box::into_raw(Box::new(result))
}

/// Free a generate result
///
/// # Safety
/// - `result` must be a valid pointer returned by `csfold_generate` or null
#[no_mangle]
pub unsafe extern "C" fn csfold_free_result(result: *mut FfiGenerateResult) {
    if !result.is_null() {
        drop(Box::from_raw(result));
    }
}

/// Whether the merged file was written
///
/// # Safety
/// - `result` must be a valid pointer returned by `csfold_generate`
#[no_mangle]
pub unsafe extern "C" fn csfold_result_succeeded(result: *const FfiGenerateResult) -> bool {
    if result.is_null() {
        return false;
    }
    (*result).succeeded
}

/// Get the number of log messages
///
/// # Safety
/// - `result` must be a valid pointer returned by `csfold_generate`
#[no_mangle]
pub unsafe extern "C" fn csfold_result_message_count(result: *const FfiGenerateResult) -> usize {
    if result.is_null() {
        return 0;
    }
    (*result).messages.len()
}

/// Get the severity of a log message; out-of-range indexes report `Error`
///
/// # Safety
/// - `result` must be a valid pointer returned by `csfold_generate`
#[no_mangle]
pub unsafe extern "C" fn csfold_result_message_level(
    result: *const FfiGenerateResult,
    index: usize,
) -> FfiMessageLevel {
    if result.is_null() {
        return FfiMessageLevel::Error;
    }
    (&(*result).messages)
        .get(index)
        .map(|m| m.level)
        .unwrap_or(FfiMessageLevel::Error)
}

/// Get a log message by index
///
/// # Safety
/// - `result` must be a valid pointer returned by `csfold_generate`
/// - Returns null if index is out of bounds
/// - Caller must free the returned string with `csfold_free_string`
#[no_mangle]
pub unsafe extern "C" fn csfold_result_message(
    result: *const FfiGenerateResult,
    index: usize,
) -> *mut c_char {
    if result.is_null() {
        return ptr::null_mut();
    }

    (&(*result).messages)
        .get(index)
        .and_then(|m| CString::new(m.text.as_str()).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Get the error message of a failed run
///
/// # Safety
/// - `result` must be a valid pointer returned by `csfold_generate`
/// - Returns null if the run succeeded
/// - Caller must free the returned string with `csfold_free_string`
#[no_mangle]
pub unsafe extern "C" fn csfold_result_error(result: *const FfiGenerateResult) -> *mut c_char {
    if result.is_null() {
        return ptr::null_mut();
    }

    (*result)
        .error()
        .and_then(|e| CString::new(e).ok())
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a csfold_* function or null
#[no_mangle]
pub unsafe extern "C" fn csfold_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
