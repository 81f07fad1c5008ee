//! C binding for [`temposync`]: a streaming, pitch-preserving time-domain
//! audio speed changer.
//!
//! Mirrors the six-operation opaque-handle shape of the Rust API: `create`
//! returns `NULL` on invalid arguments, `write`/`flush` return a boolean
//! (`0`/`1`) success code, `read`/`samples_available` are infallible. Null
//! handles are a caller bug, not a recoverable condition, and panic -- the
//! same discipline the Rust API's own null checks would enforce if this
//! were safe Rust.

use std::slice;

use libc::{c_int, size_t};
use temposync::{NoDiagnostics, Stream};

/// Opaque handle to a [`temposync::Stream`].
pub type TemposyncStream = Stream<NoDiagnostics>;

#[no_mangle]
pub extern "C" fn temposync_stream_new(
    speed: f32,
    sample_rate: u32,
) -> *mut TemposyncStream {
    match Stream::new(speed, sample_rate) {
        Ok(stream) => Box::into_raw(Box::new(stream)),
        Err(_) => std::ptr::null_mut(),
    }
}

#[no_mangle]
pub unsafe extern "C" fn temposync_stream_free(stream: *mut TemposyncStream) {
    if stream.is_null() {
        panic!("temposync_stream_free: stream cannot be NULL!");
    }
    drop(unsafe { Box::from_raw(stream) });
}

#[no_mangle]
pub unsafe extern "C" fn temposync_stream_write(
    stream: *mut TemposyncStream,
    samples: *const f32,
    count: size_t,
) -> c_int {
    if stream.is_null() {
        panic!("temposync_stream_write: stream cannot be NULL!");
    }
    let stream = unsafe { stream.as_mut().unwrap() };
    let samples = if count == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(samples, count) }
    };
    stream.write(samples).is_ok() as c_int
}

#[no_mangle]
pub unsafe extern "C" fn temposync_stream_read(
    stream: *mut TemposyncStream,
    buf: *mut f32,
    max_count: size_t,
) -> size_t {
    if stream.is_null() {
        panic!("temposync_stream_read: stream cannot be NULL!");
    }
    let stream = unsafe { stream.as_mut().unwrap() };
    if max_count == 0 {
        return 0;
    }
    let buf = unsafe { slice::from_raw_parts_mut(buf, max_count) };
    stream.read(buf) as size_t
}

#[no_mangle]
pub unsafe extern "C" fn temposync_stream_flush(
    stream: *mut TemposyncStream,
) -> c_int {
    if stream.is_null() {
        panic!("temposync_stream_flush: stream cannot be NULL!");
    }
    let stream = unsafe { stream.as_mut().unwrap() };
    stream.flush().is_ok() as c_int
}

#[no_mangle]
pub unsafe extern "C" fn temposync_stream_samples_available(
    stream: *mut TemposyncStream,
) -> size_t {
    if stream.is_null() {
        panic!("temposync_stream_samples_available: stream cannot be NULL!");
    }
    let stream = unsafe { stream.as_ref().unwrap() };
    stream.samples_available() as size_t
}
