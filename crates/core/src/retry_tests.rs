// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

/// Minimal no-op executor: every future used in these tests resolves
/// immediately (no real I/O), so a single poll is always enough. Avoids
/// pulling an async runtime dependency into this pure-logic crate just
/// for tests.
fn block_on<F: Future>(mut fut: F) -> F::Output {
    fn noop(_: *const ()) {}
    fn clone(_: *const ()) -> RawWaker {
        raw_waker()
    }
    fn raw_waker() -> RawWaker {
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }
    let waker = unsafe { Waker::from_raw(raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    // SAFETY: `fut` is a local owned value we never move again.
    let mut fut = unsafe { Pin::new_unchecked(&mut fut) };
    loop {
        if let Poll::Ready(v) = fut.as_mut().poll(&mut cx) {
            return v;
        }
    }
}

#[test]
fn succeeds_on_first_try_without_retrying() {
    let calls = RefCell::new(0);
    let result: Result<i32, String> = block_on(retry(3, || {
        *calls.borrow_mut() += 1;
        async { Ok(42) }
    }));
    assert_eq!(result, Ok(42));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn always_failing_operation_is_invoked_exactly_n_times() {
    let calls = RefCell::new(0);
    let result: Result<i32, String> = block_on(retry(3, || {
        *calls.borrow_mut() += 1;
        async { Err("boom".to_string()) }
    }));
    assert_eq!(result, Err("boom".to_string()));
    assert_eq!(*calls.borrow(), 3);
}

#[test]
fn final_error_is_the_one_propagated() {
    let calls = RefCell::new(0);
    let result: Result<i32, String> = block_on(retry(3, || {
        let mut c = calls.borrow_mut();
        *c += 1;
        let n = *c;
        async move { Err(format!("attempt {n}")) }
    }));
    assert_eq!(result, Err("attempt 3".to_string()));
}

#[test]
fn succeeds_after_transient_failures() {
    let calls = RefCell::new(0);
    let result: Result<i32, String> = block_on(retry(5, || {
        let mut c = calls.borrow_mut();
        *c += 1;
        let n = *c;
        async move {
            if n < 3 {
                Err("not yet".to_string())
            } else {
                Ok(n)
            }
        }
    }));
    assert_eq!(result, Ok(3));
    assert_eq!(*calls.borrow(), 3);
}

#[test]
#[should_panic(expected = "max_attempts must be at least 1")]
fn zero_attempts_panics() {
    let _: Result<(), String> = block_on(retry(0, || async { Err("x".to_string()) }));
}
