/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Thread-scoped nested diagnostic context.
//!
//! Convenience layer over [`DiagnosticContext`] for code that prefers ambient context
//! over passing it explicitly. [`LogEvent::capture`](crate::LogEvent::capture) and the
//! `log` bridge snapshot this stack when an event is emitted.
//!
//! ```
//! use keyed_appender::ndc;
//!
//! {
//!     let _guard = ndc::push("tenant-a");
//!     assert_eq!(ndc::snapshot().render().as_deref(), Some("tenant-a"));
//! }
//! assert_eq!(ndc::depth(), 0);
//! ```

use crate::diagnostic_context::DiagnosticContext;
use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static CONTEXT: RefCell<DiagnosticContext> = RefCell::new(DiagnosticContext::new());
}

/// Restores the thread's context to the depth it had before the matching [`push`].
#[must_use = "dropping the guard immediately pops the frame again"]
pub struct NdcGuard {
    depth_before: usize,
    // Guards belong to the thread whose stack they restore.
    _not_send: PhantomData<*const ()>,
}

impl Drop for NdcGuard {
    fn drop(&mut self) {
        CONTEXT.with(|context| context.borrow_mut().truncate(self.depth_before));
    }
}

/// Pushes a frame onto this thread's context until the returned guard is dropped.
pub fn push(frame: impl Into<String>) -> NdcGuard {
    let depth_before = CONTEXT.with(|context| {
        let mut context = context.borrow_mut();
        let depth = context.depth();
        context.push(frame);
        depth
    });
    NdcGuard {
        depth_before,
        _not_send: PhantomData,
    }
}

pub fn pop() -> Option<String> {
    CONTEXT.with(|context| context.borrow_mut().pop())
}

pub fn clear() {
    CONTEXT.with(|context| context.borrow_mut().clear());
}

pub fn depth() -> usize {
    CONTEXT.with(|context| context.borrow().depth())
}

/// Copies this thread's current context.
pub fn snapshot() -> DiagnosticContext {
    CONTEXT.with(|context| context.borrow().clone())
}
