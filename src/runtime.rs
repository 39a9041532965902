//! Shared runtime value and object model used by the evaluator.
//!
//! This module contains the polymorphic `Value`, the shareable `Holder`
//! handle, class/method machinery with special-method dispatch, comparison
//! semantics, and the output `Context`.
pub mod class;
pub mod compare;
pub mod context;
pub mod error;
pub mod value;

pub use class::{Class, Method, call_method};
pub use context::{CaptureContext, Context, StreamContext};
pub use error::{ExecResult, RuntimeError, Unwind};
pub use value::{Closure, Holder, Instance, Value, is_true, render};
