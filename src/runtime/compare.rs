//! Equality and ordering over holders.
//!
//! `__eq__`/`__lt__` on the left instance win; otherwise primitive payloads
//! of the same variant compare directly. The remaining relations derive
//! from `equal` and `less`.

use super::class::{self, EQ_METHOD, LT_METHOD};
use super::context::Context;
use super::error::{RuntimeError, Unwind};
use super::value::{Holder, Value, is_true};

pub fn equal(lhs: &Holder, rhs: &Holder, context: &mut dyn Context) -> Result<bool, Unwind> {
    if lhs.is_none() && rhs.is_none() {
        return Ok(true);
    }
    if let Some(Value::Instance(object)) = lhs.get()
        && object.has_method(EQ_METHOD, 1)
    {
        let result = class::call_method(lhs, EQ_METHOD, vec![rhs.clone()], context)?;
        return Ok(is_true(&result));
    }
    match (lhs.get(), rhs.get()) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => Ok(a == b),
        (Some(Value::String(a)), Some(Value::String(b))) => Ok(a == b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => Ok(a == b),
        _ => Err(RuntimeError::NotComparable {
            relation: "equality",
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        }
        .into()),
    }
}

pub fn less(lhs: &Holder, rhs: &Holder, context: &mut dyn Context) -> Result<bool, Unwind> {
    if let Some(Value::Instance(object)) = lhs.get()
        && object.has_method(LT_METHOD, 1)
    {
        let result = class::call_method(lhs, LT_METHOD, vec![rhs.clone()], context)?;
        return Ok(is_true(&result));
    }
    match (lhs.get(), rhs.get()) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => Ok(a < b),
        (Some(Value::String(a)), Some(Value::String(b))) => Ok(a < b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => Ok(a < b),
        _ => Err(RuntimeError::NotComparable {
            relation: "ordering",
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        }
        .into()),
    }
}

pub fn not_equal(lhs: &Holder, rhs: &Holder, context: &mut dyn Context) -> Result<bool, Unwind> {
    Ok(!equal(lhs, rhs, context)?)
}

pub fn greater(lhs: &Holder, rhs: &Holder, context: &mut dyn Context) -> Result<bool, Unwind> {
    Ok(!less(lhs, rhs, context)? && not_equal(lhs, rhs, context)?)
}

pub fn less_or_equal(lhs: &Holder, rhs: &Holder, context: &mut dyn Context) -> Result<bool, Unwind> {
    Ok(!greater(lhs, rhs, context)?)
}

pub fn greater_or_equal(
    lhs: &Holder,
    rhs: &Holder,
    context: &mut dyn Context,
) -> Result<bool, Unwind> {
    Ok(!less(lhs, rhs, context)?)
}
