use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use super::class::{self, Class, STR_METHOD};
use super::context::Context;
use super::error::Unwind;

/// A scope of bindings: variable name to value holder.
pub type Closure = HashMap<String, Holder>;

/// A runtime value. The closed set of variants replaces a downcast-driven
/// object hierarchy; consumers pattern match instead.
#[derive(Debug)]
pub enum Value {
    Number(i64),
    String(String),
    Bool(bool),
    Class(Rc<Class>),
    Instance(Instance),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }
}

/// A shareable handle to a heap-allocated value. The empty holder is the
/// Language's `None`. Cloning a holder shares the underlying allocation;
/// `own` is the allocating flavor.
#[derive(Debug, Clone, Default)]
pub struct Holder(Option<Rc<Value>>);

impl Holder {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn own(value: Value) -> Self {
        Self(Some(Rc::new(value)))
    }

    pub fn get(&self) -> Option<&Value> {
        self.0.as_deref()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn type_name(&self) -> &'static str {
        self.get().map_or("NoneType", Value::type_name)
    }
}

/// An object of a user-defined class: a class reference plus a mutable
/// closure of fields.
#[derive(Debug)]
pub struct Instance {
    class: Rc<Class>,
    fields: RefCell<Closure>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Self {
            class,
            fields: RefCell::new(Closure::new()),
        }
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    pub fn fields(&self) -> Ref<'_, Closure> {
        self.fields.borrow()
    }

    pub fn fields_mut(&self) -> RefMut<'_, Closure> {
        self.fields.borrow_mut()
    }

    /// True when the class chain defines `name` with exactly
    /// `argument_count` formal parameters.
    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        self.class
            .find_method(name)
            .is_some_and(|method| method.formal_params.len() == argument_count)
    }
}

/// Truthiness: non-zero numbers, non-empty strings, and `True` are truthy;
/// everything else, including `None`, classes, and instances, is falsy.
pub fn is_true(value: &Holder) -> bool {
    match value.get() {
        Some(Value::Number(n)) => *n != 0,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

/// Produces the printed form of a value. An instance with a zero-argument
/// `__str__` renders through it; otherwise the allocation address stands in
/// as a stable identity.
pub fn render(value: &Holder, context: &mut dyn Context) -> Result<String, Unwind> {
    let Some(inner) = value.get() else {
        return Ok("None".to_string());
    };
    match inner {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(if *b { "True" } else { "False" }.to_string()),
        Value::Class(class) => Ok(format!("Class {}", class.name())),
        Value::Instance(instance) => {
            if instance.has_method(STR_METHOD, 0) {
                let result = class::call_method(value, STR_METHOD, Vec::new(), context)?;
                render(&result, context)
            } else {
                Ok(format!("{:p}", instance as *const Instance))
            }
        }
    }
}
