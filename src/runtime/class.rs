use std::rc::Rc;

use crate::ast::Statement;

use super::context::Context;
use super::error::{ExecResult, RuntimeError};
use super::value::{Closure, Holder, Value};

pub(crate) const INIT_METHOD: &str = "__init__";
pub(crate) const STR_METHOD: &str = "__str__";
pub(crate) const EQ_METHOD: &str = "__eq__";
pub(crate) const LT_METHOD: &str = "__lt__";
pub(crate) const ADD_METHOD: &str = "__add__";

/// A named method. The parser wraps every body in `Statement::MethodBody`
/// so a `return` inside it resolves to the method's result.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Statement,
}

/// A user-defined class: a method list and an optional parent. Single
/// inheritance keeps the chain acyclic, so plain reference counting holds
/// it together.
#[derive(Debug)]
pub struct Class {
    name: String,
    methods: Vec<Method>,
    parent: Option<Rc<Class>>,
}

impl Class {
    pub fn new(name: String, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
        Self {
            name,
            methods,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves `name` against the own method list first, then the ancestor
    /// chain; the first match wins.
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        let mut class = self;
        loop {
            if let Some(method) = class.methods.iter().find(|method| method.name == name) {
                return Some(method);
            }
            match &class.parent {
                Some(parent) => class = parent,
                None => return None,
            }
        }
    }
}

/// Invokes `method` on an instance with `self` bound to a share of the
/// instance and formals bound positionally. Absent methods and arity
/// mismatches are both "no such method".
pub fn call_method(
    instance: &Holder,
    method: &str,
    actual_args: Vec<Holder>,
    context: &mut dyn Context,
) -> ExecResult {
    let Some(Value::Instance(object)) = instance.get() else {
        return Err(RuntimeError::NotAnInstance {
            type_name: instance.type_name(),
        }
        .into());
    };

    let class = object.class();
    let resolved = class
        .find_method(method)
        .filter(|resolved| resolved.formal_params.len() == actual_args.len())
        .ok_or_else(|| RuntimeError::UnknownMethod {
            method: method.to_string(),
            class: class.name().to_string(),
        })?;

    let mut closure = Closure::new();
    closure.insert("self".to_string(), instance.clone());
    for (param, arg) in resolved.formal_params.iter().zip(actual_args) {
        closure.insert(param.clone(), arg);
    }
    resolved.body.execute(&mut closure, context)
}
