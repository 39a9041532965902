//! AST statement nodes and their tree-walking evaluation.
//!
//! Every node evaluates to a `Holder` against a closure and a context. The
//! only non-local control is the `Unwind::Return` carrier, raised by
//! `Return` and converted back into a plain value by the `MethodBody`
//! wrapper around each method.

use std::io::Write as _;
use std::rc::Rc;

use crate::runtime::class::{self, ADD_METHOD, INIT_METHOD};
use crate::runtime::{
    Class, Closure, Context, ExecResult, Holder, Instance, RuntimeError, Unwind, Value, compare,
    is_true, render,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    NotEq,
    Less,
    Greater,
    LessOrEq,
    GreaterOrEq,
}

#[derive(Debug, Clone)]
pub enum Statement {
    /// Literal value; evaluation yields a share of the held value.
    Constant(Holder),
    /// Binds the result of `rhs` in the current closure under `var`.
    Assignment { var: String, rhs: Box<Statement> },
    /// Dotted lookup: `ids[0]` in the closure, each following identifier in
    /// the preceding instance's fields.
    VariableValue { ids: Vec<String> },
    FieldAssignment {
        object: Box<Statement>,
        field: String,
        rhs: Box<Statement>,
    },
    Print { args: Vec<Statement> },
    MethodCall {
        object: Box<Statement>,
        method: String,
        args: Vec<Statement>,
    },
    NewInstance {
        class: Rc<Class>,
        args: Vec<Statement>,
    },
    /// Binds the class value into the closure under its own name.
    ClassDefinition { class: Rc<Class> },
    Stringify { argument: Box<Statement> },
    Add { lhs: Box<Statement>, rhs: Box<Statement> },
    Sub { lhs: Box<Statement>, rhs: Box<Statement> },
    Mult { lhs: Box<Statement>, rhs: Box<Statement> },
    Div { lhs: Box<Statement>, rhs: Box<Statement> },
    And { lhs: Box<Statement>, rhs: Box<Statement> },
    Or { lhs: Box<Statement>, rhs: Box<Statement> },
    Not { argument: Box<Statement> },
    Comparison {
        op: Comparator,
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },
    IfElse {
        condition: Box<Statement>,
        then_body: Box<Statement>,
        else_body: Option<Box<Statement>>,
    },
    Compound(Vec<Statement>),
    Return(Box<Statement>),
    /// Wraps a method body; catches a `Return` raised inside and turns it
    /// into the method's result.
    MethodBody(Box<Statement>),
    None,
}

impl Statement {
    pub fn execute(&self, closure: &mut Closure, context: &mut dyn Context) -> ExecResult {
        match self {
            Self::Constant(value) => Ok(value.clone()),
            Self::Assignment { var, rhs } => {
                let value = rhs.execute(closure, context)?;
                closure.insert(var.clone(), value.clone());
                Ok(value)
            }
            Self::VariableValue { ids } => {
                let Some((first, rest)) = ids.split_first() else {
                    return Ok(Holder::none());
                };
                let mut value = closure.get(first).cloned().ok_or_else(|| {
                    RuntimeError::UndefinedVariable { name: first.clone() }
                })?;
                for name in rest {
                    let field = {
                        let Some(Value::Instance(object)) = value.get() else {
                            return Err(RuntimeError::NotAnInstance {
                                type_name: value.type_name(),
                            }
                            .into());
                        };
                        object.fields().get(name).cloned()
                    };
                    value = field.ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: name.clone(),
                    })?;
                }
                Ok(value)
            }
            Self::FieldAssignment { object, field, rhs } => {
                let target = object.execute(closure, context)?;
                let value = rhs.execute(closure, context)?;
                let Some(Value::Instance(instance)) = target.get() else {
                    return Err(RuntimeError::NotAnInstance {
                        type_name: target.type_name(),
                    }
                    .into());
                };
                instance.fields_mut().insert(field.clone(), value.clone());
                Ok(value)
            }
            Self::Print { args } => {
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    let value = arg.execute(closure, context)?;
                    rendered.push(render(&value, context)?);
                }
                writeln!(context.output(), "{}", rendered.join(" ")).map_err(|error| {
                    RuntimeError::OutputFailure {
                        message: error.to_string(),
                    }
                })?;
                Ok(Holder::none())
            }
            Self::MethodCall {
                object,
                method,
                args,
            } => {
                let receiver = object.execute(closure, context)?;
                let mut actual_args = Vec::with_capacity(args.len());
                for arg in args {
                    actual_args.push(arg.execute(closure, context)?);
                }
                class::call_method(&receiver, method, actual_args, context)
            }
            Self::NewInstance { class, args } => {
                let instance = Holder::own(Value::Instance(Instance::new(Rc::clone(class))));
                let matching_init = class
                    .find_method(INIT_METHOD)
                    .is_some_and(|init| init.formal_params.len() == args.len());
                if matching_init {
                    let mut actual_args = Vec::with_capacity(args.len());
                    for arg in args {
                        actual_args.push(arg.execute(closure, context)?);
                    }
                    class::call_method(&instance, INIT_METHOD, actual_args, context)?;
                }
                Ok(instance)
            }
            Self::ClassDefinition { class } => {
                let value = Holder::own(Value::Class(Rc::clone(class)));
                closure.insert(class.name().to_string(), value.clone());
                Ok(value)
            }
            Self::Stringify { argument } => {
                let value = argument.execute(closure, context)?;
                Ok(Holder::own(Value::String(render(&value, context)?)))
            }
            Self::Add { lhs, rhs } => {
                let lhs_value = lhs.execute(closure, context)?;
                let rhs_value = rhs.execute(closure, context)?;
                match (lhs_value.get(), rhs_value.get()) {
                    (Some(Value::Number(a)), Some(Value::Number(b))) => {
                        Ok(Holder::own(Value::Number(a.wrapping_add(*b))))
                    }
                    (Some(Value::String(a)), Some(Value::String(b))) => {
                        Ok(Holder::own(Value::String(format!("{a}{b}"))))
                    }
                    (Some(Value::Instance(object)), _) if object.has_method(ADD_METHOD, 1) => {
                        class::call_method(&lhs_value, ADD_METHOD, vec![rhs_value.clone()], context)
                    }
                    _ => Err(RuntimeError::UnsupportedOperands {
                        operation: "addition",
                        lhs: lhs_value.type_name(),
                        rhs: rhs_value.type_name(),
                    }
                    .into()),
                }
            }
            Self::Sub { lhs, rhs } => {
                binary_numeric(lhs, rhs, closure, context, "subtraction", i64::wrapping_sub)
            }
            Self::Mult { lhs, rhs } => {
                binary_numeric(lhs, rhs, closure, context, "multiplication", i64::wrapping_mul)
            }
            Self::Div { lhs, rhs } => {
                let lhs_value = lhs.execute(closure, context)?;
                let rhs_value = rhs.execute(closure, context)?;
                match (lhs_value.get(), rhs_value.get()) {
                    (Some(Value::Number(_)), Some(Value::Number(0))) => {
                        Err(RuntimeError::DivisionByZero.into())
                    }
                    (Some(Value::Number(a)), Some(Value::Number(b))) => {
                        Ok(Holder::own(Value::Number(a.wrapping_div(*b))))
                    }
                    _ => Err(RuntimeError::UnsupportedOperands {
                        operation: "division",
                        lhs: lhs_value.type_name(),
                        rhs: rhs_value.type_name(),
                    }
                    .into()),
                }
            }
            // And/Or evaluate both operands, always; there is no short
            // circuit in the Language.
            Self::And { lhs, rhs } => {
                let lhs_value = lhs.execute(closure, context)?;
                let rhs_value = rhs.execute(closure, context)?;
                Ok(Holder::own(Value::Bool(
                    is_true(&lhs_value) && is_true(&rhs_value),
                )))
            }
            Self::Or { lhs, rhs } => {
                let lhs_value = lhs.execute(closure, context)?;
                let rhs_value = rhs.execute(closure, context)?;
                Ok(Holder::own(Value::Bool(
                    is_true(&lhs_value) || is_true(&rhs_value),
                )))
            }
            Self::Not { argument } => {
                let value = argument.execute(closure, context)?;
                Ok(Holder::own(Value::Bool(!is_true(&value))))
            }
            Self::Comparison { op, lhs, rhs } => {
                let lhs_value = lhs.execute(closure, context)?;
                let rhs_value = rhs.execute(closure, context)?;
                let result = match op {
                    Comparator::Eq => compare::equal(&lhs_value, &rhs_value, context)?,
                    Comparator::NotEq => compare::not_equal(&lhs_value, &rhs_value, context)?,
                    Comparator::Less => compare::less(&lhs_value, &rhs_value, context)?,
                    Comparator::Greater => compare::greater(&lhs_value, &rhs_value, context)?,
                    Comparator::LessOrEq => {
                        compare::less_or_equal(&lhs_value, &rhs_value, context)?
                    }
                    Comparator::GreaterOrEq => {
                        compare::greater_or_equal(&lhs_value, &rhs_value, context)?
                    }
                };
                Ok(Holder::own(Value::Bool(result)))
            }
            Self::IfElse {
                condition,
                then_body,
                else_body,
            } => {
                let condition = condition.execute(closure, context)?;
                if is_true(&condition) {
                    then_body.execute(closure, context)
                } else if let Some(else_body) = else_body {
                    else_body.execute(closure, context)
                } else {
                    Ok(Holder::none())
                }
            }
            Self::Compound(statements) => {
                for statement in statements {
                    statement.execute(closure, context)?;
                }
                Ok(Holder::none())
            }
            Self::Return(expression) => {
                Err(Unwind::Return(expression.execute(closure, context)?))
            }
            Self::MethodBody(body) => match body.execute(closure, context) {
                Err(Unwind::Return(value)) => Ok(value),
                Ok(_) => Ok(Holder::none()),
                Err(other) => Err(other),
            },
            Self::None => Ok(Holder::none()),
        }
    }
}

fn binary_numeric(
    lhs: &Statement,
    rhs: &Statement,
    closure: &mut Closure,
    context: &mut dyn Context,
    operation: &'static str,
    apply: fn(i64, i64) -> i64,
) -> ExecResult {
    let lhs_value = lhs.execute(closure, context)?;
    let rhs_value = rhs.execute(closure, context)?;
    match (lhs_value.get(), rhs_value.get()) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            Ok(Holder::own(Value::Number(apply(*a, *b))))
        }
        _ => Err(RuntimeError::UnsupportedOperands {
            operation,
            lhs: lhs_value.type_name(),
            rhs: rhs_value.type_name(),
        }
        .into()),
    }
}
