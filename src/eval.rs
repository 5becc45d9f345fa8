//! Tree-walking evaluator over caller contexts and a builtin whitelist.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value as JsonValue;

use crate::ast::{BinaryOp, Expr, Program, UnaryOp};
use crate::builtins::{default_builtins, Builtins};
use crate::error::ExprError;
use crate::value::{parse_number, Callable, Value};

/// Caller-supplied variable bindings, consulted before the builtin
/// registry; a context entry shadows a builtin of the same name.
pub type Context = BTreeMap<String, Value>;

/// Builds a context from the top-level keys of a JSON object.
pub fn context_from_json(value: &JsonValue) -> Result<Context, ExprError> {
    match value.as_object() {
        Some(map) => Ok(map
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_json(value)))
            .collect()),
        None => Err(ExprError::Type(
            "context must be a JSON object".to_string(),
        )),
    }
}

/// Bound evaluator: fixes the builtin whitelist once at construction, then
/// evaluates any number of programs against any number of contexts.
///
/// Evaluation is a pure, read-only walk; a `Program` may be shared and
/// re-evaluated freely.
pub struct Evaluator {
    builtins: Builtins,
}

impl Evaluator {
    /// Evaluator with the standard builtin library.
    pub fn new() -> Self {
        Self {
            builtins: default_builtins(),
        }
    }

    /// Evaluator with caller-supplied builtins merged over the standard
    /// library. Caller entries win on name collision.
    pub fn with_builtins(overrides: Builtins) -> Self {
        let mut builtins = default_builtins();
        builtins.extend(overrides);
        Self { builtins }
    }

    pub fn evaluate(&self, program: &Program, context: &Context) -> Result<Value, ExprError> {
        self.eval_expr(&program.expression, context)
    }

    /// Parses and evaluates in one step.
    pub fn eval_source(&self, source: &str, context: &Context) -> Result<Value, ExprError> {
        let program = crate::parser::parse(source)?;
        self.evaluate(&program, context)
    }

    fn eval_expr(&self, expr: &Expr, context: &Context) -> Result<Value, ExprError> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::Ident(name) => self.resolve_ident(name, context),
            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand, context)?;
                eval_unary(*op, value)
            }
            Expr::Binary { op, left, right } => {
                // Both operands evaluate before the operator applies; the
                // logical operators select between the evaluated values
                // rather than short-circuiting.
                let left = self.eval_expr(left, context)?;
                let right = self.eval_expr(right, context)?;
                eval_binary(*op, left, right)
            }
            Expr::Paren(inner) => self.eval_expr(inner, context),
            Expr::Member {
                object,
                property,
                optional,
            } => self.eval_member(object, property, *optional, context),
            Expr::Call { callee, args } => {
                let function = match self.eval_expr(callee, context)? {
                    Value::Function(function) => function,
                    other => {
                        return Err(ExprError::Type(format!(
                            "{} is not callable",
                            other.type_name()
                        )))
                    }
                };
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(self.eval_expr(arg, context)?);
                }
                function(&evaluated)
            }
        }
    }

    fn resolve_ident(&self, name: &str, context: &Context) -> Result<Value, ExprError> {
        if let Some(value) = context.get(name) {
            return Ok(value.clone());
        }
        if let Some(function) = self.builtins.get(name) {
            return Ok(Value::Function(Rc::clone(function)));
        }
        Err(ExprError::Name(format!("'{name}' not found")))
    }

    fn eval_member(
        &self,
        object: &Expr,
        property: &Expr,
        optional: bool,
        context: &Context,
    ) -> Result<Value, ExprError> {
        let target = self.eval_expr(object, context)?;
        if target.is_nullish() {
            if optional {
                return Ok(Value::Undefined);
            }
            return Err(ExprError::Type(format!(
                "cannot read property of {}",
                target.type_name()
            )));
        }

        // Dot access carries its property name directly; bracket access
        // evaluates the inner expression first.
        let key = match property {
            Expr::Ident(name) => Value::String(name.clone()),
            computed => self.eval_expr(computed, context)?,
        };

        if let (Value::Array(items), Value::Number(index)) = (&target, &key) {
            return Ok(array_index(items, *index));
        }

        let name = property_name(&key);

        // Builtin names shadow plain properties everywhere: resolving one
        // yields the builtin bound to the target as its first argument.
        if let Some(function) = self.builtins.get(&name) {
            return Ok(bind_method(Rc::clone(function), target));
        }

        match target {
            Value::Object(map) => Ok(map.get(&name).cloned().unwrap_or(Value::Undefined)),
            other => Err(ExprError::Type(format!(
                "property '{}' not allowed on {}",
                name,
                other.type_name()
            ))),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_unary(op: UnaryOp, value: Value) -> Result<Value, ExprError> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        UnaryOp::Plus => Ok(Value::Number(value.as_number()?)),
        UnaryOp::Neg => Ok(Value::Number(-value.as_number()?)),
    }
}

fn eval_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, ExprError> {
    match op {
        BinaryOp::Add => {
            if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
                Ok(Value::String(format!(
                    "{}{}",
                    left.concat_text(),
                    right.concat_text()
                )))
            } else {
                Ok(Value::Number(left.as_number()? + right.as_number()?))
            }
        }
        BinaryOp::Sub => Ok(Value::Number(left.as_number()? - right.as_number()?)),
        BinaryOp::Mul => Ok(Value::Number(left.as_number()? * right.as_number()?)),
        // Division and modulo keep IEEE results: x/0 is infinite, 0/0 and
        // x%0 are NaN.
        BinaryOp::Div => Ok(Value::Number(left.as_number()? / right.as_number()?)),
        BinaryOp::Mod => Ok(Value::Number(left.as_number()? % right.as_number()?)),
        BinaryOp::Eq => Ok(Value::Bool(loose_eq(&left, &right))),
        BinaryOp::NotEq => Ok(Value::Bool(!loose_eq(&left, &right))),
        BinaryOp::Lt => Ok(Value::Bool(left.as_number()? < right.as_number()?)),
        BinaryOp::Lte => Ok(Value::Bool(left.as_number()? <= right.as_number()?)),
        BinaryOp::Gt => Ok(Value::Bool(left.as_number()? > right.as_number()?)),
        BinaryOp::Gte => Ok(Value::Bool(left.as_number()? >= right.as_number()?)),
        BinaryOp::And => Ok(if left.is_truthy() { right } else { left }),
        BinaryOp::Or => Ok(if left.is_truthy() { left } else { right }),
        BinaryOp::Coalesce => Ok(if left.is_nullish() { right } else { left }),
    }
}

/// Loose equality: null and undefined are mutually equal, numbers and
/// strings compare numerically, booleans coerce to numbers, arrays and
/// objects compare structurally.
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null | Value::Undefined, Value::Null | Value::Undefined) => true,
        (Value::Null | Value::Undefined, _) | (_, Value::Null | Value::Undefined) => false,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Bool(b), other) | (other, Value::Bool(b)) => {
            loose_eq(&Value::Number(if *b { 1.0 } else { 0.0 }), other)
        }
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            parse_number(s) == *n
        }
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => a == b,
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

fn property_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.concat_text(),
    }
}

fn array_index(items: &[Value], index: f64) -> Value {
    if index.fract() != 0.0 || index < 0.0 {
        return Value::Undefined;
    }
    items
        .get(index as usize)
        .cloned()
        .unwrap_or(Value::Undefined)
}

fn bind_method(function: Callable, receiver: Value) -> Value {
    Value::Function(Rc::new(move |args: &[Value]| {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(receiver.clone());
        full.extend_from_slice(args);
        function(&full)
    }))
}
