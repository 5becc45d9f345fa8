//! Default builtin registry: the sandbox's whitelisted callables.
//!
//! The registry is a flat name-to-callable map. A builtin name is reserved
//! globally: identifier resolution and member-access dispatch both consult
//! it, so `max(1, 2)` and `"abc".includes("a")` go through the same table.
//! Arity and argument types are checked here, not by the evaluator.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::ExprError;
use crate::value::{Callable, Value};

/// Name-to-callable registry injected into an evaluator at construction.
pub type Builtins = BTreeMap<String, Callable>;

/// Builds the standard library registry. Constructed fresh per call;
/// nothing here is global state.
pub fn default_builtins() -> Builtins {
    let entries: &[(&str, fn(&[Value]) -> Result<Value, ExprError>)] = &[
        ("abs", abs),
        ("max", max),
        ("min", min),
        ("round", round),
        ("floor", floor),
        ("ceil", ceil),
        ("pow", pow),
        ("sqrt", sqrt),
        ("sign", sign),
        ("clamp", clamp),
        ("inRange", in_range),
        ("includes", includes),
        ("trim", trim),
        ("toLowerCase", to_lower_case),
        ("toUpperCase", to_upper_case),
        ("isEmpty", is_empty),
    ];
    entries
        .iter()
        .map(|(name, function)| (name.to_string(), Rc::new(*function) as Callable))
        .collect()
}

fn abs(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("abs", args, 1)?;
    Ok(Value::Number(num_arg("abs", args, 0)?.abs()))
}

fn max(args: &[Value]) -> Result<Value, ExprError> {
    require_arity_at_least("max", args, 1)?;
    let mut result = f64::NEG_INFINITY;
    for index in 0..args.len() {
        result = result.max(num_arg("max", args, index)?);
    }
    Ok(Value::Number(result))
}

fn min(args: &[Value]) -> Result<Value, ExprError> {
    require_arity_at_least("min", args, 1)?;
    let mut result = f64::INFINITY;
    for index in 0..args.len() {
        result = result.min(num_arg("min", args, index)?);
    }
    Ok(Value::Number(result))
}

fn round(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("round", args, 1)?;
    Ok(Value::Number(num_arg("round", args, 0)?.round()))
}

fn floor(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("floor", args, 1)?;
    Ok(Value::Number(num_arg("floor", args, 0)?.floor()))
}

fn ceil(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("ceil", args, 1)?;
    Ok(Value::Number(num_arg("ceil", args, 0)?.ceil()))
}

fn pow(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("pow", args, 2)?;
    let base = num_arg("pow", args, 0)?;
    let exponent = num_arg("pow", args, 1)?;
    Ok(Value::Number(base.powf(exponent)))
}

fn sqrt(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("sqrt", args, 1)?;
    Ok(Value::Number(num_arg("sqrt", args, 0)?.sqrt()))
}

fn sign(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("sign", args, 1)?;
    let n = num_arg("sign", args, 0)?;
    // signum maps zero to one; zero and NaN pass through instead.
    let result = if n == 0.0 || n.is_nan() { n } else { n.signum() };
    Ok(Value::Number(result))
}

fn clamp(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("clamp", args, 3)?;
    let n = num_arg("clamp", args, 0)?;
    let low = num_arg("clamp", args, 1)?;
    let high = num_arg("clamp", args, 2)?;
    Ok(Value::Number(n.max(low).min(high)))
}

fn in_range(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("inRange", args, 3)?;
    let n = num_arg("inRange", args, 0)?;
    let low = num_arg("inRange", args, 1)?;
    let high = num_arg("inRange", args, 2)?;
    // Half-open: low inclusive, high exclusive.
    Ok(Value::Bool(n >= low && n < high))
}

fn includes(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("includes", args, 2)?;
    match &args[0] {
        Value::String(haystack) => {
            let needle = str_arg("includes", args, 1)?;
            Ok(Value::Bool(haystack.contains(needle)))
        }
        Value::Array(items) => Ok(Value::Bool(items.contains(&args[1]))),
        other => Err(ExprError::Type(format!(
            "includes expects a string or array, got {}",
            other.type_name()
        ))),
    }
}

fn trim(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("trim", args, 1)?;
    Ok(Value::String(str_arg("trim", args, 0)?.trim().to_string()))
}

fn to_lower_case(args: &[Value]) -> Result<Value, ExprError> {
    // An optional second argument names a locale; case mapping here is
    // Unicode-default, so the locale is accepted and ignored.
    require_arity_between("toLowerCase", args, 1, 2)?;
    Ok(Value::String(
        str_arg("toLowerCase", args, 0)?.to_lowercase(),
    ))
}

fn to_upper_case(args: &[Value]) -> Result<Value, ExprError> {
    require_arity_between("toUpperCase", args, 1, 2)?;
    Ok(Value::String(
        str_arg("toUpperCase", args, 0)?.to_uppercase(),
    ))
}

fn is_empty(args: &[Value]) -> Result<Value, ExprError> {
    require_arity("isEmpty", args, 1)?;
    let empty = match &args[0] {
        Value::Null | Value::Undefined => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    Ok(Value::Bool(empty))
}

fn require_arity(name: &str, args: &[Value], expected: usize) -> Result<(), ExprError> {
    if args.len() != expected {
        return Err(ExprError::Type(format!(
            "{name} expects {expected} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

fn require_arity_at_least(name: &str, args: &[Value], min: usize) -> Result<(), ExprError> {
    if args.len() < min {
        return Err(ExprError::Type(format!(
            "{name} expects at least {min} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

fn require_arity_between(
    name: &str,
    args: &[Value],
    min: usize,
    max: usize,
) -> Result<(), ExprError> {
    if args.len() < min || args.len() > max {
        return Err(ExprError::Type(format!(
            "{name} expects {min} to {max} argument(s), got {}",
            args.len()
        )));
    }
    Ok(())
}

fn num_arg(name: &str, args: &[Value], index: usize) -> Result<f64, ExprError> {
    args[index].as_number().map_err(|_| {
        ExprError::Type(format!(
            "{name} expects a number for argument {}, got {}",
            index + 1,
            args[index].type_name()
        ))
    })
}

fn str_arg<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a str, ExprError> {
    match &args[index] {
        Value::String(s) => Ok(s),
        other => Err(ExprError::Type(format!(
            "{name} expects a string for argument {}, got {}",
            index + 1,
            other.type_name()
        ))),
    }
}
