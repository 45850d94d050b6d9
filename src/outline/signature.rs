//! Normalized function signatures.
//!
//! `foo(a, b=3, c="x", *args, **kwargs)`: defaults are aligned from the
//! right against the positional parameters, string defaults are double
//! quoted, and annotations are never shown.

use super::ast::Parameters;
use super::literal::{evaluate, evaluate_list, Value};

/// Build a signature from the name and parameter metadata.
///
/// `defaults` must not be longer than `params`.
pub fn build(
    name: &str,
    params: &[String],
    defaults: &[Value],
    kwarg: Option<&str>,
    vararg: Option<&str>,
) -> String {
    if defaults.is_empty() && kwarg.is_none() && vararg.is_none() {
        // foo() / foo(a, b)
        return format!("{}({})", name, params.join(", "));
    }

    let mut tokens = positional_tokens(params, defaults);
    if let Some(vararg) = vararg {
        tokens.push(format!("*{}", vararg));
    }
    if let Some(kwarg) = kwarg {
        tokens.push(format!("**{}", kwarg));
    }

    format!("{}({})", name, tokens.join(", "))
}

/// Build a signature from lowered parameters, including keyword-only ones
/// between the variadic and the keyword-variadic.
pub fn build_parameters(name: &str, params: &Parameters) -> String {
    let defaults = evaluate_list(&params.defaults);
    let vararg = params.vararg.as_deref();
    let kwarg = params.kwarg.as_deref();

    if params.keyword_only.is_empty() {
        return build(name, &params.positional, &defaults, kwarg, vararg);
    }

    let mut tokens = positional_tokens(&params.positional, &defaults);
    tokens.push(match vararg {
        Some(vararg) => format!("*{}", vararg),
        None => "*".to_string(),
    });
    for param in &params.keyword_only {
        tokens.push(match &param.default {
            Some(default) => with_default(&param.name, &evaluate(default)),
            None => param.name.clone(),
        });
    }
    if let Some(kwarg) = kwarg {
        tokens.push(format!("**{}", kwarg));
    }

    format!("{}({})", name, tokens.join(", "))
}

fn positional_tokens(params: &[String], defaults: &[Value]) -> Vec<String> {
    let offset = params.len().saturating_sub(defaults.len());
    params
        .iter()
        .enumerate()
        .map(|(index, param)| match index.checked_sub(offset).and_then(|i| defaults.get(i)) {
            Some(value) => with_default(param, value),
            None => param.clone(),
        })
        .collect()
}

fn with_default(param: &str, value: &Value) -> String {
    // Display of a string is its raw text
    if value.is_str() {
        format!("{}=\"{}\"", param, value)
    } else {
        format!("{}={}", param, value)
    }
}
