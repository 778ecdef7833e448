//! Load-time rule validation.
//!
//! Authoring mistakes are rejected before a simulation starts rather than
//! on a rule's first firing:
//! - a rule must have at least one narrative template
//! - every postcondition bind must be bound by the precondition
//! - every template placeholder must be bound by the precondition

use tagtale_foundation::{Error, ErrorContext, Result};

use crate::ast::Rule;

/// Validates one rule.
///
/// # Errors
/// Returns `NoTemplate` or `BindingScope` errors carrying the rule's line.
pub fn validate(rule: &Rule) -> Result<()> {
    let context = ErrorContext::new().with_line(rule.span.line);

    if rule.texts.is_empty() {
        return Err(Error::no_template(&rule.desc).with_context(context));
    }

    let scope = rule.pre.binds();
    let post_binds = rule.post.binds();
    let template_binds = rule.texts.iter().flat_map(|t| t.binds());

    for bind in post_binds.into_iter().chain(template_binds) {
        if !scope.contains(&bind) {
            return Err(Error::binding_scope(&rule.desc, bind).with_context(context));
        }
    }

    Ok(())
}

/// Validates every rule, stopping at the first error.
///
/// # Errors
/// Returns the first failing rule's error.
pub fn validate_all(rules: &[Rule]) -> Result<()> {
    rules.iter().try_for_each(validate)
}
