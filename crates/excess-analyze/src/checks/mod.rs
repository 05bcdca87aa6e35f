//! Excess-property checks, one per syntactic call site

mod call_argument;
mod jsx_props;
mod return_value;
mod variable_initializer;

pub use call_argument::CallArgumentCheck;
pub use jsx_props::JsxPropsCheck;
pub use return_value::ReturnValueCheck;
pub use variable_initializer::VariableInitializerCheck;

use crate::compare::Comparator;
use crate::config::RuleOptions;
use crate::issue::Issue;
use excess_core::ast::{Expression, FunctionBody, Program, VariableDeclarator};
use excess_core::{HasNode, NodeId, TypeId, TypeOracle};
use std::path::Path;

/// Context provided to checks during analysis of one source unit
pub struct CheckContext<'a> {
    /// The file being analyzed
    pub file_path: &'a Path,
    pub options: &'a RuleOptions,
    pub oracle: &'a dyn TypeOracle,
    /// Shared by every check of the unit so verdicts are memoized once
    pub comparator: Comparator<'a>,
}

impl<'a> CheckContext<'a> {
    pub fn new(file_path: &'a Path, options: &'a RuleOptions, oracle: &'a dyn TypeOracle) -> Self {
        Self {
            file_path,
            options,
            oracle,
            comparator: Comparator::new(oracle, options),
        }
    }
}

/// Trait for excess-property checks
pub trait Check: Send + Sync {
    /// Unique identifier for this check (e.g., "excess-property.argument")
    fn id(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Whether the options turn this check on
    fn is_enabled(&self, _options: &RuleOptions) -> bool {
        true
    }

    /// Run the check and return any issues found
    fn check(&self, program: &Program, ctx: &mut CheckContext<'_>) -> Vec<Issue>;
}

/// Registry of all available checks
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in checks
    pub fn with_builtin_checks() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(VariableInitializerCheck));
        registry.register(Box::new(CallArgumentCheck));
        registry.register(Box::new(ReturnValueCheck));
        registry.register(Box::new(JsxPropsCheck));
        registry
    }

    /// Register a check
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Checks the options turn on, in registration order
    pub fn enabled_checks(&self, options: &RuleOptions) -> Vec<&dyn Check> {
        self.checks
            .iter()
            .filter(|c| c.is_enabled(options))
            .map(|c| c.as_ref())
            .collect()
    }

    /// Get all registered checks
    pub fn all_checks(&self) -> Vec<&dyn Check> {
        self.checks.iter().map(|c| c.as_ref()).collect()
    }
}

/// Declared return types of the function typed at `node`, promise-unwrapped
pub(crate) fn declared_return_types(oracle: &dyn TypeOracle, node: NodeId) -> Vec<TypeId> {
    let Some(ty) = oracle.type_at(node) else {
        return Vec::new();
    };
    oracle
        .call_signatures_of(ty)
        .into_iter()
        .map(|sig| {
            oracle
                .resolve_promise_inner(sig.return_type)
                .unwrap_or(sig.return_type)
        })
        .collect()
}

/// Whether the declarator's initializer is a block-bodied function whose
/// returns are checked instead of the initializer itself
pub(crate) fn initializes_block_function(
    oracle: &dyn TypeOracle,
    decl: &VariableDeclarator,
) -> bool {
    matches!(
        &decl.init,
        Some(Expression::Function(func)) if matches!(func.body, FunctionBody::Block { .. })
    ) && !declared_return_types(oracle, decl.node_id()).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_registry() {
        let registry = CheckRegistry::with_builtin_checks();
        let ids: Vec<_> = registry.all_checks().iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec![
                "excess-property.initializer",
                "excess-property.argument",
                "excess-property.return",
                "excess-property.jsx",
            ]
        );
    }

    #[test]
    fn test_jsx_check_follows_option() {
        let registry = CheckRegistry::with_builtin_checks();
        let options = RuleOptions {
            check_jsx: false,
            ..RuleOptions::default()
        };
        assert_eq!(registry.enabled_checks(&options).len(), 3);
        assert_eq!(registry.enabled_checks(&RuleOptions::default()).len(), 4);
    }
}
