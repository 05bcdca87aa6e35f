//! JSX element props
//!
//! All attributes of an element, with spreads expanded, are merged into one
//! props object and compared against the first parameter of each of the
//! component's call signatures.

use super::{Check, CheckContext};
use crate::compare::{all_conclusive_violate, Verdict};
use crate::config::RuleOptions;
use crate::issue::{FindingKind, Issue};
use excess_core::ast::{Expression, JsxAttribute, JsxElement, Program};
use excess_core::{visit, HasNode, TypeId, Visitor};
use indexmap::IndexMap;

/// Attribute name → value type; `None` when the value did not resolve
type Attributes = IndexMap<String, Option<TypeId>>;

pub struct JsxPropsCheck;

impl Check for JsxPropsCheck {
    fn id(&self) -> &'static str {
        "excess-property.jsx"
    }

    fn description(&self) -> &'static str {
        "Detects JSX attributes the component's props type does not declare"
    }

    fn is_enabled(&self, options: &RuleOptions) -> bool {
        options.check_jsx
    }

    fn check(&self, program: &Program, ctx: &mut CheckContext<'_>) -> Vec<Issue> {
        let mut visitor = JsxVisitor {
            ctx,
            issues: Vec::new(),
        };
        visit(&mut visitor, program);
        visitor.issues
    }
}

/// Attributes that never have to be declared
fn is_conventional_attribute(name: &str) -> bool {
    name == "key" || name.starts_with("data-")
}

struct JsxVisitor<'c, 'a> {
    ctx: &'c mut CheckContext<'a>,
    issues: Vec<Issue>,
}

impl JsxVisitor<'_, '_> {
    /// Merge attributes in source order; a later attribute replaces the
    /// value of an earlier one with the same name.
    fn merged_attributes(&self, element: &JsxElement) -> Attributes {
        let oracle = self.ctx.oracle;
        let mut merged = Attributes::new();
        for attribute in &element.attributes {
            match attribute {
                JsxAttribute::Attribute(named) => {
                    merged.insert(named.name.clone(), oracle.type_at(named.id));
                }
                JsxAttribute::Spread(spread) => {
                    let Some(spread_type) = oracle.type_at(spread.argument.node_id()) else {
                        continue;
                    };
                    for property in oracle.properties_of(spread_type) {
                        let value = oracle.type_of_property(&property);
                        merged.insert(property.name, value);
                    }
                }
            }
        }
        merged
    }

    fn check_element(&mut self, element: &JsxElement) {
        let oracle = self.ctx.oracle;
        let Some(component) = oracle.type_at(element.tag.id) else {
            return;
        };
        let signatures = oracle.call_signatures_of(component);
        if signatures.is_empty() {
            return;
        }
        let attributes = self.merged_attributes(element);

        let mut verdicts = Vec::new();
        for signature in &signatures {
            let Some(props) = signature.parameter_at(0) else {
                verdicts.push(Verdict::Inconclusive);
                continue;
            };
            if self.ctx.comparator.is_skipped_type(props) {
                verdicts.push(Verdict::NoViolation);
                continue;
            }
            let members = if oracle.is_union(props) {
                oracle.members_of(props)
            } else {
                vec![props]
            };
            for member in members {
                verdicts.push(self.compare_member(&attributes, member));
            }
        }

        if let Some(violation) = all_conclusive_violate(verdicts) {
            self.issues.push(Issue::finding(
                "excess-property.jsx",
                FindingKind::ExcessPropertyOnValue,
                self.ctx.file_path.to_path_buf(),
                element.span,
                &violation,
            ));
        }
    }

    /// First attribute the props member rejects
    fn compare_member(&mut self, attributes: &Attributes, member: TypeId) -> Verdict {
        let oracle = self.ctx.oracle;
        let options = self.ctx.options;
        if self.ctx.comparator.has_template_literal_index(member) {
            return Verdict::NoViolation;
        }

        let declared = oracle.properties_of(member);
        for (name, value) in attributes {
            if options.is_skip_property(name) || is_conventional_attribute(name) {
                continue;
            }
            match declared.iter().find(|p| p.name == *name) {
                None => {
                    if options.is_target_property(name) {
                        let owner = oracle.declared_name(member).unwrap_or_default();
                        return Verdict::violation(name.as_str(), owner);
                    }
                }
                Some(property) => {
                    let (Some(actual), Some(expected)) = (*value, oracle.type_of_property(property))
                    else {
                        continue;
                    };
                    let verdict = self.ctx.comparator.compare(actual, expected, name);
                    if verdict.is_violation() {
                        return verdict;
                    }
                }
            }
        }
        Verdict::NoViolation
    }
}

impl Visitor for JsxVisitor<'_, '_> {
    fn visit_expression(&mut self, expr: &Expression) -> bool {
        if let Expression::Jsx(element) = expr {
            self.check_element(element);
        }
        true
    }
}
