//! Comparison outcomes

/// A property of the actual value that the expected type does not declare
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    /// Dotted path to the property, with `[i]` for array/tuple positions
    pub path: String,
    /// Declared name of the type the property is missing from, or empty
    pub owner: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            owner: owner.into(),
        }
    }
}

/// Result of comparing one actual type against one expected type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// No excess property, or nothing that can be checked
    NoViolation,
    /// The expected type has no shape to compare against; callers drop it
    /// when combining sibling results
    Inconclusive,
    Violation(Violation),
}

impl Verdict {
    pub fn violation(path: impl Into<String>, owner: impl Into<String>) -> Self {
        Verdict::Violation(Violation::new(path, owner))
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, Verdict::Violation(_))
    }

    /// Qualify a violation's path with the segment leading to it
    pub fn prefixed(self, prefix: &str) -> Self {
        match self {
            Verdict::Violation(v) => Verdict::Violation(Violation {
                path: join_path(prefix, &v.path),
                owner: v.owner,
            }),
            other => other,
        }
    }
}

/// Join two path fragments: `a` + `b` → `a.b`, `a` + `[0]` → `a[0]`
pub fn join_path(prefix: &str, rest: &str) -> String {
    if prefix.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        prefix.to_string()
    } else if rest.starts_with('[') {
        format!("{prefix}{rest}")
    } else {
        format!("{prefix}.{rest}")
    }
}

/// Outcome of comparing against all members of a union: the first passing
/// member wins, otherwise the first violation; inconclusive members are
/// dropped.
pub fn any_member_accepts(verdicts: impl IntoIterator<Item = Verdict>) -> Verdict {
    let mut first_violation = None;
    for verdict in verdicts {
        match verdict {
            Verdict::NoViolation => return Verdict::NoViolation,
            Verdict::Violation(v) => {
                first_violation.get_or_insert(v);
            }
            Verdict::Inconclusive => {}
        }
    }
    first_violation.map_or(Verdict::Inconclusive, Verdict::Violation)
}

/// Reported violation when every conclusive verdict is a violation.
///
/// Inconclusive verdicts are excluded; an all-inconclusive (or empty) set
/// reports nothing.
pub fn all_conclusive_violate(verdicts: impl IntoIterator<Item = Verdict>) -> Option<Violation> {
    let mut first_violation = None;
    for verdict in verdicts {
        match verdict {
            Verdict::NoViolation => return None,
            Verdict::Violation(v) => {
                first_violation.get_or_insert(v);
            }
            Verdict::Inconclusive => {}
        }
    }
    first_violation
}
