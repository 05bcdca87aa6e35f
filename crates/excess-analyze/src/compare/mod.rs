//! Structural excess-property comparison
//!
//! [`Comparator::compare`] decides whether an actual type carries a property
//! its expected type does not declare. Rules are tried in a fixed order and
//! the first one that applies decides the verdict. Every pair is memoized.
//! A pair met again while its own rules run is assumed to pass, so recursive
//! types terminate; verdicts that relied on such an assumption are only
//! cached once the assumed pair has passed.

mod verdict;

pub use verdict::{all_conclusive_violate, any_member_accepts, join_path, Verdict, Violation};

use crate::config::RuleOptions;
use excess_core::{IndexKind, Property, TypeCategory, TypeId, TypeOracle};
use std::collections::HashMap;

/// Members every object inherits; never required to be declared
pub const PROTOTYPE_MEMBERS: &[&str] = &[
    "constructor",
    "toString",
    "toLocaleString",
    "valueOf",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
];

type PairKey = (TypeId, TypeId);

/// Memo table usage counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

/// Excess-property comparator for one source unit
pub struct Comparator<'a> {
    oracle: &'a dyn TypeOracle,
    options: &'a RuleOptions,
    /// (actual, expected) → verdict with a path relative to the pair
    cache: HashMap<PairKey, Verdict>,
    /// Pairs whose rules are running, with their nesting depth
    in_progress: HashMap<PairKey, usize>,
    /// Verdicts that assumed an in-progress pair passes, with the shallowest
    /// depth they rely on
    pending: HashMap<PairKey, (Verdict, usize)>,
    /// Shallowest in-progress depth the running comparison relied on
    assumed_depth: Option<usize>,
    stats: CacheStats,
}

impl<'a> Comparator<'a> {
    pub fn new(oracle: &'a dyn TypeOracle, options: &'a RuleOptions) -> Self {
        Self {
            oracle,
            options,
            cache: HashMap::new(),
            in_progress: HashMap::new(),
            pending: HashMap::new(),
            assumed_depth: None,
            stats: CacheStats::default(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Compare `actual` against `expected`; a violation's path is qualified
    /// with `path`.
    pub fn compare(&mut self, actual: TypeId, expected: TypeId, path: &str) -> Verdict {
        self.compare_pair(actual, expected).prefixed(path)
    }

    /// Whether `ty` is exempted by name
    pub fn is_skipped_type(&self, ty: TypeId) -> bool {
        self.oracle
            .declared_name(ty)
            .is_some_and(|name| self.options.is_skip_word(name))
    }

    /// Whether `ty`, or a member of it when it is a union or intersection,
    /// has an index signature keyed by a template literal
    pub fn has_template_literal_index(&self, ty: TypeId) -> bool {
        let mut candidates = vec![ty];
        if self.oracle.is_union(ty) || self.oracle.is_intersection(ty) {
            candidates.extend(self.oracle.members_of(ty));
        }
        candidates.into_iter().any(|candidate| {
            self.oracle
                .index_signatures_of(candidate)
                .iter()
                .any(|sig| self.oracle.category(sig.key) == TypeCategory::TemplateLiteral)
        })
    }

    fn compare_pair(&mut self, actual: TypeId, expected: TypeId) -> Verdict {
        let key = (actual, expected);
        if let Some(cached) = self.cache.get(&key) {
            self.stats.hits += 1;
            return cached.clone();
        }
        if let Some((verdict, depth)) = self.pending.get(&key) {
            let (verdict, depth) = (verdict.clone(), *depth);
            self.stats.hits += 1;
            self.assume(depth);
            return verdict;
        }
        if let Some(&depth) = self.in_progress.get(&key) {
            self.assume(depth);
            return Verdict::NoViolation;
        }
        self.stats.misses += 1;

        let depth = self.in_progress.len();
        self.in_progress.insert(key, depth);
        let outer = self.assumed_depth.take();
        let verdict = self.dispatch(actual, expected);
        self.in_progress.remove(&key);

        // assumptions about enclosing pairs that are still running
        let open = self.assumed_depth.take().filter(|&d| d < depth);
        self.settle_pending(depth, verdict == Verdict::NoViolation, open);
        match open {
            None => {
                self.cache.insert(key, verdict.clone());
            }
            Some(d) => {
                self.pending.insert(key, (verdict.clone(), d));
            }
        }
        self.assumed_depth = match (outer, open) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        verdict
    }

    fn assume(&mut self, depth: usize) {
        self.assumed_depth = Some(self.assumed_depth.map_or(depth, |d| d.min(depth)));
    }

    /// Resolve the pending verdicts that assumed the pair at `depth` passes.
    /// They are dropped when it did not; otherwise they now rely on `open`.
    fn settle_pending(&mut self, depth: usize, passed: bool, open: Option<usize>) {
        if self.pending.is_empty() {
            return;
        }
        let settled: Vec<PairKey> = self
            .pending
            .iter()
            .filter(|(_, (_, d))| *d >= depth)
            .map(|(key, _)| *key)
            .collect();
        for key in settled {
            let Some((verdict, _)) = self.pending.remove(&key) else {
                continue;
            };
            if !passed {
                continue;
            }
            match open {
                None => {
                    self.cache.insert(key, verdict);
                }
                Some(d) => {
                    self.pending.insert(key, (verdict, d));
                }
            }
        }
    }

    fn dispatch(&mut self, actual: TypeId, expected: TypeId) -> Verdict {
        let oracle = self.oracle;

        if self.is_skipped_type(expected) {
            return Verdict::NoViolation;
        }

        let unwrapped_actual = oracle.resolve_promise_inner(actual).unwrap_or(actual);
        let unwrapped_expected = oracle.resolve_promise_inner(expected).unwrap_or(expected);
        if (unwrapped_actual, unwrapped_expected) != (actual, expected) {
            return self.compare_pair(unwrapped_actual, unwrapped_expected);
        }

        if oracle.is_union(actual) {
            for member in oracle.members_of(actual) {
                let verdict = self.compare_pair(member, expected);
                if verdict.is_violation() {
                    return verdict;
                }
            }
            return Verdict::NoViolation;
        }

        if oracle.is_union(expected) {
            let members = oracle.members_of(expected);
            let verdicts: Vec<Verdict> = members
                .into_iter()
                .map(|member| self.compare_pair(actual, member))
                .collect();
            return any_member_accepts(verdicts);
        }

        let expected_category = oracle.category(expected);
        if matches!(
            expected_category,
            TypeCategory::Any
                | TypeCategory::Unknown
                | TypeCategory::NonPrimitive
                | TypeCategory::TypeParameter
        ) {
            return Verdict::NoViolation;
        }

        let actual_category = oracle.category(actual);
        if actual_category.is_void_like()
            || actual_category.is_primitive_like()
            || matches!(actual_category, TypeCategory::Any | TypeCategory::Unknown)
        {
            return Verdict::NoViolation;
        }

        if expected_category.is_void_like() || expected_category.is_primitive_like() {
            return Verdict::Inconclusive;
        }

        if actual == expected {
            return Verdict::NoViolation;
        }

        if !self.options.check_class && oracle.is_class_instance(actual) {
            return Verdict::NoViolation;
        }

        if oracle.is_array(expected) {
            return self.compare_array(actual, expected);
        }

        if oracle.is_tuple(expected) {
            return self.compare_tuple(actual, expected);
        }

        if self.has_template_literal_index(expected) {
            return Verdict::NoViolation;
        }

        let index_value = oracle
            .index_signature_of(expected, IndexKind::String)
            .or_else(|| oracle.index_signature_of(expected, IndexKind::Number));
        if let Some(value) = index_value {
            return self.compare_index(actual, value);
        }

        self.compare_properties(actual, expected)
    }

    fn compare_array(&mut self, actual: TypeId, expected: TypeId) -> Verdict {
        let oracle = self.oracle;
        let Some(expected_element) = oracle.element_type_of(expected) else {
            return Verdict::Inconclusive;
        };
        let candidates = match oracle.element_type_of(actual) {
            Some(element) => vec![element],
            None => oracle.type_arguments_of(actual),
        };

        let mut passed = false;
        for (index, candidate) in candidates.into_iter().enumerate() {
            match self.compare_pair(candidate, expected_element) {
                Verdict::NoViolation => passed = true,
                Verdict::Inconclusive => {}
                violation => return violation.prefixed(&format!("[{index}]")),
            }
        }

        if passed {
            Verdict::NoViolation
        } else {
            Verdict::Inconclusive
        }
    }

    fn compare_tuple(&mut self, actual: TypeId, expected: TypeId) -> Verdict {
        let expected_slots = self.oracle.type_arguments_of(expected);
        let actual_slots = self.oracle.type_arguments_of(actual);
        if expected_slots.len() != actual_slots.len() {
            return Verdict::Inconclusive;
        }

        for (index, (slot, expected_slot)) in actual_slots.into_iter().zip(expected_slots).enumerate()
        {
            let verdict = self.compare_pair(slot, expected_slot);
            if verdict.is_violation() {
                return verdict.prefixed(&format!("[{index}]"));
            }
        }
        Verdict::NoViolation
    }

    fn compare_index(&mut self, actual: TypeId, value: TypeId) -> Verdict {
        for property in self.comparable_properties(actual) {
            let Some(property_type) = self.oracle.type_of_property(&property) else {
                continue;
            };
            let verdict = self.compare_pair(property_type, value);
            if verdict.is_violation() {
                return verdict.prefixed(&property.name);
            }
        }
        Verdict::NoViolation
    }

    fn compare_properties(&mut self, actual: TypeId, expected: TypeId) -> Verdict {
        let oracle = self.oracle;
        let expected_properties = oracle.properties_of(expected);
        let declares_any = expected_properties
            .iter()
            .any(|p| !PROTOTYPE_MEMBERS.contains(&p.name.as_str()));
        if !declares_any {
            return Verdict::NoViolation;
        }

        let actual_properties = self.comparable_properties(actual);
        let find_expected =
            |name: &str| expected_properties.iter().find(|p| p.name == name);

        for property in &actual_properties {
            if find_expected(&property.name).is_none()
                && self.options.is_target_property(&property.name)
            {
                let owner = oracle.declared_name(expected).unwrap_or_default();
                return Verdict::violation(property.name.as_str(), owner);
            }
        }

        for property in &actual_properties {
            let Some(declared) = find_expected(&property.name) else {
                continue;
            };
            let (Some(actual_type), Some(expected_type)) =
                (oracle.type_of_property(property), oracle.type_of_property(declared))
            else {
                continue;
            };
            let verdict = self.compare_pair(actual_type, expected_type);
            if verdict.is_violation() {
                return verdict.prefixed(&property.name);
            }
        }

        Verdict::NoViolation
    }

    /// Actual-side properties that take part in a comparison
    fn comparable_properties(&self, actual: TypeId) -> Vec<Property> {
        self.oracle
            .properties_of(actual)
            .into_iter()
            .filter(|p| !self.options.is_skip_property(&p.name) && !p.is_private())
            .collect()
    }
}
