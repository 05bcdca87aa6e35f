//! Type-oracle capability contract
//!
//! The analysis never owns a type graph. It queries an external checker
//! through [`TypeOracle`], addressing types by [`TypeId`] handles into the
//! checker's own pool. Every query is read-only and total: a missing answer is
//! expressed as `None` or an empty list, never as an error.

use crate::span::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle into the oracle's type pool.
///
/// Two handles denote the same type iff they are equal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse classification of a type, the equivalent of the checker's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    String,
    Number,
    Boolean,
    BigInt,
    EsSymbol,
    /// String, number, boolean or bigint literal
    Literal,
    TemplateLiteral,
    /// Enum or enum member
    Enum,
    /// The `object` keyword type
    NonPrimitive,
    /// Unresolved generic type parameter
    TypeParameter,
    /// Anything with a property list: object literals, interfaces, classes,
    /// arrays, tuples, functions, promises
    Object,
    Union,
    Intersection,
}

impl TypeCategory {
    /// Types that hold nothing comparable on the value side.
    pub fn is_void_like(self) -> bool {
        matches!(
            self,
            TypeCategory::Void | TypeCategory::Undefined | TypeCategory::Null | TypeCategory::Never
        )
    }

    /// Types without an own property list.
    pub fn is_primitive_like(self) -> bool {
        matches!(
            self,
            TypeCategory::String
                | TypeCategory::Number
                | TypeCategory::Boolean
                | TypeCategory::BigInt
                | TypeCategory::EsSymbol
                | TypeCategory::Literal
                | TypeCategory::TemplateLiteral
                | TypeCategory::Enum
        )
    }
}

/// Declaration-site visibility of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// A declared property of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Type of the property's value; `None` when the declaration could not be
    /// resolved.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeId>,
    #[serde(default, skip_serializing_if = "is_public")]
    pub visibility: Visibility,
}

fn is_public(visibility: &Visibility) -> bool {
    *visibility == Visibility::Public
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            visibility: Visibility::Public,
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }
}

/// Key kind of an index signature lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    String,
    Number,
}

/// One `[key: K]: V` entry of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSignature {
    pub key: TypeId,
    pub value: TypeId,
}

/// A call signature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub parameters: Vec<TypeId>,
    /// Element type of a trailing rest parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<TypeId>,
    #[serde(rename = "return")]
    pub return_type: TypeId,
}

impl Signature {
    /// Parameter type that receives the argument at `position`.
    ///
    /// Positions past the declared parameters fall into the rest parameter
    /// when there is one; otherwise there is no parameter to compare against.
    pub fn parameter_at(&self, position: usize) -> Option<TypeId> {
        self.parameters.get(position).copied().or(self.rest)
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty() || self.rest.is_some()
    }
}

/// Read-only view of a checker's resolved type graph.
pub trait TypeOracle {
    /// Type of the value produced at a syntax node.
    fn type_at(&self, node: NodeId) -> Option<TypeId>;

    fn category(&self, ty: TypeId) -> TypeCategory;

    /// Alias name, else symbol name, of a type.
    fn declared_name(&self, ty: TypeId) -> Option<&str>;

    /// Declared properties, in a stable order.
    fn properties_of(&self, ty: TypeId) -> Vec<Property>;

    fn type_of_property(&self, property: &Property) -> Option<TypeId> {
        property.ty
    }

    fn is_array(&self, ty: TypeId) -> bool;

    fn element_type_of(&self, ty: TypeId) -> Option<TypeId>;

    fn is_tuple(&self, ty: TypeId) -> bool;

    fn type_arguments_of(&self, ty: TypeId) -> Vec<TypeId>;

    fn index_signatures_of(&self, ty: TypeId) -> Vec<IndexSignature>;

    /// Value type of the string or number index signature.
    fn index_signature_of(&self, ty: TypeId, kind: IndexKind) -> Option<TypeId> {
        let wanted = match kind {
            IndexKind::String => TypeCategory::String,
            IndexKind::Number => TypeCategory::Number,
        };
        self.index_signatures_of(ty)
            .into_iter()
            .find(|sig| self.category(sig.key) == wanted)
            .map(|sig| sig.value)
    }

    /// Awaited type of a promise-like type.
    fn resolve_promise_inner(&self, ty: TypeId) -> Option<TypeId>;

    /// Members of a union or intersection, empty for anything else.
    fn members_of(&self, ty: TypeId) -> Vec<TypeId>;

    fn is_union(&self, ty: TypeId) -> bool {
        self.category(ty) == TypeCategory::Union
    }

    fn is_intersection(&self, ty: TypeId) -> bool {
        self.category(ty) == TypeCategory::Intersection
    }

    fn is_class_instance(&self, ty: TypeId) -> bool;

    fn call_signatures_of(&self, ty: TypeId) -> Vec<Signature>;
}
