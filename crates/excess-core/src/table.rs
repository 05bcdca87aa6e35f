//! In-memory type oracle
//!
//! `TypeTable` is a flat arena of resolved types plus the node→type bindings
//! of one source unit. Hosts export it (serde) alongside the syntax tree;
//! tests build it directly through the constructor helpers.

use crate::oracle::{IndexSignature, Property, Signature, TypeCategory, TypeId, TypeOracle};
use crate::span::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("type {owner} refers to unknown type {target}")]
    DanglingType { owner: TypeId, target: TypeId },
    #[error("node {node} is bound to unknown type {target}")]
    DanglingBinding { node: u32, target: TypeId },
    #[error("type {ty} is a member of itself")]
    MembershipCycle { ty: TypeId },
}

/// Structural part of an object-like type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectShape {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub index_signatures: Vec<IndexSignature>,
    #[serde(default)]
    pub call_signatures: Vec<Signature>,
    /// Instance type of a class declaration
    #[serde(default)]
    pub class_instance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeKind {
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
    StringLiteral { value: String },
    NumberLiteral { value: f64 },
    BooleanLiteral { value: bool },
    TemplateLiteral { text: String },
    Enum,
    /// The `object` keyword type
    NonPrimitive,
    TypeParameter {
        #[serde(default)]
        constraint: Option<TypeId>,
    },
    Object(ObjectShape),
    Array { element: TypeId },
    Tuple { elements: Vec<TypeId> },
    Promise { inner: TypeId },
    Union { members: Vec<TypeId> },
    Intersection { members: Vec<TypeId> },
}

impl TypeKind {
    fn category(&self) -> TypeCategory {
        match self {
            TypeKind::Any => TypeCategory::Any,
            TypeKind::Unknown => TypeCategory::Unknown,
            TypeKind::Never => TypeCategory::Never,
            TypeKind::Void => TypeCategory::Void,
            TypeKind::Undefined => TypeCategory::Undefined,
            TypeKind::Null => TypeCategory::Null,
            TypeKind::String => TypeCategory::String,
            TypeKind::Number => TypeCategory::Number,
            TypeKind::Boolean => TypeCategory::Boolean,
            TypeKind::BigInt => TypeCategory::BigInt,
            TypeKind::EsSymbol => TypeCategory::EsSymbol,
            TypeKind::StringLiteral { .. }
            | TypeKind::NumberLiteral { .. }
            | TypeKind::BooleanLiteral { .. } => TypeCategory::Literal,
            TypeKind::TemplateLiteral { .. } => TypeCategory::TemplateLiteral,
            TypeKind::Enum => TypeCategory::Enum,
            TypeKind::NonPrimitive => TypeCategory::NonPrimitive,
            TypeKind::TypeParameter { .. } => TypeCategory::TypeParameter,
            TypeKind::Object(_)
            | TypeKind::Array { .. }
            | TypeKind::Tuple { .. }
            | TypeKind::Promise { .. } => TypeCategory::Object,
            TypeKind::Union { .. } => TypeCategory::Union,
            TypeKind::Intersection { .. } => TypeCategory::Intersection,
        }
    }

    /// Every type handle this kind refers to
    fn references(&self) -> Vec<TypeId> {
        match self {
            TypeKind::TypeParameter { constraint } => constraint.iter().copied().collect(),
            TypeKind::Object(shape) => {
                let mut refs: Vec<TypeId> =
                    shape.properties.iter().filter_map(|p| p.ty).collect();
                for sig in &shape.index_signatures {
                    refs.push(sig.key);
                    refs.push(sig.value);
                }
                for sig in &shape.call_signatures {
                    refs.extend(sig.parameters.iter().copied());
                    refs.extend(sig.rest);
                    refs.push(sig.return_type);
                }
                refs
            }
            TypeKind::Array { element } => vec![*element],
            TypeKind::Promise { inner } => vec![*inner],
            TypeKind::Tuple { elements } => elements.clone(),
            TypeKind::Union { members } | TypeKind::Intersection { members } => members.clone(),
            _ => Vec::new(),
        }
    }
}

/// One entry of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeData {
    pub kind: TypeKind,
    /// Name of the type alias the type was written through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Name of the declaring symbol (interface, class, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Arena of resolved types for one source unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeTable {
    #[serde(default)]
    types: Vec<TypeData>,
    /// Node id → type of the value at that node
    #[serde(default)]
    nodes: BTreeMap<u32, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, ty: TypeId) -> Option<&TypeData> {
        self.types.get(ty.index())
    }

    fn kind(&self, ty: TypeId) -> Option<&TypeKind> {
        self.get(ty).map(|data| &data.kind)
    }

    /// Append a type and return its handle
    pub fn add(&mut self, kind: TypeKind) -> TypeId {
        self.types.push(TypeData {
            kind,
            alias: None,
            symbol: None,
        });
        TypeId((self.types.len() - 1) as u32)
    }

    /// Append a type written through `type <alias> = ...`
    pub fn add_alias(&mut self, alias: impl Into<String>, kind: TypeKind) -> TypeId {
        let ty = self.add(kind);
        self.types[ty.index()].alias = Some(alias.into());
        ty
    }

    /// Append a type declared by a named symbol (interface, class)
    pub fn add_symbol(&mut self, symbol: impl Into<String>, kind: TypeKind) -> TypeId {
        let ty = self.add(kind);
        self.types[ty.index()].symbol = Some(symbol.into());
        ty
    }

    /// Shared instance of a payload-free kind (`string`, `null`, ...)
    pub fn intrinsic(&mut self, kind: TypeKind) -> TypeId {
        let existing = self
            .types
            .iter()
            .position(|data| data.kind == kind && data.alias.is_none() && data.symbol.is_none());
        match existing {
            Some(index) => TypeId(index as u32),
            None => self.add(kind),
        }
    }

    /// Record the type of the value at `node`
    pub fn bind(&mut self, node: NodeId, ty: TypeId) {
        self.nodes.insert(node.0, ty);
    }

    pub fn object(&mut self, properties: Vec<(&str, TypeId)>) -> TypeId {
        self.add(TypeKind::Object(ObjectShape {
            properties: properties
                .into_iter()
                .map(|(name, ty)| Property::new(name, ty))
                .collect(),
            ..ObjectShape::default()
        }))
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.add(TypeKind::Array { element })
    }

    pub fn tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.add(TypeKind::Tuple { elements })
    }

    pub fn promise(&mut self, inner: TypeId) -> TypeId {
        self.add(TypeKind::Promise { inner })
    }

    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.add(TypeKind::Union { members })
    }

    pub fn intersection(&mut self, members: Vec<TypeId>) -> TypeId {
        self.add(TypeKind::Intersection { members })
    }

    /// `(params) => ret`
    pub fn function(&mut self, parameters: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.add(TypeKind::Object(ObjectShape {
            call_signatures: vec![Signature {
                parameters,
                rest: None,
                return_type,
            }],
            ..ObjectShape::default()
        }))
    }

    /// Type with one index signature, e.g. `Record<string, V>`
    pub fn record(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.add(TypeKind::Object(ObjectShape {
            index_signatures: vec![IndexSignature { key, value }],
            ..ObjectShape::default()
        }))
    }

    /// Check that every handle in the table points inside it and that no
    /// union or intersection contains itself
    pub fn validate(&self) -> Result<(), TableError> {
        for (index, data) in self.types.iter().enumerate() {
            let owner = TypeId(index as u32);
            for target in data.kind.references() {
                if self.get(target).is_none() {
                    return Err(TableError::DanglingType { owner, target });
                }
            }
        }
        for (&node, &target) in &self.nodes {
            if self.get(target).is_none() {
                return Err(TableError::DanglingBinding { node, target });
            }
        }
        self.check_membership_cycles()
    }

    /// Depth-first walk over union and intersection members. Handles must
    /// already be known to point inside the table.
    fn check_membership_cycles(&self) -> Result<(), TableError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            Active,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.types.len()];
        for root in 0..self.types.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::Active;
            // (type index, next member to visit)
            let mut stack = vec![(root, 0usize)];
            while let Some(frame) = stack.last_mut() {
                let (index, next) = *frame;
                match self.members(TypeId(index as u32)).get(next) {
                    Some(&member) => {
                        frame.1 += 1;
                        match marks[member.index()] {
                            Mark::Active => {
                                return Err(TableError::MembershipCycle { ty: member })
                            }
                            Mark::Unvisited => {
                                marks[member.index()] = Mark::Active;
                                stack.push((member.index(), 0));
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[index] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    fn members(&self, ty: TypeId) -> &[TypeId] {
        match self.kind(ty) {
            Some(TypeKind::Union { members }) | Some(TypeKind::Intersection { members }) => {
                members
            }
            _ => &[],
        }
    }
}

impl TypeOracle for TypeTable {
    fn type_at(&self, node: NodeId) -> Option<TypeId> {
        self.nodes.get(&node.0).copied()
    }

    fn category(&self, ty: TypeId) -> TypeCategory {
        self.kind(ty)
            .map(TypeKind::category)
            .unwrap_or(TypeCategory::Unknown)
    }

    fn declared_name(&self, ty: TypeId) -> Option<&str> {
        let data = self.get(ty)?;
        data.alias.as_deref().or(data.symbol.as_deref())
    }

    fn properties_of(&self, ty: TypeId) -> Vec<Property> {
        match self.kind(ty) {
            Some(TypeKind::Object(shape)) => shape.properties.clone(),
            // An intersection has every member's properties; the first
            // declaration of a name wins.
            Some(TypeKind::Intersection { members }) => {
                let mut merged: Vec<Property> = Vec::new();
                for member in members {
                    for prop in self.properties_of(*member) {
                        if !merged.iter().any(|p| p.name == prop.name) {
                            merged.push(prop);
                        }
                    }
                }
                merged
            }
            // A union only has the properties common to all members.
            Some(TypeKind::Union { members }) => {
                let mut iter = members.iter();
                let Some(first) = iter.next() else {
                    return Vec::new();
                };
                let rest: Vec<Vec<Property>> = iter.map(|m| self.properties_of(*m)).collect();
                self.properties_of(*first)
                    .into_iter()
                    .filter(|prop| {
                        rest.iter()
                            .all(|props| props.iter().any(|p| p.name == prop.name))
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    fn is_array(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), Some(TypeKind::Array { .. }))
    }

    fn element_type_of(&self, ty: TypeId) -> Option<TypeId> {
        match self.kind(ty) {
            Some(TypeKind::Array { element }) => Some(*element),
            _ => None,
        }
    }

    fn is_tuple(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), Some(TypeKind::Tuple { .. }))
    }

    fn type_arguments_of(&self, ty: TypeId) -> Vec<TypeId> {
        match self.kind(ty) {
            Some(TypeKind::Array { element }) => vec![*element],
            Some(TypeKind::Tuple { elements }) => elements.clone(),
            Some(TypeKind::Promise { inner }) => vec![*inner],
            _ => Vec::new(),
        }
    }

    fn index_signatures_of(&self, ty: TypeId) -> Vec<IndexSignature> {
        match self.kind(ty) {
            Some(TypeKind::Object(shape)) => shape.index_signatures.clone(),
            Some(TypeKind::Intersection { members }) => members
                .iter()
                .flat_map(|m| self.index_signatures_of(*m))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn resolve_promise_inner(&self, ty: TypeId) -> Option<TypeId> {
        match self.kind(ty) {
            Some(TypeKind::Promise { inner }) => Some(*inner),
            _ => None,
        }
    }

    fn members_of(&self, ty: TypeId) -> Vec<TypeId> {
        self.members(ty).to_vec()
    }

    fn is_class_instance(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), Some(TypeKind::Object(shape)) if shape.class_instance)
    }

    fn call_signatures_of(&self, ty: TypeId) -> Vec<Signature> {
        match self.kind(ty) {
            Some(TypeKind::Object(shape)) => shape.call_signatures.clone(),
            Some(TypeKind::Intersection { members }) => members
                .iter()
                .flat_map(|m| self.call_signatures_of(*m))
                .collect(),
            _ => Vec::new(),
        }
    }
}
