use sift_ast::NodeId;

use crate::flags::TypeFlags;

/// Opaque handle to a type owned by the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

/// One callable signature of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub parameters: Vec<TypeId>,
    pub return_type: TypeId,
}

/// The semantic service rules query during a traversal.
///
/// `None` / empty answers mean "no information available"; rules treat that
/// as "cannot decide, therefore no report". The oracle is read-only and
/// synchronous, and caching (if any) is its own business.
pub trait TypeOracle {
    /// The declared type of a node, if known.
    fn type_of(&self, node: NodeId) -> Option<TypeId>;

    /// The type of a node after control-flow narrowing. Falls back to the
    /// declared type when the oracle tracks no flow information.
    fn narrowed_type_of(&self, node: NodeId) -> Option<TypeId> {
        self.type_of(node)
    }

    /// Category flags of a type.
    fn flags(&self, ty: TypeId) -> TypeFlags;

    /// Whether `source` is assignable to `target`.
    fn is_assignable(&self, source: TypeId, target: TypeId) -> bool;

    /// Call signatures of a type. Empty for non-callable types.
    fn call_signatures(&self, ty: TypeId) -> Vec<Signature>;

    /// Render a type as display text for messages.
    fn display(&self, ty: TypeId) -> String;
}

/// Oracle that knows nothing. Rules see "no information" for every query,
/// so type-directed rules stay silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypeInfo;

impl TypeOracle for NoTypeInfo {
    fn type_of(&self, _node: NodeId) -> Option<TypeId> {
        None
    }

    fn flags(&self, _ty: TypeId) -> TypeFlags {
        TypeFlags::empty()
    }

    fn is_assignable(&self, _source: TypeId, _target: TypeId) -> bool {
        false
    }

    fn call_signatures(&self, _ty: TypeId) -> Vec<Signature> {
        Vec::new()
    }

    fn display(&self, _ty: TypeId) -> String {
        "unknown".to_string()
    }
}
