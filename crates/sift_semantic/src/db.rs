use std::cell::RefCell;

use rustc_hash::{FxHashMap, FxHashSet};
use sift_ast::NodeId;

use crate::flags::TypeFlags;
use crate::oracle::{Signature, TypeId, TypeOracle};

/// Table-driven oracle.
///
/// Embedders (and the test suite) register types and per-node answers up
/// front; rules then query it through the [`TypeOracle`] trait. Interior
/// mutability keeps registration available while the engine holds a shared
/// borrow during the traversal.
#[derive(Default)]
pub struct Database {
    node_types: RefCell<FxHashMap<NodeId, TypeId>>,
    narrowed_types: RefCell<FxHashMap<NodeId, TypeId>>,
    type_flags: RefCell<FxHashMap<TypeId, TypeFlags>>,
    type_names: RefCell<FxHashMap<TypeId, String>>,
    signatures: RefCell<FxHashMap<TypeId, Vec<Signature>>>,
    assignable: RefCell<FxHashSet<(TypeId, TypeId)>>,
    next_id: RefCell<u32>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type with a display name and its category flags.
    pub fn define_type(&self, name: impl Into<String>, flags: TypeFlags) -> TypeId {
        let id = TypeId(*self.next_id.borrow());
        *self.next_id.borrow_mut() += 1;

        self.type_names.borrow_mut().insert(id, name.into());
        self.type_flags.borrow_mut().insert(id, flags);
        id
    }

    /// Record the declared type of a node.
    pub fn set_node_type(&self, node: NodeId, ty: TypeId) {
        self.node_types.borrow_mut().insert(node, ty);
    }

    /// Record the control-flow-narrowed type of a node.
    pub fn set_narrowed_type(&self, node: NodeId, ty: TypeId) {
        self.narrowed_types.borrow_mut().insert(node, ty);
    }

    /// Attach a call signature to a type.
    pub fn add_signature(&self, ty: TypeId, signature: Signature) {
        self.signatures.borrow_mut().entry(ty).or_default().push(signature);
    }

    /// Record that `source` is assignable to `target`.
    pub fn set_assignable(&self, source: TypeId, target: TypeId) {
        self.assignable.borrow_mut().insert((source, target));
    }
}

impl TypeOracle for Database {
    fn type_of(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.borrow().get(&node).copied()
    }

    fn narrowed_type_of(&self, node: NodeId) -> Option<TypeId> {
        self.narrowed_types
            .borrow()
            .get(&node)
            .copied()
            .or_else(|| self.type_of(node))
    }

    fn flags(&self, ty: TypeId) -> TypeFlags {
        self.type_flags.borrow().get(&ty).copied().unwrap_or_default()
    }

    fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        source == target || self.assignable.borrow().contains(&(source, target))
    }

    fn call_signatures(&self, ty: TypeId) -> Vec<Signature> {
        self.signatures.borrow().get(&ty).cloned().unwrap_or_default()
    }

    fn display(&self, ty: TypeId) -> String {
        self.type_names
            .borrow()
            .get(&ty)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string())
    }
}
