//! Dispatch table - merges all rules' handler maps into one lookup
//!
//! Instead of each rule traversing the tree separately, the traversal looks
//! a node's kind up here once and fires every registered callback. The
//! traversal never needs to know how many rules exist.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use sift_ast::NodeKind;

use crate::rule::{Handler, Phase, Visitor};

/// Index of a rule instance within one traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Inline storage for up to 4 handlers per kind (covers most rule sets)
type HandlerList = SmallVec<[(RuleId, Handler); 4]>;

/// Combined per-kind lookup for both traversal phases.
#[derive(Default)]
pub struct DispatchTable {
    on_enter: FxHashMap<NodeKind, HandlerList>,
    on_exit: FxHashMap<NodeKind, HandlerList>,
}

impl DispatchTable {
    /// Build the table from the visitors of an ordered rule list.
    ///
    /// `RuleId`s are slice indices. Per kind, handlers keep rule order
    /// first and each rule's own registration order second. A rule with no
    /// handlers, or several rules sharing a kind, are both ordinary.
    pub fn build(visitors: &[Visitor]) -> Self {
        let mut table = Self::default();
        for (index, visitor) in visitors.iter().enumerate() {
            let rule = RuleId::new(index as u32);
            for &(kind, phase, handler) in visitor.handlers() {
                let map = match phase {
                    Phase::Enter => &mut table.on_enter,
                    Phase::Exit => &mut table.on_exit,
                };
                map.entry(kind).or_default().push((rule, handler));
            }
        }
        table
    }

    #[inline]
    pub fn enter_handlers(&self, kind: NodeKind) -> &[(RuleId, Handler)] {
        self.on_enter.get(&kind).map(|list| list.as_slice()).unwrap_or(&[])
    }

    #[inline]
    pub fn exit_handlers(&self, kind: NodeKind) -> &[(RuleId, Handler)] {
        self.on_exit.get(&kind).map(|list| list.as_slice()).unwrap_or(&[])
    }
}
