//! Resolution context: cycle detector, depth limit, and cycle counter
//! carried through a recursive type expansion.
//!
//! Grounded on the path-keyed visit-set contract: a *visit set* of
//! `(current_path, target_qualified_name)` pairs (stringified as
//! `"parent_path:target_qname"`), a depth counter, and a cumulative
//! circular-reference counter. The visited set is forked on descent so
//! sibling branches don't interfere, while the cycle counter is shared
//! (`Rc<Cell<usize>>`) because it must be cumulative across the whole
//! expansion — exceeding it aborts only the current subtree, not the run,
//! which is why it is checked rather than turned into a hard error.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Clone)]
pub struct ResolutionContext {
    visited: HashSet<String>,
    depth: usize,
    max_depth: usize,
    cycle_count: Rc<Cell<usize>>,
    max_cycles: usize,
}

impl ResolutionContext {
    pub fn new(max_depth: usize, max_cycles: usize) -> Self {
        Self {
            visited: HashSet::new(),
            depth: 0,
            max_depth,
            cycle_count: Rc::new(Cell::new(0)),
            max_cycles,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn depth_exceeded(&self) -> bool {
        self.depth > self.max_depth
    }

    pub fn cycles_exhausted(&self) -> bool {
        self.cycle_count.get() >= self.max_cycles
    }

    /// Attempt to enter a path key. Returns `true` if the key was not
    /// already visited (entry granted); returns `false` and records a
    /// cycle otherwise.
    pub fn enter(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.visited.contains(&key) {
            self.cycle_count.set(self.cycle_count.get() + 1);
            false
        } else {
            self.visited.insert(key);
            true
        }
    }

    /// A context for one level deeper composition/nesting, carrying
    /// forward the same visited set (so `A -> B -> A` sibling attempts are
    /// still caught) and the shared cycle counter.
    pub fn descend(&self) -> Self {
        Self {
            visited: self.visited.clone(),
            depth: self.depth + 1,
            max_depth: self.max_depth,
            cycle_count: Rc::clone(&self.cycle_count),
            max_cycles: self.max_cycles,
        }
    }

    /// A fresh visited-set view for an inheritance edge (`xsd:extension`),
    /// per the expander's contract: sibling inheritance and sibling
    /// composition must not cross-contaminate. The depth counter and
    /// cumulative cycle counter still carry forward.
    pub fn fresh_for_inheritance(&self) -> Self {
        Self {
            visited: HashSet::new(),
            depth: self.depth + 1,
            max_depth: self.max_depth,
            cycle_count: Rc::clone(&self.cycle_count),
            max_cycles: self.max_cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_entry_of_same_key_is_denied_and_counted() {
        let mut ctx = ResolutionContext::new(8, 5);
        assert!(ctx.enter("Node:ns#Node"));
        assert!(!ctx.enter("Node:ns#Node"));
        assert_eq!(ctx.cycle_count.get(), 1);
    }

    #[test]
    fn descend_shares_cycle_counter_but_forks_visited_set() {
        let mut parent = ResolutionContext::new(8, 5);
        parent.enter("root:ns#A");
        let mut child = parent.descend();
        assert_eq!(child.depth(), 1);
        // the parent's key is still visible to the child (same lineage)
        assert!(!child.enter("root:ns#A"));
        assert_eq!(parent.cycle_count.get(), 1);
    }

    #[test]
    fn fresh_for_inheritance_does_not_see_sibling_composition_keys() {
        let mut parent = ResolutionContext::new(8, 5);
        parent.enter("Employee:ns#Address"); // a sibling composition edge
        let mut fresh = parent.fresh_for_inheritance();
        assert!(fresh.enter("Employee:ns#Address"));
    }

    #[test]
    fn depth_exceeded_past_max() {
        let mut ctx = ResolutionContext::new(1, 5);
        let child = ctx.descend();
        assert!(!child.depth_exceeded());
        let grandchild = child.descend();
        assert!(grandchild.depth_exceeded());
    }
}
