use super::Reconciler;
use super::patch::{Patch, PendingOp};
use crate::error::Result;
use crate::host::{HostId, HostTree};
use crate::vnode::{Children, Key, VNode};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Explicit key, else the child's position
fn child_key(child: &VNode, index: usize) -> Key {
    child.key().cloned().unwrap_or(Key::Index(index))
}

impl<H: HostTree + 'static> Reconciler<H> {
    /// Reconcile the children of host node `parent` from `old` to `new`.
    ///
    /// Children are matched by key. A reused child whose previous position is
    /// behind the furthest position reused so far gets moved; everything else
    /// reused stays where it is. Unmatched new children are mounted, unmatched
    /// old children unmounted.
    pub(crate) fn update_children(&self, parent: HostId, old: &Children, new: &Children) -> Result<()> {
        let old = old.as_slice();
        let new = new.as_slice();
        if self.config.warn_on_duplicate_keys {
            warn_duplicate_keys(parent, new);
        }

        let mut by_key: HashMap<Key, usize> = HashMap::with_capacity(old.len());
        for (index, child) in old.iter().enumerate() {
            // Last one wins; earlier duplicates stay unmatched and get unmounted
            by_key.insert(child_key(child, index), index);
        }

        let mut reused = vec![false; old.len()];
        let mut pending: SmallVec<[PendingOp<'_>; 8]> = SmallVec::new();
        let mut last_placed_index = 0;

        for (index, child) in new.iter().enumerate() {
            let matched = by_key
                .get(&child_key(child, index))
                .copied()
                .filter(|&position| !reused[position] && old[position].same_type(child));
            let Some(position) = matched else {
                pending.push(PendingOp::Place { index, vnode: child });
                continue;
            };

            reused[position] = true;
            let previous = &old[position];
            let old_index = self.mount_index(previous.id()).unwrap_or(position);
            self.update_element(previous, child)?;
            self.set_mount_index(child.id(), index);
            if old_index < last_placed_index {
                pending.push(PendingOp::Move {
                    from: old_index,
                    to: index,
                    vnode: child,
                });
            }
            last_placed_index = last_placed_index.max(old_index);
        }

        let mut deletes = 0;
        for (index, child) in old.iter().enumerate() {
            if reused[index] {
                continue;
            }
            self.record_patch(Patch::Delete {
                parent,
                index,
                vnode: child.id(),
            });
            self.unmount(child)?;
            deletes += 1;
        }

        for op in &pending {
            let PendingOp::Move { vnode, .. } = op else {
                continue;
            };
            if let Some(host) = self.locate(Some(vnode)) {
                self.host.borrow_mut().remove(host)?;
            }
        }

        let mut placements = 0;
        let mut moves = 0;
        for op in pending {
            match op {
                PendingOp::Place { index, vnode } => {
                    self.set_mount_index(vnode.id(), index);
                    self.record_patch(Patch::Placement {
                        parent,
                        index,
                        vnode: vnode.id(),
                    });
                    if let Some(host) = self.mount(vnode)? {
                        self.insert_at(parent, host, index)?;
                    }
                    placements += 1;
                }
                PendingOp::Move { from, to, vnode } => {
                    self.record_patch(Patch::Move {
                        parent,
                        from,
                        to,
                        vnode: vnode.id(),
                    });
                    if let Some(host) = self.locate(Some(vnode)) {
                        self.insert_at(parent, host, to)?;
                    }
                    moves += 1;
                }
            }
        }

        debug!(?parent, placements, moves, deletes, "children reconciled");
        Ok(())
    }
}

fn warn_duplicate_keys(parent: HostId, children: &[VNode]) {
    let mut seen = HashSet::with_capacity(children.len());
    for key in children.iter().filter_map(VNode::key) {
        if !seen.insert(key) {
            warn!(?parent, ?key, "duplicate key among siblings, only one will be reused");
        }
    }
}
