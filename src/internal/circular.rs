//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};

/// Default nesting limit. Must be reachable on a 2 MiB thread stack.
pub(crate) const MAX_DEPTH: usize = 256;

// Thread-local resolution state for circular dependency detection.
// Entries carry the container uid so independent containers never collide.
thread_local! {
    static RESOLUTION_STACK: RefCell<Vec<(u64, String)>> = const { RefCell::new(Vec::new()) };
}

/// Marks `id` as under construction on this thread until dropped.
pub(crate) struct ResolutionGuard {
    depth: usize,
}

impl ResolutionGuard {
    /// Pushes `id`, failing when it is already being built by the same
    /// container on this thread or when the stack is `max_depth` deep.
    pub(crate) fn enter(uid: u64, id: &str, max_depth: usize) -> DiResult<Self> {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();

            // Circular detection BEFORE pushing the new id
            if let Some(start) = stack
                .iter()
                .position(|(owner, entry)| *owner == uid && entry == id)
            {
                let mut path: Vec<String> = stack[start..]
                    .iter()
                    .filter(|(owner, _)| *owner == uid)
                    .map(|(_, entry)| entry.clone())
                    .collect();
                path.push(id.to_string());
                return Err(DiError::Circular(path));
            }

            if stack.len() >= max_depth {
                return Err(DiError::DepthExceeded(max_depth));
            }

            stack.push((uid, id.to_string()));
            Ok(ResolutionGuard { depth: stack.len() })
        })
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            debug_assert_eq!(stack.len(), self.depth);
            stack.truncate(self.depth - 1);
        });
    }
}
