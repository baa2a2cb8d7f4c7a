use ahash::AHashMap;

use crate::graph::NodeId;

/// Assigns a dense [`NodeId`] to every distinct hashtag seen by this process.
///
/// Ids are handed out in first-seen order starting at 0. They are only
/// meaningful within one run: the same tag may get a different id in
/// another process or after a restart.
#[derive(Debug, Clone, Default)]
pub struct TagInterner {
    ids: AHashMap<String, NodeId>,
}

impl TagInterner {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, tag: &str) -> NodeId {
        if let Some(&id) = self.ids.get(tag) {
            return id;
        }
        let id = self.ids.len() as NodeId;
        self.ids.insert(tag.to_owned(), id);
        id
    }

    #[inline]
    pub fn get(&self, tag: &str) -> Option<NodeId> {
        self.ids.get(tag).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
