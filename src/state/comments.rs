//! The comment tree for a debate, indexed for local-first mutations.
//!
//! Comments are two levels deep: roots and their replies. Rather than
//! recursively searching the nested DTO shape, the thread keeps an
//! explicit index (root order, a map of root nodes, per-root reply
//! order, and a map of reply nodes) so every id resolves to exactly
//! one slot and each mutation touches exactly one node.
//!
//! All operations are synchronous local transforms. The page layer
//! pairs each with its REST call and commits or reverts afterwards;
//! the next full refetch is always authoritative.

#[cfg(test)]
#[path = "comments_test.rs"]
mod comments_test;

use std::collections::HashMap;

use crate::net::types::Comment;

/// Sort orders the comment list can be fetched in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommentSort {
    #[default]
    Latest,
    Oldest,
    Replies,
}

impl CommentSort {
    /// The `sort` query parameter the backend expects.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Latest => "createdAt,desc",
            Self::Oldest => "createdAt,asc",
            Self::Replies => "replyCount,desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Latest => "Latest",
            Self::Oldest => "Oldest",
            Self::Replies => "Most replies",
        }
    }
}

/// A debate's comment tree, two levels deep, indexed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentThread {
    root_order: Vec<i64>,
    roots: HashMap<i64, Comment>,
    reply_order: HashMap<i64, Vec<i64>>,
    replies: HashMap<i64, Comment>,
}

impl CommentThread {
    /// Build the index from the nested DTO list the backend returns.
    ///
    /// Duplicate ids are dropped (first occurrence wins) so that one id
    /// never resolves to two slots. Replies keep their parent linkage
    /// from the enclosing root even when `parent_id` was absent.
    pub fn from_comments(list: Vec<Comment>) -> Self {
        let mut thread = Self::default();
        for mut root in list {
            let root_id = root.id;
            let nested = std::mem::take(&mut root.replies);
            if !thread.insert_root_back(root) {
                continue;
            }
            for mut reply in nested {
                reply.parent_id = Some(root_id);
                thread.insert_reply_back(root_id, reply);
            }
        }
        thread
    }

    /// Rebuild the nested DTO shape, in display order.
    pub fn to_comments(&self) -> Vec<Comment> {
        self.root_order
            .iter()
            .filter_map(|id| self.roots.get(id))
            .map(|root| {
                let mut root = root.clone();
                root.replies = self
                    .reply_ids(root.id)
                    .iter()
                    .filter_map(|rid| self.replies.get(rid))
                    .cloned()
                    .collect();
                root
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count, replies included.
    pub fn len(&self) -> usize {
        self.roots.len() + self.replies.len()
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.roots.contains_key(&id) || self.replies.contains_key(&id)
    }

    /// Look a node up by id: roots first, then replies.
    pub fn get(&self, id: i64) -> Option<&Comment> {
        self.roots.get(&id).or_else(|| self.replies.get(&id))
    }

    /// Root comments in display order.
    pub fn iter_roots(&self) -> impl Iterator<Item = &Comment> {
        self.root_order.iter().filter_map(|id| self.roots.get(id))
    }

    /// A root's replies in display order. Empty for unknown ids.
    pub fn replies_of(&self, root_id: i64) -> Vec<&Comment> {
        self.reply_ids(root_id)
            .iter()
            .filter_map(|id| self.replies.get(id))
            .collect()
    }

    /// A locally-unique negative id for a fabricated comment.
    pub fn local_id(&self) -> i64 {
        let min = self
            .roots
            .keys()
            .chain(self.replies.keys())
            .copied()
            .min()
            .unwrap_or(0);
        if min >= 0 { -1 } else { min - 1 }
    }

    /// Insert a fabricated root comment at the head of the list.
    /// Rejects duplicate ids.
    pub fn insert_root_front(&mut self, comment: Comment) -> bool {
        if self.contains(comment.id) {
            return false;
        }
        self.root_order.insert(0, comment.id);
        self.roots.insert(comment.id, comment);
        true
    }

    /// Insert a fabricated reply at the head of its root's replies.
    /// Rejects duplicate ids and unknown roots.
    pub fn insert_reply_front(&mut self, root_id: i64, mut reply: Comment) -> bool {
        if self.contains(reply.id) || !self.roots.contains_key(&root_id) {
            return false;
        }
        reply.parent_id = Some(root_id);
        self.reply_order.entry(root_id).or_default().insert(0, reply.id);
        self.replies.insert(reply.id, reply);
        true
    }

    /// Replace the content of the node with this id, leaving every other
    /// field and every sibling untouched.
    pub fn edit(&mut self, id: i64, content: &str) -> bool {
        if let Some(node) = self.roots.get_mut(&id).or_else(|| self.replies.get_mut(&id)) {
            node.content = content.to_owned();
            true
        } else {
            false
        }
    }

    /// Remove the node with this id. Removing a root removes its replies
    /// with it.
    pub fn remove(&mut self, id: i64) -> bool {
        if self.roots.remove(&id).is_some() {
            self.root_order.retain(|rid| *rid != id);
            for reply_id in self.reply_order.remove(&id).unwrap_or_default() {
                self.replies.remove(&reply_id);
            }
            return true;
        }
        if let Some(reply) = self.replies.remove(&id) {
            if let Some(parent_id) = reply.parent_id {
                if let Some(order) = self.reply_order.get_mut(&parent_id) {
                    order.retain(|rid| *rid != id);
                }
            }
            return true;
        }
        false
    }

    /// Flip the liked flag and adjust the like counter of the node with
    /// this id. Applying the same toggle twice restores the original
    /// state, which is also how a failed toggle rolls back.
    pub fn toggle_like(&mut self, id: i64) -> bool {
        if let Some(node) = self.roots.get_mut(&id).or_else(|| self.replies.get_mut(&id)) {
            node.liked = !node.liked;
            node.like_count += if node.liked { 1 } else { -1 };
            true
        } else {
            false
        }
    }

    fn reply_ids(&self, root_id: i64) -> &[i64] {
        self.reply_order.get(&root_id).map_or(&[], Vec::as_slice)
    }

    fn insert_root_back(&mut self, comment: Comment) -> bool {
        if self.contains(comment.id) {
            return false;
        }
        self.root_order.push(comment.id);
        self.roots.insert(comment.id, comment);
        true
    }

    fn insert_reply_back(&mut self, root_id: i64, reply: Comment) -> bool {
        if self.contains(reply.id) || !self.roots.contains_key(&root_id) {
            return false;
        }
        self.reply_order.entry(root_id).or_default().push(reply.id);
        self.replies.insert(reply.id, reply);
        true
    }
}
