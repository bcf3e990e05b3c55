//! Quantity grouping of placed items.
//!
//! Two placed items are equivalent when they come from the same catalog
//! identity with the same size variant. Items whose catalog record has no
//! identity fall back to display name, drawn image and variant.
//!
//! The fallback can merge two distinct catalog items that share a name and
//! an image path. That is a known limitation and kept as is, since it is
//! what users already see.

use std::collections::HashMap;

use decokit_core::{CatalogItem, GroupSummary, ImageRef, ObjectHandle, SceneError};

use crate::document::{PlacedItem, SceneDocument};
use crate::placement::PlacementOptions;

/// Equality key of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Identity {
        id: String,
        variant: Option<String>,
    },
    Fallback {
        name: String,
        image: ImageRef,
        variant: Option<String>,
    },
}

impl GroupKey {
    pub fn of(item: &PlacedItem) -> Self {
        let variant = item.variant.as_ref().map(|v| v.label.clone());
        match item.item.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => Self::Identity {
                id: id.to_string(),
                variant,
            },
            None => Self::Fallback {
                name: item.item.name.clone(),
                image: item.image.clone(),
                variant,
            },
        }
    }
}

/// A set of equivalent placed items.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    /// Members in stacking order; the first is the representative.
    pub members: Vec<PlacedItem>,
}

impl Group {
    pub fn representative(&self) -> &PlacedItem {
        &self.members[0]
    }

    pub fn quantity(&self) -> usize {
        self.members.len()
    }

    pub fn handles(&self) -> Vec<ObjectHandle> {
        self.members.iter().map(|m| m.handle).collect()
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.members.iter().any(|m| m.handle == handle)
    }

    pub fn catalog_item(&self) -> &CatalogItem {
        &self.representative().item
    }

    fn summary(&self, index: usize) -> GroupSummary {
        let rep = self.representative();
        GroupSummary {
            index,
            name: rep.item.name.clone(),
            image: rep.image.clone(),
            catalog_id: rep.item.id.clone(),
            variant: rep.variant.as_ref().map(|v| v.label.clone()),
            quantity: self.quantity(),
            members: self.handles(),
        }
    }
}

/// One unit of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityStep {
    Increment,
    Decrement,
}

/// Partition of the document into groups, cached per document revision.
#[derive(Debug, Clone, Default)]
pub struct GroupingIndex {
    cache: Option<(u64, Vec<Group>)>,
}

impl GroupingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition `items` in one pass. Groups come out in first-seen order.
    pub fn compute_groups(items: &[PlacedItem]) -> Vec<Group> {
        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();

        for item in items {
            let key = GroupKey::of(item);
            match index.get(&key) {
                Some(&i) => groups[i].members.push(item.clone()),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        members: vec![item.clone()],
                    });
                }
            }
        }
        groups
    }

    /// Current partition of `doc`, recomputed only after a state change.
    pub fn groups(&mut self, doc: &SceneDocument) -> &[Group] {
        let revision = doc.revision();
        let stale = !matches!(&self.cache, Some((cached, _)) if *cached == revision);
        if stale {
            let groups = Self::compute_groups(&doc.placed_items());
            self.cache = Some((revision, groups));
        }
        match &self.cache {
            Some((_, groups)) => groups.as_slice(),
            None => &[],
        }
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Summary rows for presentation, first-seen order.
    pub fn summary(&mut self, doc: &SceneDocument) -> Vec<GroupSummary> {
        self.groups(doc)
            .iter()
            .enumerate()
            .map(|(i, g)| g.summary(i))
            .collect()
    }

    /// Index of the group containing `handle`.
    pub fn group_of(&mut self, doc: &SceneDocument, handle: ObjectHandle) -> Option<usize> {
        self.groups(doc).iter().position(|g| g.contains(handle))
    }

    pub fn find(&mut self, doc: &SceneDocument, key: &GroupKey) -> Option<&Group> {
        self.groups(doc).iter().find(|g| &g.key == key)
    }

    /// Add one more member, placed like a fresh catalog pick.
    pub async fn increment(
        &mut self,
        doc: &mut SceneDocument,
        key: &GroupKey,
    ) -> Result<Option<ObjectHandle>, SceneError> {
        let Some(group) = self.find(doc, key) else {
            return Ok(None);
        };
        let rep = group.representative();
        let item = rep.item.clone();
        let options = PlacementOptions {
            variant: rep.variant.clone(),
        };

        let handle = doc.add_item(&item, &options).await?;
        Ok(Some(handle))
    }

    /// Remove the group's last member. Refuses to go below one member.
    pub fn decrement(
        &mut self,
        doc: &mut SceneDocument,
        key: &GroupKey,
    ) -> Result<Option<ObjectHandle>, SceneError> {
        let last = match self.find(doc, key) {
            Some(group) if group.quantity() > 1 => group.members[group.quantity() - 1].handle,
            Some(_) => {
                tracing::debug!("Quantity floor reached, keeping last member");
                return Ok(None);
            }
            None => return Ok(None),
        };

        doc.remove_item(last)?;
        Ok(Some(last))
    }

    /// Next unit change needed to reach `target`, or `None` when done.
    pub fn next_step(
        &mut self,
        doc: &SceneDocument,
        key: &GroupKey,
        target: usize,
    ) -> Option<QuantityStep> {
        let target = target.max(1);
        let current = self.find(doc, key)?.quantity();
        match current.cmp(&target) {
            std::cmp::Ordering::Less => Some(QuantityStep::Increment),
            std::cmp::Ordering::Greater => Some(QuantityStep::Decrement),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Add or remove members one at a time until the group has `target`
    /// members. Targets below one are clamped to one.
    ///
    /// Returns the number of unit changes made.
    pub async fn set_quantity(
        &mut self,
        doc: &mut SceneDocument,
        key: &GroupKey,
        target: usize,
    ) -> Result<usize, SceneError> {
        let mut steps = 0;
        while let Some(step) = self.next_step(doc, key, target) {
            let changed = match step {
                QuantityStep::Increment => self.increment(doc, key).await?,
                QuantityStep::Decrement => self.decrement(doc, key)?,
            };
            if changed.is_none() {
                break;
            }
            steps += 1;
        }
        Ok(steps)
    }
}

/// Parse quantity text from the summary list.
///
/// Anything that is not a positive integer becomes 1.
pub fn parse_quantity(input: &str) -> usize {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => {
            tracing::warn!("Invalid quantity '{}', using 1", input);
            1
        }
    }
}
