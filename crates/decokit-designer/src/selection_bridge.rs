//! Maps surface selection to the summary list.
//!
//! At most one summary row is active at a time. Activating a row asks the
//! presentation layer to scroll it to the vertical centre of its list.

use decokit_core::{ObjectHandle, ScrollRequest, SelectionEvent};

use crate::grouping::Group;

#[derive(Debug, Clone, Default)]
pub struct SelectionBridge {
    active_group: Option<usize>,
}

impl SelectionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_group(&self) -> Option<usize> {
        self.active_group
    }

    /// React to a change of the surface's primary selection.
    ///
    /// A handle that belongs to no group (an object the host added without a
    /// catalog record) clears the active row.
    pub fn on_selection(
        &mut self,
        active: Option<ObjectHandle>,
        groups: &[Group],
    ) -> SelectionEvent {
        let found = active.and_then(|handle| {
            groups
                .iter()
                .position(|g| g.contains(handle))
                .map(|index| (index, handle))
        });

        match found {
            Some((group_index, handle)) => {
                self.active_group = Some(group_index);
                tracing::debug!("Group {} active for {}", group_index, handle);
                SelectionEvent::GroupActivated {
                    group_index,
                    handle,
                    scroll: ScrollRequest::CenterVertically,
                }
            }
            None => {
                self.active_group = None;
                SelectionEvent::Cleared
            }
        }
    }

    /// Forget the active row without producing an event.
    pub fn reset(&mut self) {
        self.active_group = None;
    }
}
