//! Headless render surface.
//!
//! Keeps objects in a z-ordered list and records lifecycle events. Used by the
//! command-line driver and by tests; a windowed host supplies its own surface.

use decokit_core::{ImageRef, ImageSize, ObjectHandle, Point, Transform};

use super::{
    RenderSurface, RenderSurfaceConfig, SurfaceBackground, SurfaceEvent, SurfaceObject,
    SurfaceSnapshot, ZOrder,
};

#[derive(Debug)]
pub struct MemorySurface {
    config: RenderSurfaceConfig,
    /// Bottom of the stack first.
    objects: Vec<SurfaceObject>,
    background: Option<SurfaceBackground>,
    /// Primary selection is the last entry.
    active: Vec<ObjectHandle>,
    next_handle: u64,
    events: Vec<SurfaceEvent>,
    offset_recalculations: usize,
}

impl MemorySurface {
    pub fn new(config: RenderSurfaceConfig) -> Self {
        Self {
            config,
            objects: Vec::new(),
            background: None,
            active: Vec::new(),
            next_handle: 1,
            events: Vec::new(),
            offset_recalculations: 0,
        }
    }

    /// How many times the host asked for an offset recalculation.
    pub fn offset_recalculations(&self) -> usize {
        self.offset_recalculations
    }

    fn index_of(&self, handle: ObjectHandle) -> Option<usize> {
        self.objects.iter().position(|o| o.handle == handle)
    }

    fn allocate_handle(&mut self) -> ObjectHandle {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn replace_selection(&mut self, handles: Vec<ObjectHandle>) {
        let before = self.active.last().copied();
        self.active = handles;
        match (before, self.active.last().copied()) {
            (None, Some(now)) => self.events.push(SurfaceEvent::SelectionCreated(now)),
            (Some(prev), Some(now)) if prev != now => {
                self.events.push(SurfaceEvent::SelectionUpdated(now))
            }
            (Some(_), None) => self.events.push(SurfaceEvent::SelectionCleared),
            _ => {}
        }
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new(RenderSurfaceConfig::default())
    }
}

impl RenderSurface for MemorySurface {
    fn config(&self) -> &RenderSurfaceConfig {
        &self.config
    }

    fn add_object(
        &mut self,
        image: ImageRef,
        natural_size: ImageSize,
        transform: Transform,
    ) -> ObjectHandle {
        let handle = self.allocate_handle();
        self.objects.push(SurfaceObject {
            handle,
            image,
            natural_size,
            transform,
        });
        self.events.push(SurfaceEvent::ObjectAdded(handle));
        handle
    }

    fn remove_object(&mut self, handle: ObjectHandle) -> bool {
        let Some(index) = self.index_of(handle) else {
            return false;
        };
        self.objects.remove(index);
        self.events.push(SurfaceEvent::ObjectRemoved(handle));

        if self.active.contains(&handle) {
            let remaining = self
                .active
                .iter()
                .copied()
                .filter(|h| *h != handle)
                .collect();
            self.replace_selection(remaining);
        }
        true
    }

    fn object(&self, handle: ObjectHandle) -> Option<&SurfaceObject> {
        self.objects.iter().find(|o| o.handle == handle)
    }

    fn handles(&self) -> Vec<ObjectHandle> {
        self.objects.iter().map(|o| o.handle).collect()
    }

    fn set_active(&mut self, handle: Option<ObjectHandle>) -> bool {
        match handle {
            Some(handle) => self.set_active_many(&[handle]),
            None => {
                self.replace_selection(Vec::new());
                true
            }
        }
    }

    fn set_active_many(&mut self, handles: &[ObjectHandle]) -> bool {
        if handles.iter().any(|h| self.index_of(*h).is_none()) {
            return false;
        }
        self.replace_selection(handles.to_vec());
        true
    }

    fn active_handle(&self) -> Option<ObjectHandle> {
        self.active.last().copied()
    }

    fn active_handles(&self) -> Vec<ObjectHandle> {
        self.active.clone()
    }

    fn set_transform(&mut self, handle: ObjectHandle, transform: Transform) -> bool {
        let Some(index) = self.index_of(handle) else {
            return false;
        };
        if self.objects[index].transform != transform {
            self.objects[index].transform = transform;
            self.events.push(SurfaceEvent::ObjectModified(handle));
        }
        true
    }

    fn reorder(&mut self, handle: ObjectHandle, direction: ZOrder) -> bool {
        let Some(from) = self.index_of(handle) else {
            return false;
        };
        let last = self.objects.len() - 1;
        let to = match direction {
            ZOrder::ToFront => last,
            ZOrder::ToBack => 0,
            ZOrder::ForwardOne => (from + 1).min(last),
            ZOrder::BackwardOne => from.saturating_sub(1),
        };
        if to != from {
            let object = self.objects.remove(from);
            self.objects.insert(to, object);
            self.events.push(SurfaceEvent::ObjectModified(handle));
        }
        true
    }

    fn set_background(&mut self, background: Option<SurfaceBackground>) {
        self.background = background;
    }

    fn background(&self) -> Option<&SurfaceBackground> {
        self.background.as_ref()
    }

    fn clear(&mut self) {
        self.replace_selection(Vec::new());
        self.objects.clear();
        self.background = None;
        self.events.push(SurfaceEvent::Cleared);
    }

    fn serialize(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            objects: self.objects.clone(),
            background: self.background.clone(),
        }
    }

    fn deserialize(&mut self, snapshot: &SurfaceSnapshot) {
        self.clear();
        self.background = snapshot.background.clone();
        for object in &snapshot.objects {
            self.next_handle = self.next_handle.max(object.handle.0 + 1);
            self.objects.push(object.clone());
            self.events.push(SurfaceEvent::ObjectAdded(object.handle));
        }
    }

    fn drain_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    fn recalculate_offset(&mut self) {
        self.offset_recalculations += 1;
    }

    fn object_at(&self, point: &Point) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.contains_point(point))
            .map(|o| o.handle)
    }
}
