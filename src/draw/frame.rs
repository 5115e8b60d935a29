//! Ordered display list of a drawing surface.

use super::options::Options;
use super::shape::Primitive;
use crate::backend::ItemId;

/// One primitive placed on a surface together with its paint options.
#[derive(Debug, Clone)]
pub struct CanvasItem {
    pub id: ItemId,
    pub primitive: Primitive,
    pub options: Options,
}

/// Container for all items currently on a surface.
///
/// Items are kept in creation order (first = bottom layer, last = top layer).
#[derive(Debug, Clone, Default)]
pub struct Frame {
    items: Vec<CanvasItem>,
}

impl Frame {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds an item on top of existing ones.
    pub fn push(&mut self, item: CanvasItem) {
        self.items.push(item);
    }

    /// Removes and returns the item with the given id, if present.
    pub fn remove(&mut self, id: ItemId) -> Option<CanvasItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut CanvasItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_item(id: u64) -> CanvasItem {
        CanvasItem {
            id: ItemId(id),
            primitive: Primitive::Text { x: 0.0, y: 0.0 },
            options: Options::default(),
        }
    }

    #[test]
    fn remove_keeps_stacking_order() {
        let mut frame = Frame::new();
        for id in 1..=3 {
            frame.push(text_item(id));
        }
        assert!(frame.remove(ItemId(2)).is_some());
        assert!(frame.remove(ItemId(2)).is_none());
        let ids: Vec<_> = frame.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(3)]);
    }
}
