//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for Kanban style boards.
//! A card can be dropped on another card or on a column body.
//! Uses a movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// What the pointer is currently over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Another card (by card id)
    Card(u32),
    /// A column body (by column index)
    Column(usize),
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    /// Card under mousedown that has not moved past the threshold yet
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 8;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
    }
}

/// True once the pointer moved far enough from where it was pressed
pub fn past_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// Reset every drag signal
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
}

/// Mousedown on a card: record a pending drag with the start position
pub fn make_on_card_mousedown(dnd: DndSignals, card_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_id_write.set(Some(card_id));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Mouseenter on a card: the card becomes the drop target
pub fn make_on_card_mouseenter(dnd: DndSignals, card_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Card(card_id)));
        }
    }
}

/// Mouseenter on a column body
pub fn make_on_column_mouseenter(dnd: DndSignals, column: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Column(column)));
        }
    }
}

/// Mouseleave on a card: fall back to its column
pub fn make_on_card_mouseleave(dnd: DndSignals, column: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Column(column)));
        }
    }
}

/// Mouseleave on a column: nothing under the pointer
pub fn make_on_column_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Document-level mousemove: promotes a pending card to a real drag
fn bind_global_mousemove<S>(dnd: DndSignals, on_start: S)
where
    S: Fn(u32) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        // try_*: the listener outlives the component that bound it
        let Some(pending) = dnd.pending_id_read.try_get_untracked().flatten() else {
            return;
        };
        if dnd.dragging_id_read.try_get_untracked().flatten().is_some() {
            return;
        }
        if past_threshold(dnd.start_read.get_untracked(), (ev.client_x(), ev.client_y())) {
            dnd.dragging_id_write.set(Some(pending));
            on_start(pending);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind the document-level handlers.
///
/// `on_start` fires when a card crosses the drag threshold. `on_end` fires on
/// every mouseup that ends a real drag, with the dragged id and whatever was
/// under the pointer (`None` when dropped outside any target).
pub fn bind_global_handlers<S, E>(dnd: DndSignals, on_start: S, on_end: E)
where
    S: Fn(u32) + 'static,
    E: Fn(u32, Option<DropTarget>) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let Some(dragging_id) = dnd.dragging_id_read.try_get_untracked() else {
            return;
        };
        let drop_target = dnd.drop_target_read.get_untracked();
        end_drag(&dnd);
        // A plain click never crossed the threshold
        if let Some(dragged) = dragging_id {
            on_end(dragged, drop_target);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd, on_start);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!past_threshold((10, 10), (10, 10)));
        assert!(!past_threshold((10, 10), (18, 2)));
        assert!(past_threshold((10, 10), (19, 10)));
        assert!(past_threshold((10, 10), (10, 1)));
    }
}
