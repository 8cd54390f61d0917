//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for Leptos, generic over the dragged id and the
//! drop target. A movement threshold distinguishes a click from a drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long (ms) clicks are suppressed after a drop
const JUST_ENDED_MS: i32 = 100;

/// DnD state signals
///
/// `Id` identifies the dragged element, `T` the place it can be dropped on.
pub struct DndSignals<Id: Send + Sync + 'static, T: Send + Sync + 'static> {
    pub dragging: RwSignal<Option<Id>>,
    pub drop_target: RwSignal<Option<T>>,
    /// Pending id (mousedown but not yet dragging)
    pub pending: RwSignal<Option<Id>>,
    /// Start position for movement detection
    pub start: RwSignal<(i32, i32)>,
    pub just_ended: RwSignal<bool>,
}

impl<Id: Send + Sync + 'static, T: Send + Sync + 'static> Clone for DndSignals<Id, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Id: Send + Sync + 'static, T: Send + Sync + 'static> Copy for DndSignals<Id, T> {}

impl<Id, T> DndSignals<Id, T>
where
    Id: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            dragging: RwSignal::new(None),
            drop_target: RwSignal::new(None),
            pending: RwSignal::new(None),
            start: RwSignal::new((0, 0)),
            just_ended: RwSignal::new(false),
        }
    }

    /// Tracked: is `id` the element being dragged
    pub fn is_dragging(&self, id: &Id) -> bool {
        self.dragging.with(|d| d.as_ref() == Some(id))
    }

    /// Tracked: is anything being dragged
    pub fn is_active(&self) -> bool {
        self.dragging.with(|d| d.is_some())
    }

    /// Tracked: is `target` the current drop target
    pub fn is_target(&self, target: &T) -> bool {
        self.drop_target.with(|t| t.as_ref() == Some(target))
    }

    /// True right after a drop, so the trailing click can be ignored
    pub fn just_dropped(&self) -> bool {
        self.just_ended.get_untracked()
    }

    /// End drag operation
    pub fn end_drag(&self) {
        self.dragging.set(None);
        self.drop_target.set(None);
        self.pending.set(None);
        self.just_ended.set(true);

        if let Some(win) = web_sys::window() {
            let clear = self.just_ended;
            let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
                clear.set(false);
            });
            let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                JUST_ENDED_MS,
            );
            cb.forget();
        }
    }
}

impl<Id, T> Default for DndSignals<Id, T>
where
    Id: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Has the pointer moved far enough from `start` to count as a drag
pub fn past_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    let dx = (now.0 - start.0).abs();
    let dy = (now.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// A drop only happens when both a dragged element and a target exist
pub fn resolve_drop<Id, T>(dragging: Option<Id>, target: Option<T>) -> Option<(Id, T)> {
    match (dragging, target) {
        (Some(id), Some(target)) => Some((id, target)),
        _ => None,
    }
}

fn is_form_control(target: &web_sys::EventTarget) -> bool {
    target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
}

/// Create mousedown handler for draggable elements
/// Records pending drag with start position
pub fn make_on_mousedown<Id, T>(
    dnd: DndSignals<Id, T>,
    id: Id,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    Id: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if is_form_control(&target) {
                return;
            }
        }
        dnd.pending.set(Some(id.clone()));
        dnd.start.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for drop targets
pub fn make_on_target_mouseenter<Id, T>(
    dnd: DndSignals<Id, T>,
    target: T,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    Id: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging.with_untracked(|d| d.is_some()) {
            dnd.drop_target.set(Some(target.clone()));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<Id, T>(dnd: DndSignals<Id, T>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    Id: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging.with_untracked(|d| d.is_some()) {
            dnd.drop_target.set(None);
        }
    }
}

/// Bind document mousemove: starts the drag once the threshold is passed
fn bind_global_mousemove<Id, T>(dnd: DndSignals<Id, T>)
where
    Id: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending.get_untracked();
        if pending.is_none() || dnd.dragging.with_untracked(|d| d.is_some()) {
            return;
        }
        if past_threshold(dnd.start.get_untracked(), (ev.client_x(), ev.client_y())) {
            dnd.dragging.set(pending);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind document mouseup for drop detection (also binds mousemove)
pub fn bind_global_mouseup<Id, T, F>(dnd: DndSignals<Id, T>, on_drop: F)
where
    Id: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(Id, T) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dropped = resolve_drop(dnd.dragging.get_untracked(), dnd.drop_target.get_untracked());
        dnd.pending.set(None);
        match dropped {
            Some((id, target)) => {
                dnd.end_drag();
                on_drop(id, target);
            }
            // Plain click: the element's own click handler runs
            None if dnd.dragging.with_untracked(|d| d.is_some()) => dnd.end_drag(),
            None => {}
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_moves_stay_clicks() {
        assert!(!past_threshold((10, 10), (10, 10)));
        assert!(!past_threshold((10, 10), (15, 5)));
    }

    #[test]
    fn moving_past_threshold_starts_drag() {
        assert!(past_threshold((10, 10), (16, 10)));
        assert!(past_threshold((10, 10), (10, 4)));
    }

    #[test]
    fn drop_needs_both_sides() {
        assert_eq!(resolve_drop(Some("t1"), Some(3)), Some(("t1", 3)));
        assert_eq!(resolve_drop::<&str, i32>(Some("t1"), None), None);
        assert_eq!(resolve_drop::<&str, i32>(None, Some(3)), None);
    }
}
