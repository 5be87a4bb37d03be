//! Terminal viewport.
//!
//! Implements the viewport-control boundary over a display state the UI
//! can render: the mounted view, the emphasized/framed element sets, and
//! the live selection. Every state change the boundary requires is
//! reflected here; the matching events go out on a broadcast channel.

use std::sync::Mutex;
use tokio::sync::broadcast;
use vantage_core::ids::{ElementId, ViewId};
use vantage_core::services::{ViewportControl, ViewportEvent};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Render-ready snapshot of the viewport's display state.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub mounted_view: Option<ViewId>,
    pub emphasized: Vec<ElementId>,
    pub transparency: Option<f32>,
    pub framed: Vec<ElementId>,
    pub selection: Vec<ElementId>,
    pub cursor: usize,
}

impl DisplayState {
    /// Elements the cursor can walk: the emphasized set when present,
    /// otherwise whatever is framed.
    pub fn navigable(&self) -> &[ElementId] {
        if self.emphasized.is_empty() {
            &self.framed
        } else {
            &self.emphasized
        }
    }
}

/// The viewer's rendering surface, driven by keyboard navigation.
pub struct TuiViewport {
    events: broadcast::Sender<ViewportEvent>,
    display: Mutex<DisplayState>,
}

impl TuiViewport {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            events,
            display: Mutex::new(DisplayState::default()),
        }
    }

    pub fn snapshot(&self) -> DisplayState {
        self.display.lock().unwrap().clone()
    }

    /// Mounts a view. The view-opened notification fires once per view,
    /// not on remounts of the same view.
    pub fn mount_view(&self, view_id: ViewId) {
        let mut display = self.display.lock().unwrap();
        if display.mounted_view.as_ref() == Some(&view_id) {
            return;
        }
        *display = DisplayState {
            mounted_view: Some(view_id.clone()),
            ..DisplayState::default()
        };
        drop(display);
        let _ = self.events.send(ViewportEvent::ViewOpened { view_id });
    }

    /// Tears the view down, dropping all display state.
    pub fn unmount(&self) {
        *self.display.lock().unwrap() = DisplayState::default();
    }

    pub fn move_cursor(&self, delta: isize) {
        let mut display = self.display.lock().unwrap();
        let len = display.navigable().len();
        if len == 0 {
            return;
        }
        let cursor = display.cursor as isize + delta;
        display.cursor = cursor.rem_euclid(len as isize) as usize;
    }

    /// Selects the element under the cursor (a single-element selection).
    pub fn select_at_cursor(&self) {
        let selection = {
            let mut display = self.display.lock().unwrap();
            match display.navigable().get(display.cursor).cloned() {
                Some(id) => {
                    display.selection = vec![id];
                    display.selection.clone()
                }
                None => return,
            }
        };
        let _ = self
            .events
            .send(ViewportEvent::SelectionChanged { elements: selection });
    }

    /// Selects every navigable element at once.
    pub fn select_all(&self) {
        let selection = {
            let mut display = self.display.lock().unwrap();
            let all = display.navigable().to_vec();
            display.selection = all;
            display.selection.clone()
        };
        let _ = self
            .events
            .send(ViewportEvent::SelectionChanged { elements: selection });
    }

    pub fn clear_selection(&self) {
        {
            let mut display = self.display.lock().unwrap();
            display.selection.clear();
        }
        let _ = self.events.send(ViewportEvent::SelectionChanged {
            elements: Vec::new(),
        });
    }

    /// Toolbar "fit view": frames everything currently navigable.
    pub fn fit_view(&self) {
        let mut display = self.display.lock().unwrap();
        let all = display.navigable().to_vec();
        display.framed = all;
        display.cursor = 0;
    }
}

impl Default for TuiViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportControl for TuiViewport {
    fn subscribe_events(&self) -> broadcast::Receiver<ViewportEvent> {
        self.events.subscribe()
    }

    fn zoom_to_elements(&self, ids: &[ElementId]) {
        let mut display = self.display.lock().unwrap();
        display.framed = ids.to_vec();
        display.cursor = 0;
    }

    fn emphasize_elements(&self, ids: &[ElementId], transparency: f32) {
        let mut display = self.display.lock().unwrap();
        display.emphasized = ids.to_vec();
        display.transparency = Some(transparency);
    }

    fn clear_emphasis(&self) {
        let mut display = self.display.lock().unwrap();
        display.emphasized.clear();
        display.transparency = None;
    }
}
