//! Deep-link processor.
//!
//! Applies the deep link's "focus and zoom to element set" exactly once,
//! on the first view-opened notification, and never again for the lifetime
//! of that view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use vantage_core::deeplink::DeepLinkParams;
use vantage_core::ids::ElementId;
use vantage_core::services::{EMPHASIS_TRANSPARENCY, ViewportControl, ViewportEvent};

/// One-shot highlight/zoom derived from the deep-link parameters.
pub struct DeepLinkProcessor {
    element_ids: Vec<ElementId>,
    applied: AtomicBool,
}

impl DeepLinkProcessor {
    pub fn new(params: &DeepLinkParams) -> Self {
        Self {
            element_ids: params.element_ids(),
            applied: AtomicBool::new(false),
        }
    }

    /// True when the deep link carries element identifiers to highlight.
    pub fn has_elements(&self) -> bool {
        !self.element_ids.is_empty()
    }

    /// Frames the deep-linked elements and de-emphasizes everything else.
    ///
    /// Only the first call has an effect; with an empty identifier set the
    /// call is a strict no-op on the viewport.
    pub fn apply(&self, viewport: &dyn ViewportControl) {
        if self.applied.swap(true, Ordering::SeqCst) {
            return;
        }
        if self.element_ids.is_empty() {
            return;
        }

        tracing::debug!(count = self.element_ids.len(), "applying deep-link focus");
        viewport.zoom_to_elements(&self.element_ids);
        viewport.emphasize_elements(&self.element_ids, EMPHASIS_TRANSPARENCY);
    }

    /// Arms the one-shot subscription: the first `ViewOpened` event applies
    /// the focus, then the subscription ends.
    pub fn spawn_on_view_opened(
        self: Arc<Self>,
        viewport: Arc<dyn ViewportControl>,
        cancel: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        let mut rx = viewport.subscribe_events();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    event = rx.recv() => match event {
                        Ok(ViewportEvent::ViewOpened { .. }) => {
                            self.apply(viewport.as_ref());
                            break;
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockViewport;
    use vantage_core::ids::ViewId;

    fn params(query: &str) -> DeepLinkParams {
        DeepLinkParams::parse(&format!("https://viewer.example.com/?{query}")).unwrap()
    }

    #[test]
    fn applies_zoom_and_emphasis_exactly_once() {
        let processor = DeepLinkProcessor::new(&params("elementIds=1%202%203"));
        let viewport = MockViewport::new();

        processor.apply(&viewport);
        processor.apply(&viewport);

        let zooms = viewport.zoom_calls.lock().unwrap();
        assert_eq!(
            *zooms,
            vec![vec![
                ElementId::from("1"),
                ElementId::from("2"),
                ElementId::from("3")
            ]]
        );

        let emphases = viewport.emphasize_calls.lock().unwrap();
        assert_eq!(emphases.len(), 1);
        assert_eq!(emphases[0].1, EMPHASIS_TRANSPARENCY);
    }

    #[test]
    fn an_empty_element_set_is_a_no_op() {
        let processor = DeepLinkProcessor::new(&params("projectName=Acme"));
        let viewport = MockViewport::new();

        processor.apply(&viewport);

        assert!(viewport.zoom_calls.lock().unwrap().is_empty());
        assert!(viewport.emphasize_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fires_on_the_first_view_opened_event_only() {
        let processor = Arc::new(DeepLinkProcessor::new(&params("elementIds=0x1a")));
        let viewport = Arc::new(MockViewport::new());
        let cancel = CancellationToken::new();

        let task = processor
            .clone()
            .spawn_on_view_opened(viewport.clone(), cancel);

        // Unrelated events do not trigger the focus.
        viewport.emit(ViewportEvent::SelectionChanged {
            elements: vec![ElementId::from("0x2b")],
        });
        viewport.emit(ViewportEvent::ViewOpened {
            view_id: ViewId::from("0x20"),
        });

        task.await.unwrap();

        assert_eq!(viewport.zoom_calls.lock().unwrap().len(), 1);
        assert_eq!(viewport.emphasize_calls.lock().unwrap().len(), 1);
    }
}
