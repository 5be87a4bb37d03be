//! Selection-change diagnostics.
//!
//! The one mandated log line of the viewer: whenever the live selection
//! set changes to exactly one element, that element's identifier is written
//! to the diagnostic log. Empty and multi-element selections produce no
//! output.

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use vantage_core::ids::ElementId;
use vantage_core::services::{ViewportControl, ViewportEvent};

/// Returns the selected element when the selection holds exactly one.
pub fn single_selection(elements: &[ElementId]) -> Option<&ElementId> {
    match elements {
        [only] => Some(only),
        _ => None,
    }
}

/// Subscribes to the viewport's event stream for the lifetime of the
/// cancellation token and logs single-element selections.
pub fn spawn_selection_logger(
    viewport: Arc<dyn ViewportControl>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    let mut rx = viewport.subscribe_events();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                event = rx.recv() => match event {
                    Ok(ViewportEvent::SelectionChanged { elements }) => {
                        if let Some(id) = single_selection(&elements) {
                            tracing::info!(element = %id, "element selected");
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                },
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_element_is_reported() {
        let elements = vec![ElementId::from("0x1a")];
        assert_eq!(single_selection(&elements), Some(&ElementId::from("0x1a")));
    }

    #[test]
    fn empty_and_multi_element_selections_are_ignored() {
        assert_eq!(single_selection(&[]), None);
        let elements = vec![ElementId::from("0x1a"), ElementId::from("0x2b")];
        assert_eq!(single_selection(&elements), None);
    }
}
