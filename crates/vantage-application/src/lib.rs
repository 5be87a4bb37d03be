//! Application layer of the Vantage viewer.
//!
//! Orchestrates the boundary services into the viewer's behavior: the
//! session controller (which screen is shown, sign-in lifecycle, model
//! open/close), the model locator (name-based resolution), the deep-link
//! processor (one-shot highlight/zoom), and the selection diagnostics.
//! Everything here is pure orchestration over injected `Arc<dyn …>`
//! services; no I/O happens in this crate.

pub mod deeplink;
pub mod diagnostics;
pub mod locator;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use deeplink::DeepLinkProcessor;
pub use locator::{ModelLocator, ResolvedModel};
pub use session::{SessionController, SessionOptions};
