//! Per-panel state stores.
//!
//! Each editor panel owns a [`PanelStore`] holding the content being edited.
//! Listeners subscribe to changes; [`PanelStore::bind`] installs the listener
//! that writes the content back into the host document.

mod api_request;
mod panel;
mod timer;

pub use panel::{ListenerId, PanelStore, StoreListener};
