//! Rendering module turning table lines back into markup.
//!
//! Two contexts are supported: export (static document conversion, returns
//! markup) and replay (historical-snapshot playback, updates a target
//! element in place). Live editing is rendered by the host and is
//! deliberately not handled here.

mod dispatch;
mod row;

pub use dispatch::{line_to_export_html, resolve_table_attribute};
pub use row::{export_row, render, replay_row, RenderContext, ReplayBuffer, ReplayTarget};
