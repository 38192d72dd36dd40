//! Logic lõi chèn ngày giờ đã định dạng vào các hàng bảng có `data-timestamp`.

mod config;
mod document;
mod format;
mod memory;
mod render;
mod timestamp;

pub use config::{InvalidPolicy, MissingHeaderPolicy, RendererConfig};
pub use document::DocumentTree;
pub use format::{format_raw, ChronoFormatter, FormatZone, LocaleFormatter, INVALID_DATE_TEXT};
pub use memory::{MemoryDocument, NodeId};
pub use render::{render_rows, RenderError, RenderReport, RowOutcome};
pub use timestamp::{Timestamp, TimestampError, MAX_EPOCH_MILLIS};
