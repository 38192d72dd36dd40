use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{InvalidPolicy, MissingHeaderPolicy, RendererConfig};
use crate::document::DocumentTree;
use crate::format::LocaleFormatter;
use crate::timestamp::Timestamp;

/// Lỗi dừng lượt quét.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Hàng thứ {index} không có vùng header để chèn ngày giờ")]
    MissingHeader { index: usize },
    #[error("Lỗi thao tác DOM: {0}")]
    Dom(String),
}

/// Kết quả xử lý một hàng.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Rendered { text: String },
    SkippedInvalid { raw: String, reason: String },
    SkippedNoHeader,
}

/// Báo cáo một lượt quét, mỗi phần tử ứng với một hàng theo thứ tự tài liệu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub rows: Vec<RowOutcome>,
}

impl RenderReport {
    pub fn rendered(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, RowOutcome::Rendered { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.rows.len() - self.rendered()
    }
}

/// Chèn ngày giờ đã định dạng vào vùng header của mọi hàng có timestamp.
///
/// Danh sách hàng được chụp trước khi thay đổi tài liệu. Gọi lại lần nữa sẽ
/// chèn thêm một node cho mỗi hàng.
pub fn render_rows<D, F>(
    document: &mut D,
    formatter: &F,
    config: &RendererConfig,
) -> Result<RenderReport, RenderError>
where
    D: DocumentTree,
    F: LocaleFormatter + ?Sized,
{
    let rows = document.rows(config)?;
    let mut report = RenderReport {
        rows: Vec::with_capacity(rows.len()),
    };

    for (index, row) in rows.iter().enumerate() {
        let raw = document
            .attribute(row, &config.timestamp_attribute)
            .unwrap_or_default();

        let text = match Timestamp::parse(&raw) {
            Ok(timestamp) => formatter.format(timestamp.instant()),
            Err(err) => match config.on_invalid {
                InvalidPolicy::Skip => {
                    warn!("Hàng {index}: bỏ qua timestamp {raw:?}: {err}");
                    report.rows.push(RowOutcome::SkippedInvalid {
                        raw,
                        reason: err.to_string(),
                    });
                    continue;
                }
                InvalidPolicy::Placeholder => formatter.invalid_text(),
            },
        };

        let Some(slot) = document.header_slot(row, config)? else {
            match config.on_missing_header {
                MissingHeaderPolicy::Skip => {
                    warn!("Hàng {index}: không có vùng .{}", config.header_class);
                    report.rows.push(RowOutcome::SkippedNoHeader);
                    continue;
                }
                MissingHeaderPolicy::Abort => return Err(RenderError::MissingHeader { index }),
            }
        };

        document.append_date(&slot, config, &text)?;
        debug!("Hàng {index}: {raw} -> {text}");
        report.rows.push(RowOutcome::Rendered { text });
    }

    info!(
        "Đã chèn ngày giờ cho {}/{} hàng",
        report.rendered(),
        report.rows.len()
    );
    Ok(report)
}
