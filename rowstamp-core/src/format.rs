use chrono::{DateTime, Local, Utc};

use crate::timestamp::{Timestamp, TimestampError};

/// Chuỗi mà trình duyệt trả về khi định dạng một mốc thời gian không hợp lệ.
pub const INVALID_DATE_TEXT: &str = "Invalid Date";

/// Kiểu `M/D/YYYY, h:mm:ss AM`, giống `toLocaleString()` với locale en-US.
const US_DATE_TIME: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Định dạng một mốc thời gian theo quy ước locale của host.
pub trait LocaleFormatter {
    fn format(&self, instant: DateTime<Utc>) -> String;

    fn invalid_text(&self) -> String {
        INVALID_DATE_TEXT.to_string()
    }
}

/// Múi giờ mà [`ChronoFormatter`] dùng để hiển thị.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatZone {
    #[default]
    Local,
    Utc,
}

/// Bộ định dạng native, không phụ thuộc trình duyệt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoFormatter {
    zone: FormatZone,
}

impl ChronoFormatter {
    pub fn new(zone: FormatZone) -> Self {
        Self { zone }
    }

    pub fn utc() -> Self {
        Self::new(FormatZone::Utc)
    }
}

impl LocaleFormatter for ChronoFormatter {
    fn format(&self, instant: DateTime<Utc>) -> String {
        match self.zone {
            FormatZone::Utc => instant.format(US_DATE_TIME).to_string(),
            FormatZone::Local => instant
                .with_timezone(&Local)
                .format(US_DATE_TIME)
                .to_string(),
        }
    }
}

/// Đọc chuỗi thuộc tính rồi định dạng, trả lỗi nếu chuỗi không hợp lệ.
pub fn format_raw<F>(formatter: &F, raw: &str) -> Result<String, TimestampError>
where
    F: LocaleFormatter + ?Sized,
{
    let timestamp = Timestamp::parse(raw)?;
    Ok(formatter.format(timestamp.instant()))
}
