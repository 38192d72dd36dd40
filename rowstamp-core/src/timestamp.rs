use chrono::{DateTime, TimeZone, Utc};

/// Giới hạn `Date` của trình duyệt: ±100 triệu ngày quanh epoch.
///
/// Giới hạn thực tế hẹp hơn: chrono chỉ biểu diễn được khoảng ±262 nghìn năm
/// (xem [`Timestamp::from_seconds`]).
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Lỗi khi đọc giá trị thuộc tính timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("Thuộc tính timestamp rỗng")]
    Empty,
    #[error("Timestamp không phải số nguyên hệ 10: {0:?}")]
    NotANumber(String),
    #[error("Timestamp nằm ngoài phạm vi biểu diễn: {0}")]
    OutOfRange(String),
}

/// Số giây kể từ Unix epoch đã được kiểm tra, kèm mốc thời gian tương ứng.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    seconds: i64,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Đọc chuỗi thuộc tính. Chấp nhận khoảng trắng hai đầu và dấu `+`/`-`.
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TimestampError::Empty);
        }

        let digits = trimmed
            .strip_prefix(|c: char| c == '+' || c == '-')
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimestampError::NotANumber(trimmed.to_string()));
        }

        let seconds: i64 = trimmed
            .parse()
            .map_err(|_| TimestampError::OutOfRange(trimmed.to_string()))?;
        Self::from_seconds(seconds)
    }

    /// Giá trị phải nằm trong cả giới hạn của trình duyệt lẫn của chrono; chrono
    /// hẹp hơn nên các năm sau khoảng +262142 đều bị `OutOfRange`.
    pub fn from_seconds(seconds: i64) -> Result<Self, TimestampError> {
        let out_of_range = || TimestampError::OutOfRange(seconds.to_string());

        let millis = seconds
            .checked_mul(1000)
            .filter(|ms| ms.abs() <= MAX_EPOCH_MILLIS)
            .ok_or_else(out_of_range)?;
        let instant = Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(out_of_range)?;

        Ok(Self { seconds, instant })
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn millis(&self) -> i64 {
        self.seconds * 1000
    }

    /// Mốc thời gian dùng làm đầu vào cho bộ định dạng theo locale.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}
