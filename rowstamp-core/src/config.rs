use serde::{Deserialize, Serialize};

/// Cách xử lý hàng có giá trị timestamp không đọc được.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPolicy {
    /// Bỏ qua hàng, không chèn gì.
    #[default]
    Skip,
    /// Chèn chuỗi "Invalid Date" của môi trường host.
    Placeholder,
}

/// Cách xử lý hàng thiếu vùng header.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingHeaderPolicy {
    /// Ghi cảnh báo rồi xử lý tiếp các hàng sau.
    #[default]
    Skip,
    /// Dừng toàn bộ lượt quét tại hàng lỗi.
    Abort,
}

/// Cấu hình cấu trúc markup và chính sách lỗi của renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RendererConfig {
    /// Tag của hàng, mặc định `tr`.
    pub row_tag: String,
    /// Thuộc tính chứa số giây kể từ Unix epoch.
    pub timestamp_attribute: String,
    /// Class đánh dấu vùng header bên trong hàng.
    pub header_class: String,
    /// Tag của phần tử con trong header nhận node ngày giờ.
    pub slot_tag: String,
    /// Tag của node ngày giờ được tạo mới.
    pub date_tag: String,
    pub date_class: Option<String>,
    /// Locale BCP 47; `None` dùng locale mặc định của host.
    pub locale: Option<String>,
    pub on_invalid: InvalidPolicy,
    pub on_missing_header: MissingHeaderPolicy,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            row_tag: "tr".to_string(),
            timestamp_attribute: "data-timestamp".to_string(),
            header_class: "post-header".to_string(),
            slot_tag: "div".to_string(),
            date_tag: "p".to_string(),
            date_class: None,
            locale: None,
            on_invalid: InvalidPolicy::default(),
            on_missing_header: MissingHeaderPolicy::default(),
        }
    }
}

impl RendererConfig {
    /// CSS selector chọn các hàng cần xử lý, ví dụ `tr[data-timestamp]`.
    pub fn row_selector(&self) -> String {
        format!("{}[{}]", self.row_tag, self.timestamp_attribute)
    }

    /// CSS selector của vùng header, ví dụ `.post-header`.
    pub fn header_selector(&self) -> String {
        format!(".{}", self.header_class)
    }
}
