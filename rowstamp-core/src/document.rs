use crate::config::RendererConfig;
use crate::render::RenderError;

/// Cây tài liệu mà renderer đọc và ghi vào.
///
/// Trình duyệt (web-sys) và [`MemoryDocument`](crate::MemoryDocument) đều hiện thực trait này.
pub trait DocumentTree {
    type Node;

    /// Danh sách hàng có thuộc tính timestamp, theo thứ tự tài liệu.
    ///
    /// Kết quả là một bản chụp: các thay đổi sau đó không làm đổi danh sách.
    fn rows(&self, config: &RendererConfig) -> Result<Vec<Self::Node>, RenderError>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Phần tử `slot_tag` đầu tiên trong vùng header đầu tiên của hàng.
    fn header_slot(
        &self,
        row: &Self::Node,
        config: &RendererConfig,
    ) -> Result<Option<Self::Node>, RenderError>;

    /// Tạo node `date_tag` chứa `text` và gắn làm con cuối của `slot`.
    fn append_date(
        &mut self,
        slot: &Self::Node,
        config: &RendererConfig,
        text: &str,
    ) -> Result<(), RenderError>;
}
