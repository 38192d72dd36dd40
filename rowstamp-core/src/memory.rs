//! Cây phần tử trong bộ nhớ, dùng cho CLI và test native.

use crate::config::RendererConfig;
use crate::document::DocumentTree;
use crate::render::RenderError;

/// Định danh một phần tử trong [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum Child {
    Element(NodeId),
    Text(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Child>,
}

/// DOM tối giản lưu trong arena: chỉ có phần tử, thuộc tính và text.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    elements: Vec<Element>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Tạo tài liệu chỉ gồm một phần tử `body` rỗng.
    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                tag: "body".to_string(),
                attributes: Vec::new(),
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                .collect(),
            children: Vec::new(),
        });
        self.elements[parent.0].children.push(Child::Element(id));
        id
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        self.elements[parent.0]
            .children
            .push(Child::Text(text.to_string()));
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.elements[node.0].tag
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.elements[node.0]
            .attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get_attribute(node, "class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Các phần tử con trực tiếp, theo thứ tự.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.elements[node.0]
            .children
            .iter()
            .filter_map(|child| match child {
                Child::Element(id) => Some(*id),
                Child::Text(_) => None,
            })
            .collect()
    }

    /// Text ghép từ node và toàn bộ hậu duệ.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        for child in &self.elements[node.0].children {
            match child {
                Child::Element(id) => self.collect_text(*id, out),
                Child::Text(text) => out.push_str(text),
            }
        }
    }

    /// Hậu duệ của `node` (không gồm chính nó) theo thứ tự tài liệu.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .element_children(node)
            .into_iter()
            .rev()
            .collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.element_children(next).into_iter().rev());
        }
        out
    }

    /// Xuất cây con dưới gốc thành HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in &self.elements[0].children {
            self.write_child(child, &mut out);
        }
        out
    }

    fn write_child(&self, child: &Child, out: &mut String) {
        match child {
            Child::Text(text) => out.push_str(&escape(text, false)),
            Child::Element(id) => {
                let element = &self.elements[id.0];
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
                }
                out.push('>');
                for child in &element.children {
                    self.write_child(child, out);
                }
                out.push_str(&format!("</{}>", element.tag));
            }
        }
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

impl DocumentTree for MemoryDocument {
    type Node = NodeId;

    fn rows(&self, config: &RendererConfig) -> Result<Vec<NodeId>, RenderError> {
        Ok(self
            .descendants(self.root())
            .into_iter()
            .filter(|&id| {
                self.tag(id).eq_ignore_ascii_case(&config.row_tag)
                    && self.get_attribute(id, &config.timestamp_attribute).is_some()
            })
            .collect())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get_attribute(*node, name).map(str::to_string)
    }

    fn header_slot(
        &self,
        row: &NodeId,
        config: &RendererConfig,
    ) -> Result<Option<NodeId>, RenderError> {
        let Some(header) = self
            .descendants(*row)
            .into_iter()
            .find(|&id| self.has_class(id, &config.header_class))
        else {
            return Ok(None);
        };

        Ok(self
            .descendants(header)
            .into_iter()
            .find(|&id| self.tag(id).eq_ignore_ascii_case(&config.slot_tag)))
    }

    fn append_date(
        &mut self,
        slot: &NodeId,
        config: &RendererConfig,
        text: &str,
    ) -> Result<(), RenderError> {
        if slot.0 >= self.elements.len() {
            return Err(RenderError::Dom(format!("Không có node {}", slot.0)));
        }
        let date = match &config.date_class {
            Some(class) => {
                self.append_element(*slot, &config.date_tag, &[("class", class.as_str())])
            }
            None => self.append_element(*slot, &config.date_tag, &[]),
        };
        self.append_text(date, text);
        Ok(())
    }
}
