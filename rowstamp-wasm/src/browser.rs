#![cfg(target_arch = "wasm32")]

use chrono::{DateTime, Utc};
use js_sys::Date;
use rowstamp_core::{DocumentTree, LocaleFormatter, RenderError, RendererConfig};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// Tag được `Intl` hiểu là "locale mặc định của host".
const HOST_DEFAULT_LOCALE: &str = "default";

fn dom_error(err: JsValue) -> RenderError {
    RenderError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// `Date.prototype.toLocaleString` của trình duyệt.
pub struct BrowserFormatter {
    locale: Option<String>,
}

impl BrowserFormatter {
    pub fn new(locale: Option<String>) -> Self {
        Self { locale }
    }

    fn render(&self, date: Date) -> String {
        let locale = self.locale.as_deref().unwrap_or(HOST_DEFAULT_LOCALE);
        String::from(date.to_locale_string(locale, &JsValue::UNDEFINED))
    }
}

impl LocaleFormatter for BrowserFormatter {
    fn format(&self, instant: DateTime<Utc>) -> String {
        self.render(Date::new(&JsValue::from_f64(instant.timestamp_millis() as f64)))
    }

    fn invalid_text(&self) -> String {
        self.render(Date::new(&JsValue::from_f64(f64::NAN)))
    }
}

/// Tài liệu đang hiển thị trong trình duyệt.
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl DocumentTree for BrowserDocument {
    type Node = Element;

    fn rows(&self, config: &RendererConfig) -> Result<Vec<Element>, RenderError> {
        let list = self
            .document
            .query_selector_all(&config.row_selector())
            .map_err(dom_error)?;

        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn header_slot(
        &self,
        row: &Element,
        config: &RendererConfig,
    ) -> Result<Option<Element>, RenderError> {
        let Some(header) = row
            .query_selector(&config.header_selector())
            .map_err(dom_error)?
        else {
            return Ok(None);
        };
        header.query_selector(&config.slot_tag).map_err(dom_error)
    }

    fn append_date(
        &mut self,
        slot: &Element,
        config: &RendererConfig,
        text: &str,
    ) -> Result<(), RenderError> {
        let date = self
            .document
            .create_element(&config.date_tag)
            .map_err(dom_error)?;
        date.set_text_content(Some(text));
        if let Some(class) = &config.date_class {
            date.set_class_name(class);
        }
        slot.append_child(&date).map_err(dom_error)?;
        Ok(())
    }
}
