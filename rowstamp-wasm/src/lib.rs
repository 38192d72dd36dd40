//! Bridge WASM <-> trang HTML: chèn ngày giờ vào các hàng có timestamp khi trang tải xong.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod console_log;

use rowstamp_core::{InvalidPolicy, MissingHeaderPolicy, RendererConfig};
use serde::Deserialize;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

#[derive(Deserialize, Default)]
struct JsRendererConfig {
    #[serde(default)]
    row_tag: Option<String>,
    #[serde(default)]
    timestamp_attribute: Option<String>,
    #[serde(default)]
    header_class: Option<String>,
    #[serde(default)]
    slot_tag: Option<String>,
    #[serde(default)]
    date_tag: Option<String>,
    #[serde(default)]
    date_class: Option<String>,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    on_invalid: Option<InvalidPolicy>,
    #[serde(default)]
    on_missing_header: Option<MissingHeaderPolicy>,
}

impl From<JsRendererConfig> for RendererConfig {
    fn from(cfg: JsRendererConfig) -> Self {
        let base = RendererConfig::default();
        Self {
            row_tag: cfg.row_tag.unwrap_or(base.row_tag),
            timestamp_attribute: cfg.timestamp_attribute.unwrap_or(base.timestamp_attribute),
            header_class: cfg.header_class.unwrap_or(base.header_class),
            slot_tag: cfg.slot_tag.unwrap_or(base.slot_tag),
            date_tag: cfg.date_tag.unwrap_or(base.date_tag),
            date_class: cfg.date_class.or(base.date_class),
            locale: cfg.locale.or(base.locale),
            on_invalid: cfg.on_invalid.unwrap_or(base.on_invalid),
            on_missing_header: cfg.on_missing_header.unwrap_or(base.on_missing_header),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn read_config(config: Option<JsValue>) -> Result<RendererConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsRendererConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(RendererConfig::from(cfg))
        }
        _ => Ok(RendererConfig::default()),
    }
}

#[cfg(target_arch = "wasm32")]
mod bindings {
    use rowstamp_core::{format_raw, render_rows, LocaleFormatter, RendererConfig};
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Window};

    use crate::browser::{BrowserDocument, BrowserFormatter};
    use crate::{console_log, read_config};

    fn prepare() {
        console_error_panic_hook::set_once();
        console_log::init();
    }

    fn window_and_document() -> Result<(Window, Document), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;
        Ok((window, document))
    }

    fn run(document: Document, config: &RendererConfig) -> Result<JsValue, JsValue> {
        let formatter = BrowserFormatter::new(config.locale.clone());
        let mut tree = BrowserDocument::new(document);
        let report = render_rows(&mut tree, &formatter, config)
            .map_err(|err| JsValue::from_str(&format!("Rowstamp error: {err}")))?;
        to_value(&report)
            .map_err(|err| JsValue::from_str(&format!("Không serialize report: {err}")))
    }

    /// Đăng ký xử lý sự kiện `load` (cộng dồn, không ghi đè `window.onload`).
    ///
    /// Nếu trang đã tải xong thì chạy ngay.
    #[wasm_bindgen]
    pub fn install(config: Option<JsValue>) -> Result<(), JsValue> {
        prepare();
        let config = read_config(config)?;
        let (window, document) = window_and_document()?;

        if document.ready_state() == "complete" {
            log::debug!("document đã tải xong, chạy renderer ngay");
            run(document, &config)?;
            return Ok(());
        }

        let handler = Closure::<dyn FnMut()>::new(move || {
            let result = window_and_document().and_then(|(_, document)| run(document, &config));
            if let Err(err) = result {
                log::error!("{}", err.as_string().unwrap_or_else(|| format!("{err:?}")));
            }
        });
        window.add_event_listener_with_callback("load", handler.as_ref().unchecked_ref())?;
        handler.forget();
        Ok(())
    }

    /// Chạy renderer ngay lập tức và trả về báo cáo theo từng hàng.
    #[wasm_bindgen]
    pub fn render_now(config: Option<JsValue>) -> Result<JsValue, JsValue> {
        prepare();
        let config = read_config(config)?;
        let (_, document) = window_and_document()?;
        run(document, &config)
    }

    /// Định dạng một giá trị timestamp như renderer sẽ hiển thị.
    #[wasm_bindgen]
    pub fn format_timestamp(raw: &str, locale: Option<String>) -> String {
        let formatter = BrowserFormatter::new(locale);
        format_raw(&formatter, raw).unwrap_or_else(|_| formatter.invalid_text())
    }
}

#[cfg(target_arch = "wasm32")]
pub use bindings::{format_timestamp, install, render_now};

#[cfg(not(target_arch = "wasm32"))]
pub fn install(_: Option<JsValue>) -> Result<(), JsValue> {
    Err(JsValue::from_str("rowstamp-wasm chỉ hỗ trợ biên dịch target wasm32"))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn render_now(config: Option<JsValue>) -> Result<JsValue, JsValue> {
    install(config).map(|()| JsValue::UNDEFINED)
}

/// Bản native dùng [`rowstamp_core::ChronoFormatter`] theo múi giờ máy.
#[cfg(not(target_arch = "wasm32"))]
pub fn format_timestamp(raw: &str, _locale: Option<String>) -> String {
    use rowstamp_core::{format_raw, ChronoFormatter, LocaleFormatter};

    let formatter = ChronoFormatter::default();
    format_raw(&formatter, raw).unwrap_or_else(|_| formatter.invalid_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_js_config_falls_back_to_defaults() {
        let cfg: JsRendererConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(RendererConfig::from(cfg), RendererConfig::default());
    }

    #[test]
    fn js_config_overrides_only_given_fields() {
        let cfg: JsRendererConfig = serde_json::from_str(
            r#"{"header_class": "entry-head", "on_missing_header": "abort", "locale": "vi-VN"}"#,
        )
        .unwrap();
        let config = RendererConfig::from(cfg);

        assert_eq!(config.header_class, "entry-head");
        assert_eq!(config.on_missing_header, MissingHeaderPolicy::Abort);
        assert_eq!(config.locale.as_deref(), Some("vi-VN"));
        assert_eq!(config.row_tag, "tr");
        assert_eq!(config.on_invalid, InvalidPolicy::Skip);
    }

    #[test]
    fn native_format_marks_bad_input_invalid() {
        assert_eq!(format_timestamp("nope", None), "Invalid Date");
        assert!(!format_timestamp("0", None).is_empty());
    }
}
