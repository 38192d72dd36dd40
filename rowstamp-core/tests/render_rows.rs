use rowstamp_core::{
    render_rows, ChronoFormatter, InvalidPolicy, LocaleFormatter, MemoryDocument,
    MissingHeaderPolicy, NodeId, RenderError, RendererConfig, RowOutcome, Timestamp,
};

struct PostRow {
    slot: Option<NodeId>,
}

/// Dựng một hàng giống trang bài viết được sinh ra.
fn post_row(
    doc: &mut MemoryDocument,
    table: NodeId,
    timestamp: Option<&str>,
    author: &str,
) -> PostRow {
    let row = match timestamp {
        Some(ts) => doc.append_element(table, "tr", &[("data-timestamp", ts)]),
        None => doc.append_element(table, "tr", &[]),
    };
    let cell = doc.append_element(row, "td", &[]);
    let header = doc.append_element(cell, "div", &[("class", "post-header")]);
    doc.append_element(header, "img", &[("src", ""), ("alt", "Profile Picture")]);
    let slot = doc.append_element(header, "div", &[]);
    let title = doc.append_element(slot, "h3", &[]);
    doc.append_text(title, author);
    let content = doc.append_element(cell, "div", &[("class", "post-content")]);
    let para = doc.append_element(content, "p", &[]);
    doc.append_text(para, "hello");
    PostRow { slot: Some(slot) }
}

fn headerless_row(doc: &mut MemoryDocument, table: NodeId, timestamp: &str) -> PostRow {
    let row = doc.append_element(table, "tr", &[("data-timestamp", timestamp)]);
    let cell = doc.append_element(row, "td", &[]);
    let content = doc.append_element(cell, "div", &[("class", "post-content")]);
    doc.append_text(content, "no header here");
    PostRow { slot: None }
}

fn page() -> (MemoryDocument, NodeId) {
    let mut doc = MemoryDocument::new();
    let container = doc.append_element(doc.root(), "div", &[("class", "container")]);
    let table = doc.append_element(container, "table", &[]);
    (doc, table)
}

/// Text của mọi node ngày giờ đã chèn vào `slot` (các con đứng sau `h3`).
fn dates(doc: &MemoryDocument, slot: NodeId) -> Vec<String> {
    doc.element_children(slot)
        .into_iter()
        .filter(|&id| doc.tag(id) == "p")
        .map(|id| doc.text_content(id))
        .collect()
}

fn expected(seconds: &str) -> String {
    let ts = Timestamp::parse(seconds).unwrap();
    ChronoFormatter::utc().format(ts.instant())
}

#[test]
fn epoch_row_gets_us_rendering() {
    let (mut doc, table) = page();
    let row = post_row(&mut doc, table, Some("0"), "alice");

    let report = render_rows(&mut doc, &ChronoFormatter::utc(), &RendererConfig::default())
        .expect("Không render được");

    assert_eq!(report.rendered(), 1);
    assert_eq!(dates(&doc, row.slot.unwrap()), vec!["1/1/1970, 12:00:00 AM"]);
}

#[test]
fn each_row_receives_its_own_date_in_document_order() {
    let (mut doc, table) = page();
    let stamps = ["1700000000", "1600000000", "86400"];
    let rows: Vec<PostRow> = stamps
        .iter()
        .enumerate()
        .map(|(i, ts)| post_row(&mut doc, table, Some(ts), &format!("author {i}")))
        .collect();

    let report = render_rows(&mut doc, &ChronoFormatter::utc(), &RendererConfig::default())
        .expect("Không render được");

    let rendered: Vec<String> = report
        .rows
        .iter()
        .map(|outcome| match outcome {
            RowOutcome::Rendered { text } => text.clone(),
            other => panic!("Kết quả không mong đợi {other:?}"),
        })
        .collect();
    let wanted: Vec<String> = stamps.iter().map(|ts| expected(ts)).collect();
    assert_eq!(rendered, wanted);

    for (row, ts) in rows.iter().zip(stamps) {
        assert_eq!(dates(&doc, row.slot.unwrap()), vec![expected(ts)]);
    }
}

#[test]
fn date_node_is_appended_after_existing_children() {
    let (mut doc, table) = page();
    post_row(&mut doc, table, Some("0"), "alice");

    render_rows(&mut doc, &ChronoFormatter::utc(), &RendererConfig::default()).unwrap();

    assert!(doc.to_html().contains(
        "<div><h3>alice</h3><p>1/1/1970, 12:00:00 AM</p></div></div><div class=\"post-content\">"
    ));
}

#[test]
fn running_twice_appends_a_second_date() {
    let (mut doc, table) = page();
    let row = post_row(&mut doc, table, Some("0"), "alice");
    let config = RendererConfig::default();

    render_rows(&mut doc, &ChronoFormatter::utc(), &config).unwrap();
    render_rows(&mut doc, &ChronoFormatter::utc(), &config).unwrap();

    assert_eq!(
        dates(&doc, row.slot.unwrap()),
        vec!["1/1/1970, 12:00:00 AM", "1/1/1970, 12:00:00 AM"]
    );
}

#[test]
fn rows_without_timestamp_attribute_are_ignored() {
    let (mut doc, table) = page();
    let plain = post_row(&mut doc, table, None, "index entry");
    let stamped = post_row(&mut doc, table, Some("0"), "alice");

    let report = render_rows(&mut doc, &ChronoFormatter::utc(), &RendererConfig::default())
        .unwrap();

    assert_eq!(report.rows.len(), 1);
    assert!(dates(&doc, plain.slot.unwrap()).is_empty());
    assert_eq!(dates(&doc, stamped.slot.unwrap()).len(), 1);
}

#[test]
fn non_numeric_timestamp_is_skipped_by_default() {
    let (mut doc, table) = page();
    let bad = post_row(&mut doc, table, Some("soon"), "alice");
    let good = post_row(&mut doc, table, Some("0"), "bob");

    let report = render_rows(&mut doc, &ChronoFormatter::utc(), &RendererConfig::default())
        .unwrap();

    assert!(matches!(
        &report.rows[0],
        RowOutcome::SkippedInvalid { raw, .. } if raw == "soon"
    ));
    assert!(dates(&doc, bad.slot.unwrap()).is_empty());
    assert_eq!(dates(&doc, good.slot.unwrap()).len(), 1);
    assert_eq!(report.skipped(), 1);
}

#[test]
fn placeholder_policy_renders_invalid_date_text() {
    let (mut doc, table) = page();
    let bad = post_row(&mut doc, table, Some(""), "alice");
    let config = RendererConfig {
        on_invalid: InvalidPolicy::Placeholder,
        ..RendererConfig::default()
    };

    let report = render_rows(&mut doc, &ChronoFormatter::utc(), &config).unwrap();

    assert_eq!(dates(&doc, bad.slot.unwrap()), vec!["Invalid Date"]);
    assert_eq!(report.rendered(), 1);
}

#[test]
fn missing_header_is_skipped_and_later_rows_still_render() {
    let (mut doc, table) = page();
    let first = post_row(&mut doc, table, Some("0"), "alice");
    headerless_row(&mut doc, table, "0");
    let last = post_row(&mut doc, table, Some("0"), "carol");

    let report = render_rows(&mut doc, &ChronoFormatter::utc(), &RendererConfig::default())
        .unwrap();

    assert_eq!(report.rows[1], RowOutcome::SkippedNoHeader);
    assert_eq!(dates(&doc, first.slot.unwrap()).len(), 1);
    assert_eq!(dates(&doc, last.slot.unwrap()).len(), 1);
}

#[test]
fn abort_policy_stops_at_the_first_headerless_row() {
    let (mut doc, table) = page();
    let first = post_row(&mut doc, table, Some("0"), "alice");
    let broken = headerless_row(&mut doc, table, "0");
    let last = post_row(&mut doc, table, Some("0"), "carol");
    let config = RendererConfig {
        on_missing_header: MissingHeaderPolicy::Abort,
        ..RendererConfig::default()
    };

    let err = render_rows(&mut doc, &ChronoFormatter::utc(), &config).unwrap_err();

    assert_eq!(err, RenderError::MissingHeader { index: 1 });
    assert!(broken.slot.is_none());
    assert_eq!(dates(&doc, first.slot.unwrap()).len(), 1);
    assert!(dates(&doc, last.slot.unwrap()).is_empty());
}

#[test]
fn custom_markup_names_are_honoured() {
    let mut doc = MemoryDocument::new();
    let list = doc.append_element(doc.root(), "ul", &[]);
    let item = doc.append_element(list, "li", &[("data-ts", "0")]);
    let header = doc.append_element(item, "header", &[("class", "meta")]);
    let slot = doc.append_element(header, "span", &[]);
    let config = RendererConfig {
        row_tag: "li".to_string(),
        timestamp_attribute: "data-ts".to_string(),
        header_class: "meta".to_string(),
        slot_tag: "span".to_string(),
        date_tag: "time".to_string(),
        date_class: Some("post-date".to_string()),
        ..RendererConfig::default()
    };

    render_rows(&mut doc, &ChronoFormatter::utc(), &config).unwrap();

    let children = doc.element_children(slot);
    assert_eq!(children.len(), 1);
    assert_eq!(doc.tag(children[0]), "time");
    assert_eq!(doc.get_attribute(children[0], "class"), Some("post-date"));
    assert_eq!(doc.text_content(children[0]), "1/1/1970, 12:00:00 AM");
}

#[test]
fn report_serializes_with_status_tags() {
    let (mut doc, table) = page();
    post_row(&mut doc, table, Some("0"), "alice");
    headerless_row(&mut doc, table, "0");

    let report = render_rows(&mut doc, &ChronoFormatter::utc(), &RendererConfig::default())
        .unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["rows"][0]["status"], "rendered");
    assert_eq!(value["rows"][0]["text"], "1/1/1970, 12:00:00 AM");
    assert_eq!(value["rows"][1]["status"], "skipped_no_header");
}
