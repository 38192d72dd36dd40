use anyhow::Context;
use clap::{Parser, Subcommand};
use log::warn;
use rowstamp_core::{
    format_raw, render_rows, ChronoFormatter, FormatZone, InvalidPolicy, MemoryDocument,
    MissingHeaderPolicy, NodeId, RendererConfig, RowOutcome,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "rowstamp-cli",
    about = "Xem trước ngày giờ mà rowstamp sẽ chèn vào các hàng data-timestamp."
)]
struct Args {
    /// Hiển thị theo UTC thay vì múi giờ máy.
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Định dạng các giá trị timestamp (giây kể từ epoch).
    Format {
        #[arg(required = true, allow_negative_numbers = true)]
        seconds: Vec<String>,
        /// In kết quả dạng JSON.
        #[arg(long)]
        json: bool,
    },
    /// Chạy renderer trên một trang mẫu và in HTML kết quả.
    Demo {
        /// Dừng ở hàng đầu tiên thiếu vùng header.
        #[arg(long)]
        abort_on_missing_header: bool,
        /// Chèn "Invalid Date" cho timestamp hỏng thay vì bỏ qua.
        #[arg(long)]
        placeholder_invalid: bool,
    },
}

#[derive(Serialize)]
struct FormattedValue<'a> {
    raw: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let formatter = ChronoFormatter::new(if args.utc {
        FormatZone::Utc
    } else {
        FormatZone::Local
    });

    match args.command {
        Command::Format { seconds, json } => {
            let values: Vec<FormattedValue> = seconds
                .iter()
                .map(|raw| match format_raw(&formatter, raw) {
                    Ok(text) => FormattedValue {
                        raw,
                        text: Some(text),
                        error: None,
                    },
                    Err(err) => FormattedValue {
                        raw,
                        text: None,
                        error: Some(err.to_string()),
                    },
                })
                .collect();

            if json {
                let out = serde_json::to_string_pretty(&values)
                    .context("Không serialize được kết quả")?;
                println!("{out}");
            } else {
                for value in &values {
                    match (&value.text, &value.error) {
                        (Some(text), _) => println!("{}\t{text}", value.raw),
                        (None, Some(err)) => println!("{}\t<{err}>", value.raw),
                        (None, None) => {}
                    }
                }
            }
        }
        Command::Demo {
            abort_on_missing_header,
            placeholder_invalid,
        } => {
            let config = RendererConfig {
                on_invalid: if placeholder_invalid {
                    InvalidPolicy::Placeholder
                } else {
                    InvalidPolicy::Skip
                },
                on_missing_header: if abort_on_missing_header {
                    MissingHeaderPolicy::Abort
                } else {
                    MissingHeaderPolicy::Skip
                },
                ..RendererConfig::default()
            };

            let mut document = sample_page();
            let report = match render_rows(&mut document, &formatter, &config) {
                Ok(report) => report,
                Err(err) => {
                    warn!("Trang mẫu sau khi dừng:\n{}", document.to_html());
                    return Err(err).context("Renderer dừng giữa chừng");
                }
            };

            for (index, row) in report.rows.iter().enumerate() {
                match row {
                    RowOutcome::Rendered { text } => println!("#{index} rendered: {text}"),
                    RowOutcome::SkippedInvalid { raw, reason } => {
                        println!("#{index} skipped {raw:?}: {reason}")
                    }
                    RowOutcome::SkippedNoHeader => println!("#{index} skipped: no header"),
                }
            }
            println!(
                "Rendered: {}\nSkipped: {}\n\n{}",
                report.rendered(),
                report.skipped(),
                document.to_html()
            );
        }
    }

    Ok(())
}

/// Trang mẫu: hai bài hợp lệ, một timestamp hỏng, một hàng thiếu header.
fn sample_page() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let container = doc.append_element(doc.root(), "div", &[("class", "container")]);
    let table = doc.append_element(container, "table", &[]);

    post(&mut doc, table, "1700000000", Some("Channel A"));
    post(&mut doc, table, "not-a-time", Some("Channel B"));
    post(&mut doc, table, "1600000000", None);
    post(&mut doc, table, "0", Some("Channel D"));
    doc
}

fn post(doc: &mut MemoryDocument, table: NodeId, timestamp: &str, author: Option<&str>) {
    let row = doc.append_element(table, "tr", &[("data-timestamp", timestamp)]);
    let cell = doc.append_element(row, "td", &[]);
    if let Some(author) = author {
        let header = doc.append_element(cell, "div", &[("class", "post-header")]);
        let slot = doc.append_element(header, "div", &[]);
        let title = doc.append_element(slot, "h3", &[]);
        doc.append_text(title, author);
    }
    let content = doc.append_element(cell, "div", &[("class", "post-content")]);
    doc.append_text(content, "...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_accepts_negative_seconds() {
        let args = Args::try_parse_from(["rowstamp-cli", "--utc", "format", "-86400", "0"])
            .expect("Không parse được tham số");

        assert!(args.utc);
        match args.command {
            Command::Format { seconds, json } => {
                assert_eq!(seconds, vec!["-86400", "0"]);
                assert!(!json);
            }
            other => panic!("Sai subcommand: {other:?}"),
        }
    }

    #[test]
    fn negative_seconds_format_before_epoch() {
        let formatter = ChronoFormatter::utc();
        assert_eq!(
            format_raw(&formatter, "-86400").unwrap(),
            "12/31/1969, 12:00:00 AM"
        );
    }

    #[test]
    fn demo_abort_stops_at_headerless_row() {
        let config = RendererConfig {
            on_missing_header: MissingHeaderPolicy::Abort,
            ..RendererConfig::default()
        };
        let mut document = sample_page();

        let err = render_rows(&mut document, &ChronoFormatter::utc(), &config).unwrap_err();

        assert_eq!(err, rowstamp_core::RenderError::MissingHeader { index: 2 });
    }
}
