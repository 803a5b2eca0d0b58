//! Server-rendered page: upload control, three text inputs, the action
//! button, and the report with its download link.

use pulldown_cmark::{html, Event, Options, Parser};

use crate::input::{IMAGE_FIELD, PREPARED_BY_FIELD, PREPARED_FOR_FIELD, TITLE_FIELD};
use crate::models::ReportForm;
use crate::session::SessionSnapshot;

pub const DOWNLOAD_PATH: &str = "/report/download";
pub const GENERATE_PATH: &str = "/generate";

#[derive(Debug, Default, Clone)]
pub struct PageView {
    pub form: ReportForm,
    pub image_name: Option<String>,
    pub image_preview: Option<String>,
    pub report: Option<String>,
    pub download_available: bool,
    pub busy: bool,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl PageView {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            report: snapshot.report.as_ref().map(|report| report.text.clone()),
            download_available: snapshot.report.is_some(),
            busy: snapshot.busy,
            ..Self::default()
        }
    }
}

/// Model output is markdown; raw HTML inside it is shown as text.
pub fn render_report_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, events);
    out
}

pub fn render_page(view: &PageView) -> String {
    let mut notices = String::new();
    if let Some(warning) = &view.warning {
        notices.push_str(&format!(
            r#"<div class="notice warning" role="alert">⚠️ {}</div>"#,
            html_escape(warning)
        ));
    }
    if let Some(error) = &view.error {
        notices.push_str(&format!(
            r#"<div class="notice error" role="alert">{}</div>"#,
            html_escape(error)
        ));
    }

    let preview = match (&view.image_preview, &view.image_name) {
        (Some(uri), name) => format!(
            r#"<figure class="preview"><figcaption>🖼️ Uploaded Image{}</figcaption><img src="{}" alt="uploaded structure"></figure>"#,
            name.as_deref()
                .map(|n| format!(": {}", html_escape(n)))
                .unwrap_or_default(),
            html_escape(uri)
        ),
        (None, _) => String::new(),
    };

    let report = view
        .report
        .as_deref()
        .map(|text| {
            let download = if view.download_available {
                format!(
                    r#"<a class="button" href="{DOWNLOAD_PATH}" download>📥 Download Report</a>"#
                )
            } else {
                String::new()
            };
            format!(
                r#"<section class="report"><h2>📄 Inspection Report</h2><div class="report-body">{}</div>{}</section>"#,
                render_report_markdown(text),
                download
            )
        })
        .unwrap_or_default();

    let disabled = if view.busy { " disabled" } else { "" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Structural Defects</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; background: #0d1117; color: #e2e8f0; }}
label {{ display: block; margin-top: 1rem; font-weight: 600; color: #63b3ed; }}
input[type=text] {{ width: 100%; padding: 0.4rem; }}
.notice {{ padding: 0.75rem 1rem; border-radius: 8px; margin: 1rem 0; }}
.warning {{ background: #3b2f12; }}
.error {{ background: #3b1212; }}
.preview img {{ max-width: 100%; border-radius: 12px; }}
.button, button {{ display: inline-block; margin-top: 1rem; background: #e67e22; color: white; border: none; border-radius: 10px; padding: 10px 20px; font-weight: 600; text-decoration: none; }}
button[disabled] {{ opacity: 0.5; }}
.report table {{ border-collapse: collapse; }}
.report td, .report th {{ border: 1px solid #2d3748; padding: 0.3rem 0.5rem; }}
</style>
</head>
<body>
<h1>🏗️ Structural Defects</h1>
<p>🤖 AI-assisted defect identifier for the construction industry</p>
<div class="tips">
<strong>👷 How to use this app:</strong>
<ol>
<li>Upload the structure image 🏢</li>
<li>Click "Generate Report" 📑</li>
<li>Download your AI-powered defect report 💾</li>
</ol>
</div>
{notices}
<form method="post" action="{GENERATE_PATH}" enctype="multipart/form-data">
<label for="{IMAGE_FIELD}">📤 Upload Your Structure Image</label>
<input type="file" id="{IMAGE_FIELD}" name="{IMAGE_FIELD}" accept=".jpeg,.jpg,.png">
<label for="{TITLE_FIELD}">📝 Report Title:</label>
<input type="text" id="{TITLE_FIELD}" name="{TITLE_FIELD}" value="{title}">
<label for="{PREPARED_BY_FIELD}">👨‍💻 Report Prepared by:</label>
<input type="text" id="{PREPARED_BY_FIELD}" name="{PREPARED_BY_FIELD}" value="{prepared_by}">
<label for="{PREPARED_FOR_FIELD}">👷 Report Prepared for:</label>
<input type="text" id="{PREPARED_FOR_FIELD}" name="{PREPARED_FOR_FIELD}" value="{prepared_for}">
<button type="submit"{disabled}>🚧 Generate Report</button>
</form>
{preview}
{report}
</body>
</html>"#,
        title = html_escape(&view.form.title),
        prepared_by = html_escape(&view.form.prepared_by),
        prepared_for = html_escape(&view.form.prepared_for),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_values_are_escaped_in_attributes() {
        let view = PageView {
            form: ReportForm {
                title: r#"Bay "7" <east>"#.into(),
                ..ReportForm::default()
            },
            ..PageView::default()
        };
        let page = render_page(&view);
        assert!(page.contains(r#"value="Bay &quot;7&quot; &lt;east&gt;""#));
    }

    #[test]
    fn download_link_only_when_available() {
        let mut view = PageView {
            report: Some("REPORT-X".into()),
            ..PageView::default()
        };
        assert!(!render_page(&view).contains(DOWNLOAD_PATH));

        view.download_available = true;
        let page = render_page(&view);
        assert!(page.contains(DOWNLOAD_PATH));
        assert!(page.contains("REPORT-X"));
    }

    #[test]
    fn busy_disables_the_button() {
        let view = PageView {
            busy: true,
            ..PageView::default()
        };
        assert!(render_page(&view).contains("<button type=\"submit\" disabled>"));
    }

    #[test]
    fn markdown_tables_render_and_raw_html_is_escaped() {
        let html = render_report_markdown(
            "| Defect | Severity |\n|---|---|\n| Crack | high |\n\n<script>alert(1)</script>\n",
        );
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>Crack</td>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn warning_is_rendered() {
        let view = PageView {
            warning: Some("Please upload a building/structure image to generate the report.".into()),
            ..PageView::default()
        };
        assert!(render_page(&view).contains("Please upload a building/structure image"));
    }
}
