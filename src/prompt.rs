use chrono::{Local, NaiveDate};

use crate::models::ReportForm;

/// Fills the structural-engineer instruction with the form fields and `date`.
///
/// Fields are inserted verbatim: no trimming, escaping or validation.
pub fn build_report_prompt(form: &ReportForm, date: NaiveDate) -> String {
    format!(
        "\
Assume you are a structural engineer. The user has provided an image of a structure.
You need to identify the structural defects in the image and generate a report.
The report should contain the following:

- Start with title, prepared by, and prepared for details from user input.
- Use {title} as report title, {prepared_by} as prepared by, {prepared_for} as prepared for.
- Mention current date: {date}.
- Identify and classify defects (e.g., cracks, spalling, corrosion, honeycombing).
- There could be multiple defects; identify each separately.
- For each defect: description, potential impact, severity (low/medium/high).
- Estimate time before permanent damage.
- Suggest short-term & long-term solutions with estimated cost (INR) & time.
- Add preventive measures for future.
- Format in bullet points and tables where possible.
- Report should not exceed 3 pages.
",
        title = form.title,
        prepared_by = form.prepared_by,
        prepared_for = form.prepared_for,
        date = date.format("%Y-%m-%d"),
    )
}

pub fn build_report_prompt_for_today(form: &ReportForm) -> String {
    build_report_prompt(form, Local::now().date_naive())
}
