//! Print-ready HTML documents
//!
//! Fixed templates rendered server-side: an RFI sheet, a submittal log,
//! and a project task list. Each document is a standalone HTML page with
//! inline print CSS, a header block, a data table, and a generated-on
//! footer. The browser's print pipeline takes it from there.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use shared::models::{is_overdue, Project, Rfi, Submittal, Task};

const PRINT_CSS: &str = r#"
  * { box-sizing: border-box; }
  body { font-family: "Segoe UI", Arial, sans-serif; color: #212121; margin: 2rem; }
  header { border-bottom: 3px solid #4472C4; padding-bottom: 0.5rem; margin-bottom: 1.25rem; }
  header h1 { margin: 0 0 0.25rem 0; font-size: 1.4rem; }
  header .meta { margin: 0; color: #616161; font-size: 0.9rem; }
  table { border-collapse: collapse; width: 100%; margin-top: 0.75rem; }
  th { background-color: #4472C4; color: #FFFFFF; text-align: left; }
  th, td { border: 1px solid #B0BEC5; padding: 0.35rem 0.5rem; font-size: 0.85rem; }
  tr.overdue td { background-color: #E57373; }
  .block { margin-top: 1rem; }
  .block h2 { font-size: 1rem; margin: 0 0 0.35rem 0; }
  .block p { margin: 0; white-space: pre-wrap; }
  .pending { color: #9E9E9E; font-style: italic; }
  footer { margin-top: 1.5rem; color: #9E9E9E; font-size: 0.8rem; }
  @page { margin: 15mm; }
  @media print {
    body { margin: 0; }
    th { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
    td { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
  }
"#;

/// Renders the fixed print documents
pub struct PrintRenderer;

impl PrintRenderer {
    /// Single-RFI sheet: identity table plus question and answer blocks
    pub fn rfi_sheet(project: &Project, rfi: &Rfi, today: NaiveDate) -> String {
        let mut body = String::new();

        body.push_str("<table>\n<tbody>\n");
        push_detail_row(&mut body, "Number", &rfi.number);
        push_detail_row(&mut body, "Subject", &rfi.subject);
        body.push_str(&format!(
            "<tr><th>Status</th>{}</tr>\n",
            status_cell(&rfi.status.to_string(), rfi.status.color())
        ));
        push_detail_row(&mut body, "Due Date", &date_text(rfi.due_date));
        push_detail_row(&mut body, "Asked By", rfi.asked_by.as_deref().unwrap_or(""));
        push_detail_row(
            &mut body,
            "Answered By",
            rfi.answered_by.as_deref().unwrap_or(""),
        );
        body.push_str("</tbody>\n</table>\n");

        body.push_str(&format!(
            "<div class=\"block\"><h2>Question</h2><p>{}</p></div>\n",
            html_escape(&rfi.question)
        ));
        match &rfi.answer {
            Some(answer) => body.push_str(&format!(
                "<div class=\"block\"><h2>Answer</h2><p>{}</p></div>\n",
                html_escape(answer)
            )),
            None => body.push_str(
                "<div class=\"block\"><h2>Answer</h2><p class=\"pending\">Awaiting answer</p></div>\n",
            ),
        }

        page(
            &format!("{}: {}", rfi.number, rfi.subject),
            &project_line(project),
            &body,
            today,
        )
    }

    /// Submittal log for one project, overdue rows flagged
    pub fn submittal_log(
        project: &Project,
        submittals: &[Submittal],
        today: NaiveDate,
    ) -> AppResult<String> {
        if submittals.is_empty() {
            return Err(AppError::ExportEmpty(
                "No submittals to print for this project".to_string(),
            ));
        }

        let mut body = String::new();
        body.push_str("<table>\n<thead>\n<tr>");
        for header in [
            "Number",
            "Title",
            "Spec Section",
            "Status",
            "Rev",
            "Due Date",
            "Sent",
            "Returned",
        ] {
            body.push_str(&format!("<th>{}</th>", header));
        }
        body.push_str("</tr>\n</thead>\n<tbody>\n");

        for submittal in submittals {
            let overdue = submittal
                .due_date
                .map(|d| is_overdue(d, submittal.status.is_closed(), today))
                .unwrap_or(false);
            body.push_str(if overdue {
                "<tr class=\"overdue\">"
            } else {
                "<tr>"
            });
            body.push_str(&format!("<td>{}</td>", html_escape(&submittal.number)));
            body.push_str(&format!("<td>{}</td>", html_escape(&submittal.title)));
            body.push_str(&format!(
                "<td>{}</td>",
                html_escape(submittal.spec_section.as_deref().unwrap_or(""))
            ));
            body.push_str(&status_cell(
                &submittal.status.to_string(),
                submittal.status.color(),
            ));
            body.push_str(&format!("<td>{}</td>", submittal.revision));
            body.push_str(&format!("<td>{}</td>", date_text(submittal.due_date)));
            body.push_str(&format!("<td>{}</td>", date_text(submittal.sent_date)));
            body.push_str(&format!("<td>{}</td>", date_text(submittal.returned_date)));
            body.push_str("</tr>\n");
        }
        body.push_str("</tbody>\n</table>\n");

        Ok(page(
            &format!("Submittal Log: {}", project.number),
            &project_line(project),
            &body,
            today,
        ))
    }

    /// Task list for one project, overdue rows flagged
    pub fn task_list(project: &Project, tasks: &[Task], today: NaiveDate) -> AppResult<String> {
        if tasks.is_empty() {
            return Err(AppError::ExportEmpty(
                "No tasks to print for this project".to_string(),
            ));
        }

        let mut body = String::new();
        body.push_str("<table>\n<thead>\n<tr>");
        for header in ["Title", "Status", "Priority", "Due Date", "Department", "Assignee"] {
            body.push_str(&format!("<th>{}</th>", header));
        }
        body.push_str("</tr>\n</thead>\n<tbody>\n");

        for task in tasks {
            let overdue = task
                .due_date
                .map(|d| is_overdue(d, task.status.is_closed(), today))
                .unwrap_or(false);
            body.push_str(if overdue {
                "<tr class=\"overdue\">"
            } else {
                "<tr>"
            });
            body.push_str(&format!("<td>{}</td>", html_escape(&task.title)));
            body.push_str(&status_cell(&task.status.to_string(), task.status.color()));
            body.push_str(&format!("<td>{}</td>", task.priority));
            body.push_str(&format!("<td>{}</td>", date_text(task.due_date)));
            body.push_str(&format!(
                "<td>{}</td>",
                html_escape(task.department.as_deref().unwrap_or(""))
            ));
            body.push_str(&format!(
                "<td>{}</td>",
                html_escape(
                    task.assignee
                        .as_ref()
                        .map(|a| a.name.as_str())
                        .unwrap_or("")
                )
            ));
            body.push_str("</tr>\n");
        }
        body.push_str("</tbody>\n</table>\n");

        Ok(page(
            &format!("Task List: {}", project.number),
            &project_line(project),
            &body,
            today,
        ))
    }
}

/// Escape text for embedding in HTML element content or attribute values
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn page(heading: &str, subheading: &str, body: &str, generated_on: NaiveDate) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{css}</style>\n</head>\n<body>\n\
         <header>\n<h1>{heading}</h1>\n<p class=\"meta\">{subheading}</p>\n</header>\n\
         <main>\n{body}</main>\n\
         <footer>Generated on {date}</footer>\n</body>\n</html>\n",
        title = html_escape(heading),
        css = PRINT_CSS,
        heading = html_escape(heading),
        subheading = html_escape(subheading),
        body = body,
        date = generated_on,
    )
}

fn project_line(project: &Project) -> String {
    format!(
        "Project {} {} ({})",
        project.number, project.name, project.status
    )
}

fn push_detail_row(body: &mut String, label: &str, value: &str) {
    body.push_str(&format!(
        "<tr><th>{}</th><td>{}</td></tr>\n",
        label,
        html_escape(value)
    ));
}

/// Status cell with its fill color; colors come from the fixed status tables
fn status_cell(label: &str, color: &str) -> String {
    format!(
        "<td style=\"background-color:{}\">{}</td>",
        color,
        html_escape(label)
    )
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}
