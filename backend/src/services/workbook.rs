//! Styled XLSX workbook export
//!
//! Builds a multi-sheet workbook (Tasks, RFIs, Submittals, Summary) from
//! in-memory records. Header rows are bold white on navy and frozen; data
//! rows fill with their status color, overdue rows fill red; column widths
//! track the longest cell. The caller fetches the records.

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::error::{AppError, AppResult};
use shared::models::{
    is_overdue, Project, Rfi, RfiStatus, Submittal, SubmittalStatus, Task, TaskPriority,
    TaskStatus,
};

const HEADER_FILL: u32 = 0x4472C4;
const OVERDUE_FILL: u32 = 0xE57373;
const MIN_WIDTH_CHARS: usize = 8;
const MAX_WIDTH_CHARS: usize = 40;
const WIDTH_PADDING: usize = 2;

const TASK_STATUSES: [TaskStatus; 5] = [
    TaskStatus::Open,
    TaskStatus::InProgress,
    TaskStatus::Blocked,
    TaskStatus::Complete,
    TaskStatus::Cancelled,
];

const TASK_PRIORITIES: [TaskPriority; 4] = [
    TaskPriority::Urgent,
    TaskPriority::High,
    TaskPriority::Medium,
    TaskPriority::Low,
];

const RFI_STATUSES: [RfiStatus; 3] = [RfiStatus::Open, RfiStatus::Answered, RfiStatus::Closed];

const SUBMITTAL_STATUSES: [SubmittalStatus; 8] = [
    SubmittalStatus::Draft,
    SubmittalStatus::Submitted,
    SubmittalStatus::UnderReview,
    SubmittalStatus::Approved,
    SubmittalStatus::ApprovedAsNoted,
    SubmittalStatus::ReviseResubmit,
    SubmittalStatus::Rejected,
    SubmittalStatus::Closed,
];

/// Workbook exporter for project record sheets
pub struct WorkbookExporter;

impl WorkbookExporter {
    /// Build the styled project workbook and return its bytes
    pub fn project_workbook(
        project: &Project,
        tasks: &[Task],
        rfis: &[Rfi],
        submittals: &[Submittal],
        today: NaiveDate,
    ) -> AppResult<Vec<u8>> {
        if tasks.is_empty() && rfis.is_empty() && submittals.is_empty() {
            return Err(AppError::ExportEmpty(
                "No records to export for this project".to_string(),
            ));
        }

        build_workbook(project, tasks, rfis, submittals, today)
            .map_err(|e| AppError::Internal(format!("Workbook build failed: {}", e)))
    }

    /// Column width for the longest cell in a column: clamped, plus padding
    pub fn column_width(max_chars: usize) -> f64 {
        (max_chars.clamp(MIN_WIDTH_CHARS, MAX_WIDTH_CHARS) + WIDTH_PADDING) as f64
    }

    /// Task counts per status; buckets cover every task exactly once
    pub fn task_status_counts(tasks: &[Task]) -> Vec<(TaskStatus, usize)> {
        TASK_STATUSES
            .iter()
            .map(|&status| (status, tasks.iter().filter(|t| t.status == status).count()))
            .collect()
    }

    /// Task counts per priority, urgent first
    pub fn task_priority_counts(tasks: &[Task]) -> Vec<(TaskPriority, usize)> {
        TASK_PRIORITIES
            .iter()
            .map(|&priority| {
                (
                    priority,
                    tasks.iter().filter(|t| t.priority == priority).count(),
                )
            })
            .collect()
    }

    /// RFI counts per status
    pub fn rfi_status_counts(rfis: &[Rfi]) -> Vec<(RfiStatus, usize)> {
        RFI_STATUSES
            .iter()
            .map(|&status| (status, rfis.iter().filter(|r| r.status == status).count()))
            .collect()
    }

    /// Submittal counts per status
    pub fn submittal_status_counts(submittals: &[Submittal]) -> Vec<(SubmittalStatus, usize)> {
        SUBMITTAL_STATUSES
            .iter()
            .map(|&status| {
                (
                    status,
                    submittals.iter().filter(|s| s.status == status).count(),
                )
            })
            .collect()
    }
}

fn build_workbook(
    project: &Project,
    tasks: &[Task],
    rfis: &[Rfi],
    submittals: &[Submittal],
    today: NaiveDate,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Tasks")?;
    write_task_sheet(sheet, tasks, today)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("RFIs")?;
    write_rfi_sheet(sheet, rfis, today)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("Submittals")?;
    write_submittal_sheet(sheet, submittals, today)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary")?;
    write_summary_sheet(sheet, project, tasks, rfis, submittals, today)?;

    workbook.save_to_buffer()
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
}

fn fill_format(hex: &str) -> Format {
    Format::new().set_background_color(Color::RGB(parse_hex_color(hex)))
}

/// Parse "#RRGGBB" into the numeric form the workbook library takes;
/// malformed values fall back to the neutral gray
fn parse_hex_color(hex: &str) -> u32 {
    u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0x9E9E9E)
}

/// Per-column running maximum of cell display lengths
struct ColumnWidths {
    chars: Vec<usize>,
}

impl ColumnWidths {
    fn new(headers: &[&str]) -> Self {
        Self {
            chars: headers.iter().map(|h| h.chars().count()).collect(),
        }
    }

    fn note(&mut self, col: usize, text: &str) {
        let len = text.chars().count();
        if len > self.chars[col] {
            self.chars[col] = len;
        }
    }

    fn apply(&self, sheet: &mut Worksheet) -> Result<(), XlsxError> {
        for (col, &max_chars) in self.chars.iter().enumerate() {
            sheet.set_column_width(col as u16, WorkbookExporter::column_width(max_chars))?;
        }
        Ok(())
    }
}

fn write_header_row(
    sheet: &mut Worksheet,
    headers: &[&str],
) -> Result<(), XlsxError> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_data_row(
    sheet: &mut Worksheet,
    row: u32,
    cells: &[String],
    format: &Format,
    widths: &mut ColumnWidths,
) -> Result<(), XlsxError> {
    for (col, value) in cells.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, value, format)?;
        widths.note(col, value);
    }
    Ok(())
}

fn write_trailing_block(
    sheet: &mut Worksheet,
    mut row: u32,
    total: usize,
    overdue: usize,
) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    row += 1; // blank spacer row
    sheet.write_string_with_format(row, 0, "Total", &bold)?;
    sheet.write_number(row, 1, total as f64)?;
    sheet.write_string_with_format(row + 1, 0, "Overdue", &bold)?;
    sheet.write_number(row + 1, 1, overdue as f64)?;
    Ok(())
}

fn write_task_sheet(sheet: &mut Worksheet, tasks: &[Task], today: NaiveDate) -> Result<(), XlsxError> {
    let headers = ["Title", "Status", "Priority", "Due Date", "Department", "Assignee"];
    write_header_row(sheet, &headers)?;
    let mut widths = ColumnWidths::new(&headers);

    let mut overdue_count = 0;
    for (i, task) in tasks.iter().enumerate() {
        let row = i as u32 + 1;
        let overdue = task
            .due_date
            .map(|d| is_overdue(d, task.status.is_closed(), today))
            .unwrap_or(false);
        if overdue {
            overdue_count += 1;
        }

        let format = if overdue {
            Format::new().set_background_color(Color::RGB(OVERDUE_FILL))
        } else {
            fill_format(task.status.color())
        };

        let cells = [
            task.title.clone(),
            task.status.to_string(),
            task.priority.to_string(),
            task.due_date.map(|d| d.to_string()).unwrap_or_default(),
            task.department.clone().unwrap_or_default(),
            task.assignee
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
        ];
        write_data_row(sheet, row, &cells, &format, &mut widths)?;
    }

    write_trailing_block(sheet, tasks.len() as u32 + 1, tasks.len(), overdue_count)?;
    widths.apply(sheet)
}

fn write_rfi_sheet(sheet: &mut Worksheet, rfis: &[Rfi], today: NaiveDate) -> Result<(), XlsxError> {
    let headers = ["Number", "Subject", "Status", "Due Date", "Asked By", "Answered By"];
    write_header_row(sheet, &headers)?;
    let mut widths = ColumnWidths::new(&headers);

    let mut overdue_count = 0;
    for (i, rfi) in rfis.iter().enumerate() {
        let row = i as u32 + 1;
        let overdue = rfi
            .due_date
            .map(|d| is_overdue(d, rfi.status.is_closed(), today))
            .unwrap_or(false);
        if overdue {
            overdue_count += 1;
        }

        let format = if overdue {
            Format::new().set_background_color(Color::RGB(OVERDUE_FILL))
        } else {
            fill_format(rfi.status.color())
        };

        let cells = [
            rfi.number.clone(),
            rfi.subject.clone(),
            rfi.status.to_string(),
            rfi.due_date.map(|d| d.to_string()).unwrap_or_default(),
            rfi.asked_by.clone().unwrap_or_default(),
            rfi.answered_by.clone().unwrap_or_default(),
        ];
        write_data_row(sheet, row, &cells, &format, &mut widths)?;
    }

    write_trailing_block(sheet, rfis.len() as u32 + 1, rfis.len(), overdue_count)?;
    widths.apply(sheet)
}

fn write_submittal_sheet(
    sheet: &mut Worksheet,
    submittals: &[Submittal],
    today: NaiveDate,
) -> Result<(), XlsxError> {
    let headers = [
        "Number",
        "Title",
        "Spec Section",
        "Status",
        "Revision",
        "Due Date",
        "Sent",
        "Returned",
    ];
    write_header_row(sheet, &headers)?;
    let mut widths = ColumnWidths::new(&headers);

    let mut overdue_count = 0;
    for (i, submittal) in submittals.iter().enumerate() {
        let row = i as u32 + 1;
        let overdue = submittal
            .due_date
            .map(|d| is_overdue(d, submittal.status.is_closed(), today))
            .unwrap_or(false);
        if overdue {
            overdue_count += 1;
        }

        let format = if overdue {
            Format::new().set_background_color(Color::RGB(OVERDUE_FILL))
        } else {
            fill_format(submittal.status.color())
        };

        let cells = [
            submittal.number.clone(),
            submittal.title.clone(),
            submittal.spec_section.clone().unwrap_or_default(),
            submittal.status.to_string(),
            submittal.revision.to_string(),
            submittal.due_date.map(|d| d.to_string()).unwrap_or_default(),
            submittal.sent_date.map(|d| d.to_string()).unwrap_or_default(),
            submittal
                .returned_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ];
        write_data_row(sheet, row, &cells, &format, &mut widths)?;
    }

    write_trailing_block(
        sheet,
        submittals.len() as u32 + 1,
        submittals.len(),
        overdue_count,
    )?;
    widths.apply(sheet)
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    project: &Project,
    tasks: &[Task],
    rfis: &[Rfi],
    submittals: &[Submittal],
    today: NaiveDate,
) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    let mut widths = ColumnWidths::new(&["", ""]);

    sheet.write_string_with_format(0, 0, "Project", &bold)?;
    let project_label = format!("{} {}", project.number, project.name);
    sheet.write_string(0, 1, &project_label)?;
    widths.note(1, &project_label);

    sheet.write_string_with_format(1, 0, "Status", &bold)?;
    sheet.write_string(1, 1, project.status.to_string())?;

    sheet.write_string_with_format(2, 0, "Generated", &bold)?;
    sheet.write_string(2, 1, today.to_string())?;

    let mut row = 4u32;

    row = write_count_block(
        sheet,
        row,
        "Tasks by Status",
        &WorkbookExporter::task_status_counts(tasks)
            .into_iter()
            .map(|(status, count)| (status.to_string(), count))
            .collect::<Vec<_>>(),
        &mut widths,
    )?;

    row = write_count_block(
        sheet,
        row,
        "Tasks by Priority",
        &WorkbookExporter::task_priority_counts(tasks)
            .into_iter()
            .map(|(priority, count)| (priority.to_string(), count))
            .collect::<Vec<_>>(),
        &mut widths,
    )?;

    row = write_count_block(
        sheet,
        row,
        "RFIs by Status",
        &WorkbookExporter::rfi_status_counts(rfis)
            .into_iter()
            .map(|(status, count)| (status.to_string(), count))
            .collect::<Vec<_>>(),
        &mut widths,
    )?;

    write_count_block(
        sheet,
        row,
        "Submittals by Status",
        &WorkbookExporter::submittal_status_counts(submittals)
            .into_iter()
            .map(|(status, count)| (status.to_string(), count))
            .collect::<Vec<_>>(),
        &mut widths,
    )?;

    widths.apply(sheet)
}

/// Write one labeled count block; returns the row after the trailing blank
fn write_count_block(
    sheet: &mut Worksheet,
    start_row: u32,
    title: &str,
    counts: &[(String, usize)],
    widths: &mut ColumnWidths,
) -> Result<u32, XlsxError> {
    let title_format = header_format();
    sheet.write_string_with_format(start_row, 0, title, &title_format)?;
    widths.note(0, title);

    let mut row = start_row + 1;
    for (label, count) in counts {
        sheet.write_string(row, 0, label)?;
        sheet.write_number(row, 1, *count as f64)?;
        widths.note(0, label);
        row += 1;
    }

    Ok(row + 1)
}
