use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use crate::errors::GenerateError;
use crate::wire::TestCase;

pub const TEST_CASE_COLUMNS: [&str; 10] = [
    "Test ID",
    "Title",
    "Objective",
    "Preconditions / Test Data",
    "Steps",
    "Expected Results",
    "Priority",
    "Notes",
    "Status",
    "Assignee",
];

const WIDE_COLUMNS: [&str; 3] = ["Steps", "Expected Results", "Notes"];

/// Render generated test cases into a two-sheet workbook (Summary +
/// TestCases), returned as in-memory bytes ready to stream as a download.
/// Status and Assignee stay empty for testers to fill in by hand.
pub fn build_workbook(source_url: &str, test_cases: &[TestCase]) -> Result<Vec<u8>, GenerateError> {
    if test_cases.is_empty() {
        return Err(GenerateError::InvalidInput(
            "test_cases must not be empty".into(),
        ));
    }

    let mut workbook = Workbook::new();

    write_summary_sheet(&mut workbook, source_url, test_cases.len()).map_err(wb_err)?;
    write_cases_sheet(&mut workbook, test_cases).map_err(wb_err)?;

    workbook.save_to_buffer().map_err(wb_err)
}

fn write_summary_sheet(
    workbook: &mut Workbook,
    source_url: &str,
    case_count: usize,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary")?;

    sheet.set_column_width(0, 20)?;
    sheet.set_column_width(1, 80)?;

    sheet.write_string(0, 0, "Item")?;
    sheet.write_string(0, 1, "Value")?;
    sheet.write_string(1, 0, "Test target URL")?;
    sheet.write_string(1, 1, source_url)?;
    sheet.write_string(2, 0, "Test case count")?;
    sheet.write_number(2, 1, case_count as f64)?;

    Ok(())
}

fn write_cases_sheet(workbook: &mut Workbook, test_cases: &[TestCase]) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("TestCases")?;

    let wrap = Format::new().set_text_wrap().set_align(FormatAlign::Top);
    let header = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xDDEBF7))
        .set_border(FormatBorder::Thin)
        .set_text_wrap();

    for (col, name) in TEST_CASE_COLUMNS.iter().enumerate() {
        let col = col as u16;
        let width = if WIDE_COLUMNS.contains(name) { 40 } else { 18 };
        sheet.set_column_width(col, width)?;
        sheet.set_column_format(col, &wrap)?;
        sheet.write_string_with_format(0, col, *name, &header)?;
    }

    for (idx, case) in test_cases.iter().enumerate() {
        let row = (idx + 1) as u32;
        let cells = [
            case.test_id.clone(),
            case.title.clone(),
            case.objective.clone(),
            case.preconditions.join("\n"),
            enumerate_items(&case.steps).join("\n"),
            enumerate_items(&case.expected_results).join("\n"),
            case.priority.clone(),
            case.notes.clone(),
            String::new(), // Status
            String::new(), // Assignee
        ];
        for (col, value) in cells.iter().enumerate() {
            sheet.write_string(row, col as u16, value.as_str())?;
        }
    }

    Ok(())
}

/// Number the non-empty entries sequentially from 1. Empty entries are
/// dropped and do not consume a number.
fn enumerate_items(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|v| !v.is_empty())
        .enumerate()
        .map(|(idx, value)| format!("{}. {value}", idx + 1))
        .collect()
}

fn wb_err(e: XlsxError) -> GenerateError {
    GenerateError::Workbook(e.to_string())
}
