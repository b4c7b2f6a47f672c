use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// XLSX export with styled header, banded rows, and auto column widths.
/// Rows are pre-flattened strings; numeric-looking cells are written as
/// numbers so spreadsheet formulas work on the hours columns.
pub(crate) fn export_xlsx(
    headers: &[&str],
    rows: &[Vec<String>],
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if rows.is_empty() {
        worksheet
            .write(0, 0, "No data available")
            .map_err(to_app_error)?;
        workbook.save(path_str(path)?).map_err(to_app_error)?;
        notify_export_success("XLSX (empty dataset)", path);
        return Ok(());
    }

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F6B4F))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEDF6F0);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, row) in rows.iter().enumerate() {
        let out_row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, out_row, col as u16, value, band_color)?;
            if col < col_widths.len() {
                col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path_str(path)?).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
) -> AppResult<()> {
    if let Ok(num) = s.parse::<f64>() {
        let fmt = Format::new()
            .set_align(FormatAlign::Right)
            .set_background_color(bg)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        worksheet
            .write_with_format(row, col, num, &fmt)
            .map_err(to_app_error)?;
        return Ok(());
    }

    let fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    worksheet
        .write_with_format(row, col, s, &fmt)
        .map_err(to_app_error)?;

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::Export("invalid output path".to_string()))
}
