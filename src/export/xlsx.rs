use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{date_serial, time_fraction};
use crate::export::model::{Cell, ExportRow};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// One styled sheet named after the target, header frozen, columns sized to content.
pub(crate) fn export_xlsx<T: ExportRow>(rows: &[T], sheet: &str, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).map_err(to_app_error)?;

    let headers = T::headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, item) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in item.cells().iter().enumerate() {
            let width = write_cell(worksheet, row, col as u16, cell, band)?;
            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(width);
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn banded(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

/// Write one cell and return its display width.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell, bg: Color) -> AppResult<usize> {
    let base = banded(bg);

    match cell {
        Cell::Text(s) => {
            ws.write_with_format(row, col, s.as_str(), &base)
                .map_err(to_app_error)?;
            Ok(UnicodeWidthStr::width(s.as_str()))
        }
        Cell::Integer(n) => {
            ws.write_with_format(row, col, *n as f64, &base.set_align(FormatAlign::Right))
                .map_err(to_app_error)?;
            Ok(n.to_string().len())
        }
        Cell::Number(n) => {
            let fmt = base.set_align(FormatAlign::Right).set_num_format("0.00");
            ws.write_with_format(row, col, *n, &fmt)
                .map_err(to_app_error)?;
            Ok(format!("{n:.2}").len())
        }
        Cell::Date(d) => {
            let fmt = base.set_num_format("yyyy-mm-dd");
            ws.write_with_format(row, col, date_serial(*d), &fmt)
                .map_err(to_app_error)?;
            Ok(10)
        }
        Cell::Time(t) => {
            let fmt = base.set_num_format("hh:mm");
            ws.write_with_format(row, col, time_fraction(*t), &fmt)
                .map_err(to_app_error)?;
            Ok(5)
        }
        Cell::Empty => {
            ws.write_blank(row, col, &base).map_err(to_app_error)?;
            Ok(0)
        }
    }
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
