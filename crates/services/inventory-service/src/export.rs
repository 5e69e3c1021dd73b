//! Spreadsheet export of the product table.

use std::io::Cursor;
use std::path::Path;

use umya_spreadsheet::Spreadsheet;

use common::{AppError, AppResult};
use domain::Product;

/// Name of the single worksheet in an export
pub const SHEET_NAME: &str = "Products";

/// File name offered for download
pub const EXPORT_FILE_NAME: &str = "storage_data.xlsx";

/// MIME type of an xlsx workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header row, one entry per product field
pub const HEADERS: [&str; 9] = [
    "id",
    "name",
    "description",
    "category",
    "supplier",
    "quantity",
    "price",
    "reorder_level",
    "added_at",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build a workbook with a header row and one row per product.
pub fn workbook(products: &[Product]) -> AppResult<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(SHEET_NAME)
        .map_err(|e| AppError::internal(format!("Failed to create sheet: {}", e)))?;

    for (idx, header) in HEADERS.iter().enumerate() {
        sheet
            .get_cell_mut(format!("{}1", column_letter(idx + 1)).as_str())
            .set_value(*header);
    }

    for (row_idx, product) in products.iter().enumerate() {
        let row = row_idx + 2;
        let cell = |col: usize| format!("{}{}", column_letter(col), row);

        sheet.get_cell_mut(cell(1).as_str()).set_value_number(product.id);
        sheet.get_cell_mut(cell(2).as_str()).set_value(&product.name);
        sheet.get_cell_mut(cell(3).as_str()).set_value(&product.description);
        sheet.get_cell_mut(cell(4).as_str()).set_value(&product.category);
        sheet.get_cell_mut(cell(5).as_str()).set_value(&product.supplier);
        sheet
            .get_cell_mut(cell(6).as_str())
            .set_value_number(product.quantity as f64);
        sheet
            .get_cell_mut(cell(7).as_str())
            .set_value_number(product.price as f64);
        sheet
            .get_cell_mut(cell(8).as_str())
            .set_value_number(product.reorder_level as f64);
        sheet
            .get_cell_mut(cell(9).as_str())
            .set_value(product.added_at.format(TIMESTAMP_FORMAT).to_string());
    }

    Ok(book)
}

/// Serialize an export workbook to xlsx bytes.
pub fn to_bytes(products: &[Product]) -> AppResult<Vec<u8>> {
    let book = workbook(products)?;
    let mut buffer = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buffer)
        .map_err(|e| AppError::internal(format!("Failed to write workbook: {}", e)))?;
    Ok(buffer.into_inner())
}

/// Write an export workbook to a file.
pub fn write_to_path(products: &[Product], path: &Path) -> AppResult<()> {
    let book = workbook(products)?;
    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| {
        AppError::internal(format!("Failed to write {}: {}", path.display(), e))
    })
}

/// Spreadsheet column letter for a 1-based index (1 = A, 27 = AA).
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(9), "I");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
    }

    #[test]
    fn test_empty_export_has_only_headers() {
        let book = workbook(&[]).unwrap();
        let sheet = book.get_sheet_by_name(SHEET_NAME).unwrap();

        assert_eq!(sheet.get_value("A1"), "id");
        assert_eq!(sheet.get_value("I1"), "added_at");
        assert_eq!(sheet.get_value("A2"), "");
    }
}
