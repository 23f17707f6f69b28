use rust_xlsxwriter::{Workbook, XlsxError};

pub const TEMPLATE_FILENAME: &str = "bulk-upload-template.xlsx";
pub const TEMPLATE_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADERS: [&str; 11] = [
    "Design Name",
    "Size",
    "Collection",
    "Image1",
    "Image2",
    "Image3",
    "Image4",
    "Image5",
    "Description",
    "Category",
    "Color",
];

const COLUMN_WIDTHS: [f64; 11] = [
    20.0, 15.0, 15.0, 50.0, 50.0, 50.0, 50.0, 50.0, 40.0, 20.0, 15.0,
];

const EXAMPLE_ROWS: [[&str; 11]; 2] = [
    [
        "AMORA BLUE",
        "600x1200mm",
        "GLOSSY",
        "https://example.com/image1.jpg",
        "https://example.com/image2.jpg",
        "",
        "",
        "",
        "Elevate your space with this premium design",
        "Porcelain Tiles",
        "Blue",
    ],
    [
        "AMORA ICE",
        "600x1200mm",
        "MATTE",
        "https://example.com/image1.jpg",
        "",
        "",
        "",
        "",
        "The exquisite design for modern spaces",
        "Porcelain Tiles",
        "White",
    ],
];

/// Build the downloadable XLSX template with headers and two example rows
pub fn build_template() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Products")?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (row, values) in EXAMPLE_ROWS.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string((row + 1) as u32, col as u16, *value)?;
            }
        }
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::imports::dtos::RowStatus;
    use crate::features::imports::models::{CategoryRef, SizeRef};
    use crate::features::imports::services::row_classifier::{classify_row, ImportDefaults};
    use crate::features::imports::services::sheet_reader::parse_upload;
    use uuid::Uuid;

    #[test]
    fn template_is_an_xlsx_file() {
        let bytes = build_template().unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn template_rows_parse_back_and_classify_ready() {
        let bytes = build_template().unwrap();
        let rows = parse_upload(&bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[1].number, 3);

        let categories = vec![CategoryRef {
            id: Uuid::now_v7(),
            name: "Porcelain Tiles".to_string(),
        }];
        let sizes = vec![SizeRef {
            id: Uuid::now_v7(),
            name: "600x1200mm".to_string(),
            category_id: categories[0].id,
        }];

        for raw in &rows {
            let row = classify_row(raw, &ImportDefaults::default(), &categories, &sizes);
            assert_eq!(row.status, RowStatus::Ready, "row {}: {:?}", row.row_number, row.errors);
        }

        let first = classify_row(&rows[0], &ImportDefaults::default(), &categories, &sizes);
        assert_eq!(first.design_name, "AMORA BLUE");
        assert_eq!(first.size, "600x1200mm");
        assert_eq!(first.collection, "GLOSSY");
        assert_eq!(first.image2.as_deref(), Some("https://example.com/image2.jpg"));
        assert_eq!(first.category.as_deref(), Some("Porcelain Tiles"));
    }
}
