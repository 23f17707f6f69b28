use uuid::Uuid;

use crate::features::imports::dtos::{ImportRowDto, ImportStatsDto, RowStatus};
use crate::features::imports::models::{CategoryRef, SizeRef};
use crate::features::imports::services::sheet_reader::RawRow;
use crate::shared::validation::is_valid_http_url;

pub const DESIGN_NAME_ALIASES: &[&str] = &["Design Name", "Product Name", "Name", "Product"];
pub const SIZE_ALIASES: &[&str] = &["Size"];
pub const COLLECTION_ALIASES: &[&str] = &["Collection", "Finish", "Surface"];
pub const DESCRIPTION_ALIASES: &[&str] = &["Description", "Desc"];
pub const CATEGORY_ALIASES: &[&str] = &["Category", "Cat"];
pub const COLOR_ALIASES: &[&str] = &["Color", "Colour"];

const IMAGE_ALIASES: [&[&str]; 5] = [
    &["Image1", "Image 1", "Image1 URL"],
    &["Image2", "Image 2", "Image2 URL"],
    &["Image3", "Image 3", "Image3 URL"],
    &["Image4", "Image 4", "Image4 URL"],
    &["Image5", "Image 5", "Image5 URL"],
];

/// Overrides selected in the upload form. A selected default always wins
/// over the corresponding cell value.
#[derive(Debug, Default)]
pub struct ImportDefaults<'a> {
    pub category: Option<&'a CategoryRef>,
    pub size: Option<&'a SizeRef>,
}

pub fn resolve_category<'a>(name: &str, categories: &'a [CategoryRef]) -> Option<&'a CategoryRef> {
    categories.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub enum SizeLookup<'a> {
    Found(&'a SizeRef),
    Ambiguous,
    NotFound,
}

/// Resolve a size name against the catalog. Size names are only unique
/// per category, so a bare name matching several categories is rejected
/// as ambiguous unless a resolved category narrows it to one.
pub fn resolve_size<'a>(
    name: &str,
    sizes: &'a [SizeRef],
    category_id: Option<Uuid>,
) -> SizeLookup<'a> {
    let matches: Vec<&SizeRef> = sizes
        .iter()
        .filter(|s| s.name.eq_ignore_ascii_case(name))
        .collect();

    match matches.as_slice() {
        [] => SizeLookup::NotFound,
        [only] => SizeLookup::Found(only),
        many => {
            if let Some(category_id) = category_id {
                let mut scoped = many.iter().filter(|s| s.category_id == category_id);
                if let Some(found) = scoped.next() {
                    if scoped.next().is_none() {
                        return SizeLookup::Found(found);
                    }
                }
            }
            SizeLookup::Ambiguous
        }
    }
}

/// Validate one parsed row and resolve its category and size against the
/// catalog, producing the preview entry with errors, warnings and status.
pub fn classify_row(
    row: &RawRow,
    defaults: &ImportDefaults<'_>,
    categories: &[CategoryRef],
    sizes: &[SizeRef],
) -> ImportRowDto {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let design_name = row.value(DESIGN_NAME_ALIASES).unwrap_or_default().to_string();
    let size = row.value(SIZE_ALIASES).unwrap_or_default().to_string();
    let collection = row.value(COLLECTION_ALIASES).unwrap_or_default().to_string();
    let image1 = row.value(IMAGE_ALIASES[0]).unwrap_or_default().to_string();
    let image2 = row.value(IMAGE_ALIASES[1]).map(str::to_string);
    let image3 = row.value(IMAGE_ALIASES[2]).map(str::to_string);
    let image4 = row.value(IMAGE_ALIASES[3]).map(str::to_string);
    let image5 = row.value(IMAGE_ALIASES[4]).map(str::to_string);
    let description = row.value(DESCRIPTION_ALIASES).map(str::to_string);
    let category = row.value(CATEGORY_ALIASES).map(str::to_string);
    let color = row.value(COLOR_ALIASES).map(str::to_string);

    if design_name.is_empty() {
        errors.push("Design Name is required".to_string());
    }

    if image1.is_empty() {
        errors.push("At least one image (Image1) is required".to_string());
    } else if !is_valid_http_url(&image1) {
        warnings.push("Image1 URL appears invalid".to_string());
    }

    for (index, image) in [&image2, &image3, &image4, &image5].iter().enumerate() {
        if let Some(url) = image {
            if !is_valid_http_url(url) {
                warnings.push(format!("Image{} URL appears invalid", index + 2));
            }
        }
    }

    // Category: the selected default wins outright; otherwise the cell
    // value must match a known category
    let mut final_category = defaults.category.map(|c| c.name.clone());
    let mut resolved_category_id = defaults.category.map(|c| c.id);

    if defaults.category.is_none() {
        match category.as_deref() {
            Some(cell) => match resolve_category(cell, categories) {
                Some(found) => {
                    final_category = Some(found.name.clone());
                    resolved_category_id = Some(found.id);
                }
                None => errors.push(format!("Category \"{cell}\" not found in database")),
            },
            None => {
                errors.push("Category is required (select default or provide in file)".to_string())
            }
        }
    }

    let mut final_size = defaults.size.map(|s| s.name.clone());

    if defaults.size.is_none() {
        if size.is_empty() {
            errors.push("Size is required (select default or provide in file)".to_string());
        } else {
            match resolve_size(&size, sizes, resolved_category_id) {
                SizeLookup::Found(found) => final_size = Some(found.name.clone()),
                SizeLookup::Ambiguous => {
                    errors.push(format!("Size \"{size}\" is ambiguous across categories"))
                }
                SizeLookup::NotFound => {
                    errors.push(format!("Size \"{size}\" not found in database"))
                }
            }
        }
    }

    let status = if !errors.is_empty() {
        RowStatus::Error
    } else if !warnings.is_empty() {
        RowStatus::Warning
    } else {
        RowStatus::Ready
    };

    ImportRowDto {
        row_number: row.number,
        design_name,
        size: final_size.unwrap_or(size),
        collection,
        image1,
        image2,
        image3,
        image4,
        image5,
        description,
        category: final_category.or(category),
        color,
        errors,
        warnings,
        status,
    }
}

pub fn stats(rows: &[ImportRowDto]) -> ImportStatsDto {
    ImportStatsDto {
        total: rows.len(),
        ready: rows.iter().filter(|r| r.status == RowStatus::Ready).count(),
        warnings: rows
            .iter()
            .filter(|r| r.status == RowStatus::Warning)
            .count(),
        errors: rows.iter().filter(|r| r.status == RowStatus::Error).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<CategoryRef> {
        vec![
            CategoryRef {
                id: Uuid::now_v7(),
                name: "Porcelain Tiles".to_string(),
            },
            CategoryRef {
                id: Uuid::now_v7(),
                name: "Wall Tiles".to_string(),
            },
        ]
    }

    fn sizes_for(categories: &[CategoryRef]) -> Vec<SizeRef> {
        vec![
            SizeRef {
                id: Uuid::now_v7(),
                name: "600x1200mm".to_string(),
                category_id: categories[0].id,
            },
            SizeRef {
                id: Uuid::now_v7(),
                name: "300x600mm".to_string(),
                category_id: categories[0].id,
            },
            SizeRef {
                id: Uuid::now_v7(),
                name: "300x600mm".to_string(),
                category_id: categories[1].id,
            },
        ]
    }

    fn complete_row() -> RawRow {
        RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "600x1200mm"),
                ("Collection", "GLOSSY"),
                ("Image1", "https://example.com/a.jpg"),
                ("Category", "Porcelain Tiles"),
                ("Color", "Blue"),
            ],
        )
    }

    #[test]
    fn complete_row_is_ready() {
        let categories = categories();
        let sizes = sizes_for(&categories);

        let row = classify_row(
            &complete_row(),
            &ImportDefaults::default(),
            &categories,
            &sizes,
        );

        assert_eq!(row.status, RowStatus::Ready);
        assert!(row.errors.is_empty());
        assert!(row.warnings.is_empty());
        assert_eq!(row.design_name, "AMORA BLUE");
        assert_eq!(row.size, "600x1200mm");
        assert_eq!(row.category.as_deref(), Some("Porcelain Tiles"));
    }

    #[test]
    fn missing_design_name_is_an_error() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = RawRow::from_pairs(
            2,
            &[
                ("Size", "600x1200mm"),
                ("Image1", "https://example.com/a.jpg"),
                ("Category", "Porcelain Tiles"),
            ],
        );

        let row = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert_eq!(row.status, RowStatus::Error);
        assert!(row.errors.contains(&"Design Name is required".to_string()));
    }

    #[test]
    fn missing_image1_is_an_error_but_invalid_image1_is_a_warning() {
        let categories = categories();
        let sizes = sizes_for(&categories);

        let no_image = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "600x1200mm"),
                ("Category", "Porcelain Tiles"),
            ],
        );
        let row = classify_row(&no_image, &ImportDefaults::default(), &categories, &sizes);
        assert_eq!(row.status, RowStatus::Error);
        assert!(row
            .errors
            .contains(&"At least one image (Image1) is required".to_string()));

        let bad_image = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "600x1200mm"),
                ("Image1", "not-a-url"),
                ("Category", "Porcelain Tiles"),
            ],
        );
        let row = classify_row(&bad_image, &ImportDefaults::default(), &categories, &sizes);
        assert_eq!(row.status, RowStatus::Warning);
        assert!(row
            .warnings
            .contains(&"Image1 URL appears invalid".to_string()));
    }

    #[test]
    fn invalid_extra_images_warn_with_their_column_number() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "600x1200mm"),
                ("Image1", "https://example.com/a.jpg"),
                ("Image3", "ftp://example.com/b.jpg"),
                ("Category", "Porcelain Tiles"),
            ],
        );

        let row = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert_eq!(row.status, RowStatus::Warning);
        assert!(row
            .warnings
            .contains(&"Image3 URL appears invalid".to_string()));
    }

    #[test]
    fn default_category_overrides_row_value() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "600x1200mm"),
                ("Image1", "https://example.com/a.jpg"),
                ("Category", "No Such Category"),
            ],
        );
        let defaults = ImportDefaults {
            category: Some(&categories[0]),
            size: None,
        };

        let row = classify_row(&raw, &defaults, &categories, &sizes);

        assert_eq!(row.status, RowStatus::Ready);
        assert_eq!(row.category.as_deref(), Some("Porcelain Tiles"));
    }

    #[test]
    fn unknown_category_is_an_error() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "600x1200mm"),
                ("Image1", "https://example.com/a.jpg"),
                ("Category", "Marble"),
            ],
        );

        let row = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert!(row
            .errors
            .contains(&"Category \"Marble\" not found in database".to_string()));
    }

    #[test]
    fn missing_category_without_default_is_an_error() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "600x1200mm"),
                ("Image1", "https://example.com/a.jpg"),
            ],
        );

        let row = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert!(row
            .errors
            .contains(&"Category is required (select default or provide in file)".to_string()));
    }

    #[test]
    fn unknown_size_is_an_error() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "450x450mm"),
                ("Image1", "https://example.com/a.jpg"),
                ("Category", "Porcelain Tiles"),
            ],
        );

        let row = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert!(row
            .errors
            .contains(&"Size \"450x450mm\" not found in database".to_string()));
    }

    #[test]
    fn size_shared_across_categories_resolves_through_the_category() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "300x600mm"),
                ("Image1", "https://example.com/a.jpg"),
                ("Category", "Wall Tiles"),
            ],
        );

        let row = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert_eq!(row.status, RowStatus::Ready);
        assert_eq!(row.size, "300x600mm");
    }

    #[test]
    fn size_shared_across_categories_without_narrowing_is_ambiguous() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        // "300x600mm" exists under both categories; the default size slot
        // is empty and the row names no category that narrows it
        let raw = RawRow::from_pairs(
            2,
            &[("Design Name", "AMORA BLUE"), ("Size", "300x600mm")],
        );

        let row = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert!(row
            .errors
            .contains(&"Size \"300x600mm\" is ambiguous across categories".to_string()));
    }

    #[test]
    fn size_matching_is_case_insensitive() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = RawRow::from_pairs(
            2,
            &[
                ("Design Name", "AMORA BLUE"),
                ("Size", "600X1200MM"),
                ("Image1", "https://example.com/a.jpg"),
                ("Category", "porcelain tiles"),
            ],
        );

        let row = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert_eq!(row.status, RowStatus::Ready);
        assert_eq!(row.size, "600x1200mm");
        assert_eq!(row.category.as_deref(), Some("Porcelain Tiles"));
    }

    #[test]
    fn classification_is_idempotent() {
        let categories = categories();
        let sizes = sizes_for(&categories);
        let raw = complete_row();

        let first = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);
        let second = classify_row(&raw, &ImportDefaults::default(), &categories, &sizes);

        assert_eq!(first.status, second.status);
        assert_eq!(first.errors, second.errors);
        assert_eq!(first.warnings, second.warnings);
        assert_eq!(first.size, second.size);
    }

    #[test]
    fn stats_count_rows_by_status() {
        let categories = categories();
        let sizes = sizes_for(&categories);

        let rows = vec![
            classify_row(&complete_row(), &ImportDefaults::default(), &categories, &sizes),
            classify_row(
                &RawRow::from_pairs(
                    3,
                    &[
                        ("Design Name", "AMORA ICE"),
                        ("Size", "600x1200mm"),
                        ("Image1", "bad-url"),
                        ("Category", "Porcelain Tiles"),
                    ],
                ),
                &ImportDefaults::default(),
                &categories,
                &sizes,
            ),
            classify_row(
                &RawRow::from_pairs(4, &[("Size", "600x1200mm")]),
                &ImportDefaults::default(),
                &categories,
                &sizes,
            ),
        ];

        let stats = stats(&rows);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.ready, 1);
        assert_eq!(stats.warnings, 1);
        assert_eq!(stats.errors, 1);
    }
}
