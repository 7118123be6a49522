use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::slug::slugify;

pub const DEFAULT_THEME_COLOR: &str = "#0a66c2";

/// Canonical JSON snapshot of all companies/sections/jobs. The importer
/// repopulates the store from one of these in a single shot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub companies: Vec<SeedCompany>,
    #[serde(default)]
    pub sections: Vec<SeedSection>,
    #[serde(default)]
    pub jobs: Vec<SeedJob>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCompany {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedSection {
    #[serde(default)]
    pub id: Option<String>,
    /// Company id, or a company slug as a soft reference.
    pub company_id: String,
    #[serde(default, rename = "type")]
    pub section_type: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedJob {
    #[serde(default)]
    pub id: Option<String>,
    /// Company id, or a company slug as a soft reference.
    pub company_id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub apply_url: Option<String>,
}

/// Convert an uploaded `.xlsx` workbook into a seed document. Only the first
/// worksheet is read; the first row is treated as a header row.
pub fn seed_from_xlsx(bytes: &[u8]) -> Result<SeedDocument, AppError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::InvalidUpload(format!("could not read workbook: {}", e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::InvalidUpload("workbook has no worksheets".to_string()))?
        .map_err(|e| AppError::InvalidUpload(format!("could not read worksheet: {}", e)))?;

    Ok(seed_from_rows(rows_from_range(&range)))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Turn a worksheet range into column-name → value rows. Header names are
/// lowercased and trimmed so spreadsheets with varying capitalization map
/// the same way.
fn rows_from_range(range: &Range<Data>) -> Vec<HashMap<String, String>> {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| cell_text(c).to_lowercase()).collect(),
        None => return Vec::new(),
    };

    rows.map(|row| {
        headers
            .iter()
            .cloned()
            .zip(row.iter().map(cell_text))
            .filter(|(header, _)| !header.is_empty())
            .collect()
    })
    .collect()
}

fn pick<'a>(row: &'a HashMap<String, String>, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|name| row.get(*name))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}

/// Build the seed document for an import batch: one synthetic company, one
/// default "about" section, and one job per data row. Every job gets a slug
/// disambiguated by a fresh UUID, so duplicate titles never collide.
pub fn seed_from_rows(rows: Vec<HashMap<String, String>>) -> SeedDocument {
    let company_id = "co_1".to_string();

    let company = SeedCompany {
        id: Some(company_id.clone()),
        slug: Some(slugify("Imported Company", Some("co1"))),
        name: "Imported Company".to_string(),
        ..Default::default()
    };

    let section = SeedSection {
        id: Some("sec_1".to_string()),
        company_id: company_id.clone(),
        section_type: Some("about".to_string()),
        title: "About Imported Company".to_string(),
        content: Some("Imported automatically from spreadsheet upload.".to_string()),
        position: Some(1),
        is_visible: Some(true),
    };

    let jobs = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let idx = i + 1;
            let title = pick(row, &["title", "job title"])
                .map(str::to_string)
                .unwrap_or_else(|| format!("Role {}", idx));
            let slug = slugify(&title, Some(&Uuid::new_v4().to_string()));

            SeedJob {
                id: Some(format!("job_{}", idx)),
                company_id: company_id.clone(),
                title,
                slug: Some(slug),
                location: Some(pick(row, &["location"]).unwrap_or("").to_string()),
                employment_type: Some(
                    pick(row, &["employment_type", "job_type"]).unwrap_or("").to_string(),
                ),
                description: Some(pick(row, &["description"]).unwrap_or("").to_string()),
                published: Some(true),
                apply_url: Some(pick(row, &["apply_url"]).unwrap_or("").to_string()),
            }
        })
        .collect();

    SeedDocument {
        companies: vec![company],
        sections: vec![section],
        jobs,
    }
}

/// Persist the seed document, fully overwriting any previous one.
pub fn write_seed(path: &Path, seed: &SeedDocument) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Internal(format!("could not create seed directory: {}", e)))?;
    }
    let json = serde_json::to_string_pretty(seed)?;
    std::fs::write(path, json)
        .map_err(|e| AppError::Internal(format!("could not write seed file: {}", e)))
}

pub fn read_seed(path: &Path) -> Result<SeedDocument, AppError> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "seed document not found at {}",
            path.display()
        )));
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Internal(format!("could not read seed file: {}", e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::ImportFailed(format!("invalid seed file: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_one_company_and_about_section() {
        let seed = seed_from_rows(vec![]);
        assert_eq!(seed.companies.len(), 1);
        assert_eq!(seed.companies[0].id.as_deref(), Some("co_1"));
        assert_eq!(seed.companies[0].slug.as_deref(), Some("imported-company-co1"));
        assert_eq!(seed.sections.len(), 1);
        assert_eq!(seed.sections[0].section_type.as_deref(), Some("about"));
        assert!(seed.jobs.is_empty());
    }

    #[test]
    fn test_duplicate_titles_get_distinct_slugs() {
        let seed = seed_from_rows(vec![
            row(&[("title", "Engineer"), ("location", "Remote")]),
            row(&[("title", "Engineer"), ("location", "NYC")]),
        ]);
        assert_eq!(seed.jobs.len(), 2);
        let a = seed.jobs[0].slug.clone().unwrap();
        let b = seed.jobs[1].slug.clone().unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("engineer-"));
        assert!(b.starts_with("engineer-"));
    }

    #[test]
    fn test_title_column_fallbacks() {
        let seed = seed_from_rows(vec![
            row(&[("job title", "Designer")]),
            row(&[("irrelevant", "x")]),
        ]);
        assert_eq!(seed.jobs[0].title, "Designer");
        assert_eq!(seed.jobs[1].title, "Role 2");
    }

    #[test]
    fn test_field_fallbacks_default_to_empty() {
        let seed = seed_from_rows(vec![row(&[("title", "Engineer"), ("job_type", "Contract")])]);
        let job = &seed.jobs[0];
        assert_eq!(job.employment_type.as_deref(), Some("Contract"));
        assert_eq!(job.location.as_deref(), Some(""));
        assert_eq!(job.description.as_deref(), Some(""));
        assert_eq!(job.apply_url.as_deref(), Some(""));
        assert_eq!(job.published, Some(true));
        assert_eq!(job.company_id, "co_1");
    }

    #[test]
    fn test_non_spreadsheet_input_rejected() {
        let err = seed_from_xlsx(b"this is not a zip archive").unwrap_err();
        assert!(matches!(err, AppError::InvalidUpload(_)));
    }
}
