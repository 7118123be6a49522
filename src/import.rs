use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{company, job, section};
use crate::error::AppError;
use crate::seed::{SeedDocument, DEFAULT_THEME_COLOR};
use crate::slug::slugify;

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ImportSummary {
    pub companies: usize,
    pub sections: usize,
    pub jobs: usize,
}

/// Replace the entire store with the seed contents.
///
/// Runs as one all-or-nothing transaction: existing jobs, sections and
/// companies are deleted (children first), then the seed rows are inserted
/// with section/job `company_id` values resolved through a slug → id map, so
/// dependents may reference companies by slug as well as by id. Any failure
/// rolls the whole thing back and readers never see partial state.
///
/// Concurrent imports racing each other are not locked against; callers are
/// expected to serialize imports.
pub async fn import_seed(
    db: &DatabaseConnection,
    seed: &SeedDocument,
) -> Result<ImportSummary, AppError> {
    replace_all(db, seed)
        .await
        .map_err(|err| AppError::ImportFailed(err.to_string()))
}

async fn replace_all(db: &DatabaseConnection, seed: &SeedDocument) -> Result<ImportSummary, DbErr> {
    let txn = db.begin().await?;

    // Children before parents, for the foreign keys.
    job::Entity::delete_many().exec(&txn).await?;
    section::Entity::delete_many().exec(&txn).await?;
    company::Entity::delete_many().exec(&txn).await?;

    let mut slug_to_id: HashMap<String, String> = HashMap::new();
    for (i, c) in seed.companies.iter().enumerate() {
        let id = c.id.clone().unwrap_or_else(|| format!("co_{}", i + 1));
        let slug = c
            .slug
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&c.name, Some(&id)));

        company::ActiveModel {
            id: Set(id.clone()),
            name: Set(c.name.clone()),
            slug: Set(slug.clone()),
            website: Set(c.website.clone()),
            logo: Set(c.logo.clone()),
            banner_url: Set(c.banner_url.clone()),
            video_url: Set(c.video_url.clone()),
            description: Set(c.description.clone()),
            theme_color: Set(c
                .theme_color
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_THEME_COLOR.to_string())),
        }
        .insert(&txn)
        .await?;

        slug_to_id.insert(slug, id);
    }

    for (i, s) in seed.sections.iter().enumerate() {
        section::ActiveModel {
            id: Set(s.id.clone().unwrap_or_else(|| format!("sec_{}", i + 1))),
            company_id: Set(resolve_company(&slug_to_id, &s.company_id)),
            r#type: Set(s.section_type.clone()),
            title: Set(s.title.clone()),
            content: Set(s.content.clone()),
            position: Set(s.position.unwrap_or(1)),
            is_visible: Set(s.is_visible.unwrap_or(true)),
        }
        .insert(&txn)
        .await?;
    }

    let mut used_slugs: HashSet<String> = HashSet::new();
    for (i, j) in seed.jobs.iter().enumerate() {
        // A supplied slug is trusted as long as it is unique within the
        // batch; missing or colliding slugs are regenerated with a fresh
        // disambiguator. This keeps re-imports of the same seed idempotent.
        let slug = match &j.slug {
            Some(s) if !s.is_empty() && used_slugs.insert(s.clone()) => s.clone(),
            _ => {
                let generated = slugify(&j.title, Some(&Uuid::new_v4().to_string()));
                used_slugs.insert(generated.clone());
                generated
            }
        };

        job::ActiveModel {
            id: Set(j.id.clone().unwrap_or_else(|| format!("job_{}", i + 1))),
            slug: Set(slug),
            title: Set(j.title.clone()),
            location: Set(j.location.clone()),
            r#type: Set(j.employment_type.clone()),
            description: Set(j.description.clone()),
            apply_url: Set(j.apply_url.clone()),
            posted_at: Set(Utc::now()),
            published: Set(j.published.unwrap_or(true)),
            company_id: Set(resolve_company(&slug_to_id, &j.company_id)),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    Ok(ImportSummary {
        companies: seed.companies.len(),
        sections: seed.sections.len(),
        jobs: seed.jobs.len(),
    })
}

/// A `company_id` that is actually a known company slug is treated as a soft
/// reference and mapped to the real id; anything else is used as-is.
fn resolve_company(slug_to_id: &HashMap<String, String>, reference: &str) -> String {
    slug_to_id
        .get(reference)
        .cloned()
        .unwrap_or_else(|| reference.to_string())
}
