pub use sea_orm_migration::prelude::*;

mod m20250815_000001_create_company_table;
mod m20250815_000002_create_section_table;
mod m20250815_000003_create_job_table;
mod m20250815_000004_create_feature_settings_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250815_000001_create_company_table::Migration),
            Box::new(m20250815_000002_create_section_table::Migration),
            Box::new(m20250815_000003_create_job_table::Migration),
            Box::new(m20250815_000004_create_feature_settings_table::Migration),
        ]
    }
}
