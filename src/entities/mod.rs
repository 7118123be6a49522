pub mod company;
pub mod feature_settings;
pub mod job;
pub mod section;

pub use company::Entity as Company;
pub use feature_settings::Entity as FeatureSettings;
pub use job::Entity as Job;
pub use section::Entity as Section;
