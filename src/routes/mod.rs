// Export all route modules
pub mod admin;
pub mod companies;
pub mod features;
pub mod import;
pub mod jobs;

// Re-export all route handlers for easy importing
pub use admin::*;
pub use companies::*;
pub use features::*;
pub use import::*;
pub use jobs::*;
