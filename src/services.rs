//! Kibana API services, one per resource.

pub mod roles;
pub mod spaces;

// Re-export for convenience
pub use roles::RolesService;
pub use spaces::SpacesService;
