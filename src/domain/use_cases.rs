pub mod certifications;
pub mod projects;
pub mod skills;
