pub mod certification;
pub mod patch;
pub mod project;
pub mod skill;
