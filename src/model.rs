pub mod activity;
pub mod placement;
pub mod resource;
pub mod syllabus;
pub mod user;
pub mod video;
