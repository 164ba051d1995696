pub mod admin;
pub mod certificates;
pub mod home;
pub mod projects;
pub mod system;
pub mod upload;
