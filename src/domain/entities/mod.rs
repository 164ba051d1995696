pub mod certificate;
pub mod project;
pub mod validation;
