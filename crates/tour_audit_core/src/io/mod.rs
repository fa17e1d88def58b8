pub mod instance;
pub mod options;
pub mod report;
pub mod tour;
