pub mod bid;
pub mod contractor;
pub mod job;
pub mod response;
pub mod settings;
