pub mod repository;

pub use repository::{GitRepository, list_repositories};
