//! # Articles
//!
//! Article model and repository.

pub mod article;
pub mod repository;

pub use article::{Article, ArticleStatus, Category};
pub use repository::{ArticleFilter, ArticleRepository};
