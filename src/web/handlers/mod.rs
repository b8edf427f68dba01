//! Web 路由处理器

pub mod flashcards;
pub mod health;

pub use flashcards::*;
pub use health::*;
