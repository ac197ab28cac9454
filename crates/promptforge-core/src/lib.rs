pub mod analyzer;
pub mod assembler;
pub mod brief;
mod catalog;
pub mod error;
pub mod history;
pub mod platform;
pub mod template;
pub mod variation;
