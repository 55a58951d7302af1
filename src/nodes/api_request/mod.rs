mod codegen;
mod models;
mod specification;

pub use models::*;
