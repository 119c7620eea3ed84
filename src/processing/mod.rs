pub mod credential;
pub mod merge;
pub mod parser;
pub mod processor;
pub mod transform;
