pub mod catalog;
pub mod generative;
pub mod http;
