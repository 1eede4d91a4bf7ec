pub mod browse;
pub mod extract;
pub mod fallback;
pub mod search;
