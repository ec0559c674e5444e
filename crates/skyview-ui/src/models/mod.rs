pub mod search_model;

pub use search_model::SearchSession;
