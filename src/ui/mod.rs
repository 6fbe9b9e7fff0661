//! View helpers

pub mod movie_item;
pub mod review;
pub mod search_bar;
pub mod theme;
