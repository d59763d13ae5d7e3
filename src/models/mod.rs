pub mod answer;
pub mod element;
pub mod member;
pub mod step;
