pub mod answer_handlers;
pub mod auth_handlers;
pub mod element_handlers;
pub mod step_handlers;
