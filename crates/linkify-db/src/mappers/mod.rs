//! Model -> entity mappers
//!
//! Column `position` maps to the entity `index` field.

mod appearance;
mod content;
mod engagement;
mod subscription;
mod user;

pub use engagement::parse_event_kind;
