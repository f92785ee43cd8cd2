//! Value objects - immutable types that represent domain concepts

mod color;
mod snowflake;
mod username;

pub use color::HexColor;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use username::{Username, USERNAME_MAX_LEN, USERNAME_MIN_LEN};
