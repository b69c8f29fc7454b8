//! Built-in inline patterns (spec §4.5 built-ins list).

pub mod autolink;
pub mod backtick;
pub mod emphasis;
pub mod entity;
pub mod escape;
pub mod image;
pub mod link;
pub mod strikethrough;
