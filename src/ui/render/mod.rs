mod all;
mod column_input;
mod footer;
mod form;
mod log;
mod message;
mod toast;

use super::Frame;

pub use all::all as render;
