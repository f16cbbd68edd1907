pub mod codec;
pub mod handlers;
