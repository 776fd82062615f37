// Host-supplied input types
mod bar;

pub use bar::{Bar, ChannelValue};
