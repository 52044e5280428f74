//! The delimited region of the hosts file owned by multipass-hosts.
//!
//! ```text
//! #multipass-hosts
//! <ipv4> <name>
//! #/multipass-hosts
//! ```
//!
//! [`render`] writes the block and [`merge`] finds it again, so both work
//! from the same marker constants below. Every line ends with `\n`.

pub mod merge;
pub mod render;

pub use merge::{find_block, merge};
pub use render::render;

/// Line terminator used for every line in the block.
pub const LINE_BREAK: &str = "\n";

/// First line of the block, terminator included.
pub const START_MARKER: &str = "#multipass-hosts\n";

/// Last line of the block, terminator included.
pub const END_MARKER: &str = "#/multipass-hosts\n";
