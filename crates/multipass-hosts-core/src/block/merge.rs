use std::ops::Range;

use super::{END_MARKER, START_MARKER};

/// Byte range of the existing block in `hosts`, from the start of the start
/// marker through the end of the end marker.
///
/// The end marker is the first one that follows a start marker; the start
/// marker is the nearest one before it. Stray end markers ahead of any start
/// and start markers with no end after them are ignored, which keeps
/// [`merge`] idempotent even on a damaged file.
///
/// With two start markers before one end marker, the text from the first
/// start marker up to the second one is kept, and only the last start
/// marker's block is replaced.
pub fn find_block(hosts: &str) -> Option<Range<usize>> {
    let first_start = hosts.find(START_MARKER)?;
    let search_from = first_start + START_MARKER.len();
    let end = search_from + hosts[search_from..].find(END_MARKER)?;
    let start = hosts[..end].rfind(START_MARKER)?;
    Some(start..end + END_MARKER.len())
}

/// Replace the existing block in `hosts` with `block`, or append `block` if
/// there is no well-formed block to replace.
///
/// Everything outside the replaced span is kept byte for byte.
pub fn merge(hosts: &str, block: &str) -> String {
    match find_block(hosts) {
        Some(span) => {
            let mut merged = String::with_capacity(hosts.len() - span.len() + block.len());
            merged.push_str(&hosts[..span.start]);
            merged.push_str(block);
            merged.push_str(&hosts[span.end..]);
            merged
        }
        None => {
            let mut merged = String::with_capacity(hosts.len() + block.len());
            merged.push_str(hosts);
            merged.push_str(block);
            merged
        }
    }
}
