// Document structure: heading detection, cleanup and the shared display outline.
// Pure text transforms: no I/O, never fails on any input.

pub mod cleanup;
pub mod handlers;
pub mod outline;
pub mod sections;
