// Template registry and the font metrics the PDF back end measures text with.
// Pure data and arithmetic; nothing here touches I/O.

pub mod font_metrics;
pub mod handlers;
pub mod templates;
