// Two drawing back ends over the same outline and layout table:
// a structured preview tree and a paginated PDF.

pub mod canvas;
pub mod pdf;
pub mod preview;
