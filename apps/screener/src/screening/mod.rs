//! Resume screening core: text extraction, field extraction, and scoring.
//!
//! Pure and synchronous apart from `handlers` and `pipeline::screen_pdf`,
//! which move the work onto a blocking thread per upload.

pub mod criteria;
pub mod extractor;
pub mod handlers;
pub mod pipeline;
pub mod profile;
pub mod scoring;
pub mod text;
