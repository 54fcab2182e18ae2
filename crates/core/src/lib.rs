//! The content pipeline behind the legenda read-it-later service.
//!
//! Fetching, readability extraction, PDF rendering, reading-time
//! estimation, extractive summarization, and display pagination, with no
//! knowledge of how articles are stored or served.

pub mod dom;
pub mod error;
pub mod fetch;
pub mod id;
pub mod paginate;
pub mod pdf;
pub mod readability;
pub mod readtime;
pub mod summarize;

pub use dom::{Document, Element};
pub use error::{LegendaError, Result};
pub use fetch::{FetchConfig, body_text, fetch_bytes, fetch_url};
pub use id::generate_id;
pub use paginate::{Page, paginate};
pub use pdf::render_pdf_to_html;
pub use readability::{ExtractConfig, Readable, extract_readable, extract_readable_with_config};
pub use readtime::{ReadingTime, estimate_reading_time};
pub use summarize::summarize;
