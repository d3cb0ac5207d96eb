//! Fixed-layout report composition: word wrap, pagination, table rows,
//! paragraphs and images, rendered to PDF.

pub mod block;
pub use block::*;

mod colour;
pub use colour::*;

mod composer;
pub use composer::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Word wrap, page-break splitting and the flow cursor
pub mod layout;

mod metrics;
pub use metrics::*;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

pub mod report;
pub use report::{Measurement, Report, ReportLabels};

mod style;
pub use style::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
