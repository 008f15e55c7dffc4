//! Reading and writing `variableStep` wiggle tracks.
//!
//! Wiggle positions are 1-based; everything handed to or returned from this
//! module uses 0-based positions, converted at the text boundary. Only the
//! `variableStep` mode is supported.
//!
//! ```text
//! variableStep chrom=chr1 span=1
//! 101	3
//! 102	0.25
//! ```

mod reader;
mod writer;

pub use reader::{WiggleEntry, WiggleReader, MAX_POSITION};
pub use writer::{render_series, Precision, WiggleWriter};
