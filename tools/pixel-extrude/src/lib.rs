//! Pixel art to printable voxel reliefs.
//!
//! Decodes an image, extrudes every opaque pixel into a colored voxel on a
//! base plate, writes the result as STL or multi-color 3MF, and reports
//! what was produced.
//!
//! # Example
//!
//! ```no_run
//! use pixel_extrude::{convert, ConversionReport, ConvertOptions};
//! use mesh::voxel::ExtrusionParams;
//!
//! let options = ConvertOptions::new(ExtrusionParams::keychain()).with_verify(true);
//! let result = convert("sprite.png".as_ref(), "sprite.3mf".as_ref(), &options);
//!
//! let report = ConversionReport::from_result(&result);
//! println!("{}", report.to_json_pretty().unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod convert;
mod error;
mod report;

pub use convert::{convert, convert_raster, ConvertOptions};
pub use error::{ConvertError, ConvertResult};
pub use report::{round2, ConversionReport, ConversionStats};
