//! Decode black and white 24 and 32 bit bitmaps and draw them on a text console.
//!
//! ```no_run
//! use bmp_console::{Bmp, Glyphs};
//!
//! let bmp = Bmp::open("image.bmp")?;
//! bmp.render(Glyphs::BLOCK, std::io::stdout())?;
//! # Ok::<(), bmp_console::BmpError>(())
//! ```
#![deny(missing_docs)]

mod decode;
mod encode;
mod render;

#[cfg(feature = "fuzz")]
pub mod fuzz;

pub use decode::{FileHeader, InfoHeader};
pub use render::Glyphs;

use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::io;

const B: u8 = 66;
const M: u8 = 77;

/// "BM" read as a little endian u16
pub const SIGNATURE: u16 = 0x4D42;

/// Size in bytes of the bitmap file header
pub const FILE_HEADER_SIZE: u32 = 14;

/// Size in bytes of the `BITMAPINFOHEADER`, smaller info headers are rejected
pub const INFO_HEADER_SIZE: u32 = 40;

/// Largest accepted width or height
pub const MAX_DIMENSION: u32 = 16_384;

/// Largest accepted number of pixels
pub const MAX_PIXELS: u32 = 1 << 24;

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

/// A black and white image, `true` pixels are white
///
/// Row 0 is the topmost displayed row, whatever order the rows had in the file.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Bmp {
    rows: Vec<Vec<bool>>,
}

/// Pixel encodings accepted by the decoder
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BitDepth {
    /// 3 bytes per pixel: blue, green, red
    Bgr24,
    /// 4 bytes per pixel: blue, green, red and an ignored byte
    Bgrx32,
}

impl BitDepth {
    /// Map the `bits_per_pixel` header field, `None` for unsupported depths
    pub fn from_bits(bits: u16) -> Option<BitDepth> {
        match bits {
            24 => Some(BitDepth::Bgr24),
            32 => Some(BitDepth::Bgrx32),
            _ => None,
        }
    }

    /// value of the `bits_per_pixel` header field
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Bgr24 => 24,
            BitDepth::Bgrx32 => 32,
        }
    }

    /// bytes used by one pixel in the file
    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }
}

/// Any failure while opening, decoding or drawing a bitmap
#[derive(Debug)]
pub enum BmpError {
    /// The stream could not be opened, seeked, read or written
    Io(io::Error),
    /// The bytes were read but they are not an acceptable bitmap
    Format(FormatError),
}

/// The ways the content of a bitmap can be rejected
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FormatError {
    /// The stream ended inside the file header or the info header
    Truncated,
    /// The first two bytes are not "BM"
    Signature(u16),
    /// The info header is smaller than a `BITMAPINFOHEADER`
    InfoHeaderSize(u32),
    /// `bits_per_pixel` is neither 24 nor 32
    BitDepth(u16),
    /// Compressed or palette based pixel data
    Compression(u32),
    /// Dimensions are zero, negative width or too big
    Size {
        /// declared width
        width: i64,
        /// declared height
        height: i64,
    },
    /// The pixel data would start inside the headers
    PixelOffset(u32),
    /// A pixel is neither pure black nor pure white
    NonMonochrome {
        /// grid row, 0 is the top
        row: usize,
        /// grid column
        col: usize,
        /// blue, green, red as stored in the file
        bgr: [u8; 3],
    },
    /// Rows given to `Bmp::new` have different lengths
    NotRectangular,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Truncated => write!(f, "truncated bitmap header"),
            FormatError::Signature(s) => write!(f, "not a bitmap file (signature 0x{:04X})", s),
            FormatError::InfoHeaderSize(s) => {
                write!(f, "unsupported info header of {} bytes", s)
            }
            FormatError::BitDepth(bits) => write!(
                f,
                "unsupported bit depth {}, only 24 or 32 bit bitmaps are supported",
                bits
            ),
            FormatError::Compression(c) => write!(f, "unsupported compression method {}", c),
            FormatError::Size { width, height } => {
                write!(f, "unsupported dimensions {}x{}", width, height)
            }
            FormatError::PixelOffset(o) => {
                write!(f, "pixel data offset {} is inside the headers", o)
            }
            FormatError::NonMonochrome { row, col, bgr } => write!(
                f,
                "non-monochrome pixel encountered at row {} column {} (rgb {},{},{})",
                row, col, bgr[2], bgr[1], bgr[0]
            ),
            FormatError::NotRectangular => write!(f, "rows have different lengths"),
        }
    }
}

impl Error for FormatError {}

impl fmt::Display for BmpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmpError::Io(e) => write!(f, "{}", e),
            BmpError::Format(e) => write!(f, "{}", e),
        }
    }
}

impl Error for BmpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BmpError::Io(e) => Some(e),
            BmpError::Format(e) => Some(e),
        }
    }
}

impl From<io::Error> for BmpError {
    fn from(e: io::Error) -> Self {
        BmpError::Io(e)
    }
}

impl From<FormatError> for BmpError {
    fn from(e: FormatError) -> Self {
        BmpError::Format(e)
    }
}

impl Bmp {
    /// Creates a new Bmp, `rows` are given top to bottom and must all have the same length
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Bmp, BmpError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return Err(FormatError::NotRectangular.into());
        }
        check_size(width as i64, rows.len() as i64)?;
        Ok(Bmp { rows })
    }

    /// return the number of columns
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// return the number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// return the pixel at `row`, `col`, true is white. Panics if out of bounds
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows[row][col]
    }

    /// rows from top to bottom
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }
}

/// Checks the declared dimensions before anything is allocated for them
///
/// A negative `height` is a top-down bitmap, only its magnitude is limited.
pub fn check_size(width: i64, height: i64) -> Result<(), FormatError> {
    let err = FormatError::Size { width, height };
    let w = u32::try_from(width).map_err(|_| err.clone())?;
    let h = u32::try_from(height.abs()).map_err(|_| err.clone())?;
    if w == 0 || h == 0 || w > MAX_DIMENSION || h > MAX_DIMENSION || w * h > MAX_PIXELS {
        return Err(err);
    }
    Ok(())
}

/// bytes occupied by a row in the file, including the padding to 4 bytes
fn padded_row_size(width: usize, depth: BitDepth) -> usize {
    (width * depth.bytes() + 3) & !3
}
