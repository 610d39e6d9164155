use crate::{
    check_size, padded_row_size, BitDepth, Bmp, BmpError, FormatError, BI_BITFIELDS, BI_RGB,
    FILE_HEADER_SIZE, INFO_HEADER_SIZE, SIGNATURE,
};
use log::{debug, trace};
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// The 14 bytes at the start of every bitmap file
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FileHeader {
    /// "BM" for the bitmaps we read, see [`SIGNATURE`](crate::SIGNATURE)
    pub signature: u16,
    /// declared size of the whole file, unused
    pub file_size: u32,
    /// unused
    pub reserved1: u16,
    /// unused
    pub reserved2: u16,
    /// where the pixel data starts, counted from the start of the file
    pub pixel_offset: u32,
}

/// The `BITMAPINFOHEADER` following the file header
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct InfoHeader {
    /// size of this header, 40 or more for the versions we read
    pub header_size: u32,
    /// number of columns
    pub width: i32,
    /// number of rows, positive when stored bottom-up, negative when top-down
    pub height: i32,
    /// always 1, unused
    pub planes: u16,
    /// 24 or 32 for the bitmaps we read
    pub bits_per_pixel: u16,
    /// `BI_RGB` or, for 32 bit, `BI_BITFIELDS`
    pub compression: u32,
    /// size of the pixel data, may be 0, unused
    pub image_size: u32,
    /// unused
    pub x_pixels_per_meter: i32,
    /// unused
    pub y_pixels_per_meter: i32,
    /// palette size, unused
    pub colors_used: u32,
    /// unused
    pub colors_important: u32,
}

impl FileHeader {
    /// Read the file header and check the "BM" signature
    ///
    /// Returns `FormatError::Truncated` if `from` ends before 14 bytes
    pub fn read<T: Read>(from: T) -> Result<Self, BmpError> {
        let mut bytes = [0u8; FILE_HEADER_SIZE as usize];
        read_header_bytes(from, &mut bytes)?;
        let mut from = Cursor::new(&bytes[..]);

        let header = FileHeader {
            signature: ReadLE::read_u16(&mut from)?,
            file_size: ReadLE::read_u32(&mut from)?,
            reserved1: ReadLE::read_u16(&mut from)?,
            reserved2: ReadLE::read_u16(&mut from)?,
            pixel_offset: ReadLE::read_u32(&mut from)?,
        };
        if header.signature != SIGNATURE {
            return Err(FormatError::Signature(header.signature).into());
        }
        Ok(header)
    }
}

impl InfoHeader {
    /// Read the 40 bytes of the info header, fields are not validated here
    pub fn read<T: Read>(from: T) -> Result<Self, BmpError> {
        let mut bytes = [0u8; INFO_HEADER_SIZE as usize];
        read_header_bytes(from, &mut bytes)?;
        let mut from = Cursor::new(&bytes[..]);

        Ok(InfoHeader {
            header_size: ReadLE::read_u32(&mut from)?,
            width: ReadLE::read_i32(&mut from)?,
            height: ReadLE::read_i32(&mut from)?,
            planes: ReadLE::read_u16(&mut from)?,
            bits_per_pixel: ReadLE::read_u16(&mut from)?,
            compression: ReadLE::read_u32(&mut from)?,
            image_size: ReadLE::read_u32(&mut from)?,
            x_pixels_per_meter: ReadLE::read_i32(&mut from)?,
            y_pixels_per_meter: ReadLE::read_i32(&mut from)?,
            colors_used: ReadLE::read_u32(&mut from)?,
            colors_important: ReadLE::read_u32(&mut from)?,
        })
    }

    /// The pixel encoding, `FormatError::BitDepth` unless 24 or 32 bits
    pub fn bit_depth(&self) -> Result<BitDepth, FormatError> {
        BitDepth::from_bits(self.bits_per_pixel)
            .ok_or(FormatError::BitDepth(self.bits_per_pixel))
    }

    /// Rows are stored bottom-up unless the height is negative
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    fn validate(&self) -> Result<BitDepth, FormatError> {
        if self.header_size < INFO_HEADER_SIZE {
            return Err(FormatError::InfoHeaderSize(self.header_size));
        }
        let depth = self.bit_depth()?;
        match (self.compression, depth) {
            (BI_RGB, _) | (BI_BITFIELDS, BitDepth::Bgrx32) => (),
            (c, _) => return Err(FormatError::Compression(c)),
        }
        check_size(self.width as i64, self.height as i64)?;
        Ok(depth)
    }
}

impl Bmp {
    /// Open the bitmap at `path` and decode it, see [`Bmp::read`]
    ///
    /// The file is closed before returning, on success and on error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BmpError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("could not open file {}: {}", path.display(), e),
            )
        })?;
        Bmp::read(BufReader::new(file))
    }

    /// Read a black and white 24 or 32 bit bitmap from a seekable stream, such as a File
    ///
    /// Any pixel other than pure black or pure white aborts the whole read.
    pub fn read<T: Read + Seek>(mut from: T) -> Result<Self, BmpError> {
        let file_header = FileHeader::read(&mut from)?;
        debug!("{:?}", file_header);
        let info_header = InfoHeader::read(&mut from)?;
        debug!("{:?}", info_header);

        let depth = info_header.validate()?;
        let width = info_header.width as usize;
        let height = info_header.height.unsigned_abs() as usize;

        // V4/V5 info headers are longer than the 40 bytes we read
        let headers_end = u64::from(FILE_HEADER_SIZE) + u64::from(info_header.header_size);
        if u64::from(file_header.pixel_offset) < headers_end {
            return Err(FormatError::PixelOffset(file_header.pixel_offset).into());
        }
        let len = from.seek(SeekFrom::End(0))?;
        if u64::from(file_header.pixel_offset) > len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "pixel data offset {} is beyond the end of the file ({} bytes)",
                    file_header.pixel_offset, len
                ),
            )
            .into());
        }
        from.seek(SeekFrom::Start(u64::from(file_header.pixel_offset)))?;

        let row_size = width * depth.bytes();
        let mut row_bytes = vec![0u8; row_size];
        let mut padding = vec![0u8; padded_row_size(width, depth) - row_size];
        let mut rows = Vec::with_capacity(height);
        for i in 0..height {
            // grid row this file row lands on, used in error messages
            let grid_row = if info_header.is_bottom_up() {
                height - 1 - i
            } else {
                i
            };
            trace!("reading row {} of {}", i + 1, height);
            from.read_exact(&mut row_bytes)?;
            let mut row = Vec::with_capacity(width);
            for (col, pixel) in row_bytes.chunks_exact(depth.bytes()).enumerate() {
                match [pixel[0], pixel[1], pixel[2]] {
                    [0, 0, 0] => row.push(false),
                    [255, 255, 255] => row.push(true),
                    bgr => {
                        return Err(FormatError::NonMonochrome {
                            row: grid_row,
                            col,
                            bgr,
                        }
                        .into())
                    }
                }
            }
            if i + 1 < height {
                from.read_exact(&mut padding)?;
            }
            rows.push(row);
        }
        if info_header.is_bottom_up() {
            rows.reverse();
        }

        Ok(Bmp { rows })
    }
}

/// Fill `buffer` with header bytes, a short stream is a format error, not an I/O one
fn read_header_bytes<T: Read>(mut from: T, buffer: &mut [u8]) -> Result<(), BmpError> {
    from.read_exact(buffer).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => FormatError::Truncated.into(),
        _ => BmpError::Io(e),
    })
}

impl<R: Read> ReadLE for R {
    fn read_u32(&mut self) -> Result<u32, BmpError> {
        let mut buffer = [0u8; 4];
        self.read_exact(&mut buffer)?;
        Ok(u32::from_le_bytes(buffer))
    }

    fn read_i32(&mut self) -> Result<i32, BmpError> {
        let mut buffer = [0u8; 4];
        self.read_exact(&mut buffer)?;
        Ok(i32::from_le_bytes(buffer))
    }

    fn read_u16(&mut self) -> Result<u16, BmpError> {
        let mut buffer = [0u8; 2];
        self.read_exact(&mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }
}

trait ReadLE {
    /// Read a 32-bit uint
    fn read_u32(&mut self) -> Result<u32, BmpError>;
    /// Read a 32-bit int
    fn read_i32(&mut self) -> Result<i32, BmpError>;
    /// Read a 16-bit uint
    fn read_u16(&mut self) -> Result<u16, BmpError>;
}
