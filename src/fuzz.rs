//! fuzzing!

use crate::{check_size, BitDepth, Bmp};
use arbitrary::Arbitrary;
use image::{GenericImageView, ImageFormat, Rgba};
use std::io::Cursor;

impl arbitrary::Arbitrary for Bmp {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let width = u8::arbitrary(u)? as usize;
        let height = u8::arbitrary(u)? as usize;
        check_size(width as i64, height as i64).map_err(|_| arbitrary::Error::IncorrectFormat)?;
        let mut rows = Vec::with_capacity(height);
        for _ in 0..height {
            let mut row = Vec::with_capacity(width);
            for _ in 0..width {
                row.push(bool::arbitrary(u)?);
            }
            rows.push(row);
        }
        Bmp::new(rows).map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

/// A Bmp and the depth to write it with, used for round trip fuzz tests
#[derive(Debug, Arbitrary)]
pub struct BmpAndDepth {
    /// the Bmp
    pub bmp: Bmp,
    /// write it as 32 bit instead of 24 bit
    pub is_32: bool,
}

impl BmpAndDepth {
    /// the depth to write the bmp with
    pub fn depth(&self) -> BitDepth {
        if self.is_32 {
            BitDepth::Bgrx32
        } else {
            BitDepth::Bgr24
        }
    }

    /// write then read back, panics if the result differs
    pub fn round_trip(&self) {
        let mut cursor = Cursor::new(vec![]);
        self.bmp.write(self.depth(), &mut cursor).unwrap();
        cursor.set_position(0);
        let bmp_read = Bmp::read(cursor).unwrap();
        assert_eq!(self.bmp, bmp_read);
    }
}

impl Bmp {
    /// check that the image crate loads the same pixels from what we write
    pub fn check(&self, depth: BitDepth) {
        let mut cursor = Cursor::new(vec![]);
        self.write(depth, &mut cursor).unwrap();
        let image =
            image::load_from_memory_with_format(&cursor.into_inner(), ImageFormat::Bmp).unwrap();
        let (width, height) = image.dimensions();
        assert_eq!(width as usize, self.width());
        assert_eq!(height as usize, self.height());
        for x in 0..width {
            for y in 0..height {
                let expected = self.get(y as usize, x as usize);
                match image.get_pixel(x, y) {
                    Rgba([255, 255, 255, _]) => assert!(expected),
                    Rgba([0, 0, 0, _]) => assert!(!expected),
                    other => panic!("unexpected pixel {:?}", other),
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::fuzz::BmpAndDepth;
    use crate::{BitDepth, Bmp};
    use arbitrary::Arbitrary;

    #[test]
    fn test_bmp_check() {
        let bmp = Bmp::open("test_bmp/smiley_32.bmp").unwrap();
        bmp.check(BitDepth::Bgr24);
        bmp.check(BitDepth::Bgrx32);
        Bmp::open("test_bmp/checker_2x2_24.bmp")
            .unwrap()
            .check(BitDepth::Bgr24);
    }

    #[test]
    fn test_fuzz() {
        let data = base64::decode("AwIBAAAAAQEAAQ==").unwrap();
        let unstructured = arbitrary::Unstructured::new(&data[..]);
        let data = BmpAndDepth::arbitrary_take_rest(unstructured).unwrap();
        dbg!(&data);
        data.round_trip();
        data.bmp.check(data.depth());
    }
}
