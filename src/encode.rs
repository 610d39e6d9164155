use crate::{
    padded_row_size, BitDepth, Bmp, BmpError, B, BI_RGB, FILE_HEADER_SIZE, INFO_HEADER_SIZE, M,
};
use std::io::Write;

const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0x00];
const BLACK: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

impl Bmp {
    /// Write the image as an uncompressed bottom-up bitmap to a Write type, such a File
    pub fn write<T: Write>(&self, depth: BitDepth, mut to: T) -> Result<(), BmpError> {
        let width = self.width();
        let height = self.height();
        let row_size = padded_row_size(width, depth);
        let padding = vec![0u8; row_size - width * depth.bytes()];
        let data_size = (row_size * height) as u32;
        let header_size = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

        // file header
        to.write_all(&[B, M])?;
        to.write_all(&(header_size + data_size).to_le_bytes())?; // size of the bmp
        to.write_all(&0u16.to_le_bytes())?; // reserved1
        to.write_all(&0u16.to_le_bytes())?; // reserved2
        to.write_all(&header_size.to_le_bytes())?; // pixel offset

        // info header
        to.write_all(&INFO_HEADER_SIZE.to_le_bytes())?;
        to.write_all(&(width as i32).to_le_bytes())?;
        to.write_all(&(height as i32).to_le_bytes())?; // positive, rows are bottom-up
        to.write_all(&1u16.to_le_bytes())?; // planes
        to.write_all(&depth.bits().to_le_bytes())?;
        to.write_all(&BI_RGB.to_le_bytes())?;
        to.write_all(&data_size.to_le_bytes())?; // size of the raw bitmap data with padding
        to.write_all(&2835i32.to_le_bytes())?; // hres, 72 dpi
        to.write_all(&2835i32.to_le_bytes())?; // vres
        to.write_all(&0u32.to_le_bytes())?; // num_colors
        to.write_all(&0u32.to_le_bytes())?; // num_imp_colors

        for row in self.rows().iter().rev() {
            for &pixel in row {
                let color = if pixel { WHITE } else { BLACK };
                to.write_all(&color[..depth.bytes()])?;
            }
            to.write_all(&padding)?;
        }
        to.flush()?;

        Ok(())
    }
}
