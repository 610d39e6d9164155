use crate::Bmp;
use std::fmt;
use std::io::{self, Write};

/// The two characters drawn for each pixel
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Glyphs {
    /// drawn for white pixels
    pub white: &'static str,
    /// drawn for black pixels
    pub black: &'static str,
}

impl Glyphs {
    /// Full blocks for white, spaces for black
    pub const BLOCK: Glyphs = Glyphs {
        white: "██",
        black: "  ",
    };

    /// `##` for white, for terminals without block characters
    pub const ASCII: Glyphs = Glyphs {
        white: "##",
        black: "  ",
    };

    fn get(self, pixel: bool) -> &'static str {
        if pixel {
            self.white
        } else {
            self.black
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs::BLOCK
    }
}

impl Bmp {
    /// Draw the image on `to`, one line per row top to bottom
    pub fn render<T: Write>(&self, glyphs: Glyphs, mut to: T) -> io::Result<()> {
        for row in self.rows() {
            for &pixel in row {
                to.write_all(glyphs.get(pixel).as_bytes())?;
            }
            to.write_all(b"\n")?;
        }
        to.flush()
    }
}

impl fmt::Display for Bmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &pixel in row {
                f.write_str(Glyphs::BLOCK.get(pixel))?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
