/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::yuv_error::YuvError;
use crate::yuv_support::ColorMatrix;
use std::fmt::{Display, Formatter};

/// Four ASCII characters packed little-endian into a word, `FourCC::from_bytes(*b"I420")`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const fn from_bytes(bytes: [u8; 4]) -> FourCC {
        FourCC(u32::from_le_bytes(bytes))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Resolves alias codes to the code of the format that stores them.
    pub const fn canonical(self) -> FourCC {
        let resolved: &[u8; 4] = match &self.to_bytes() {
            b"IYUV" | b"YU12" | b"J420" | b"H420" | b"U420" => b"I420",
            b"YU16" | b"J422" | b"H422" => b"I422",
            b"YU24" | b"J444" | b"H444" | b"U444" => b"I444",
            b"J400" => b"I400",
            b"H010" | b"U010" => b"I010",
            b"YUYV" | b"yuvs" | b"YUVS" => b"YUY2",
            b"2vuy" | b"2VUY" => b"UYVY",
            b"RGB3" | b"CM24" => b"raw ",
            b"BGR3" => b"24BG",
            b"CM32" => b"BGRA",
            b"L555" | b"5551" => b"RGBO",
            b"L565" => b"RGBP",
            _ => return self,
        };
        FourCC::from_bytes(*resolved)
    }

    /// Color matrix an alias code carries in its name, `J420` being full range BT.601.
    pub const fn implied_matrix(self) -> Option<ColorMatrix> {
        match &self.to_bytes() {
            b"J420" | b"J422" | b"J444" | b"J400" => Some(ColorMatrix::JPEG),
            b"H420" | b"H422" | b"H444" | b"H010" => Some(ColorMatrix::BT709),
            b"U420" | b"U444" | b"U010" => Some(ColorMatrix::BT2020),
            _ => None,
        }
    }
}

impl Display for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.to_bytes() {
            if byte.is_ascii_graphic() || byte == b' ' {
                f.write_fmt(format_args!("{}", byte as char))?;
            } else {
                f.write_fmt(format_args!("\\x{:02x}", byte))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormatFamily {
    /// Separate Y, U and V planes.
    PlanarYuv,
    /// Y plane with an interleaved chroma plane.
    SemiPlanarYuv,
    /// Luma and chroma interleaved in macro pixels.
    PackedYuv,
    /// Luma only.
    Gray,
    PackedRgb,
}

/// Geometry of one plane relative to the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlaneLayout {
    /// Horizontal subsampling, image pixels per plane pixel.
    pub h_sub: u32,
    /// Vertical subsampling, image rows per plane row.
    pub v_sub: u32,
    /// Bytes of one plane pixel.
    pub bytes_per_pixel: u32,
}

impl PlaneLayout {
    const fn new(h_sub: u32, v_sub: u32, bytes_per_pixel: u32) -> PlaneLayout {
        PlaneLayout {
            h_sub,
            v_sub,
            bytes_per_pixel,
        }
    }

    /// Plane dimensions for an image, odd edges rounding up.
    #[inline]
    pub const fn dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        (
            width.div_ceil(self.h_sub),
            height.div_ceil(self.v_sub),
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub fourcc: FourCC,
    pub family: FormatFamily,
    pub planes: &'static [PlaneLayout],
    pub bit_depth: u32,
    pub packed: bool,
    pub has_alpha: bool,
}

/// Supported pixel layouts. Packed RGB names follow the little-endian word order,
/// so `Argb` lies in memory as B, G, R, A and `Raw` as R, G, B.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PixelFormat {
    I420 = 0,
    Yv12 = 1,
    I422 = 2,
    I444 = 3,
    I400 = 4,
    I010 = 5,
    Nv12 = 6,
    Nv21 = 7,
    P010 = 8,
    Yuy2 = 9,
    Uyvy = 10,
    Argb = 11,
    Abgr = 12,
    Bgra = 13,
    Rgba = 14,
    Ar30 = 15,
    Ab30 = 16,
    Rgb24 = 17,
    Raw = 18,
    Rgb565 = 19,
    Argb1555 = 20,
    Argb4444 = 21,
}

const LUMA8: PlaneLayout = PlaneLayout::new(1, 1, 1);
const CHROMA420: PlaneLayout = PlaneLayout::new(2, 2, 1);

static PLANES_420: [PlaneLayout; 3] = [LUMA8, CHROMA420, CHROMA420];
static PLANES_422: [PlaneLayout; 3] = [LUMA8, PlaneLayout::new(2, 1, 1), PlaneLayout::new(2, 1, 1)];
static PLANES_444: [PlaneLayout; 3] = [LUMA8, LUMA8, LUMA8];
static PLANES_400: [PlaneLayout; 1] = [LUMA8];
static PLANES_010: [PlaneLayout; 3] = [
    PlaneLayout::new(1, 1, 2),
    PlaneLayout::new(2, 2, 2),
    PlaneLayout::new(2, 2, 2),
];
static PLANES_NV: [PlaneLayout; 2] = [LUMA8, PlaneLayout::new(2, 2, 2)];
static PLANES_P010: [PlaneLayout; 2] = [PlaneLayout::new(1, 1, 2), PlaneLayout::new(2, 2, 4)];
static PLANES_YUY2: [PlaneLayout; 1] = [PlaneLayout::new(2, 1, 4)];
static PLANES_32: [PlaneLayout; 1] = [PlaneLayout::new(1, 1, 4)];
static PLANES_24: [PlaneLayout; 1] = [PlaneLayout::new(1, 1, 3)];
static PLANES_16: [PlaneLayout; 1] = [PlaneLayout::new(1, 1, 2)];

macro_rules! descriptor {
    ($code:literal, $family:ident, $planes:ident, $depth:literal, $packed:literal, $alpha:literal) => {
        FormatDescriptor {
            fourcc: FourCC::from_bytes(*$code),
            family: FormatFamily::$family,
            planes: &$planes,
            bit_depth: $depth,
            packed: $packed,
            has_alpha: $alpha,
        }
    };
}

static DESCRIPTORS: [FormatDescriptor; 22] = [
    descriptor!(b"I420", PlanarYuv, PLANES_420, 8, false, false),
    descriptor!(b"YV12", PlanarYuv, PLANES_420, 8, false, false),
    descriptor!(b"I422", PlanarYuv, PLANES_422, 8, false, false),
    descriptor!(b"I444", PlanarYuv, PLANES_444, 8, false, false),
    descriptor!(b"I400", Gray, PLANES_400, 8, false, false),
    descriptor!(b"I010", PlanarYuv, PLANES_010, 10, false, false),
    descriptor!(b"NV12", SemiPlanarYuv, PLANES_NV, 8, false, false),
    descriptor!(b"NV21", SemiPlanarYuv, PLANES_NV, 8, false, false),
    descriptor!(b"P010", SemiPlanarYuv, PLANES_P010, 10, false, false),
    descriptor!(b"YUY2", PackedYuv, PLANES_YUY2, 8, true, false),
    descriptor!(b"UYVY", PackedYuv, PLANES_YUY2, 8, true, false),
    descriptor!(b"ARGB", PackedRgb, PLANES_32, 8, true, true),
    descriptor!(b"ABGR", PackedRgb, PLANES_32, 8, true, true),
    descriptor!(b"BGRA", PackedRgb, PLANES_32, 8, true, true),
    descriptor!(b"RGBA", PackedRgb, PLANES_32, 8, true, true),
    descriptor!(b"AR30", PackedRgb, PLANES_32, 10, true, true),
    descriptor!(b"AB30", PackedRgb, PLANES_32, 10, true, true),
    descriptor!(b"24BG", PackedRgb, PLANES_24, 8, true, false),
    descriptor!(b"raw ", PackedRgb, PLANES_24, 8, true, false),
    descriptor!(b"RGBP", PackedRgb, PLANES_16, 8, true, false),
    descriptor!(b"RGBO", PackedRgb, PLANES_16, 8, true, true),
    descriptor!(b"R444", PackedRgb, PLANES_16, 8, true, true),
];

impl PixelFormat {
    pub const ALL: [PixelFormat; 22] = [
        PixelFormat::I420,
        PixelFormat::Yv12,
        PixelFormat::I422,
        PixelFormat::I444,
        PixelFormat::I400,
        PixelFormat::I010,
        PixelFormat::Nv12,
        PixelFormat::Nv21,
        PixelFormat::P010,
        PixelFormat::Yuy2,
        PixelFormat::Uyvy,
        PixelFormat::Argb,
        PixelFormat::Abgr,
        PixelFormat::Bgra,
        PixelFormat::Rgba,
        PixelFormat::Ar30,
        PixelFormat::Ab30,
        PixelFormat::Rgb24,
        PixelFormat::Raw,
        PixelFormat::Rgb565,
        PixelFormat::Argb1555,
        PixelFormat::Argb4444,
    ];

    #[inline]
    pub fn descriptor(self) -> &'static FormatDescriptor {
        &DESCRIPTORS[self as usize]
    }

    #[inline]
    pub fn fourcc(self) -> FourCC {
        self.descriptor().fourcc
    }

    /// Looks up a format by code, aliases included.
    pub fn from_fourcc(fourcc: FourCC) -> Result<PixelFormat, YuvError> {
        let canonical = fourcc.canonical();
        PixelFormat::ALL
            .iter()
            .copied()
            .find(|format| format.fourcc() == canonical)
            .ok_or(YuvError::UnknownFourcc(fourcc))
    }

    #[inline]
    pub fn planes(self) -> &'static [PlaneLayout] {
        self.descriptor().planes
    }

    #[inline]
    pub fn plane_count(self) -> usize {
        self.descriptor().planes.len()
    }

    #[inline]
    pub fn family(self) -> FormatFamily {
        self.descriptor().family
    }

    #[inline]
    pub fn bit_depth(self) -> u32 {
        self.descriptor().bit_depth
    }

    #[inline]
    pub fn has_alpha(self) -> bool {
        self.descriptor().has_alpha
    }

    #[inline]
    pub fn is_yuv(self) -> bool {
        self.family() != FormatFamily::PackedRgb
    }

    /// True when every sample is one byte.
    #[inline]
    pub fn is_8bit(self) -> bool {
        !matches!(
            self,
            PixelFormat::I010 | PixelFormat::P010 | PixelFormat::Ar30 | PixelFormat::Ab30
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc_packing() {
        let fourcc = FourCC::from_bytes(*b"I420");
        assert_eq!(fourcc.0, 0x3032_3449);
        assert_eq!(fourcc.to_string(), "I420");
        assert_eq!(PixelFormat::from_fourcc(fourcc), Ok(PixelFormat::I420));
    }

    #[test]
    fn test_aliases_resolve() {
        let cases: [(&[u8; 4], PixelFormat); 8] = [
            (b"IYUV", PixelFormat::I420),
            (b"J420", PixelFormat::I420),
            (b"YU24", PixelFormat::I444),
            (b"YUYV", PixelFormat::Yuy2),
            (b"RGB3", PixelFormat::Raw),
            (b"BGR3", PixelFormat::Rgb24),
            (b"L565", PixelFormat::Rgb565),
            (b"H010", PixelFormat::I010),
        ];
        for (code, format) in cases {
            assert_eq!(PixelFormat::from_fourcc(FourCC::from_bytes(*code)), Ok(format));
        }
        assert_eq!(
            FourCC::from_bytes(*b"J420").implied_matrix(),
            Some(ColorMatrix::JPEG)
        );
        assert_eq!(FourCC::from_bytes(*b"I420").implied_matrix(), None);
    }

    #[test]
    fn test_unknown_fourcc() {
        let code = FourCC::from_bytes(*b"ZZZZ");
        assert_eq!(PixelFormat::from_fourcc(code), Err(YuvError::UnknownFourcc(code)));
    }

    #[test]
    fn test_descriptor_table_is_ordered() {
        for format in PixelFormat::ALL {
            assert_eq!(PixelFormat::from_fourcc(format.fourcc()), Ok(format));
            assert!(!format.planes().is_empty());
        }
    }

    #[test]
    fn test_odd_chroma_dimensions() {
        let chroma = PixelFormat::I420.planes()[1];
        assert_eq!(chroma.dimensions(5, 3), (3, 2));
        let yuy2 = PixelFormat::Yuy2.planes()[0];
        assert_eq!(yuy2.dimensions(5, 3), (3, 3));
    }
}
