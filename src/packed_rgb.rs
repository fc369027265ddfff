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
use crate::cpu_features::dispatch_row_kernel;
use crate::images::{PixelBuffer, PixelBufferMut, PlaneSet, PlaneSetMut};
use crate::numerics::{expand4, expand5, expand6, expand8_to_10};
use crate::yuv_error::YuvError;
use crate::yuv_support::ColorMatrix;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

/// 16 and 32 bit packed layouts, used as const generic parameter.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PackedRgb {
    Rgb565 = 0,
    Argb1555 = 1,
    Argb4444 = 2,
    /// 2 bit alpha, 10 bit red, green, blue with blue in the low bits
    Ar30 = 3,
    /// 2 bit alpha, 10 bit blue, green, red with red in the low bits
    Ab30 = 4,
}

impl From<u8> for PackedRgb {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => PackedRgb::Rgb565,
            1 => PackedRgb::Argb1555,
            2 => PackedRgb::Argb4444,
            3 => PackedRgb::Ar30,
            4 => PackedRgb::Ab30,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl PackedRgb {
    #[inline(always)]
    pub(crate) const fn bytes_per_pixel(&self) -> usize {
        match self {
            PackedRgb::Rgb565 | PackedRgb::Argb1555 | PackedRgb::Argb4444 => 2,
            PackedRgb::Ar30 | PackedRgb::Ab30 => 4,
        }
    }
}

/// Ordered dither used by default for 565 output, values are added before truncation.
pub const DITHER_4X4: [u8; 16] = [0, 4, 1, 5, 6, 2, 7, 3, 1, 5, 0, 4, 7, 3, 6, 2];

#[inline(always)]
fn unpack_row<const PACKED: u8>(src: &[u8], dst: &mut [u8], width: usize) {
    let packed: PackedRgb = PACKED.into();
    let bpp = packed.bytes_per_pixel();
    for (dst, src) in dst
        .chunks_exact_mut(4)
        .zip(src.chunks_exact(bpp))
        .take(width)
    {
        let (r, g, b, a) = match packed {
            PackedRgb::Rgb565 => {
                let v = u16::from_le_bytes([src[0], src[1]]);
                (expand5(v >> 11), expand6(v >> 5), expand5(v), 255)
            }
            PackedRgb::Argb1555 => {
                let v = u16::from_le_bytes([src[0], src[1]]);
                let a = if v & 0x8000 != 0 { 255 } else { 0 };
                (expand5(v >> 10), expand5(v >> 5), expand5(v), a)
            }
            PackedRgb::Argb4444 => {
                let v = u16::from_le_bytes([src[0], src[1]]);
                (expand4(v >> 8), expand4(v >> 4), expand4(v), expand4(v >> 12))
            }
            PackedRgb::Ar30 | PackedRgb::Ab30 => {
                let v = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
                let low = ((v & 0x3ff) >> 2) as u8;
                let g = (((v >> 10) & 0x3ff) >> 2) as u8;
                let high = (((v >> 20) & 0x3ff) >> 2) as u8;
                let a = ((v >> 30) as u8) * 0x55;
                if packed == PackedRgb::Ar30 {
                    (high, g, low, a)
                } else {
                    (low, g, high, a)
                }
            }
        };
        dst[0] = b;
        dst[1] = g;
        dst[2] = r;
        dst[3] = a;
    }
}

dispatch_row_kernel!(
    make_unpack_row, unpack_row_sse, unpack_row_avx, unpack_row,
    <const PACKED: u8>, (src: &[u8], dst: &mut [u8], width: usize)
);

/// Packs ARGB rows, `dither` is the row of the 4x4 matrix for this line.
#[inline(always)]
fn pack_row<const PACKED: u8>(src: &[u8], dst: &mut [u8], width: usize, dither: [u8; 4]) {
    let packed: PackedRgb = PACKED.into();
    let bpp = packed.bytes_per_pixel();
    for (x, (dst, src)) in dst
        .chunks_exact_mut(bpp)
        .zip(src.chunks_exact(4))
        .take(width)
        .enumerate()
    {
        let (b, g, r, a) = (src[0] as u32, src[1] as u32, src[2] as u32, src[3] as u32);
        match packed {
            PackedRgb::Rgb565 => {
                let d = dither[x & 3] as u32;
                let b = (b + d).min(255);
                let g = (g + d).min(255);
                let r = (r + d).min(255);
                let v = ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3);
                dst.copy_from_slice(&(v as u16).to_le_bytes());
            }
            PackedRgb::Argb1555 => {
                let v = ((a >> 7) << 15) | ((r >> 3) << 10) | ((g >> 3) << 5) | (b >> 3);
                dst.copy_from_slice(&(v as u16).to_le_bytes());
            }
            PackedRgb::Argb4444 => {
                let v = ((a >> 4) << 12) | ((r >> 4) << 8) | ((g >> 4) << 4) | (b >> 4);
                dst.copy_from_slice(&(v as u16).to_le_bytes());
            }
            PackedRgb::Ar30 | PackedRgb::Ab30 => {
                let (high, low) = if packed == PackedRgb::Ar30 {
                    (r as u8, b as u8)
                } else {
                    (b as u8, r as u8)
                };
                let v = ((a >> 6) << 30)
                    | (expand8_to_10(high) << 20)
                    | (expand8_to_10(g as u8) << 10)
                    | expand8_to_10(low);
                dst.copy_from_slice(&v.to_le_bytes());
            }
        }
    }
}

dispatch_row_kernel!(
    make_pack_row, pack_row_sse, pack_row_avx, pack_row,
    <const PACKED: u8>, (src: &[u8], dst: &mut [u8], width: usize, dither: [u8; 4])
);

fn unpack_plane<const PACKED: u8>(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) {
    let packed: PackedRgb = PACKED.into();
    let width = src.width as usize;
    let src_row_len = width * packed.bytes_per_pixel();
    let executor = make_unpack_row::<PACKED>();
    let mut rows = dst.rows_mut(width * 4);
    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rows.par_iter_mut().enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rows.iter_mut().enumerate();
    }
    iter.for_each(|(y, dst)| unsafe {
        executor(src.row(y, src_row_len), dst, width);
    });
}

fn pack_plane<const PACKED: u8>(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    dither: Option<&[u8; 16]>,
) {
    let packed: PackedRgb = PACKED.into();
    let width = src.width as usize;
    let executor = make_pack_row::<PACKED>();
    let mut rows = dst.rows_mut(width * packed.bytes_per_pixel());
    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rows.par_iter_mut().enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rows.iter_mut().enumerate();
    }
    iter.for_each(|(y, dst)| {
        let mut line = [0u8; 4];
        if let Some(dither) = dither {
            line.copy_from_slice(&dither[(y & 3) * 4..(y & 3) * 4 + 4]);
        }
        unsafe {
            executor(src.row(y, width * 4), dst, width, line);
        }
    });
}

/// Route edge from a 16 or 32 bit packed layout to ARGB.
pub(crate) fn unpack_frame<const PACKED: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    unpack_plane::<PACKED>(&src.planes[0], &mut dst.planes[0]);
    Ok(())
}

/// Route edge from ARGB to a 16 or 32 bit packed layout, 565 output is truncated.
pub(crate) fn pack_frame<const PACKED: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    pack_plane::<PACKED>(&src.planes[0], &mut dst.planes[0], None);
    Ok(())
}

/// Swaps red and blue of 10 bit packed pixels.
pub(crate) fn ar30_swap_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    let source = &src.planes[0];
    let width = source.width as usize;
    let mut rows = dst.planes[0].rows_mut(width * 4);
    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rows.par_iter_mut().enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rows.iter_mut().enumerate();
    }
    iter.for_each(|(y, dst)| {
        for (dst, src) in dst
            .chunks_exact_mut(4)
            .zip(source.row(y, width * 4).chunks_exact(4))
        {
            let v = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
            let swapped = (v & 0xc00f_fc00) | ((v & 0x3ff) << 20) | ((v >> 20) & 0x3ff);
            dst.copy_from_slice(&swapped.to_le_bytes());
        }
    });
    Ok(())
}

/// Converts ARGB to RGB565 adding a 4x4 ordered dither before truncation,
/// [`DITHER_4X4`] when `dither4x4` is `None`.
pub(crate) fn argb_to_rgb565_dither(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    dither4x4: Option<&[u8; 16]>,
) -> Result<(), YuvError> {
    src.check_constraints(4)?;
    dst.check_constraints(2)?;
    if src.width != dst.width || src.height != dst.height {
        return Err(YuvError::ImagesSizesNotMatch);
    }
    pack_plane::<{ PackedRgb::Rgb565 as u8 }>(src, dst, Some(dither4x4.unwrap_or(&DITHER_4X4)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;

    fn unpack_one<const PACKED: u8>(format: PixelFormat, bytes: &[u8]) -> [u8; 4] {
        let src = PlaneSet::packed(format, bytes, bytes.len() as i32, 1, 1);
        let mut dst = PlaneSetMut::alloc(PixelFormat::Argb, 1, 1);
        unpack_frame::<PACKED>(&src, &mut dst, ColorMatrix::BT601).unwrap();
        let mut out = [0u8; 4];
        out.copy_from_slice(dst.planes[0].data.borrow());
        out
    }

    #[test]
    fn test_rgb565_expansion() {
        let white = 0xffffu16.to_le_bytes();
        assert_eq!(
            unpack_one::<{ PackedRgb::Rgb565 as u8 }>(PixelFormat::Rgb565, &white),
            [255, 255, 255, 255]
        );
        let red = 0xf800u16.to_le_bytes();
        assert_eq!(
            unpack_one::<{ PackedRgb::Rgb565 as u8 }>(PixelFormat::Rgb565, &red),
            [0, 0, 255, 255]
        );
    }

    #[test]
    fn test_argb1555_alpha_bit() {
        let transparent_blue = 0x001fu16.to_le_bytes();
        assert_eq!(
            unpack_one::<{ PackedRgb::Argb1555 as u8 }>(PixelFormat::Argb1555, &transparent_blue),
            [255, 0, 0, 0]
        );
    }

    #[test]
    fn test_ar30_channels() {
        let v: u32 = (3 << 30) | (1023 << 20) | (512 << 10);
        let argb = unpack_one::<{ PackedRgb::Ar30 as u8 }>(PixelFormat::Ar30, &v.to_le_bytes());
        assert_eq!(argb, [0, 128, 255, 255]);
        let abgr = unpack_one::<{ PackedRgb::Ab30 as u8 }>(PixelFormat::Ab30, &v.to_le_bytes());
        assert_eq!(abgr, [255, 128, 0, 255]);
    }

    #[test]
    fn test_pack_unpack_keeps_high_bits() {
        let argb: Vec<u8> = vec![0x12, 0x34, 0x56, 0xff, 0xf0, 0x0f, 0x80, 0x00];
        let src = PlaneSet::packed(PixelFormat::Argb, &argb, 8, 2, 1);
        let mut packed = PlaneSetMut::alloc(PixelFormat::Argb4444, 2, 1);
        pack_frame::<{ PackedRgb::Argb4444 as u8 }>(&src, &mut packed, ColorMatrix::BT601)
            .unwrap();
        let mut back = PlaneSetMut::alloc(PixelFormat::Argb, 2, 1);
        unpack_frame::<{ PackedRgb::Argb4444 as u8 }>(
            &packed.to_fixed(),
            &mut back,
            ColorMatrix::BT601,
        )
        .unwrap();
        for (a, b) in argb.iter().zip(back.planes[0].data.borrow()) {
            assert_eq!(a >> 4, b >> 4);
        }
    }

    #[test]
    fn test_ar30_swap() {
        let v: u32 = (2 << 30) | (100 << 20) | (200 << 10) | 300;
        let src_bytes = v.to_le_bytes();
        let src = PlaneSet::packed(PixelFormat::Ar30, &src_bytes, 4, 1, 1);
        let mut dst = PlaneSetMut::alloc(PixelFormat::Ab30, 1, 1);
        ar30_swap_frame(&src, &mut dst, ColorMatrix::BT601).unwrap();
        let out = u32::from_le_bytes(dst.planes[0].data.borrow().try_into().unwrap());
        assert_eq!(out, (2 << 30) | (300 << 20) | (200 << 10) | 100);
    }

    #[test]
    fn test_dither_saturates() {
        let argb = vec![255u8; 4 * 4 * 4];
        let src = PixelBuffer::new(&argb, 16, 4, 4);
        let mut dst = PixelBufferMut::<u8>::alloc(4, 4, 2);
        argb_to_rgb565_dither(&src, &mut dst, None).unwrap();
        assert!(dst.data.borrow().iter().all(|&x| x == 0xff));
    }
}
