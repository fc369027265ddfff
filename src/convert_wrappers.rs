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
use crate::convert::convert;
use crate::images::{PixelBuffer, PixelBufferMut, PlaneSet, PlaneSetMut};
use crate::packed_rgb::argb_to_rgb565_dither as dither_plane;
use crate::pixel_format::PixelFormat;
use crate::planar::copy_plane;
use crate::yuv_error::{check_plane, MismatchedSize, YuvError};
use crate::yuv_support::ColorMatrix;

/// Source frame from raw planes, a negative `height` flips it vertically.
fn source<'a>(
    format: PixelFormat,
    planes: &[(&'a [u8], i32)],
    width: u32,
    height: i32,
) -> Result<PlaneSet<'a>, YuvError> {
    let frame = PlaneSet::from_planes(format, planes, width, height.unsigned_abs())?;
    Ok(if height < 0 { frame.flipped() } else { frame })
}

macro_rules! convert_fn {
    (
        $(#[$meta:meta])*
        $name:ident,
        $from:ident [$($src:ident: $src_stride:ident),+] -> $to:ident [$($dst:ident: $dst_stride:ident),+],
        $matrix:expr
    ) => {
        $(#[$meta])*
        #[allow(clippy::too_many_arguments)]
        pub fn $name(
            $($src: &[u8], $src_stride: i32,)+
            $($dst: &mut [u8], $dst_stride: i32,)+
            width: u32,
            height: i32,
        ) -> Result<(), YuvError> {
            let src = source(PixelFormat::$from, &[$(($src, $src_stride)),+], width, height)?;
            let mut dst = PlaneSetMut::from_planes(
                PixelFormat::$to,
                vec![$(($dst, $dst_stride)),+],
                width,
                height.unsigned_abs(),
            )?;
            convert(&src, &mut dst, $matrix)
        }
    };
}

// Packed RGB.
convert_fn!(argb_copy, Argb[src_argb: src_stride_argb] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(rgb24_to_argb, Rgb24[src_rgb24: src_stride_rgb24] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(raw_to_argb, Raw[src_raw: src_stride_raw] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(abgr_to_argb, Abgr[src_abgr: src_stride_abgr] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(bgra_to_argb, Bgra[src_bgra: src_stride_bgra] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(rgba_to_argb, Rgba[src_rgba: src_stride_rgba] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(
    /// Channels expand by bit replication, `0x1f` becomes `0xff`.
    rgb565_to_argb, Rgb565[src_rgb565: src_stride_rgb565] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601
);
convert_fn!(argb1555_to_argb, Argb1555[src_argb1555: src_stride_argb1555] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(argb4444_to_argb, Argb4444[src_argb4444: src_stride_argb4444] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(ar30_to_argb, Ar30[src_ar30: src_stride_ar30] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(argb_to_rgb24, Argb[src_argb: src_stride_argb] -> Rgb24[dst_rgb24: dst_stride_rgb24], ColorMatrix::BT601);
convert_fn!(argb_to_raw, Argb[src_argb: src_stride_argb] -> Raw[dst_raw: dst_stride_raw], ColorMatrix::BT601);
convert_fn!(argb_to_abgr, Argb[src_argb: src_stride_argb] -> Abgr[dst_abgr: dst_stride_abgr], ColorMatrix::BT601);
convert_fn!(argb_to_bgra, Argb[src_argb: src_stride_argb] -> Bgra[dst_bgra: dst_stride_bgra], ColorMatrix::BT601);
convert_fn!(argb_to_rgba, Argb[src_argb: src_stride_argb] -> Rgba[dst_rgba: dst_stride_rgba], ColorMatrix::BT601);
convert_fn!(argb_to_rgb565, Argb[src_argb: src_stride_argb] -> Rgb565[dst_rgb565: dst_stride_rgb565], ColorMatrix::BT601);
convert_fn!(argb_to_argb1555, Argb[src_argb: src_stride_argb] -> Argb1555[dst_argb1555: dst_stride_argb1555], ColorMatrix::BT601);
convert_fn!(argb_to_argb4444, Argb[src_argb: src_stride_argb] -> Argb4444[dst_argb4444: dst_stride_argb4444], ColorMatrix::BT601);
convert_fn!(argb_to_ar30, Argb[src_argb: src_stride_argb] -> Ar30[dst_ar30: dst_stride_ar30], ColorMatrix::BT601);
convert_fn!(raw_to_rgb24, Raw[src_raw: src_stride_raw] -> Rgb24[dst_rgb24: dst_stride_rgb24], ColorMatrix::BT601);

// YUV to RGB.
convert_fn!(
    /// Limited range BT.601.
    i420_to_argb,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT601
);
convert_fn!(
    /// Full range BT.601.
    j420_to_argb,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::JPEG
);
convert_fn!(
    /// Limited range BT.709.
    h420_to_argb,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT709
);
convert_fn!(
    /// Limited range BT.2020.
    u420_to_argb,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT2020
);
convert_fn!(
    i420_to_abgr,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Abgr[dst_abgr: dst_stride_abgr],
    ColorMatrix::BT601
);
convert_fn!(
    i422_to_argb,
    I422[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT601
);
convert_fn!(
    i444_to_argb,
    I444[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT601
);
convert_fn!(
    j444_to_argb,
    I444[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::JPEG
);
convert_fn!(i400_to_argb, I400[src_y: src_stride_y] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(j400_to_argb, I400[src_y: src_stride_y] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::JPEG);
convert_fn!(
    nv12_to_argb,
    Nv12[src_y: src_stride_y, src_uv: src_stride_uv] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT601
);
convert_fn!(
    nv21_to_argb,
    Nv21[src_y: src_stride_y, src_vu: src_stride_vu] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT601
);
convert_fn!(
    nv12_to_rgb24,
    Nv12[src_y: src_stride_y, src_uv: src_stride_uv] -> Rgb24[dst_rgb24: dst_stride_rgb24],
    ColorMatrix::BT601
);
convert_fn!(yuy2_to_argb, Yuy2[src_yuy2: src_stride_yuy2] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(uyvy_to_argb, Uyvy[src_uyvy: src_stride_uyvy] -> Argb[dst_argb: dst_stride_argb], ColorMatrix::BT601);
convert_fn!(
    /// Strides are in bytes, samples are little-endian `u16` in the low 10 bits.
    i010_to_argb,
    I010[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT601
);
convert_fn!(
    h010_to_argb,
    I010[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT709
);
convert_fn!(
    i010_to_ar30,
    I010[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Ar30[dst_ar30: dst_stride_ar30],
    ColorMatrix::BT601
);
convert_fn!(
    /// Strides are in bytes, samples are little-endian `u16` in the high 10 bits.
    p010_to_argb,
    P010[src_y: src_stride_y, src_uv: src_stride_uv] -> Argb[dst_argb: dst_stride_argb],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_rgb24,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Rgb24[dst_rgb24: dst_stride_rgb24],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_raw,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Raw[dst_raw: dst_stride_raw],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_rgb565,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Rgb565[dst_rgb565: dst_stride_rgb565],
    ColorMatrix::BT601
);

// RGB to YUV.
convert_fn!(
    argb_to_i420,
    Argb[src_argb: src_stride_argb] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    argb_to_j420,
    Argb[src_argb: src_stride_argb] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::JPEG
);
convert_fn!(
    abgr_to_i420,
    Abgr[src_abgr: src_stride_abgr] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    rgb24_to_i420,
    Rgb24[src_rgb24: src_stride_rgb24] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    rgb24_to_j420,
    Rgb24[src_rgb24: src_stride_rgb24] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::JPEG
);
convert_fn!(
    raw_to_i420,
    Raw[src_raw: src_stride_raw] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    argb_to_i422,
    Argb[src_argb: src_stride_argb] -> I422[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    argb_to_i444,
    Argb[src_argb: src_stride_argb] -> I444[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(argb_to_i400, Argb[src_argb: src_stride_argb] -> I400[dst_y: dst_stride_y], ColorMatrix::BT601);
convert_fn!(argb_to_j400, Argb[src_argb: src_stride_argb] -> I400[dst_y: dst_stride_y], ColorMatrix::JPEG);
convert_fn!(
    argb_to_nv12,
    Argb[src_argb: src_stride_argb] -> Nv12[dst_y: dst_stride_y, dst_uv: dst_stride_uv],
    ColorMatrix::BT601
);
convert_fn!(
    argb_to_nv21,
    Argb[src_argb: src_stride_argb] -> Nv21[dst_y: dst_stride_y, dst_vu: dst_stride_vu],
    ColorMatrix::BT601
);
convert_fn!(argb_to_yuy2, Argb[src_argb: src_stride_argb] -> Yuy2[dst_yuy2: dst_stride_yuy2], ColorMatrix::BT601);
convert_fn!(argb_to_uyvy, Argb[src_argb: src_stride_argb] -> Uyvy[dst_uyvy: dst_stride_uyvy], ColorMatrix::BT601);

// YUV to YUV.
convert_fn!(
    i420_copy,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    i422_to_i420,
    I422[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    i444_to_i420,
    I444[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_i422,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> I422[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_i444,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> I444[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    /// Chroma planes are filled with 128.
    i400_to_i420,
    I400[src_y: src_stride_y] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_i400,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> I400[dst_y: dst_stride_y],
    ColorMatrix::BT601
);
convert_fn!(
    nv12_to_i420,
    Nv12[src_y: src_stride_y, src_uv: src_stride_uv]
        -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    nv21_to_i420,
    Nv21[src_y: src_stride_y, src_vu: src_stride_vu]
        -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_nv12,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> Nv12[dst_y: dst_stride_y, dst_uv: dst_stride_uv],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_nv21,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> Nv21[dst_y: dst_stride_y, dst_vu: dst_stride_vu],
    ColorMatrix::BT601
);
convert_fn!(
    yuy2_to_i420,
    Yuy2[src_yuy2: src_stride_yuy2] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    uyvy_to_i420,
    Uyvy[src_uyvy: src_stride_uyvy] -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_yuy2,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Yuy2[dst_yuy2: dst_stride_yuy2],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_uyvy,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v] -> Uyvy[dst_uyvy: dst_stride_uyvy],
    ColorMatrix::BT601
);
convert_fn!(
    /// Samples are truncated to their 8 high bits.
    i010_to_i420,
    I010[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> I420[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);
convert_fn!(
    i420_to_i010,
    I420[src_y: src_stride_y, src_u: src_stride_u, src_v: src_stride_v]
        -> I010[dst_y: dst_stride_y, dst_u: dst_stride_u, dst_v: dst_stride_v],
    ColorMatrix::BT601
);

/// ARGB to RGB565 with a 4x4 ordered dither added before truncation.
///
/// `dither4x4` holds one value per position of the 4x4 tile, row major,
/// [crate::DITHER_4X4] is used when it is `None`.
pub fn argb_to_rgb565_dither(
    src_argb: &[u8],
    src_stride_argb: i32,
    dst_rgb565: &mut [u8],
    dst_stride_rgb565: i32,
    dither4x4: Option<&[u8; 16]>,
    width: u32,
    height: i32,
) -> Result<(), YuvError> {
    let rows = height.unsigned_abs();
    let src = PixelBuffer::new(src_argb, src_stride_argb, width, rows);
    let src = if height < 0 { src.flipped() } else { src };
    let mut dst = PixelBufferMut::new(dst_rgb565, dst_stride_rgb565, width, rows);
    dither_plane(&src, &mut dst, dither4x4)
}

/// Copies chroma stored with an arbitrary distance between samples.
fn gather_chroma(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>, pixel_stride: usize) {
    let width = dst.width as usize;
    let row_len = src.width as usize;
    dst.for_each_row(width, |y, dst| {
        let row = src.row(y, row_len);
        for (x, dst) in dst.iter_mut().enumerate() {
            *dst = row[x * pixel_stride];
        }
    });
}

#[allow(clippy::too_many_arguments)]
fn android420_into(
    src_y: &[u8],
    src_stride_y: i32,
    src_u: &[u8],
    src_stride_u: i32,
    src_v: &[u8],
    src_stride_v: i32,
    src_pixel_stride_uv: i32,
    dst: &mut PlaneSetMut,
    flip: bool,
) -> Result<(), YuvError> {
    if dst.width == 0 || dst.height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    if src_pixel_stride_uv < 1 {
        return Err(YuvError::MinimumStrideSizeMismatch(
            1,
            MismatchedSize {
                expected: 1,
                received: src_pixel_stride_uv.max(0) as usize,
            },
        ));
    }
    dst.check_constraints()?;
    let pixel_stride = src_pixel_stride_uv as usize;
    let (chroma_width, chroma_height) = (dst.planes[1].width, dst.planes[1].height);
    // Last sample of a row sits `(chroma_width - 1) * pixel_stride` bytes in.
    let row_len = (chroma_width - 1) as usize * pixel_stride + 1;

    let y_plane = PixelBuffer::new(src_y, src_stride_y, dst.width, dst.height);
    y_plane.check_constraints(1)?;
    let chroma = [(src_u, src_stride_u), (src_v, src_stride_v)];
    for (index, &(data, stride)) in chroma.iter().enumerate() {
        check_plane(data, stride, row_len as u32, chroma_height, 1, index + 1)?;
    }

    let y_plane = if flip { y_plane.flipped() } else { y_plane };
    copy_plane(&y_plane, &mut dst.planes[0])?;
    for (&(data, stride), dst) in chroma.iter().zip(dst.planes[1..].iter_mut()) {
        let src = PixelBuffer::new(data, stride, row_len as u32, chroma_height);
        let src = if flip { src.flipped() } else { src };
        gather_chroma(&src, dst, pixel_stride);
    }
    Ok(())
}

/// Camera frames with chroma in separate or interleaved planes.
///
/// `src_pixel_stride_uv` is the distance in bytes between two chroma samples of a
/// row: 1 for I420 layouts, 2 when U and V share an interleaved buffer (NV12 or NV21).
#[allow(clippy::too_many_arguments)]
pub fn android420_to_i420(
    src_y: &[u8],
    src_stride_y: i32,
    src_u: &[u8],
    src_stride_u: i32,
    src_v: &[u8],
    src_stride_v: i32,
    src_pixel_stride_uv: i32,
    dst_y: &mut [u8],
    dst_stride_y: i32,
    dst_u: &mut [u8],
    dst_stride_u: i32,
    dst_v: &mut [u8],
    dst_stride_v: i32,
    width: u32,
    height: i32,
) -> Result<(), YuvError> {
    let mut dst = PlaneSetMut::planar(
        PixelFormat::I420,
        dst_y,
        dst_stride_y,
        dst_u,
        dst_stride_u,
        dst_v,
        dst_stride_v,
        width,
        height.unsigned_abs(),
    );
    android420_into(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        src_pixel_stride_uv,
        &mut dst,
        height < 0,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn android420_to_argb(
    src_y: &[u8],
    src_stride_y: i32,
    src_u: &[u8],
    src_stride_u: i32,
    src_v: &[u8],
    src_stride_v: i32,
    src_pixel_stride_uv: i32,
    dst_argb: &mut [u8],
    dst_stride_argb: i32,
    width: u32,
    height: i32,
) -> Result<(), YuvError> {
    let rows = height.unsigned_abs();
    let mut dst = PlaneSetMut::packed(PixelFormat::Argb, dst_argb, dst_stride_argb, width, rows);
    if width == 0 || rows == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    dst.check_constraints()?;
    let mut i420 = PlaneSetMut::alloc(PixelFormat::I420, width, rows);
    android420_into(
        src_y,
        src_stride_y,
        src_u,
        src_stride_u,
        src_v,
        src_stride_v,
        src_pixel_stride_uv,
        &mut i420,
        height < 0,
    )?;
    convert(&i420.to_fixed(), &mut dst, ColorMatrix::BT601)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_named_wrappers_use_their_matrix() {
        let y = [128u8; 4];
        let u = [60u8];
        let v = [200u8];
        let mut bt601 = [0u8; 16];
        let mut jpeg = [0u8; 16];
        i420_to_argb(&y, 2, &u, 1, &v, 1, &mut bt601, 8, 2, 2).unwrap();
        j420_to_argb(&y, 2, &u, 1, &v, 1, &mut jpeg, 8, 2, 2).unwrap();
        assert_ne!(bt601, jpeg);
        assert!(jpeg.chunks_exact(4).all(|px| px == &jpeg[..4]));
    }

    #[test]
    fn test_negative_height_flips_source() {
        let raw = [1u8, 2, 3, 4, 5, 6];
        let mut argb = [0u8; 8];
        raw_to_argb(&raw, 3, &mut argb, 4, 1, -2).unwrap();
        assert_eq!(argb, [6, 5, 4, 255, 3, 2, 1, 255]);
        let mut rgb24 = [0u8; 6];
        raw_to_rgb24(&raw, 3, &mut rgb24, 3, 1, -2).unwrap();
        assert_eq!(rgb24, [6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_i420_nv12_round_trip() {
        let mut rng = StdRng::seed_from_u64(9);
        let (width, height) = (7u32, 5i32);
        let y: Vec<u8> = (0..35).map(|_| rng.random()).collect();
        let u: Vec<u8> = (0..12).map(|_| rng.random()).collect();
        let v: Vec<u8> = (0..12).map(|_| rng.random()).collect();
        let mut nv_y = vec![0u8; 35];
        let mut nv_uv = vec![0u8; 24];
        i420_to_nv12(&y, 7, &u, 4, &v, 4, &mut nv_y, 7, &mut nv_uv, 8, width, height).unwrap();
        let (mut by, mut bu, mut bv) = (vec![0u8; 35], vec![0u8; 12], vec![0u8; 12]);
        nv12_to_i420(&nv_y, 7, &nv_uv, 8, &mut by, 7, &mut bu, 4, &mut bv, 4, width, height)
            .unwrap();
        assert_eq!((y, u, v), (by, bu, bv));
    }

    #[test]
    fn test_android_pixel_strides_agree() {
        let mut rng = StdRng::seed_from_u64(10);
        let y: Vec<u8> = (0..6 * 4).map(|_| rng.random()).collect();
        let uv: Vec<u8> = (0..3 * 2 * 2).map(|_| rng.random()).collect();
        let u: Vec<u8> = uv.iter().step_by(2).copied().collect();
        let v: Vec<u8> = uv.iter().skip(1).step_by(2).copied().collect();

        let mut planar = (vec![0u8; 24], vec![0u8; 6], vec![0u8; 6]);
        android420_to_i420(
            &y, 6, &u, 3, &v, 3, 1, &mut planar.0, 6, &mut planar.1, 3, &mut planar.2, 3, 6, 4,
        )
        .unwrap();
        let mut interleaved = (vec![0u8; 24], vec![0u8; 6], vec![0u8; 6]);
        android420_to_i420(
            &y,
            6,
            &uv,
            6,
            &uv[1..],
            6,
            2,
            &mut interleaved.0,
            6,
            &mut interleaved.1,
            3,
            &mut interleaved.2,
            3,
            6,
            4,
        )
        .unwrap();
        assert_eq!(planar, interleaved);
        assert_eq!(planar.1, u);
        assert_eq!(planar.2, v);

        let mut from_android = vec![0u8; 6 * 4 * 4];
        android420_to_argb(&y, 6, &uv, 6, &uv[1..], 6, 2, &mut from_android, 24, 6, 4).unwrap();
        let mut from_nv12 = vec![0u8; 6 * 4 * 4];
        nv12_to_argb(&y, 6, &uv, 6, &mut from_nv12, 24, 6, 4).unwrap();
        assert_eq!(from_android, from_nv12);
    }

    #[test]
    fn test_android_rejects_short_chroma() {
        let y = [0u8; 16];
        let uv = [0u8; 7];
        let mut dst = (vec![9u8; 16], vec![9u8; 4], vec![9u8; 4]);
        assert!(android420_to_i420(
            &y, 4, &uv, 4, &uv[1..], 4, 2, &mut dst.0, 4, &mut dst.1, 2, &mut dst.2, 2, 4, 4,
        )
        .is_err());
        assert!(dst.0.iter().chain(dst.1.iter()).all(|&v| v == 9));
    }

    #[test]
    fn test_dither_wrapper() {
        let argb = [0xffu8; 8];
        let mut rgb565 = [0u8; 4];
        argb_to_rgb565_dither(&argb, 8, &mut rgb565, 4, None, 2, 1).unwrap();
        assert_eq!(rgb565, [0xff; 4]);
    }
}
