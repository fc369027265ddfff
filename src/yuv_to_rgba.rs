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
use crate::images::{PlaneSet, PlaneSetMut};
use crate::numerics::{qrshr_n, read_u16_le};
use crate::pixel_format::PixelFormat;
use crate::yuv_error::YuvError;
use crate::yuv_support::{
    ColorMatrix, InverseCoefficients, RgbLayout, YuvChromaSubsampling, YuvNVOrder, PRECISION,
};

#[inline(always)]
pub(crate) fn decode_pixel(c: &InverseCoefficients, y: i32, u: i32, v: i32) -> (i32, i32, i32) {
    let t = &c.transform;
    let y = (y - c.bias_y) * t.y_coef;
    let u = u - c.bias_uv;
    let v = v - c.bias_uv;
    let r = qrshr_n::<PRECISION>(y + t.cr_coef * v, c.max_value);
    let b = qrshr_n::<PRECISION>(y + t.cb_coef * u, c.max_value);
    let g = qrshr_n::<PRECISION>(y - t.g_coeff_1 * v - t.g_coeff_2 * u, c.max_value);
    (r, g, b)
}

#[inline(always)]
pub(crate) fn store_rgb<const DST: u8>(dst: &mut [u8], r: i32, g: i32, b: i32) {
    let dst_channels: RgbLayout = DST.into();
    dst[dst_channels.get_r_channel_offset()] = r as u8;
    dst[dst_channels.get_g_channel_offset()] = g as u8;
    dst[dst_channels.get_b_channel_offset()] = b as u8;
    if dst_channels.has_alpha() {
        dst[dst_channels.get_a_channel_offset()] = 255;
    }
}

#[inline(always)]
fn pack_ar30(dst: &mut [u8], r: i32, g: i32, b: i32) {
    let v = (3u32 << 30) | ((r as u32) << 20) | ((g as u32) << 10) | b as u32;
    dst.copy_from_slice(&v.to_le_bytes());
}

#[inline(always)]
fn yuv_planar_row<const DST: u8, const SAMPLING: u8>(
    coeffs: &InverseCoefficients,
    y_plane: &[u8],
    u_plane: &[u8],
    v_plane: &[u8],
    rgba: &mut [u8],
    width: usize,
) {
    let dst_channels: RgbLayout = DST.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    let shift = if sampling == YuvChromaSubsampling::Yuv444 {
        0
    } else {
        1
    };
    for (x, (dst, &y)) in rgba
        .chunks_exact_mut(dst_channels.get_channels_count())
        .zip(y_plane.iter())
        .take(width)
        .enumerate()
    {
        let cx = x >> shift;
        let (r, g, b) = decode_pixel(coeffs, y as i32, u_plane[cx] as i32, v_plane[cx] as i32);
        store_rgb::<DST>(dst, r, g, b);
    }
}

dispatch_row_kernel!(
    make_planar_row, yuv_planar_row_sse, yuv_planar_row_avx, yuv_planar_row,
    <const DST: u8, const SAMPLING: u8>,
    (coeffs: &InverseCoefficients, y_plane: &[u8], u_plane: &[u8], v_plane: &[u8], rgba: &mut [u8], width: usize)
);

#[inline(always)]
fn yuv_nv_row<const DST: u8, const ORDER: u8>(
    coeffs: &InverseCoefficients,
    y_plane: &[u8],
    uv_plane: &[u8],
    rgba: &mut [u8],
    width: usize,
) {
    let dst_channels: RgbLayout = DST.into();
    let order: YuvNVOrder = ORDER.into();
    for (x, (dst, &y)) in rgba
        .chunks_exact_mut(dst_channels.get_channels_count())
        .zip(y_plane.iter())
        .take(width)
        .enumerate()
    {
        let uv = &uv_plane[(x >> 1) * 2..(x >> 1) * 2 + 2];
        let (r, g, b) = decode_pixel(
            coeffs,
            y as i32,
            uv[order.get_u_position()] as i32,
            uv[order.get_v_position()] as i32,
        );
        store_rgb::<DST>(dst, r, g, b);
    }
}

dispatch_row_kernel!(
    make_nv_row, yuv_nv_row_sse, yuv_nv_row_avx, yuv_nv_row,
    <const DST: u8, const ORDER: u8>,
    (coeffs: &InverseCoefficients, y_plane: &[u8], uv_plane: &[u8], rgba: &mut [u8], width: usize)
);

/// Returns U then V, whatever order the format stores them in.
#[inline]
pub(crate) fn chroma_planes<'a, 'b>(
    src: &'b PlaneSet<'a>,
) -> (&'b crate::images::PixelBuffer<'a, u8>, &'b crate::images::PixelBuffer<'a, u8>) {
    if src.format == PixelFormat::Yv12 {
        (&src.planes[2], &src.planes[1])
    } else {
        (&src.planes[1], &src.planes[2])
    }
}

/// Route edge from 8 bit I420, YV12, I422 or I444 to a packed RGB layout.
pub(crate) fn planar_to_rgb_frame<const DST: u8, const SAMPLING: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let dst_channels: RgbLayout = DST.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    let coeffs = matrix.inverse_coefficients(8, 255)?;
    let y_plane = &src.planes[0];
    let (u_plane, v_plane) = chroma_planes(src);
    let width = src.width as usize;
    let chroma_width = u_plane.width as usize;
    let executor = make_planar_row::<DST, SAMPLING>();

    dst.planes[0].for_each_row(width * dst_channels.get_channels_count(), |y, rgba| {
        let cy = if sampling == YuvChromaSubsampling::Yuv420 {
            y >> 1
        } else {
            y
        };
        unsafe {
            executor(
                &coeffs,
                y_plane.row(y, width),
                u_plane.row(cy, chroma_width),
                v_plane.row(cy, chroma_width),
                rgba,
                width,
            );
        }
    });
    Ok(())
}

/// Route edge from NV12 or NV21 to a packed RGB layout.
pub(crate) fn nv_to_rgb_frame<const DST: u8, const ORDER: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let dst_channels: RgbLayout = DST.into();
    let coeffs = matrix.inverse_coefficients(8, 255)?;
    let y_plane = &src.planes[0];
    let uv_plane = &src.planes[1];
    let width = src.width as usize;
    let uv_len = uv_plane.width as usize * 2;
    let executor = make_nv_row::<DST, ORDER>();

    dst.planes[0].for_each_row(width * dst_channels.get_channels_count(), |y, rgba| unsafe {
        executor(
            &coeffs,
            y_plane.row(y, width),
            uv_plane.row(y >> 1, uv_len),
            rgba,
            width,
        );
    });
    Ok(())
}

/// Route edge from I400 to a packed RGB layout, chroma is neutral.
pub(crate) fn gray_to_rgb_frame<const DST: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let dst_channels: RgbLayout = DST.into();
    let coeffs = matrix.inverse_coefficients(8, 255)?;
    let y_plane = &src.planes[0];
    let width = src.width as usize;
    let channels = dst_channels.get_channels_count();

    dst.planes[0].for_each_row(width * channels, |y, rgba| {
        for (dst, &luma) in rgba.chunks_exact_mut(channels).zip(y_plane.row(y, width)) {
            let (r, g, b) = decode_pixel(&coeffs, luma as i32, coeffs.bias_uv, coeffs.bias_uv);
            store_rgb::<DST>(dst, r, g, b);
        }
    });
    Ok(())
}

/// Route edge from 10 bit I010 to an 8 bit packed RGB layout.
pub(crate) fn i010_to_rgb_frame<const DST: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let dst_channels: RgbLayout = DST.into();
    let coeffs = matrix.inverse_coefficients(10, 255)?;
    let y_plane = &src.planes[0];
    let (u_plane, v_plane) = (&src.planes[1], &src.planes[2]);
    let width = src.width as usize;
    let chroma_width = u_plane.width as usize;
    let channels = dst_channels.get_channels_count();

    dst.planes[0].for_each_row(width * channels, |y, rgba| {
        let y_row = y_plane.row(y, width * 2);
        let u_row = u_plane.row(y >> 1, chroma_width * 2);
        let v_row = v_plane.row(y >> 1, chroma_width * 2);
        for (x, dst) in rgba.chunks_exact_mut(channels).enumerate() {
            let (r, g, b) = decode_pixel(
                &coeffs,
                read_u16_le(y_row, x) as i32,
                read_u16_le(u_row, x >> 1) as i32,
                read_u16_le(v_row, x >> 1) as i32,
            );
            store_rgb::<DST>(dst, r, g, b);
        }
    });
    Ok(())
}

/// Route edge from I010 to AR30 keeping all 10 bits.
pub(crate) fn i010_to_ar30_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let coeffs = matrix.inverse_coefficients(10, 1023)?;
    let y_plane = &src.planes[0];
    let (u_plane, v_plane) = (&src.planes[1], &src.planes[2]);
    let width = src.width as usize;
    let chroma_width = u_plane.width as usize;

    dst.planes[0].for_each_row(width * 4, |y, ar30| {
        let y_row = y_plane.row(y, width * 2);
        let u_row = u_plane.row(y >> 1, chroma_width * 2);
        let v_row = v_plane.row(y >> 1, chroma_width * 2);
        for (x, dst) in ar30.chunks_exact_mut(4).enumerate() {
            let (r, g, b) = decode_pixel(
                &coeffs,
                read_u16_le(y_row, x) as i32,
                read_u16_le(u_row, x >> 1) as i32,
                read_u16_le(v_row, x >> 1) as i32,
            );
            pack_ar30(dst, r, g, b);
        }
    });
    Ok(())
}

/// Route edge from P010, samples held in the 10 most significant bits.
pub(crate) fn p010_to_rgb_frame<const DST: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let dst_channels: RgbLayout = DST.into();
    let coeffs = matrix.inverse_coefficients(10, 255)?;
    let y_plane = &src.planes[0];
    let uv_plane = &src.planes[1];
    let width = src.width as usize;
    let uv_len = uv_plane.width as usize * 4;
    let channels = dst_channels.get_channels_count();

    dst.planes[0].for_each_row(width * channels, |y, rgba| {
        let y_row = y_plane.row(y, width * 2);
        let uv_row = uv_plane.row(y >> 1, uv_len);
        for (x, dst) in rgba.chunks_exact_mut(channels).enumerate() {
            let cx = x >> 1;
            let (r, g, b) = decode_pixel(
                &coeffs,
                (read_u16_le(y_row, x) >> 6) as i32,
                (read_u16_le(uv_row, cx * 2) >> 6) as i32,
                (read_u16_le(uv_row, cx * 2 + 1) >> 6) as i32,
            );
            store_rgb::<DST>(dst, r, g, b);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARGB: u8 = RgbLayout::Argb as u8;
    const YUV420: u8 = YuvChromaSubsampling::Yuv420 as u8;

    #[test]
    fn test_neutral_planes_decode_to_gray() {
        let (width, height) = (5u32, 3u32);
        let y = vec![126u8; 15];
        let u = vec![128u8; 6];
        let v = vec![128u8; 6];
        let src = PlaneSet::planar(PixelFormat::I420, &y, 5, &u, 3, &v, 3, width, height);
        let mut dst = PlaneSetMut::alloc(PixelFormat::Argb, width, height);
        planar_to_rgb_frame::<ARGB, YUV420>(&src, &mut dst, ColorMatrix::JPEG).unwrap();
        for px in dst.planes[0].data.borrow().chunks_exact(4) {
            assert_eq!(px, &[126, 126, 126, 255]);
        }
    }

    #[test]
    fn test_limited_range_extremes() {
        let y = [16u8, 235];
        let uv = [128u8, 128];
        let src = PlaneSet::bi_planar(PixelFormat::Nv12, &y, 2, &uv, 2, 2, 1);
        let mut dst = PlaneSetMut::alloc(PixelFormat::Argb, 2, 1);
        nv_to_rgb_frame::<ARGB, { YuvNVOrder::UV as u8 }>(&src, &mut dst, ColorMatrix::BT601)
            .unwrap();
        assert_eq!(dst.planes[0].data.borrow(), &[0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn test_i010_ar30_white() {
        let y: Vec<u8> = [940u16, 64].iter().flat_map(|v| v.to_le_bytes()).collect();
        let u = 512u16.to_le_bytes();
        let v = 512u16.to_le_bytes();
        let src = PlaneSet::planar(PixelFormat::I010, &y, 4, &u, 2, &v, 2, 2, 1);
        let mut dst = PlaneSetMut::alloc(PixelFormat::Ar30, 2, 1);
        i010_to_ar30_frame(&src, &mut dst, ColorMatrix::BT709).unwrap();
        let data = dst.planes[0].data.borrow();
        let white = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let black = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        assert_eq!(white, 0xffff_ffff);
        assert_eq!(black, 0xc000_0000);
    }

    #[test]
    fn test_p010_matches_i010() {
        let width = 4u32;
        let samples: [u16; 4] = [100, 400, 700, 900];
        let y_i010: Vec<u8> = samples.iter().flat_map(|v| v.to_le_bytes()).collect();
        let y_p010: Vec<u8> = samples.iter().flat_map(|v| (v << 6).to_le_bytes()).collect();
        let u: Vec<u8> = [300u16, 600].iter().flat_map(|v| v.to_le_bytes()).collect();
        let v: Vec<u8> = [700u16, 200].iter().flat_map(|v| v.to_le_bytes()).collect();
        let uv: Vec<u8> = [300u16 << 6, 700 << 6, 600 << 6, 200 << 6]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let i010 = PlaneSet::planar(PixelFormat::I010, &y_i010, 8, &u, 4, &v, 4, width, 1);
        let p010 = PlaneSet::bi_planar(PixelFormat::P010, &y_p010, 8, &uv, 8, width, 1);
        let mut a = PlaneSetMut::alloc(PixelFormat::Argb, width, 1);
        let mut b = PlaneSetMut::alloc(PixelFormat::Argb, width, 1);
        i010_to_rgb_frame::<ARGB>(&i010, &mut a, ColorMatrix::BT2020).unwrap();
        p010_to_rgb_frame::<ARGB>(&p010, &mut b, ColorMatrix::BT2020).unwrap();
        assert_eq!(a.planes[0].data.borrow(), b.planes[0].data.borrow());
    }
}
