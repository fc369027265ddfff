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
use crate::numerics::avg4;
use crate::pixel_format::PixelFormat;
use crate::yuv_error::{MismatchedSize, YuvError};
use crate::yuv_support::{
    ColorMatrix, ForwardCoefficients, RgbLayout, YuvChromaSubsampling, YuvNVOrder, PRECISION,
};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::slice::ParallelSliceMut;

#[inline(always)]
pub(crate) fn encode_y(c: &ForwardCoefficients, r: i32, g: i32, b: i32) -> u8 {
    let t = &c.transform;
    ((t.yr * r + t.yg * g + t.yb * b + c.bias_y) >> PRECISION).clamp(0, 255) as u8
}

#[inline(always)]
pub(crate) fn encode_uv(c: &ForwardCoefficients, r: i32, g: i32, b: i32) -> (u8, u8) {
    let t = &c.transform;
    let u = (t.cb_r * r + t.cb_g * g + t.cb_b * b + c.bias_uv) >> PRECISION;
    let v = (t.cr_r * r + t.cr_g * g + t.cr_b * b + c.bias_uv) >> PRECISION;
    (u.clamp(0, 255) as u8, v.clamp(0, 255) as u8)
}

#[inline(always)]
fn rgb_to_y_row<const SRC: u8>(
    coeffs: &ForwardCoefficients,
    rgba: &[u8],
    y_plane: &mut [u8],
    width: usize,
) {
    let src_channels: RgbLayout = SRC.into();
    for (y, src) in y_plane
        .iter_mut()
        .zip(rgba.chunks_exact(src_channels.get_channels_count()))
        .take(width)
    {
        *y = encode_y(
            coeffs,
            src[src_channels.get_r_channel_offset()] as i32,
            src[src_channels.get_g_channel_offset()] as i32,
            src[src_channels.get_b_channel_offset()] as i32,
        );
    }
}

dispatch_row_kernel!(
    make_y_row, rgb_to_y_row_sse, rgb_to_y_row_avx, rgb_to_y_row,
    <const SRC: u8>,
    (coeffs: &ForwardCoefficients, rgba: &[u8], y_plane: &mut [u8], width: usize)
);

/// Rounded mean RGB of the block feeding chroma sample `cx`.
///
/// Columns and rows past the edge repeat the last one, so an edge sample averages
/// only the pixels that exist.
#[inline(always)]
fn block_rgb<const SRC: u8>(
    row0: &[u8],
    row1: &[u8],
    cx: usize,
    shift: usize,
    width: usize,
) -> (i32, i32, i32) {
    let src_channels: RgbLayout = SRC.into();
    let cn = src_channels.get_channels_count();
    let x0 = cx << shift;
    let x1 = (x0 + shift).min(width - 1);
    let px = |row: &[u8], x: usize, offset: usize| row[x * cn + offset] as u16;
    let mean = |offset: usize| {
        avg4(
            px(row0, x0, offset),
            px(row0, x1, offset),
            px(row1, x0, offset),
            px(row1, x1, offset),
        ) as i32
    };
    (
        mean(src_channels.get_r_channel_offset()),
        mean(src_channels.get_g_channel_offset()),
        mean(src_channels.get_b_channel_offset()),
    )
}

#[inline(always)]
fn rgb_to_uv_row<const SRC: u8, const SAMPLING: u8>(
    coeffs: &ForwardCoefficients,
    row0: &[u8],
    row1: &[u8],
    u_plane: &mut [u8],
    v_plane: &mut [u8],
    width: usize,
) {
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    let shift = if sampling == YuvChromaSubsampling::Yuv444 {
        0
    } else {
        1
    };
    for (cx, (u, v)) in u_plane.iter_mut().zip(v_plane.iter_mut()).enumerate() {
        let (r, g, b) = block_rgb::<SRC>(row0, row1, cx, shift, width);
        (*u, *v) = encode_uv(coeffs, r, g, b);
    }
}

dispatch_row_kernel!(
    make_uv_row, rgb_to_uv_row_sse, rgb_to_uv_row_avx, rgb_to_uv_row,
    <const SRC: u8, const SAMPLING: u8>,
    (coeffs: &ForwardCoefficients, row0: &[u8], row1: &[u8], u_plane: &mut [u8], v_plane: &mut [u8], width: usize)
);

/// Route edge from a packed RGB layout to I420, YV12, I422 or I444.
pub(crate) fn rgb_to_planar_frame<const SRC: u8, const SAMPLING: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let src_channels: RgbLayout = SRC.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    let coeffs = matrix.forward_coefficients()?;
    let format = dst.format;
    let plane_count = dst.planes.len();
    let [y_plane, p1, p2] = &mut dst.planes[..] else {
        return Err(YuvError::PlaneCountMismatch(MismatchedSize {
            expected: 3,
            received: plane_count,
        }));
    };
    let (u_plane, v_plane) = if format == PixelFormat::Yv12 {
        (p2, p1)
    } else {
        (p1, p2)
    };

    let rgba = &src.planes[0];
    let width = src.width as usize;
    let height = src.height as usize;
    let row_len = width * src_channels.get_channels_count();
    let chroma_width = u_plane.width as usize;
    let rows_per_chroma = if sampling == YuvChromaSubsampling::Yuv420 {
        2
    } else {
        1
    };

    let y_executor = make_y_row::<SRC>();
    let uv_executor = make_uv_row::<SRC, SAMPLING>();

    let mut y_rows = y_plane.rows_mut(width);
    let mut u_rows = u_plane.rows_mut(chroma_width);
    let mut v_rows = v_plane.rows_mut(chroma_width);

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = y_rows
            .par_chunks_mut(rows_per_chroma)
            .zip(u_rows.par_iter_mut())
            .zip(v_rows.par_iter_mut())
            .enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = y_rows
            .chunks_mut(rows_per_chroma)
            .zip(u_rows.iter_mut())
            .zip(v_rows.iter_mut())
            .enumerate();
    }
    iter.for_each(|(cy, ((y_dst, u_dst), v_dst))| {
        let y0 = cy * rows_per_chroma;
        for (i, y_row) in y_dst.iter_mut().enumerate() {
            unsafe {
                y_executor(&coeffs, rgba.row(y0 + i, row_len), y_row, width);
            }
        }
        let y1 = (y0 + rows_per_chroma - 1).min(height - 1);
        unsafe {
            uv_executor(
                &coeffs,
                rgba.row(y0, row_len),
                rgba.row(y1, row_len),
                u_dst,
                v_dst,
                width,
            );
        }
    });
    Ok(())
}

/// Route edge from a packed RGB layout to luma only.
pub(crate) fn rgb_to_gray_frame<const SRC: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let src_channels: RgbLayout = SRC.into();
    let coeffs = matrix.forward_coefficients()?;
    let rgba = &src.planes[0];
    let width = src.width as usize;
    let row_len = width * src_channels.get_channels_count();
    let executor = make_y_row::<SRC>();
    dst.planes[0].for_each_row(width, |y, y_row| unsafe {
        executor(&coeffs, rgba.row(y, row_len), y_row, width);
    });
    Ok(())
}

/// Route edge from a packed RGB layout to NV12 or NV21.
pub(crate) fn rgb_to_nv_frame<const SRC: u8, const ORDER: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let src_channels: RgbLayout = SRC.into();
    let order: YuvNVOrder = ORDER.into();
    let coeffs = matrix.forward_coefficients()?;
    let plane_count = dst.planes.len();
    let [y_plane, uv_plane] = &mut dst.planes[..] else {
        return Err(YuvError::PlaneCountMismatch(MismatchedSize {
            expected: 2,
            received: plane_count,
        }));
    };
    let rgba = &src.planes[0];
    let width = src.width as usize;
    let height = src.height as usize;
    let row_len = width * src_channels.get_channels_count();
    let chroma_width = uv_plane.width as usize;
    let y_executor = make_y_row::<SRC>();

    let mut y_rows = y_plane.rows_mut(width);
    let mut uv_rows = uv_plane.rows_mut(chroma_width * 2);

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = y_rows
            .par_chunks_mut(2)
            .zip(uv_rows.par_iter_mut())
            .enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = y_rows.chunks_mut(2).zip(uv_rows.iter_mut()).enumerate();
    }
    iter.for_each(|(cy, (y_dst, uv_dst))| {
        let y0 = cy * 2;
        for (i, y_row) in y_dst.iter_mut().enumerate() {
            unsafe {
                y_executor(&coeffs, rgba.row(y0 + i, row_len), y_row, width);
            }
        }
        let row0 = rgba.row(y0, row_len);
        let row1 = rgba.row((y0 + 1).min(height - 1), row_len);
        for (cx, uv) in uv_dst.chunks_exact_mut(2).enumerate() {
            let (r, g, b) = block_rgb::<SRC>(row0, row1, cx, 1, width);
            let (u, v) = encode_uv(&coeffs, r, g, b);
            uv[order.get_u_position()] = u;
            uv[order.get_v_position()] = v;
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_to_rgba::planar_to_rgb_frame;
    use rand::{Rng, SeedableRng};

    const ARGB: u8 = RgbLayout::Argb as u8;
    const YUV420: u8 = YuvChromaSubsampling::Yuv420 as u8;

    /// Image whose 2x2 blocks share one color.
    fn blocky_argb(width: u32, height: u32, seed: u64) -> Vec<u8> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let blocks_w = width.div_ceil(2) as usize;
        let blocks_h = height.div_ceil(2) as usize;
        let colors: Vec<[u8; 3]> = (0..blocks_w * blocks_h)
            .map(|_| [rng.random(), rng.random(), rng.random()])
            .collect();
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for y in 0..height as usize {
            for x in 0..width as usize {
                let c = colors[(y / 2) * blocks_w + x / 2];
                let px = &mut data[(y * width as usize + x) * 4..][..4];
                px.copy_from_slice(&[c[0], c[1], c[2], 255]);
            }
        }
        data
    }

    fn round_trip(matrix: ColorMatrix, width: u32, height: u32, max_diff: i32) {
        let argb = blocky_argb(width, height, 7);
        let src = PlaneSet::packed(PixelFormat::Argb, &argb, width as i32 * 4, width, height);
        let mut yuv = PlaneSetMut::alloc(PixelFormat::I420, width, height);
        rgb_to_planar_frame::<ARGB, YUV420>(&src, &mut yuv, matrix).unwrap();
        let mut back = PlaneSetMut::alloc(PixelFormat::Argb, width, height);
        planar_to_rgb_frame::<ARGB, YUV420>(&yuv.to_fixed(), &mut back, matrix).unwrap();
        for (o, r) in argb
            .chunks_exact(4)
            .zip(back.planes[0].data.borrow().chunks_exact(4))
        {
            for c in 0..3 {
                let diff = (o[c] as i32 - r[c] as i32).abs();
                assert!(
                    diff <= max_diff,
                    "Original RGB {:?}, Round-tripped RGB {:?}",
                    o,
                    r
                );
            }
        }
    }

    #[test]
    fn test_full_range_round_trip() {
        round_trip(ColorMatrix::JPEG, 8, 6, 2);
        round_trip(ColorMatrix::BT709_FULL, 5, 3, 2);
    }

    #[test]
    fn test_limited_range_round_trip() {
        round_trip(ColorMatrix::BT601, 16, 16, 3);
        round_trip(ColorMatrix::BT2020, 7, 9, 3);
    }

    #[test]
    fn test_white_is_neutral() {
        let argb = vec![255u8; 4 * 4 * 4];
        let src = PlaneSet::packed(PixelFormat::Argb, &argb, 16, 4, 4);
        let mut yuv = PlaneSetMut::alloc(PixelFormat::I420, 4, 4);
        rgb_to_planar_frame::<ARGB, YUV420>(&src, &mut yuv, ColorMatrix::JPEG).unwrap();
        assert!(yuv.planes[0].data.borrow().iter().all(|&y| y == 255));
        assert!(yuv.planes[1].data.borrow().iter().all(|&u| u == 128));
        assert!(yuv.planes[2].data.borrow().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_odd_edge_chroma_averages_existing_pixels() {
        // 3x1: the last chroma sample sees a single column and a single row
        let argb = [0u8, 0, 0, 255, 0, 0, 0, 255, 200, 100, 50, 255];
        let src = PlaneSet::packed(PixelFormat::Argb, &argb, 12, 3, 1);
        let mut yuv = PlaneSetMut::alloc(PixelFormat::I444, 3, 1);
        rgb_to_planar_frame::<ARGB, { YuvChromaSubsampling::Yuv444 as u8 }>(
            &src,
            &mut yuv,
            ColorMatrix::JPEG,
        )
        .unwrap();
        let mut i420 = PlaneSetMut::alloc(PixelFormat::I420, 3, 1);
        rgb_to_planar_frame::<ARGB, YUV420>(&src, &mut i420, ColorMatrix::JPEG).unwrap();
        assert_eq!(i420.planes[1].width, 2);
        assert_eq!(
            i420.planes[1].data.borrow()[1],
            yuv.planes[1].data.borrow()[2]
        );
        assert_eq!(
            i420.planes[2].data.borrow()[1],
            yuv.planes[2].data.borrow()[2]
        );
    }

    #[test]
    fn test_nv_orders_are_swapped() {
        let argb = blocky_argb(6, 4, 11);
        let src = PlaneSet::packed(PixelFormat::Argb, &argb, 24, 6, 4);
        let mut nv12 = PlaneSetMut::alloc(PixelFormat::Nv12, 6, 4);
        let mut nv21 = PlaneSetMut::alloc(PixelFormat::Nv21, 6, 4);
        let mut i420 = PlaneSetMut::alloc(PixelFormat::I420, 6, 4);
        rgb_to_nv_frame::<ARGB, { YuvNVOrder::UV as u8 }>(&src, &mut nv12, ColorMatrix::BT709)
            .unwrap();
        rgb_to_nv_frame::<ARGB, { YuvNVOrder::VU as u8 }>(&src, &mut nv21, ColorMatrix::BT709)
            .unwrap();
        rgb_to_planar_frame::<ARGB, YUV420>(&src, &mut i420, ColorMatrix::BT709).unwrap();
        let uv = nv12.planes[1].data.borrow();
        let vu = nv21.planes[1].data.borrow();
        let u = i420.planes[1].data.borrow();
        let v = i420.planes[2].data.borrow();
        for i in 0..u.len() {
            assert_eq!(uv[i * 2], u[i]);
            assert_eq!(uv[i * 2 + 1], v[i]);
            assert_eq!(vu[i * 2], v[i]);
            assert_eq!(vu[i * 2 + 1], u[i]);
        }
        assert_eq!(nv12.planes[0].data.borrow(), i420.planes[0].data.borrow());
    }
}
