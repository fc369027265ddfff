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
use crate::images::{PixelBuffer, PixelBufferMut, PlaneSet, PlaneSetMut};
use crate::numerics::{read_u16_le, write_u16_le};
use crate::scale::scale_channels;
use crate::yuv_error::YuvError;
use crate::yuv_support::{ColorMatrix, FilterMode, YuvNVOrder};
use std::fmt::Debug;

#[inline]
fn check_same_size<A: Copy + Debug, B: Copy + Debug>(
    src: &PixelBuffer<A>,
    dst: &PixelBufferMut<B>,
) -> Result<(), YuvError> {
    if src.width != dst.width || src.height != dst.height {
        return Err(YuvError::ImagesSizesNotMatch);
    }
    Ok(())
}

fn copy_plane_impl<T: Copy + Debug + Send + Sync>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBufferMut<T>,
    elements_per_pixel: usize,
) {
    let row_len = src.width as usize * elements_per_pixel;
    dst.for_each_row(row_len, |y, dst| {
        dst.copy_from_slice(src.row(y, row_len));
    });
}

/// Copies a plane, strides of either side may be negative.
pub fn copy_plane(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    src.check_constraints(1)?;
    dst.check_constraints(1)?;
    check_same_size(src, dst)?;
    copy_plane_impl(src, dst, 1);
    Ok(())
}

pub fn copy_plane_16(
    src: &PixelBuffer<u16>,
    dst: &mut PixelBufferMut<u16>,
) -> Result<(), YuvError> {
    src.check_constraints(1)?;
    dst.check_constraints(1)?;
    check_same_size(src, dst)?;
    copy_plane_impl(src, dst, 1);
    Ok(())
}

/// Fills a plane with `value`.
pub fn set_plane(dst: &mut PixelBufferMut<u8>, value: u8) -> Result<(), YuvError> {
    dst.check_constraints(1)?;
    let width = dst.width as usize;
    dst.for_each_row(width, |_, row| row.fill(value));
    Ok(())
}

/// Deinterleaves a UV plane, `src_uv.width` counts chroma pairs.
pub fn split_uv_plane(
    src_uv: &PixelBuffer<u8>,
    dst_u: &mut PixelBufferMut<u8>,
    dst_v: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    src_uv.check_constraints(2)?;
    dst_u.check_constraints(1)?;
    dst_v.check_constraints(1)?;
    check_same_size(src_uv, dst_u)?;
    check_same_size(src_uv, dst_v)?;
    split_channel(src_uv, dst_u, 2, 0);
    split_channel(src_uv, dst_v, 2, 1);
    Ok(())
}

/// Interleaves U and V planes into one UV plane.
pub fn merge_uv_plane(
    src_u: &PixelBuffer<u8>,
    src_v: &PixelBuffer<u8>,
    dst_uv: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    src_u.check_constraints(1)?;
    src_v.check_constraints(1)?;
    dst_uv.check_constraints(2)?;
    check_same_size(src_u, dst_uv)?;
    check_same_size(src_v, dst_uv)?;
    merge_channels(&[src_u, src_v], dst_uv);
    Ok(())
}

/// Swaps the bytes of every chroma pair, NV12 chroma into NV21 chroma.
pub fn swap_uv_plane(
    src_uv: &PixelBuffer<u8>,
    dst_vu: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    src_uv.check_constraints(2)?;
    dst_vu.check_constraints(2)?;
    check_same_size(src_uv, dst_vu)?;
    swap_pairs(src_uv, dst_vu);
    Ok(())
}

/// Splits R, G, B of a RAW ordered plane into three planes.
pub fn split_rgb_plane(
    src_rgb: &PixelBuffer<u8>,
    dst_r: &mut PixelBufferMut<u8>,
    dst_g: &mut PixelBufferMut<u8>,
    dst_b: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    src_rgb.check_constraints(3)?;
    for dst in [&*dst_r, &*dst_g, &*dst_b] {
        dst.check_constraints(1)?;
        check_same_size(src_rgb, dst)?;
    }
    split_channel(src_rgb, dst_r, 3, 0);
    split_channel(src_rgb, dst_g, 3, 1);
    split_channel(src_rgb, dst_b, 3, 2);
    Ok(())
}

/// Interleaves three planes into a RAW ordered plane.
pub fn merge_rgb_plane(
    src_r: &PixelBuffer<u8>,
    src_g: &PixelBuffer<u8>,
    src_b: &PixelBuffer<u8>,
    dst_rgb: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    dst_rgb.check_constraints(3)?;
    for src in [src_r, src_g, src_b] {
        src.check_constraints(1)?;
        check_same_size(src, dst_rgb)?;
    }
    merge_channels(&[src_r, src_g, src_b], dst_rgb);
    Ok(())
}

/// Narrows 16 bit samples: `dst = min(255, (src * scale) >> 16)`.
///
/// `scale` is `1 << (24 - bit_depth)`, 16384 for 10 bit input.
pub fn convert_16_to_8_plane(
    src: &PixelBuffer<u16>,
    dst: &mut PixelBufferMut<u8>,
    scale: i32,
) -> Result<(), YuvError> {
    src.check_constraints(1)?;
    dst.check_constraints(1)?;
    check_same_size(src, dst)?;
    let width = src.width as usize;
    dst.for_each_row(width, |y, dst| {
        for (dst, &src) in dst.iter_mut().zip(src.row(y, width)) {
            *dst = narrow_sample(src, scale);
        }
    });
    Ok(())
}

/// Widens 8 bit samples: `dst = min(65535, (src * 0x0101 * scale) >> 16)`.
///
/// `scale` is `1 << (bit_depth - 8)` shifted by 8, 1024 for 10 bit output.
pub fn convert_8_to_16_plane(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u16>,
    scale: i32,
) -> Result<(), YuvError> {
    src.check_constraints(1)?;
    dst.check_constraints(1)?;
    check_same_size(src, dst)?;
    let width = src.width as usize;
    dst.for_each_row(width, |y, dst| {
        for (dst, &src) in dst.iter_mut().zip(src.row(y, width)) {
            *dst = widen_sample(src, scale);
        }
    });
    Ok(())
}

#[inline(always)]
fn narrow_sample(v: u16, scale: i32) -> u8 {
    ((v as i64 * scale as i64) >> 16).clamp(0, 255) as u8
}

#[inline(always)]
fn widen_sample(v: u8, scale: i32) -> u16 {
    ((v as i64 * 0x0101 * scale as i64) >> 16).clamp(0, 65535) as u16
}

/// Copies the alpha channel of one ARGB image into another.
pub fn argb_copy_alpha(
    src_argb: &PixelBuffer<u8>,
    dst_argb: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    src_argb.check_constraints(4)?;
    dst_argb.check_constraints(4)?;
    check_same_size(src_argb, dst_argb)?;
    let row_len = src_argb.width as usize * 4;
    dst_argb.for_each_row(row_len, |y, dst| {
        for (dst, src) in dst
            .chunks_exact_mut(4)
            .zip(src_argb.row(y, row_len).chunks_exact(4))
        {
            dst[3] = src[3];
        }
    });
    Ok(())
}

/// Writes the alpha channel of an ARGB image as a plane.
pub fn argb_extract_alpha(
    src_argb: &PixelBuffer<u8>,
    dst_a: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    src_argb.check_constraints(4)?;
    dst_a.check_constraints(1)?;
    check_same_size(src_argb, dst_a)?;
    split_channel(src_argb, dst_a, 4, 3);
    Ok(())
}

/// Writes a plane into the alpha channel of an ARGB image.
pub fn argb_copy_y_to_alpha(
    src_y: &PixelBuffer<u8>,
    dst_argb: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    src_y.check_constraints(1)?;
    dst_argb.check_constraints(4)?;
    check_same_size(src_y, dst_argb)?;
    let width = src_y.width as usize;
    dst_argb.for_each_row(width * 4, |y, dst| {
        for (dst, &a) in dst.chunks_exact_mut(4).zip(src_y.row(y, width)) {
            dst[3] = a;
        }
    });
    Ok(())
}

fn split_channel(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    channels: usize,
    channel: usize,
) {
    let width = dst.width as usize;
    dst.for_each_row(width, |y, dst| {
        for (dst, src) in dst
            .iter_mut()
            .zip(src.row(y, width * channels).chunks_exact(channels))
        {
            *dst = src[channel];
        }
    });
}

fn merge_channels(sources: &[&PixelBuffer<u8>], dst: &mut PixelBufferMut<u8>) {
    let width = dst.width as usize;
    let channels = sources.len();
    dst.for_each_row(width * channels, |y, dst| {
        for (channel, src) in sources.iter().enumerate() {
            for (dst, &v) in dst
                .chunks_exact_mut(channels)
                .zip(src.row(y, width))
            {
                dst[channel] = v;
            }
        }
    });
}

fn swap_pairs(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) {
    let row_len = src.width as usize * 2;
    dst.for_each_row(row_len, |y, dst| {
        for (dst, src) in dst.chunks_exact_mut(2).zip(src.row(y, row_len).chunks_exact(2)) {
            dst[0] = src[1];
            dst[1] = src[0];
        }
    });
}

/// Copies every plane of a frame into a frame of the same format.
pub(crate) fn copy_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    for ((layout, src), dst) in src
        .format
        .planes()
        .iter()
        .zip(src.planes.iter())
        .zip(dst.planes.iter_mut())
    {
        copy_plane_impl(src, dst, layout.bytes_per_pixel as usize);
    }
    Ok(())
}

/// Route edge between I420 and YV12.
pub(crate) fn yv12_swap_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    copy_plane_impl(&src.planes[0], &mut dst.planes[0], 1);
    copy_plane_impl(&src.planes[2], &mut dst.planes[1], 1);
    copy_plane_impl(&src.planes[1], &mut dst.planes[2], 1);
    Ok(())
}

/// Route edge between 8 bit planar subsamplings, chroma goes through the scaler.
pub(crate) fn chroma_resample_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    copy_plane_impl(&src.planes[0], &mut dst.planes[0], 1);
    scale_channels::<u8, 1>(&src.planes[1], &mut dst.planes[1], FilterMode::Box);
    scale_channels::<u8, 1>(&src.planes[2], &mut dst.planes[2], FilterMode::Box);
    Ok(())
}

/// Route edge splitting NV12 or NV21 chroma into I420.
pub(crate) fn nv_to_planar_frame<const ORDER: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    let order: YuvNVOrder = ORDER.into();
    copy_plane_impl(&src.planes[0], &mut dst.planes[0], 1);
    split_channel(&src.planes[1], &mut dst.planes[1], 2, order.get_u_position());
    split_channel(&src.planes[1], &mut dst.planes[2], 2, order.get_v_position());
    Ok(())
}

/// Route edge merging I420 chroma into NV12 or NV21.
pub(crate) fn planar_to_nv_frame<const ORDER: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    let order: YuvNVOrder = ORDER.into();
    copy_plane_impl(&src.planes[0], &mut dst.planes[0], 1);
    let sources = match order {
        YuvNVOrder::UV => [&src.planes[1], &src.planes[2]],
        YuvNVOrder::VU => [&src.planes[2], &src.planes[1]],
    };
    merge_channels(&sources, &mut dst.planes[1]);
    Ok(())
}

/// Route edge between NV12 and NV21.
pub(crate) fn nv_swap_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    copy_plane_impl(&src.planes[0], &mut dst.planes[0], 1);
    swap_pairs(&src.planes[1], &mut dst.planes[1]);
    Ok(())
}

/// Route edge from I400 to I420 with neutral chroma.
pub(crate) fn gray_to_planar_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    copy_plane_impl(&src.planes[0], &mut dst.planes[0], 1);
    for plane in dst.planes[1..].iter_mut() {
        let width = plane.width as usize;
        plane.for_each_row(width, |_, row| row.fill(128));
    }
    Ok(())
}

/// Route edge dropping chroma.
pub(crate) fn planar_to_gray_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    copy_plane_impl(&src.planes[0], &mut dst.planes[0], 1);
    Ok(())
}

/// Route edge from I010 to I420, samples truncated to 8 bits.
pub(crate) fn i010_to_i420_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    for (src, dst) in src.planes.iter().zip(dst.planes.iter_mut()) {
        let width = src.width as usize;
        dst.for_each_row(width, |y, dst| {
            let row = src.row(y, width * 2);
            for (x, dst) in dst.iter_mut().enumerate() {
                *dst = narrow_sample(read_u16_le(row, x), 16384);
            }
        });
    }
    Ok(())
}

/// Route edge from I420 to I010.
pub(crate) fn i420_to_i010_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    for (src, dst) in src.planes.iter().zip(dst.planes.iter_mut()) {
        let width = src.width as usize;
        dst.for_each_row(width * 2, |y, dst| {
            for (x, &v) in src.row(y, width).iter().enumerate() {
                write_u16_le(dst, x, widen_sample(v, 1024));
            }
        });
    }
    Ok(())
}

/// Route edge from I010 to P010, samples moved to the high bits.
pub(crate) fn i010_to_p010_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    let y_width = src.planes[0].width as usize;
    let y_src = &src.planes[0];
    dst.planes[0].for_each_row(y_width * 2, |y, dst| {
        let row = y_src.row(y, y_width * 2);
        for x in 0..y_width {
            write_u16_le(dst, x, read_u16_le(row, x) << 6);
        }
    });
    let (u_src, v_src) = (&src.planes[1], &src.planes[2]);
    let chroma_width = u_src.width as usize;
    dst.planes[1].for_each_row(chroma_width * 4, |y, dst| {
        let u_row = u_src.row(y, chroma_width * 2);
        let v_row = v_src.row(y, chroma_width * 2);
        for x in 0..chroma_width {
            write_u16_le(dst, x * 2, read_u16_le(u_row, x) << 6);
            write_u16_le(dst, x * 2 + 1, read_u16_le(v_row, x) << 6);
        }
    });
    Ok(())
}

/// Route edge from P010 to I010.
pub(crate) fn p010_to_i010_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    let y_src = &src.planes[0];
    let y_width = y_src.width as usize;
    dst.planes[0].for_each_row(y_width * 2, |y, dst| {
        let row = y_src.row(y, y_width * 2);
        for x in 0..y_width {
            write_u16_le(dst, x, read_u16_le(row, x) >> 6);
        }
    });
    let uv_src = &src.planes[1];
    let chroma_width = uv_src.width as usize;
    for (plane, offset) in dst.planes[1..].iter_mut().zip([0usize, 1]) {
        plane.for_each_row(chroma_width * 2, |y, dst| {
            let row = uv_src.row(y, chroma_width * 4);
            for x in 0..chroma_width {
                write_u16_le(dst, x, read_u16_le(row, x * 2 + offset) >> 6);
            }
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;

    #[test]
    fn test_split_merge_uv() {
        let uv = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let src = PixelBuffer::new(&uv, 4, 2, 2);
        let mut u = PixelBufferMut::<u8>::alloc(2, 2, 1);
        let mut v = PixelBufferMut::<u8>::alloc(2, 2, 1);
        split_uv_plane(&src, &mut u, &mut v).unwrap();
        assert_eq!(u.data.borrow(), &[1, 3, 5, 7]);
        assert_eq!(v.data.borrow(), &[2, 4, 6, 8]);

        let mut merged = PixelBufferMut::<u8>::alloc(2, 2, 2);
        merge_uv_plane(&u.to_fixed(), &v.to_fixed(), &mut merged).unwrap();
        assert_eq!(merged.data.borrow(), &uv);

        let mut swapped = PixelBufferMut::<u8>::alloc(2, 2, 2);
        swap_uv_plane(&src, &mut swapped).unwrap();
        assert_eq!(swapped.data.borrow(), &[2, 1, 4, 3, 6, 5, 8, 7]);
    }

    #[test]
    fn test_copy_plane_flips_with_negative_stride() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let src = PixelBuffer::new(&data, 2, 2, 3).flipped();
        let mut dst = PixelBufferMut::<u8>::alloc(2, 3, 1);
        copy_plane(&src, &mut dst).unwrap();
        assert_eq!(dst.data.borrow(), &[5, 6, 3, 4, 1, 2]);

        let mut small = PixelBufferMut::<u8>::alloc(2, 2, 1);
        assert_eq!(
            copy_plane(&src, &mut small),
            Err(YuvError::ImagesSizesNotMatch)
        );
    }

    #[test]
    fn test_depth_conversion() {
        assert_eq!(narrow_sample(1023, 16384), 255);
        assert_eq!(narrow_sample(4, 16384), 1);
        assert_eq!(widen_sample(255, 1024), 1023);
        assert_eq!(widen_sample(0, 1024), 0);
        let src = [0u16, 512, 1023, 1023];
        let src = PixelBuffer::new(&src, 2, 2, 2);
        let mut dst = PixelBufferMut::<u8>::alloc(2, 2, 1);
        convert_16_to_8_plane(&src, &mut dst, 16384).unwrap();
        assert_eq!(dst.data.borrow(), &[0, 128, 255, 255]);
    }

    #[test]
    fn test_rgb_planes() {
        let raw = [1u8, 2, 3, 4, 5, 6];
        let src = PixelBuffer::new(&raw, 6, 2, 1);
        let mut r = PixelBufferMut::<u8>::alloc(2, 1, 1);
        let mut g = PixelBufferMut::<u8>::alloc(2, 1, 1);
        let mut b = PixelBufferMut::<u8>::alloc(2, 1, 1);
        split_rgb_plane(&src, &mut r, &mut g, &mut b).unwrap();
        assert_eq!(r.data.borrow(), &[1, 4]);
        assert_eq!(b.data.borrow(), &[3, 6]);
        let mut merged = PixelBufferMut::<u8>::alloc(2, 1, 3);
        merge_rgb_plane(&r.to_fixed(), &g.to_fixed(), &b.to_fixed(), &mut merged).unwrap();
        assert_eq!(merged.data.borrow(), &raw);
    }

    #[test]
    fn test_alpha_helpers() {
        let argb = [1u8, 2, 3, 40, 5, 6, 7, 80];
        let src = PixelBuffer::new(&argb, 8, 2, 1);
        let mut alpha = PixelBufferMut::<u8>::alloc(2, 1, 1);
        argb_extract_alpha(&src, &mut alpha).unwrap();
        assert_eq!(alpha.data.borrow(), &[40, 80]);
        let mut dst = PixelBufferMut::<u8>::alloc(2, 1, 4);
        argb_copy_y_to_alpha(&alpha.to_fixed(), &mut dst).unwrap();
        assert_eq!(dst.data.borrow(), &[0, 0, 0, 40, 0, 0, 0, 80]);
    }

    #[test]
    fn test_p010_i010_round_trip() {
        let mut i010 = PlaneSetMut::alloc(PixelFormat::I010, 3, 3);
        for (i, plane) in i010.planes.iter_mut().enumerate() {
            let width = plane.width as usize;
            plane.for_each_row(width * 2, |y, row| {
                for x in 0..width {
                    write_u16_le(row, x, ((i * 300 + y * 100 + x * 7) % 1024) as u16);
                }
            });
        }
        let mut p010 = PlaneSetMut::alloc(PixelFormat::P010, 3, 3);
        i010_to_p010_frame(&i010.to_fixed(), &mut p010, ColorMatrix::BT601).unwrap();
        let mut back = PlaneSetMut::alloc(PixelFormat::I010, 3, 3);
        p010_to_i010_frame(&p010.to_fixed(), &mut back, ColorMatrix::BT601).unwrap();
        for (a, b) in i010.planes.iter().zip(back.planes.iter()) {
            assert_eq!(a.data.borrow(), b.data.borrow());
        }
    }
}
