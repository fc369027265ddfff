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
use crate::images::{PlaneSet, PlaneSetMut};
use crate::numerics::avg2;
use crate::rgba_to_yuv::{encode_uv, encode_y};
use crate::yuv_error::{MismatchedSize, YuvError};
use crate::yuv_support::{ColorMatrix, RgbLayout, YuvChromaSubsampling, Yuy2Description};
use crate::yuv_to_rgba::{chroma_planes, decode_pixel, store_rgb};

/// Route edge decoding YUY2 or UYVY to a packed RGB layout.
pub(crate) fn yuy2_to_rgb_frame<const DST: u8, const FMT: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let dst_channels: RgbLayout = DST.into();
    let description: Yuy2Description = FMT.into();
    let coeffs = matrix.inverse_coefficients(8, 255)?;
    let packed = &src.planes[0];
    let width = src.width as usize;
    let channels = dst_channels.get_channels_count();
    let packed_len = packed.width as usize * 4;

    dst.planes[0].for_each_row(width * channels, |y, rgba| {
        let yuy2 = packed.row(y, packed_len);
        for (x, dst) in rgba.chunks_exact_mut(channels).enumerate() {
            let macro_pixel = &yuy2[(x >> 1) * 4..(x >> 1) * 4 + 4];
            let luma = if x & 1 == 0 {
                macro_pixel[description.get_first_y_position()]
            } else {
                macro_pixel[description.get_second_y_position()]
            };
            let (r, g, b) = decode_pixel(
                &coeffs,
                luma as i32,
                macro_pixel[description.get_u_position()] as i32,
                macro_pixel[description.get_v_position()] as i32,
            );
            store_rgb::<DST>(dst, r, g, b);
        }
    });
    Ok(())
}

/// Route edge encoding a packed RGB layout to YUY2 or UYVY, chroma averaged over pixel pairs.
pub(crate) fn rgb_to_yuy2_frame<const SRC: u8, const FMT: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    matrix: ColorMatrix,
) -> Result<(), YuvError> {
    let src_channels: RgbLayout = SRC.into();
    let description: Yuy2Description = FMT.into();
    let coeffs = matrix.forward_coefficients()?;
    let rgba = &src.planes[0];
    let width = src.width as usize;
    let cn = src_channels.get_channels_count();
    let packed_width = dst.planes[0].width as usize;

    dst.planes[0].for_each_row(packed_width * 4, |y, yuy2| {
        let row = rgba.row(y, width * cn);
        for (mx, macro_pixel) in yuy2.chunks_exact_mut(4).enumerate() {
            let x0 = mx * 2;
            let x1 = (x0 + 1).min(width - 1);
            let p0 = &row[x0 * cn..x0 * cn + cn];
            let p1 = &row[x1 * cn..x1 * cn + cn];
            let rgb = |p: &[u8]| {
                (
                    p[src_channels.get_r_channel_offset()] as i32,
                    p[src_channels.get_g_channel_offset()] as i32,
                    p[src_channels.get_b_channel_offset()] as i32,
                )
            };
            let (r0, g0, b0) = rgb(p0);
            let (r1, g1, b1) = rgb(p1);
            let y0 = encode_y(&coeffs, r0, g0, b0);
            let y1 = if x1 == x0 {
                y0
            } else {
                encode_y(&coeffs, r1, g1, b1)
            };
            let (u, v) = encode_uv(
                &coeffs,
                avg2(r0 as u16, r1 as u16) as i32,
                avg2(g0 as u16, g1 as u16) as i32,
                avg2(b0 as u16, b1 as u16) as i32,
            );
            macro_pixel[description.get_first_y_position()] = y0;
            macro_pixel[description.get_second_y_position()] = y1;
            macro_pixel[description.get_u_position()] = u;
            macro_pixel[description.get_v_position()] = v;
        }
    });
    Ok(())
}

/// Route edge unpacking YUY2 or UYVY to I422, or to I420 averaging chroma of row pairs.
pub(crate) fn yuy2_to_planar_frame<const FMT: u8, const SAMPLING: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    let description: Yuy2Description = FMT.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    let packed = &src.planes[0];
    let width = src.width as usize;
    let height = src.height as usize;
    let packed_len = packed.width as usize * 4;
    let plane_count = dst.planes.len();
    let [y_plane, u_plane, v_plane] = &mut dst.planes[..] else {
        return Err(YuvError::PlaneCountMismatch(MismatchedSize {
            expected: 3,
            received: plane_count,
        }));
    };
    let chroma_width = u_plane.width as usize;

    y_plane.for_each_row(width, |y, luma| {
        let yuy2 = packed.row(y, packed_len);
        for (x, dst) in luma.iter_mut().enumerate() {
            let position = if x & 1 == 0 {
                description.get_first_y_position()
            } else {
                description.get_second_y_position()
            };
            *dst = yuy2[(x >> 1) * 4 + position];
        }
    });

    let chroma_pass = |plane: &mut crate::images::PixelBufferMut<u8>, position: usize| {
        plane.for_each_row(chroma_width, |cy, chroma| {
            let (y0, y1) = if sampling == YuvChromaSubsampling::Yuv420 {
                (cy * 2, (cy * 2 + 1).min(height - 1))
            } else {
                (cy, cy)
            };
            let row0 = packed.row(y0, packed_len);
            let row1 = packed.row(y1, packed_len);
            for (cx, dst) in chroma.iter_mut().enumerate() {
                *dst = avg2(row0[cx * 4 + position] as u16, row1[cx * 4 + position] as u16) as u8;
            }
        });
    };
    chroma_pass(u_plane, description.get_u_position());
    chroma_pass(v_plane, description.get_v_position());
    Ok(())
}

/// Route edge packing I422 or I420 into YUY2 or UYVY.
pub(crate) fn planar_to_yuy2_frame<const FMT: u8, const SAMPLING: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    let description: Yuy2Description = FMT.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    let y_plane = &src.planes[0];
    let (u_plane, v_plane) = chroma_planes(src);
    let width = src.width as usize;
    let chroma_width = u_plane.width as usize;
    let packed_width = dst.planes[0].width as usize;

    dst.planes[0].for_each_row(packed_width * 4, |y, yuy2| {
        let cy = if sampling == YuvChromaSubsampling::Yuv420 {
            y >> 1
        } else {
            y
        };
        let luma = y_plane.row(y, width);
        let u_row = u_plane.row(cy, chroma_width);
        let v_row = v_plane.row(cy, chroma_width);
        for (mx, macro_pixel) in yuy2.chunks_exact_mut(4).enumerate() {
            let x0 = mx * 2;
            let x1 = (x0 + 1).min(width - 1);
            macro_pixel[description.get_first_y_position()] = luma[x0];
            macro_pixel[description.get_second_y_position()] = luma[x1];
            macro_pixel[description.get_u_position()] = u_row[mx];
            macro_pixel[description.get_v_position()] = v_row[mx];
        }
    });
    Ok(())
}

/// Route edge between YUY2 and UYVY, a byte swap within each pair.
pub(crate) fn yuy2_swap_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    let packed = &src.planes[0];
    let row_len = packed.width as usize * 4;
    dst.planes[0].for_each_row(row_len, |y, dst| {
        for (dst, src) in dst
            .chunks_exact_mut(2)
            .zip(packed.row(y, row_len).chunks_exact(2))
        {
            dst[0] = src[1];
            dst[1] = src[0];
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;

    const YUYV: u8 = Yuy2Description::YUYV as u8;
    const UYVY: u8 = Yuy2Description::UYVY as u8;
    const YUV420: u8 = YuvChromaSubsampling::Yuv420 as u8;
    const YUV422: u8 = YuvChromaSubsampling::Yuv422 as u8;

    #[test]
    fn test_odd_width_packs_duplicate_luma() {
        let y = [10u8, 20, 30];
        let u = [40u8, 50];
        let v = [60u8, 70];
        let src = PlaneSet::planar(PixelFormat::I422, &y, 3, &u, 2, &v, 2, 3, 1);
        let mut dst = PlaneSetMut::alloc(PixelFormat::Yuy2, 3, 1);
        planar_to_yuy2_frame::<YUYV, YUV422>(&src, &mut dst, ColorMatrix::BT601).unwrap();
        assert_eq!(
            dst.planes[0].data.borrow(),
            &[10, 40, 20, 60, 30, 50, 30, 70]
        );

        let mut back = PlaneSetMut::alloc(PixelFormat::I422, 3, 1);
        yuy2_to_planar_frame::<YUYV, YUV422>(&dst.to_fixed(), &mut back, ColorMatrix::BT601)
            .unwrap();
        assert_eq!(back.planes[0].data.borrow(), &y);
        assert_eq!(back.planes[1].data.borrow(), &u);
        assert_eq!(back.planes[2].data.borrow(), &v);
    }

    #[test]
    fn test_to_i420_averages_rows() {
        let packed = [10u8, 100, 20, 200, 30, 110, 40, 210];
        let src = PlaneSet::packed(PixelFormat::Yuy2, &packed, 4, 2, 2);
        let mut dst = PlaneSetMut::alloc(PixelFormat::I420, 2, 2);
        yuy2_to_planar_frame::<YUYV, YUV420>(&src, &mut dst, ColorMatrix::BT601).unwrap();
        assert_eq!(dst.planes[0].data.borrow(), &[10, 20, 30, 40]);
        assert_eq!(dst.planes[1].data.borrow(), &[105]);
        assert_eq!(dst.planes[2].data.borrow(), &[205]);
    }

    #[test]
    fn test_swap_matches_uyvy_packing() {
        let y = [1u8, 2, 3, 4];
        let u = [5u8, 6];
        let v = [7u8, 8];
        let src = PlaneSet::planar(PixelFormat::I422, &y, 4, &u, 2, &v, 2, 4, 1);
        let mut yuy2 = PlaneSetMut::alloc(PixelFormat::Yuy2, 4, 1);
        let mut uyvy = PlaneSetMut::alloc(PixelFormat::Uyvy, 4, 1);
        planar_to_yuy2_frame::<YUYV, YUV422>(&src, &mut yuy2, ColorMatrix::BT601).unwrap();
        planar_to_yuy2_frame::<UYVY, YUV422>(&src, &mut uyvy, ColorMatrix::BT601).unwrap();
        let mut swapped = PlaneSetMut::alloc(PixelFormat::Uyvy, 4, 1);
        yuy2_swap_frame(&yuy2.to_fixed(), &mut swapped, ColorMatrix::BT601).unwrap();
        assert_eq!(swapped.planes[0].data.borrow(), uyvy.planes[0].data.borrow());
    }

    #[test]
    fn test_gray_rgb_encodes_neutral_chroma() {
        let argb = [90u8, 90, 90, 255, 200, 200, 200, 255, 10, 10, 10, 255];
        let src = PlaneSet::packed(PixelFormat::Argb, &argb, 12, 3, 1);
        let mut dst = PlaneSetMut::alloc(PixelFormat::Uyvy, 3, 1);
        rgb_to_yuy2_frame::<{ RgbLayout::Argb as u8 }, UYVY>(&src, &mut dst, ColorMatrix::JPEG)
            .unwrap();
        assert_eq!(
            dst.planes[0].data.borrow(),
            &[128, 90, 128, 200, 128, 10, 128, 10]
        );
        let mut back = PlaneSetMut::alloc(PixelFormat::Argb, 3, 1);
        yuy2_to_rgb_frame::<{ RgbLayout::Argb as u8 }, UYVY>(
            &dst.to_fixed(),
            &mut back,
            ColorMatrix::JPEG,
        )
        .unwrap();
        assert_eq!(back.planes[0].data.borrow(), &argb);
    }
}
