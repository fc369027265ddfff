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
use crate::yuv_error::YuvError;
use crate::yuv_support::{ColorMatrix, RgbLayout};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

/// Channel reshuffling of one row, missing alpha becomes opaque
#[inline(always)]
fn shuffle_row<const SRC: u8, const DST: u8>(src: &[u8], dst: &mut [u8], width: usize) {
    let src_channels: RgbLayout = SRC.into();
    let dst_channels: RgbLayout = DST.into();
    for (dst, src) in dst
        .chunks_exact_mut(dst_channels.get_channels_count())
        .zip(src.chunks_exact(src_channels.get_channels_count()))
        .take(width)
    {
        let r = src[src_channels.get_r_channel_offset()];
        let g = src[src_channels.get_g_channel_offset()];
        let b = src[src_channels.get_b_channel_offset()];
        dst[dst_channels.get_r_channel_offset()] = r;
        dst[dst_channels.get_g_channel_offset()] = g;
        dst[dst_channels.get_b_channel_offset()] = b;
        if dst_channels.has_alpha() {
            let a = if src_channels.has_alpha() {
                src[src_channels.get_a_channel_offset()]
            } else {
                255
            };
            dst[dst_channels.get_a_channel_offset()] = a;
        }
    }
}

dispatch_row_kernel!(
    make_shuffle_row, shuffle_row_sse, shuffle_row_avx, shuffle_row,
    <const SRC: u8, const DST: u8>, (src: &[u8], dst: &mut [u8], width: usize)
);

fn shuffle_plane<const SRC: u8, const DST: u8>(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
) {
    let src_channels: RgbLayout = SRC.into();
    let dst_channels: RgbLayout = DST.into();
    let width = src.width as usize;
    let src_row_len = width * src_channels.get_channels_count();
    let executor = make_shuffle_row::<SRC, DST>();

    let mut rows = dst.rows_mut(width * dst_channels.get_channels_count());
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

/// Route edge between two 8 bit packed RGB layouts.
pub(crate) fn shuffle_frame<const SRC: u8, const DST: u8>(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    _: ColorMatrix,
) -> Result<(), YuvError> {
    shuffle_plane::<SRC, DST>(&src.planes[0], &mut dst.planes[0]);
    Ok(())
}

/// Reorders the bytes of every 4 byte pixel: `dst[i] = src[shuffler[i]]`.
///
/// `shuffler` entries must be below 4.
pub fn argb_shuffle(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    shuffler: [u8; 4],
) -> Result<(), YuvError> {
    src.check_constraints(4)?;
    dst.check_constraints(4)?;
    if src.width != dst.width || src.height != dst.height {
        return Err(YuvError::ImagesSizesNotMatch);
    }
    if shuffler.iter().any(|&x| x > 3) {
        return Err(YuvError::InvalidMatrix);
    }
    let row_len = src.width as usize * 4;
    let mut rows = dst.rows_mut(row_len);
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
            .zip(src.row(y, row_len).chunks_exact(4))
        {
            dst[0] = src[shuffler[0] as usize];
            dst[1] = src[shuffler[1] as usize];
            dst[2] = src[shuffler[2] as usize];
            dst[3] = src[shuffler[3] as usize];
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_format::PixelFormat;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_rgb24_argb_rgb24_is_lossless() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for (width, height) in [(1u32, 1u32), (3, 5), (17, 9), (64, 2)] {
            let source: Vec<u8> = (0..width * height * 3).map(|_| rng.random()).collect();
            let src = PlaneSet::packed(PixelFormat::Rgb24, &source, width as i32 * 3, width, height);
            let mut argb = PlaneSetMut::alloc(PixelFormat::Argb, width, height);
            shuffle_frame::<{ RgbLayout::Rgb24 as u8 }, { RgbLayout::Argb as u8 }>(
                &src,
                &mut argb,
                ColorMatrix::BT601,
            )
            .unwrap();
            let mut back = PlaneSetMut::alloc(PixelFormat::Rgb24, width, height);
            shuffle_frame::<{ RgbLayout::Argb as u8 }, { RgbLayout::Rgb24 as u8 }>(
                &argb.to_fixed(),
                &mut back,
                ColorMatrix::BT601,
            )
            .unwrap();
            assert_eq!(back.planes[0].data.borrow(), &source[..]);
            assert!(argb.planes[0]
                .data
                .borrow()
                .chunks_exact(4)
                .all(|px| px[3] == 255));
        }
    }

    #[test]
    fn test_raw_to_argb_byte_order() {
        let raw = [10u8, 20, 30];
        let src = PlaneSet::packed(PixelFormat::Raw, &raw, 3, 1, 1);
        let mut dst = PlaneSetMut::alloc(PixelFormat::Argb, 1, 1);
        shuffle_frame::<{ RgbLayout::Raw as u8 }, { RgbLayout::Argb as u8 }>(
            &src,
            &mut dst,
            ColorMatrix::BT601,
        )
        .unwrap();
        assert_eq!(dst.planes[0].data.borrow(), &[30, 20, 10, 255]);
    }

    #[test]
    fn test_argb_shuffle() {
        let src_data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let src = PixelBuffer::new(&src_data, 4, 1, 2);
        let mut dst = PixelBufferMut::<u8>::alloc(1, 2, 4);
        argb_shuffle(&src, &mut dst, [3, 2, 1, 0]).unwrap();
        assert_eq!(dst.data.borrow(), &[4, 3, 2, 1, 8, 7, 6, 5]);
        assert!(argb_shuffle(&src, &mut dst, [4, 2, 1, 0]).is_err());
    }
}
