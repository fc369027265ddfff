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
use crate::images::{PixelBuffer, PixelBufferMut};
use crate::yuv_error::YuvError;

/// Full range BT.601 luma in 7 bit fixed point, memory order B, G, R.
#[inline(always)]
fn luma_jpeg(b: u8, g: u8, r: u8) -> u8 {
    ((38 * r as u32 + 75 * g as u32 + 15 * b as u32 + 64) >> 7) as u8
}

#[inline(always)]
fn gray_row(src: &[u8], dst: &mut [u8]) {
    for (dst, src) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let y = luma_jpeg(src[0], src[1], src[2]);
        dst[0] = y;
        dst[1] = y;
        dst[2] = y;
        dst[3] = src[3];
    }
}

dispatch_row_kernel!(
    make_gray_row, gray_row_sse, gray_row_avx, gray_row,
    <>, (src: &[u8], dst: &mut [u8])
);

#[inline(always)]
fn sepia_px(px: &mut [u8]) {
    let (b, g, r) = (px[0] as u32, px[1] as u32, px[2] as u32);
    px[0] = ((b * 17 + g * 68 + r * 35) >> 7).min(255) as u8;
    px[1] = ((b * 22 + g * 88 + r * 45) >> 7).min(255) as u8;
    px[2] = ((b * 24 + g * 98 + r * 50) >> 7).min(255) as u8;
}

/// Applies `op` to every pixel of `dst` in place.
fn in_place(
    dst: &mut PixelBufferMut<u8>,
    op: impl Fn(&mut [u8]) + Send + Sync,
) -> Result<(), YuvError> {
    dst.check_constraints(4)?;
    let row_len = dst.width as usize * 4;
    dst.for_each_row(row_len, |_, row| row.chunks_exact_mut(4).for_each(&op));
    Ok(())
}

fn src_to_dst(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    op: impl Fn(&[u8], &mut [u8]) + Send + Sync,
) -> Result<(), YuvError> {
    src.check_constraints(4)?;
    dst.check_constraints(4)?;
    if (src.width, src.height) != (dst.width, dst.height) {
        return Err(YuvError::ImagesSizesNotMatch);
    }
    let row_len = src.width as usize * 4;
    dst.for_each_row(row_len, |y, dst| op(src.row(y, row_len), dst));
    Ok(())
}

/// Replaces color with its full range luma, alpha kept.
pub fn argb_gray(dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    in_place(dst, |px| {
        let y = luma_jpeg(px[0], px[1], px[2]);
        px[..3].fill(y);
    })
}

pub fn argb_gray_to(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    let executor = make_gray_row();
    src_to_dst(src, dst, |src, dst| unsafe { executor(src, dst) })
}

/// Sepia tone in place.
pub fn argb_sepia(dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    in_place(dst, sepia_px)
}

/// Multiplies every B, G, R, A vector by a signed matrix in 6 bit fixed point.
///
/// Row `i` of `matrix` (elements `4 * i .. 4 * i + 4`) produces output channel `i`
/// in memory order, the result is clamped to 0..=255.
pub fn argb_color_matrix(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    matrix: &[i8; 16],
) -> Result<(), YuvError> {
    src_to_dst(src, dst, |src, dst| {
        for (dst, src) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            for (channel, out) in dst.iter_mut().enumerate() {
                let weights = &matrix[channel * 4..channel * 4 + 4];
                let sum: i32 = weights
                    .iter()
                    .zip(src.iter())
                    .map(|(&w, &v)| w as i32 * v as i32)
                    .sum();
                *out = (sum >> 6).clamp(0, 255) as u8;
            }
        }
    })
}

/// Looks every channel up in an interleaved table, `table[v * 4 + channel]`.
pub fn argb_color_table(dst: &mut PixelBufferMut<u8>, table: &[u8; 1024]) -> Result<(), YuvError> {
    in_place(dst, |px| {
        for (channel, v) in px.iter_mut().enumerate() {
            *v = table[*v as usize * 4 + channel];
        }
    })
}

/// Same as [argb_color_table] with alpha left alone.
pub fn rgb_color_table(dst: &mut PixelBufferMut<u8>, table: &[u8; 1024]) -> Result<(), YuvError> {
    in_place(dst, |px| {
        for (channel, v) in px[..3].iter_mut().enumerate() {
            *v = table[*v as usize * 4 + channel];
        }
    })
}

/// Posterizes color in place: `(v * scale >> 16) * interval_size + interval_offset`.
pub fn argb_quantize(
    dst: &mut PixelBufferMut<u8>,
    scale: i32,
    interval_size: i32,
    interval_offset: i32,
) -> Result<(), YuvError> {
    if scale < 0 || interval_size < 0 || interval_offset < 0 {
        return Err(YuvError::InvalidMatrix);
    }
    in_place(dst, |px| {
        for v in px[..3].iter_mut() {
            let q = ((*v as i64 * scale as i64) >> 16) * interval_size as i64
                + interval_offset as i64;
            *v = q.clamp(0, 255) as u8;
        }
    })
}

/// Scales channels by the bytes of `value`, packed as `0xAARRGGBB`.
pub fn argb_shade(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    value: u32,
) -> Result<(), YuvError> {
    let scales = value.to_le_bytes().map(|s| s as u64 * 0x0101);
    src_to_dst(src, dst, |src, dst| {
        for (dst, src) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            for ((out, &v), &scale) in dst.iter_mut().zip(src).zip(scales.iter()) {
                *out = ((v as u64 * 0x0101 * scale) >> 24) as u8;
            }
        }
    })
}
