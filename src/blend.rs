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
use crate::numerics::div_by_255;
use crate::yuv_error::YuvError;

const ALPHA: usize = 3;

#[inline(always)]
fn attenuate_row(src: &[u8], dst: &mut [u8]) {
    for (dst, src) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = src[ALPHA] as u16;
        dst[0] = div_by_255(src[0] as u16 * a);
        dst[1] = div_by_255(src[1] as u16 * a);
        dst[2] = div_by_255(src[2] as u16 * a);
        dst[ALPHA] = src[ALPHA];
    }
}

dispatch_row_kernel!(
    make_attenuate_row, attenuate_row_sse, attenuate_row_avx, attenuate_row,
    <>, (src: &[u8], dst: &mut [u8])
);

#[inline(always)]
fn unattenuate_row(src: &[u8], dst: &mut [u8]) {
    for (dst, src) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = src[ALPHA] as u32;
        if a == 0 {
            dst.copy_from_slice(src);
            continue;
        }
        for c in 0..3 {
            dst[c] = ((src[c] as u32 * 255 + a / 2) / a).min(255) as u8;
        }
        dst[ALPHA] = src[ALPHA];
    }
}

/// `fg + bg * (256 - fg_alpha) / 256` over a premultiplied foreground, opaque result.
#[inline(always)]
fn blend_row(fg: &[u8], bg: &[u8], dst: &mut [u8]) {
    for ((dst, fg), bg) in dst
        .chunks_exact_mut(4)
        .zip(fg.chunks_exact(4))
        .zip(bg.chunks_exact(4))
    {
        let inv = 256 - fg[ALPHA] as u32;
        for c in 0..3 {
            dst[c] = (fg[c] as u32 + ((bg[c] as u32 * inv) >> 8)).min(255) as u8;
        }
        dst[ALPHA] = 255;
    }
}

dispatch_row_kernel!(
    make_blend_row, blend_row_sse, blend_row_avx, blend_row,
    <>, (fg: &[u8], bg: &[u8], dst: &mut [u8])
);

fn check_same<A: Copy + std::fmt::Debug>(
    src: &PixelBuffer<A>,
    dst: &PixelBufferMut<u8>,
    elements_per_pixel: usize,
) -> Result<(), YuvError> {
    src.check_constraints(elements_per_pixel)?;
    if (src.width, src.height) != (dst.width, dst.height) {
        return Err(YuvError::ImagesSizesNotMatch);
    }
    Ok(())
}

fn unary_argb(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    op: impl Fn(&[u8], &mut [u8]) + Send + Sync,
) -> Result<(), YuvError> {
    dst.check_constraints(4)?;
    check_same(src, dst, 4)?;
    let row_len = src.width as usize * 4;
    dst.for_each_row(row_len, |y, dst| op(src.row(y, row_len), dst));
    Ok(())
}

fn binary_argb(
    src0: &PixelBuffer<u8>,
    src1: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    op: impl Fn(&[u8], &[u8], &mut [u8]) + Send + Sync,
) -> Result<(), YuvError> {
    dst.check_constraints(4)?;
    check_same(src0, dst, 4)?;
    check_same(src1, dst, 4)?;
    let row_len = src0.width as usize * 4;
    dst.for_each_row(row_len, |y, dst| {
        op(src0.row(y, row_len), src1.row(y, row_len), dst)
    });
    Ok(())
}

/// Premultiplies color by alpha: `c = round(c * a / 255)`.
pub fn argb_attenuate(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    let executor = make_attenuate_row();
    unary_argb(src, dst, |src, dst| unsafe { executor(src, dst) })
}

/// Reverses [argb_attenuate]: `c = min(255, round(c * 255 / a))`.
///
/// Pixels with zero alpha are copied unchanged.
pub fn argb_unattenuate(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    unary_argb(src, dst, unattenuate_row)
}

/// Composites a premultiplied `fg` over `bg`.
pub fn argb_blend(
    fg: &PixelBuffer<u8>,
    bg: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    let executor = make_blend_row();
    binary_argb(fg, bg, dst, |fg, bg, dst| unsafe { executor(fg, bg, dst) })
}

/// Channel wise product, `255 * x == x`.
pub fn argb_multiply(
    src0: &PixelBuffer<u8>,
    src1: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    binary_argb(src0, src1, dst, |a, b, dst| {
        for ((dst, &a), &b) in dst.iter_mut().zip(a).zip(b) {
            *dst = div_by_255(a as u16 * b as u16);
        }
    })
}

/// Channel wise saturating sum.
pub fn argb_add(
    src0: &PixelBuffer<u8>,
    src1: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    binary_argb(src0, src1, dst, |a, b, dst| {
        for ((dst, &a), &b) in dst.iter_mut().zip(a).zip(b) {
            *dst = a.saturating_add(b);
        }
    })
}

/// Channel wise saturating difference `src0 - src1`.
pub fn argb_subtract(
    src0: &PixelBuffer<u8>,
    src1: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    binary_argb(src0, src1, dst, |a, b, dst| {
        for ((dst, &a), &b) in dst.iter_mut().zip(a).zip(b) {
            *dst = a.saturating_sub(b);
        }
    })
}

/// `(src0 * (256 - fraction) + src1 * fraction + 128) >> 8`, zero fraction copies `src0`.
pub fn argb_interpolate(
    src0: &PixelBuffer<u8>,
    src1: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    fraction: u8,
) -> Result<(), YuvError> {
    let f = fraction as u32;
    binary_argb(src0, src1, dst, |a, b, dst| {
        for ((dst, &a), &b) in dst.iter_mut().zip(a).zip(b) {
            *dst = ((a as u32 * (256 - f) + b as u32 * f + 128) >> 8) as u8;
        }
    })
}

/// Mixes two planes with a per sample weight: `(src0 * a + src1 * (255 - a)) / 255`.
pub fn blend_plane(
    src0: &PixelBuffer<u8>,
    src1: &PixelBuffer<u8>,
    alpha: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    dst.check_constraints(1)?;
    for src in [src0, src1, alpha] {
        check_same(src, dst, 1)?;
    }
    let width = dst.width as usize;
    dst.for_each_row(width, |y, dst| {
        for (((dst, &a), &b), &w) in dst
            .iter_mut()
            .zip(src0.row(y, width))
            .zip(src1.row(y, width))
            .zip(alpha.row(y, width))
        {
            *dst = div_by_255(a as u16 * w as u16 + b as u16 * (255 - w as u16));
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn run_unary(
        src: &[u8],
        op: fn(&PixelBuffer<u8>, &mut PixelBufferMut<u8>) -> Result<(), YuvError>,
    ) -> Vec<u8> {
        let width = (src.len() / 4) as u32;
        let mut dst = PixelBufferMut::<u8>::alloc(width, 1, 4);
        op(&PixelBuffer::new(src, width as i32 * 4, width, 1), &mut dst).unwrap();
        dst.data.borrow().to_vec()
    }

    #[test]
    fn test_attenuate_values() {
        let src = [255u8, 128, 0, 128, 10, 20, 30, 0, 200, 100, 50, 255];
        let out = run_unary(&src, argb_attenuate);
        assert_eq!(out, [128, 64, 0, 128, 0, 0, 0, 0, 200, 100, 50, 255]);
    }

    #[test]
    fn test_unattenuate_keeps_transparent() {
        let src = [10u8, 20, 30, 0, 64, 32, 0, 128];
        let out = run_unary(&src, argb_unattenuate);
        assert_eq!(&out[..4], &[10, 20, 30, 0]);
        assert_eq!(&out[4..], &[128, 64, 0, 128]);
    }

    #[test]
    fn test_attenuation_is_stable() {
        let mut rng = StdRng::seed_from_u64(21);
        let src: Vec<u8> = (0..4 * 500).map(|_| rng.random()).collect();
        let first = run_unary(&src, argb_attenuate);
        let restored = run_unary(&first, argb_unattenuate);
        let second = run_unary(&restored, argb_attenuate);
        for (a, b) in first.iter().zip(second.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn test_blend_opaque_and_transparent() {
        let fg = [10u8, 20, 30, 255, 0, 0, 0, 0];
        let bg = [100u8, 110, 120, 7, 100, 110, 120, 7];
        let mut dst = PixelBufferMut::<u8>::alloc(2, 1, 4);
        argb_blend(
            &PixelBuffer::new(&fg, 8, 2, 1),
            &PixelBuffer::new(&bg, 8, 2, 1),
            &mut dst,
        )
        .unwrap();
        assert_eq!(dst.data.borrow(), &[10, 20, 30, 255, 100, 110, 120, 255]);
    }

    #[test]
    fn test_arithmetic() {
        let a = [200u8, 100, 255, 0];
        let b = [100u8, 200, 255, 10];
        let pa = PixelBuffer::new(&a, 4, 1, 1);
        let pb = PixelBuffer::new(&b, 4, 1, 1);
        let mut dst = PixelBufferMut::<u8>::alloc(1, 1, 4);
        argb_add(&pa, &pb, &mut dst).unwrap();
        assert_eq!(dst.data.borrow(), &[255, 255, 255, 10]);
        argb_subtract(&pa, &pb, &mut dst).unwrap();
        assert_eq!(dst.data.borrow(), &[100, 0, 0, 0]);
        argb_multiply(&pa, &pb, &mut dst).unwrap();
        assert_eq!(dst.data.borrow(), &[78, 78, 255, 0]);
        argb_interpolate(&pa, &pb, &mut dst, 0).unwrap();
        assert_eq!(dst.data.borrow(), &a);
        argb_interpolate(&pa, &pb, &mut dst, 128).unwrap();
        assert_eq!(dst.data.borrow(), &[150, 150, 255, 5]);
    }

    #[test]
    fn test_blend_plane() {
        let a = [200u8, 200, 200];
        let b = [0u8, 0, 0];
        let w = [255u8, 0, 128];
        let mut dst = PixelBufferMut::<u8>::alloc(3, 1, 1);
        blend_plane(
            &PixelBuffer::new(&a, 3, 3, 1),
            &PixelBuffer::new(&b, 3, 3, 1),
            &PixelBuffer::new(&w, 3, 3, 1),
            &mut dst,
        )
        .unwrap();
        assert_eq!(dst.data.borrow(), &[200, 0, 100]);
    }
}
