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
use crate::images::{PixelBuffer, PlaneSet};
use crate::pixel_format::{FourCC, PixelFormat};
#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// PSNR reported for identical inputs.
pub const MAX_PSNR: f64 = 128.0;

/// Seed of the reference djb2 hash.
pub const DJB2_SEED: u32 = 5381;

const SSIM_WINDOW: usize = 8;
const SSIM_STEP: usize = 4;
const SSIM_C1: f64 = (0.01 * 255.0) * (0.01 * 255.0);
const SSIM_C2: f64 = (0.03 * 255.0) * (0.03 * 255.0);

/// Order sensitive hash, `hash = hash * 33 + byte` wrapping.
pub fn hash_djb2(data: &[u8], seed: u32) -> u32 {
    data.iter()
        .fold(seed, |hash, &b| hash.wrapping_mul(33).wrapping_add(b as u32))
}

/// Number of differing bits over the common length of both slices.
pub fn compute_hamming_distance(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b.iter())
        .map(|(&a, &b)| (a ^ b).count_ones() as u64)
        .sum()
}

/// Sum of squared differences over the common length of both slices.
pub fn compute_sum_square_error(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b.iter())
        .map(|(&a, &b)| {
            let d = a as i32 - b as i32;
            (d * d) as u64
        })
        .sum()
}

/// Sum of squared differences over the area both planes cover.
///
/// Both planes must satisfy their stride constraints.
pub fn compute_sum_square_error_plane(a: &PixelBuffer<u8>, b: &PixelBuffer<u8>) -> u64 {
    let width = a.width.min(b.width) as usize;
    let height = a.height.min(b.height) as usize;
    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = (0..height).into_par_iter();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = 0..height;
    }
    iter.map(|y| compute_sum_square_error(a.row(y, width), b.row(y, width)))
        .sum()
}

/// `10 * log10(255^2 * count / sse)`, [MAX_PSNR] when `sse` is zero.
pub fn sum_square_error_to_psnr(sse: u64, count: u64) -> f64 {
    if sse == 0 {
        return MAX_PSNR;
    }
    let mse = sse as f64 / count as f64;
    (10.0 * (255.0 * 255.0 / mse).log10()).min(MAX_PSNR)
}

pub fn calc_frame_psnr(a: &PixelBuffer<u8>, b: &PixelBuffer<u8>) -> f64 {
    let count = a.width.min(b.width) as u64 * a.height.min(b.height) as u64;
    sum_square_error_to_psnr(compute_sum_square_error_plane(a, b), count)
}

/// PSNR over all samples of the three planes together.
pub fn i420_psnr(a: &PlaneSet, b: &PlaneSet) -> f64 {
    let mut sse = 0u64;
    let mut count = 0u64;
    for (a, b) in a.planes.iter().zip(b.planes.iter()) {
        sse += compute_sum_square_error_plane(a, b);
        count += a.width.min(b.width) as u64 * a.height.min(b.height) as u64;
    }
    sum_square_error_to_psnr(sse, count)
}

#[derive(Debug, Default, Copy, Clone)]
struct WindowSums {
    a: u64,
    b: u64,
    aa: u64,
    bb: u64,
    ab: u64,
    count: u64,
}

impl WindowSums {
    fn ssim(&self) -> f64 {
        let n = self.count as f64;
        let mean_a = self.a as f64 / n;
        let mean_b = self.b as f64 / n;
        let var_a = self.aa as f64 / n - mean_a * mean_a;
        let var_b = self.bb as f64 / n - mean_b * mean_b;
        let cov = self.ab as f64 / n - mean_a * mean_b;
        ((2.0 * mean_a * mean_b + SSIM_C1) * (2.0 * cov + SSIM_C2))
            / ((mean_a * mean_a + mean_b * mean_b + SSIM_C1) * (var_a + var_b + SSIM_C2))
    }
}

fn window_sums(
    a: &PixelBuffer<u8>,
    b: &PixelBuffer<u8>,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> WindowSums {
    let mut sums = WindowSums::default();
    for row in y..y + height {
        let ra = &a.row(row, x + width)[x..];
        let rb = &b.row(row, x + width)[x..];
        for (&va, &vb) in ra.iter().zip(rb.iter()) {
            let (va, vb) = (va as u64, vb as u64);
            sums.a += va;
            sums.b += vb;
            sums.aa += va * va;
            sums.bb += vb * vb;
            sums.ab += va * vb;
        }
        sums.count += width as u64;
    }
    sums
}

/// Mean SSIM of 8x8 windows placed every 4 samples.
///
/// Planes smaller than a window are compared as one window.
pub fn calc_frame_ssim(a: &PixelBuffer<u8>, b: &PixelBuffer<u8>) -> f64 {
    let width = a.width.min(b.width) as usize;
    let height = a.height.min(b.height) as usize;
    if width == 0 || height == 0 {
        return 0.0;
    }
    if width < SSIM_WINDOW || height < SSIM_WINDOW {
        return window_sums(a, b, 0, 0, width, height).ssim();
    }
    let rows: Vec<usize> = (0..=height - SSIM_WINDOW).step_by(SSIM_STEP).collect();
    let columns: Vec<usize> = (0..=width - SSIM_WINDOW).step_by(SSIM_STEP).collect();
    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = rows.into_par_iter();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = rows.into_iter();
    }
    let total: f64 = iter
        .map(|y| {
            columns
                .iter()
                .map(|&x| window_sums(a, b, x, y, SSIM_WINDOW, SSIM_WINDOW).ssim())
                .sum::<f64>()
        })
        .sum();
    let windows = height.saturating_sub(SSIM_WINDOW) / SSIM_STEP + 1;
    total / (windows * columns.len()) as f64
}

/// `0.8 * Y + 0.1 * U + 0.1 * V` of the per plane SSIM.
pub fn i420_ssim(a: &PlaneSet, b: &PlaneSet) -> f64 {
    [0.8, 0.1, 0.1]
        .iter()
        .zip(a.planes.iter().zip(b.planes.iter()))
        .map(|(weight, (a, b))| weight * calc_frame_ssim(a, b))
        .sum()
}

/// Guesses where the alpha byte of an opaque 4 byte image lives.
///
/// Returns `BGRA` when the first byte of some pixel is not 255, `ARGB` when
/// the fourth is not, and `None` when every pixel is fully opaque in both.
pub fn argb_detect(argb: &PixelBuffer<u8>) -> Option<FourCC> {
    let row_len = argb.width as usize * 4;
    for y in 0..argb.height as usize {
        for px in argb.row(y, row_len).chunks_exact(4) {
            if px[0] != 255 {
                return Some(PixelFormat::Bgra.fourcc());
            }
            if px[3] != 255 {
                return Some(PixelFormat::Argb.fourcc());
            }
        }
    }
    None
}
