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
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yuv_sys::{RotationMode_kRotate180, RotationMode_kRotate90};
use yuvkit::{
    argb_rotate, argb_scale, rotate_plane, FilterMode, PixelBuffer, PixelBufferMut, RotationMode,
};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random()).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let argb = random_bytes(WIDTH as usize * HEIGHT as usize * 4, 1);
    let plane = random_bytes(WIDTH as usize * HEIGHT as usize, 2);
    let argb_src = PixelBuffer::new(&argb, WIDTH as i32 * 4, WIDTH, HEIGHT);
    let plane_src = PixelBuffer::new(&plane, WIDTH as i32, WIDTH, HEIGHT);

    c.bench_function("yuvkit: Rotate 90 ARGB", |b| {
        let mut dst = PixelBufferMut::<u8>::alloc(HEIGHT, WIDTH, 4);
        b.iter(|| {
            argb_rotate(&argb_src, &mut dst, RotationMode::Rotate90).unwrap();
        })
    });

    c.bench_function("libyuv: Rotate 90 ARGB", |b| {
        let mut dst = vec![0u8; argb.len()];
        b.iter(|| unsafe {
            yuv_sys::rs_ARGBRotate(
                argb.as_ptr(),
                WIDTH as i32 * 4,
                dst.as_mut_ptr(),
                HEIGHT as i32 * 4,
                WIDTH as i32,
                HEIGHT as i32,
                RotationMode_kRotate90,
            );
        })
    });

    c.bench_function("yuvkit: Rotate 180 ARGB", |b| {
        let mut dst = PixelBufferMut::<u8>::alloc(WIDTH, HEIGHT, 4);
        b.iter(|| {
            argb_rotate(&argb_src, &mut dst, RotationMode::Rotate180).unwrap();
        })
    });

    c.bench_function("libyuv: Rotate 180 ARGB", |b| {
        let mut dst = vec![0u8; argb.len()];
        b.iter(|| unsafe {
            yuv_sys::rs_ARGBRotate(
                argb.as_ptr(),
                WIDTH as i32 * 4,
                dst.as_mut_ptr(),
                WIDTH as i32 * 4,
                WIDTH as i32,
                HEIGHT as i32,
                RotationMode_kRotate180,
            );
        })
    });

    c.bench_function("yuvkit: Rotate 90 Plane", |b| {
        let mut dst = PixelBufferMut::<u8>::alloc(HEIGHT, WIDTH, 1);
        b.iter(|| {
            rotate_plane(&plane_src, &mut dst, RotationMode::Rotate90).unwrap();
        })
    });

    c.bench_function("libyuv: Rotate 90 Plane", |b| {
        let mut dst = vec![0u8; plane.len()];
        b.iter(|| unsafe {
            yuv_sys::rs_RotatePlane90(
                plane.as_ptr(),
                WIDTH as i32,
                dst.as_mut_ptr(),
                HEIGHT as i32,
                WIDTH as i32,
                HEIGHT as i32,
            );
        })
    });

    c.bench_function("yuvkit: Bilinear ARGB half", |b| {
        let mut dst = PixelBufferMut::<u8>::alloc(WIDTH / 2, HEIGHT / 2, 4);
        b.iter(|| {
            argb_scale(&argb_src, &mut dst, FilterMode::Bilinear).unwrap();
        })
    });

    c.bench_function("yuvkit: Box ARGB quarter", |b| {
        let mut dst = PixelBufferMut::<u8>::alloc(WIDTH / 4, HEIGHT / 4, 4);
        b.iter(|| {
            argb_scale(&argb_src, &mut dst, FilterMode::Box).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
