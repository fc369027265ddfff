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
use yuvkit::{argb_to_i420, convert, i420_to_argb, ColorMatrix, PixelFormat, PlaneSet, PlaneSetMut};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn random_argb() -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..WIDTH as usize * HEIGHT as usize * 4)
        .map(|_| rng.random())
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let argb = random_argb();
    let argb_stride = WIDTH as i32 * 4;
    let chroma_width = WIDTH.div_ceil(2) as usize;
    let chroma_height = HEIGHT.div_ceil(2) as usize;

    let mut y_plane = vec![0u8; WIDTH as usize * HEIGHT as usize];
    let mut u_plane = vec![0u8; chroma_width * chroma_height];
    let mut v_plane = vec![0u8; chroma_width * chroma_height];

    c.bench_function("yuvkit: ARGB -> I420", |b| {
        b.iter(|| {
            argb_to_i420(
                &argb,
                argb_stride,
                &mut y_plane,
                WIDTH as i32,
                &mut u_plane,
                chroma_width as i32,
                &mut v_plane,
                chroma_width as i32,
                WIDTH,
                HEIGHT as i32,
            )
            .unwrap();
        })
    });

    c.bench_function("libyuv: ARGB -> I420", |b| {
        b.iter(|| unsafe {
            yuv_sys::rs_ARGBToI420(
                argb.as_ptr(),
                argb_stride,
                y_plane.as_mut_ptr(),
                WIDTH as i32,
                u_plane.as_mut_ptr(),
                chroma_width as i32,
                v_plane.as_mut_ptr(),
                chroma_width as i32,
                WIDTH as i32,
                HEIGHT as i32,
            );
        })
    });

    let mut restored = vec![0u8; argb.len()];

    c.bench_function("yuvkit: I420 -> ARGB", |b| {
        b.iter(|| {
            i420_to_argb(
                &y_plane,
                WIDTH as i32,
                &u_plane,
                chroma_width as i32,
                &v_plane,
                chroma_width as i32,
                &mut restored,
                argb_stride,
                WIDTH,
                HEIGHT as i32,
            )
            .unwrap();
        })
    });

    c.bench_function("libyuv: I420 -> ARGB", |b| {
        b.iter(|| unsafe {
            yuv_sys::rs_I420ToARGB(
                y_plane.as_ptr(),
                WIDTH as i32,
                u_plane.as_ptr(),
                chroma_width as i32,
                v_plane.as_ptr(),
                chroma_width as i32,
                restored.as_mut_ptr(),
                argb_stride,
                WIDTH as i32,
                HEIGHT as i32,
            );
        })
    });

    let src = PlaneSet::packed(PixelFormat::Argb, &argb, argb_stride, WIDTH, HEIGHT);
    c.bench_function("yuvkit: ARGB -> NV21 (composed route)", |b| {
        let mut dst = PlaneSetMut::alloc(PixelFormat::Nv21, WIDTH, HEIGHT);
        b.iter(|| {
            convert(&src, &mut dst, ColorMatrix::BT709).unwrap();
        })
    });

    c.bench_function("yuvkit: ARGB -> UYVY", |b| {
        let mut dst = PlaneSetMut::alloc(PixelFormat::Uyvy, WIDTH, HEIGHT);
        b.iter(|| {
            convert(&src, &mut dst, ColorMatrix::BT601).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
