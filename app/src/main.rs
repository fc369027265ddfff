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
use image::ImageReader;
use std::time::Instant;
use yuvkit::{
    abgr_to_i420, argb_rotate, calc_frame_psnr, calc_frame_ssim, i420_to_abgr, i420_scale,
    FilterMode, PixelBuffer, PixelBufferMut, PixelFormat, PlaneSetMut, RotationMode,
};

fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: app <image>");
        return;
    };
    let img = ImageReader::open(&path)
        .unwrap()
        .decode()
        .unwrap()
        .to_rgba8();
    let (width, height) = img.dimensions();
    let rgba = img.into_raw();
    let rgba_stride = width as i32 * 4;

    let mut i420 = PlaneSetMut::alloc(PixelFormat::I420, width, height);
    let strides: Vec<i32> = i420.planes.iter().map(|p| p.stride).collect();

    let start = Instant::now();
    {
        let [y, u, v] = &mut i420.planes[..] else {
            unreachable!()
        };
        abgr_to_i420(
            &rgba,
            rgba_stride,
            y.data.as_mut(),
            strides[0],
            u.data.as_mut(),
            strides[1],
            v.data.as_mut(),
            strides[2],
            width,
            height as i32,
        )
        .unwrap();
    }
    println!("RGBA -> I420 {:?}", start.elapsed());

    let mut restored = vec![0u8; rgba.len()];
    let start = Instant::now();
    i420_to_abgr(
        i420.planes[0].data.borrow(),
        strides[0],
        i420.planes[1].data.borrow(),
        strides[1],
        i420.planes[2].data.borrow(),
        strides[2],
        &mut restored,
        rgba_stride,
        width,
        height as i32,
    )
    .unwrap();
    println!("I420 -> RGBA {:?}", start.elapsed());

    let a = PixelBuffer::new(&rgba, rgba_stride, width * 4, height);
    let b = PixelBuffer::new(&restored, rgba_stride, width * 4, height);
    println!("PSNR {:.3} dB", calc_frame_psnr(&a, &b));
    println!("SSIM {:.5}", calc_frame_ssim(&a, &b));

    let mut half = PlaneSetMut::alloc(PixelFormat::I420, width / 2 + 1, height / 2 + 1);
    let start = Instant::now();
    i420_scale(&i420.to_fixed(), &mut half, FilterMode::Box).unwrap();
    println!("I420 box downscale {:?}", start.elapsed());

    let mut rotated = PixelBufferMut::<u8>::alloc(height, width, 4);
    let start = Instant::now();
    argb_rotate(
        &PixelBuffer::new(&restored, rgba_stride, width, height),
        &mut rotated,
        RotationMode::Rotate90,
    )
    .unwrap();
    println!("RGBA rotate 90 {:?}", start.elapsed());

    image::save_buffer(
        "converted.png",
        &restored,
        width,
        height,
        image::ColorType::Rgba8,
    )
    .unwrap();
    image::save_buffer(
        "rotated.png",
        rotated.data.borrow(),
        height,
        width,
        image::ColorType::Rgba8,
    )
    .unwrap();
}
