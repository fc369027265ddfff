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

#![no_main]

use libfuzzer_sys::fuzz_target;
use yuvkit::{scale_frame, FilterMode, PixelFormat, PlaneSetMut};

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8)| {
    fuzz_scale(data.0, data.1, data.2, data.3, data.4, data.5);
});

fn fuzz_scale(src_width: u8, src_height: u8, dst_width: u8, dst_height: u8, format: u8, filter: u8) {
    if src_width == 0 || src_height == 0 {
        return;
    }
    let format = [
        PixelFormat::I420,
        PixelFormat::I422,
        PixelFormat::I444,
        PixelFormat::I400,
        PixelFormat::Nv12,
        PixelFormat::Argb,
        PixelFormat::Rgb24,
    ][format as usize % 7];
    let filter = [
        FilterMode::None,
        FilterMode::Linear,
        FilterMode::Bilinear,
        FilterMode::Box,
    ][filter as usize % 4];

    let mut src = PlaneSetMut::alloc(format, src_width as u32, src_height as u32);
    for plane in src.planes.iter_mut() {
        plane.data.as_mut().fill(77);
    }
    let mut dst = PlaneSetMut::alloc(format, dst_width as u32, dst_height as u32);
    scale_frame(&src.to_fixed(), &mut dst, filter).unwrap();
    for plane in dst.planes.iter() {
        assert!(plane.data.borrow().iter().all(|&v| v == 77));
    }
}
