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
use yuvkit::{convert, ColorMatrix, PixelFormat, PlaneSetMut};

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8)| {
    fuzz_convert(data.0, data.1, data.2, data.3, data.4, data.5);
});

fn fuzz_convert(i_width: u8, i_height: u8, from: u8, to: u8, matrix: u8, fill: u8) {
    if i_width == 0 || i_height == 0 {
        return;
    }
    let formats = PixelFormat::ALL;
    let from = formats[from as usize % formats.len()];
    let to = formats[to as usize % formats.len()];
    let matrix = [
        ColorMatrix::BT601,
        ColorMatrix::JPEG,
        ColorMatrix::BT709,
        ColorMatrix::BT709_FULL,
        ColorMatrix::BT2020,
        ColorMatrix::BT2020_FULL,
    ][matrix as usize % 6];

    let mut src = PlaneSetMut::alloc(from, i_width as u32, i_height as u32);
    for plane in src.planes.iter_mut() {
        plane.data.as_mut().fill(fill);
    }
    let mut dst = PlaneSetMut::alloc(to, i_width as u32, i_height as u32);
    convert(&src.to_fixed(), &mut dst, matrix).unwrap();
}
