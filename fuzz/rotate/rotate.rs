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
use yuvkit::{mirror_frame, rotate_frame, MirrorMode, PixelFormat, PlaneSetMut, RotationMode};

fuzz_target!(|data: (u8, u8, u8, u8, bool)| {
    fuzz_rotate(data.0, data.1, data.2, data.3, data.4);
});

fn fuzz_rotate(i_width: u8, i_height: u8, format: u8, mode: u8, mirror: bool) {
    if i_width == 0 || i_height == 0 {
        return;
    }
    let format = [
        PixelFormat::I420,
        PixelFormat::I444,
        PixelFormat::I400,
        PixelFormat::Nv12,
        PixelFormat::Argb,
    ][format as usize % 5];
    let (width, height) = (i_width as u32, i_height as u32);

    let mut src = PlaneSetMut::alloc(format, width, height);
    for plane in src.planes.iter_mut() {
        plane
            .data
            .as_mut()
            .iter_mut()
            .enumerate()
            .for_each(|(i, v)| *v = i as u8);
    }

    if mirror {
        let mode = [MirrorMode::Horizontal, MirrorMode::Vertical][mode as usize % 2];
        let mut dst = PlaneSetMut::alloc(format, width, height);
        mirror_frame(&src.to_fixed(), &mut dst, mode).unwrap();
        return;
    }

    let mode = [
        RotationMode::Rotate0,
        RotationMode::Rotate90,
        RotationMode::Rotate180,
        RotationMode::Rotate270,
    ][mode as usize % 4];
    let (dst_width, dst_height) = match mode {
        RotationMode::Rotate90 | RotationMode::Rotate270 => (height, width),
        _ => (width, height),
    };
    let mut dst = PlaneSetMut::alloc(format, dst_width, dst_height);
    rotate_frame(&src.to_fixed(), &mut dst, mode).unwrap();
}
