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
use yuvkit::{convert_to_i420, CropRect, FourCC, PixelFormat, PlaneSetMut, RotationMode};

fuzz_target!(|data: (u8, u8, u8, u8, u8, Vec<u8>)| {
    fuzz_convert_sample(data.0, data.1, data.2, data.3, data.4, data.5);
});

fn fuzz_convert_sample(i_width: u8, i_height: u8, crop_x: u8, crop_y: u8, fourcc: u8, sample: Vec<u8>) {
    if i_width == 0 || i_height == 0 {
        return;
    }
    let fourcc = [
        FourCC::from_bytes(*b"I420"),
        FourCC::from_bytes(*b"NV12"),
        FourCC::from_bytes(*b"NV21"),
        FourCC::from_bytes(*b"YUY2"),
        FourCC::from_bytes(*b"UYVY"),
        FourCC::from_bytes(*b"ARGB"),
        FourCC::from_bytes(*b"raw "),
    ][fourcc as usize % 7];
    let (width, height) = (i_width as u32, i_height as u32);
    let crop = CropRect::new(crop_x as u32, crop_y as u32, width, height);
    let src_width = width + crop_x as u32;
    let src_height = height + crop_y as u32;
    let mut dst = PlaneSetMut::alloc(PixelFormat::I420, width, height);
    // Short samples and odd crops must fail cleanly.
    let _ = convert_to_i420(
        &sample,
        fourcc,
        crop,
        src_width,
        src_height as i32,
        RotationMode::Rotate0,
        &mut dst,
    );
}
