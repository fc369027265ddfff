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
use crate::images::{PixelBuffer, PixelBufferMut, PlaneSet, PlaneSetMut};
use crate::pixel_format::PixelFormat;
use crate::scale::plane_channels;
use crate::yuv_error::YuvError;
use crate::yuv_support::MirrorMode;
use std::fmt::Debug;

fn mirror_channels<T, const CN: usize>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBufferMut<T>,
    mode: MirrorMode,
) where
    T: Copy + Debug + Send + Sync,
{
    let row_len = src.width as usize * CN;
    let src = match mode {
        MirrorMode::Vertical => src.flipped(),
        MirrorMode::Horizontal => *src,
    };
    dst.for_each_row(row_len, |y, dst| {
        let src = src.row(y, row_len);
        match mode {
            MirrorMode::Horizontal => {
                for (dst, src) in dst.chunks_exact_mut(CN).zip(src.chunks_exact(CN).rev()) {
                    dst.copy_from_slice(src);
                }
            }
            MirrorMode::Vertical => dst.copy_from_slice(src),
        }
    });
}

fn mirror_checked<T, const CN: usize>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBufferMut<T>,
    mode: MirrorMode,
) -> Result<(), YuvError>
where
    T: Copy + Debug + Send + Sync,
{
    src.check_constraints(CN)?;
    dst.check_constraints(CN)?;
    if (src.width, src.height) != (dst.width, dst.height) {
        return Err(YuvError::ImageDimensionsNotMatch);
    }
    mirror_channels::<T, CN>(src, dst, mode);
    Ok(())
}

/// Mirrors a single 8 bit plane.
///
/// # Arguments
///
/// * `src`: Source plane
/// * `dst`: Destination plane of the same size
/// * `mode`: Refer to [MirrorMode] for mode info
///
/// returns: Result<(), [YuvError]>
///
pub fn mirror_plane(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    mode: MirrorMode,
) -> Result<(), YuvError> {
    mirror_checked::<u8, 1>(src, dst, mode)
}

/// Mirrors ARGB left to right.
pub fn argb_mirror(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    mirror_checked::<u8, 4>(src, dst, MirrorMode::Horizontal)
}

/// Mirrors every plane of an 8 bit frame of the same format.
pub fn mirror_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    mode: MirrorMode,
) -> Result<(), YuvError> {
    if src.format != dst.format {
        return Err(YuvError::UnsupportedConversion {
            from: src.format,
            to: dst.format,
        });
    }
    let channels = plane_channels(src.format).ok_or(YuvError::UnsupportedFormat(src.format))?;
    if (src.width, src.height) != (dst.width, dst.height) {
        return Err(YuvError::ImageDimensionsNotMatch);
    }
    src.check_constraints()?;
    dst.check_constraints()?;
    for ((src, dst), &cn) in src.planes.iter().zip(dst.planes.iter_mut()).zip(channels) {
        match cn {
            1 => mirror_channels::<u8, 1>(src, dst, mode),
            2 => mirror_channels::<u8, 2>(src, dst, mode),
            3 => mirror_channels::<u8, 3>(src, dst, mode),
            _ => mirror_channels::<u8, 4>(src, dst, mode),
        }
    }
    Ok(())
}

pub fn i400_mirror(src: &PlaneSet, dst: &mut PlaneSetMut) -> Result<(), YuvError> {
    if src.format != PixelFormat::I400 {
        return Err(YuvError::UnsupportedFormat(src.format));
    }
    mirror_frame(src, dst, MirrorMode::Horizontal)
}

pub fn i420_mirror(src: &PlaneSet, dst: &mut PlaneSetMut) -> Result<(), YuvError> {
    if src.format != PixelFormat::I420 {
        return Err(YuvError::UnsupportedFormat(src.format));
    }
    mirror_frame(src, dst, MirrorMode::Horizontal)
}
