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
use crate::convert::convert;
use crate::geometry::rotate_frame;
use crate::images::{CropRect, PlaneSet, PlaneSetMut};
use crate::pixel_format::{FourCC, PixelFormat};
use crate::yuv_error::{MismatchedSize, YuvError};
use crate::yuv_support::{ColorMatrix, RotationMode};

/// `(length, stride)` of every plane of a contiguous sample, planes stored back to back.
///
/// `stride` is the byte stride of the first plane, zero meaning tightly packed.
/// Other planes keep the same number of pixels per row, divided by their subsampling.
fn sample_planes(format: PixelFormat, stride: usize, width: u32, height: u32) -> Vec<(usize, usize)> {
    let layouts = format.planes();
    let first = layouts[0];
    let first_stride = if stride == 0 {
        first.dimensions(width, height).0 as usize * first.bytes_per_pixel as usize
    } else {
        stride
    };
    let row_pixels = first_stride / first.bytes_per_pixel as usize;
    layouts
        .iter()
        .enumerate()
        .map(|(index, layout)| {
            let plane_stride = if index == 0 {
                first_stride
            } else {
                row_pixels.div_ceil(layout.h_sub as usize) * layout.bytes_per_pixel as usize
            };
            let (_, plane_height) = layout.dimensions(width, height);
            (plane_stride * plane_height as usize, plane_stride)
        })
        .collect()
}

fn sample_too_small(index: usize, expected: usize, received: usize) -> YuvError {
    YuvError::PlaneSizeMismatch(index, MismatchedSize { expected, received })
}

fn split_sample<'a>(
    format: PixelFormat,
    sample: &'a [u8],
    width: u32,
    height: u32,
) -> Result<PlaneSet<'a>, YuvError> {
    let mut planes = Vec::with_capacity(format.plane_count());
    let mut offset = 0usize;
    for (index, (len, stride)) in sample_planes(format, 0, width, height).into_iter().enumerate() {
        let plane = sample
            .get(offset..offset + len)
            .ok_or_else(|| sample_too_small(index, offset + len, sample.len()))?;
        planes.push((plane, stride as i32));
        offset += len;
    }
    PlaneSet::from_planes(format, &planes, width, height)
}

fn split_sample_mut<'a>(
    format: PixelFormat,
    sample: &'a mut [u8],
    stride: usize,
    width: u32,
    height: u32,
) -> Result<PlaneSetMut<'a>, YuvError> {
    let layout = sample_planes(format, stride, width, height);
    let required: usize = layout.iter().map(|&(len, _)| len).sum();
    if sample.len() < required {
        return Err(sample_too_small(layout.len() - 1, required, sample.len()));
    }
    let mut planes = Vec::with_capacity(layout.len());
    let mut rest = sample;
    for (len, stride) in layout {
        let (plane, tail) = rest.split_at_mut(len);
        planes.push((plane, stride as i32));
        rest = tail;
    }
    PlaneSetMut::from_planes(format, planes, width, height)
}

/// Crops a frame, offsets of subsampled formats rounded down to their chroma grid.
fn crop_frame<'a>(frame: &PlaneSet<'a>, crop: CropRect) -> Result<PlaneSet<'a>, YuvError> {
    if crop.width == 0 || crop.height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    let layouts = frame.format.planes();
    let h_align = layouts.iter().map(|l| l.h_sub).max().unwrap_or(1);
    let v_align = layouts.iter().map(|l| l.v_sub).max().unwrap_or(1);
    let x = crop.x - crop.x % h_align;
    let y = crop.y - crop.y % v_align;
    if x.checked_add(crop.width).is_none_or(|r| r > frame.width)
        || y.checked_add(crop.height).is_none_or(|b| b > frame.height)
    {
        return Err(YuvError::InvalidCrop);
    }
    let planes = layouts
        .iter()
        .zip(frame.planes.iter())
        .map(|(layout, plane)| {
            let (width, height) = layout.dimensions(crop.width, crop.height);
            plane.crop(
                x / layout.h_sub,
                y / layout.v_sub,
                width,
                height,
                layout.bytes_per_pixel as usize,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PlaneSet {
        format: frame.format,
        width: crop.width,
        height: crop.height,
        planes,
    })
}

#[allow(clippy::too_many_arguments)]
fn convert_sample(
    sample: &[u8],
    fourcc: FourCC,
    crop: CropRect,
    src_width: u32,
    src_height: i32,
    rotation: RotationMode,
    dst: &mut PlaneSetMut,
    expected: PixelFormat,
) -> Result<(), YuvError> {
    if dst.format != expected {
        return Err(YuvError::UnsupportedFormat(dst.format));
    }
    let format = PixelFormat::from_fourcc(fourcc)?;
    let matrix = fourcc.implied_matrix().unwrap_or(ColorMatrix::BT601);
    let rows = src_height.unsigned_abs();
    if src_width == 0 || rows == 0 {
        return Err(YuvError::ZeroBaseSize);
    }

    let frame = split_sample(format, sample, src_width, rows)?;
    let frame = if src_height < 0 { frame.flipped() } else { frame };
    let frame = crop_frame(&frame, crop)?;

    let rotated = if rotation.swaps_dimensions() {
        (crop.height, crop.width)
    } else {
        (crop.width, crop.height)
    };
    if (dst.width, dst.height) != rotated {
        return Err(YuvError::ImageDimensionsNotMatch);
    }
    dst.check_constraints()?;

    log::trace!(
        "sample {} {}x{} cropped to {:?}, rotation {:?}",
        fourcc,
        src_width,
        src_height,
        crop,
        rotation
    );
    if rotation == RotationMode::Rotate0 {
        return convert(&frame, dst, matrix);
    }
    let mut upright = PlaneSetMut::alloc(expected, crop.width, crop.height);
    convert(&frame, &mut upright, matrix)?;
    rotate_frame(&upright.to_fixed(), dst, rotation)
}

/// Converts a camera sample of any known FourCC into I420.
///
/// # Arguments
///
/// * `sample`: Contiguous sample, planes stored back to back and tightly packed
/// * `fourcc`: Sample format, aliases like `J420` also select their color matrix
/// * `crop`: Window of the sample to convert, offsets of subsampled formats are rounded down to even
/// * `src_width`: Sample width
/// * `src_height`: Sample height, negative flips the sample vertically
/// * `rotation`: Clockwise rotation applied after conversion
/// * `dst`: I420 destination, dimensions of `crop` swapped for 90 and 270 rotations
///
/// returns: Result<(), [YuvError]>
///
#[allow(clippy::too_many_arguments)]
pub fn convert_to_i420(
    sample: &[u8],
    fourcc: FourCC,
    crop: CropRect,
    src_width: u32,
    src_height: i32,
    rotation: RotationMode,
    dst: &mut PlaneSetMut,
) -> Result<(), YuvError> {
    convert_sample(
        sample,
        fourcc,
        crop,
        src_width,
        src_height,
        rotation,
        dst,
        PixelFormat::I420,
    )
}

/// Same as [convert_to_i420] with an ARGB destination.
#[allow(clippy::too_many_arguments)]
pub fn convert_to_argb(
    sample: &[u8],
    fourcc: FourCC,
    crop: CropRect,
    src_width: u32,
    src_height: i32,
    rotation: RotationMode,
    dst: &mut PlaneSetMut,
) -> Result<(), YuvError> {
    convert_sample(
        sample,
        fourcc,
        crop,
        src_width,
        src_height,
        rotation,
        dst,
        PixelFormat::Argb,
    )
}

/// Writes an I420 frame as a contiguous sample of any known FourCC.
///
/// `dst_stride` is the byte stride of the first plane, zero for tightly packed.
/// Following planes come right after it with a stride scaled by their subsampling.
pub fn convert_from_i420(
    src: &PlaneSet,
    dst_sample: &mut [u8],
    dst_stride: i32,
    fourcc: FourCC,
) -> Result<(), YuvError> {
    if src.format != PixelFormat::I420 {
        return Err(YuvError::UnsupportedFormat(src.format));
    }
    let format = PixelFormat::from_fourcc(fourcc)?;
    let matrix = fourcc.implied_matrix().unwrap_or(ColorMatrix::BT601);
    let mut dst = split_sample_mut(
        format,
        dst_sample,
        dst_stride.unsigned_abs() as usize,
        src.width,
        src.height,
    )?;
    convert(src, &mut dst, matrix)
}
