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
use crate::images::{CropRect, PixelBuffer, PixelBufferMut, PlaneSet, PlaneSetMut};
use crate::pixel_format::PixelFormat;
use crate::yuv_error::YuvError;
use crate::yuv_support::FilterMode;
use num_traits::AsPrimitive;
use std::fmt::Debug;

/// Two source taps with an 8 bit weight for the second one.
#[derive(Debug, Copy, Clone)]
struct Tap {
    i0: usize,
    i1: usize,
    frac: u64,
}

/// Source samples overlapped by one destination sample, weights in units of 1/dst.
#[derive(Debug, Clone)]
struct BoxSpan {
    start: usize,
    weights: Vec<u64>,
}

fn nearest_taps(src: usize, dst: usize) -> Vec<Tap> {
    (0..dst)
        .map(|d| {
            let i0 = (d as u64 * src as u64 / dst as u64) as usize;
            Tap { i0, i1: i0, frac: 0 }
        })
        .collect()
}

/// Centre aligned taps in 16.16 fixed point.
fn bilinear_taps(src: usize, dst: usize) -> Vec<Tap> {
    let step = ((src as i64) << 16) / dst as i64;
    (0..dst)
        .map(|d| {
            let pos = (d as i64 * step + step / 2 - 0x8000).max(0);
            let i0 = ((pos >> 16) as usize).min(src - 1);
            let i1 = (i0 + 1).min(src - 1);
            let frac = if i1 == i0 { 0 } else { ((pos >> 8) & 0xff) as u64 };
            Tap { i0, i1, frac }
        })
        .collect()
}

fn box_spans(src: usize, dst: usize) -> Vec<BoxSpan> {
    let (src, dst) = (src as u64, dst as u64);
    (0..dst)
        .map(|d| {
            let lo = d * src;
            let hi = lo + src;
            let first = lo / dst;
            let last = (hi - 1) / dst;
            let weights = (first..=last)
                .map(|i| ((i + 1) * dst).min(hi) - (i * dst).max(lo))
                .collect();
            BoxSpan {
                start: first as usize,
                weights,
            }
        })
        .collect()
}

/// Box only pays off past a 2x reduction, when neither axis goes that far it interpolates.
fn effective_filter(filter: FilterMode, src: (u32, u32), dst: (u32, u32)) -> FilterMode {
    let reduces_past_half = |src: u32, dst: u32| (dst as u64) * 2 < src as u64;
    match filter {
        FilterMode::Box if !reduces_past_half(src.0, dst.0) && !reduces_past_half(src.1, dst.1) => {
            FilterMode::Bilinear
        }
        f => f,
    }
}

/// Scales `src` to `dst`, both holding `CN` interleaved channels.
pub(crate) fn scale_channels<T, const CN: usize>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBufferMut<T>,
    filter: FilterMode,
) where
    T: Copy + Debug + Send + Sync + AsPrimitive<u64> + 'static,
    u64: AsPrimitive<T>,
{
    let full = (dst.width, dst.height);
    scale_region::<T, CN>(src, dst, full, (0, 0), filter);
}

/// Scales `src` to a virtual `full` sized image and writes the window at `origin` into `dst`.
fn scale_region<T, const CN: usize>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBufferMut<T>,
    full: (u32, u32),
    origin: (u32, u32),
    filter: FilterMode,
) where
    T: Copy + Debug + Send + Sync + AsPrimitive<u64> + 'static,
    u64: AsPrimitive<T>,
{
    if dst.width == 0 || dst.height == 0 || src.width == 0 || src.height == 0 {
        return;
    }
    let src_row_len = src.width as usize * CN;
    let dst_row_len = dst.width as usize * CN;
    let (ox, oy) = (origin.0 as usize, origin.1 as usize);

    if (src.width, src.height) == full {
        dst.for_each_row(dst_row_len, |y, row| {
            let start = ox * CN;
            row.copy_from_slice(&src.row(y + oy, src_row_len)[start..start + dst_row_len]);
        });
        return;
    }

    let (sw, sh) = (src.width as usize, src.height as usize);
    let (fw, fh) = (full.0 as usize, full.1 as usize);

    match effective_filter(filter, (src.width, src.height), full) {
        FilterMode::Box => {
            let xs = box_spans(sw, fw);
            let ys = box_spans(sh, fh);
            let total = sw as u64 * sh as u64;
            dst.for_each_row(dst_row_len, |y, row| {
                let span_y = &ys[y + oy];
                for (x, px) in row.chunks_exact_mut(CN).enumerate() {
                    let span_x = &xs[x + ox];
                    let mut acc = [0u64; CN];
                    for (j, &wy) in span_y.weights.iter().enumerate() {
                        let src_row = src.row(span_y.start + j, src_row_len);
                        for (i, &wx) in span_x.weights.iter().enumerate() {
                            let base = (span_x.start + i) * CN;
                            let w = wx * wy;
                            for (c, acc) in acc.iter_mut().enumerate() {
                                let v: u64 = src_row[base + c].as_();
                                *acc += v * w;
                            }
                        }
                    }
                    for (dst, acc) in px.iter_mut().zip(acc.iter()) {
                        *dst = ((acc + total / 2) / total).as_();
                    }
                }
            });
        }
        mode => {
            let xs = match mode {
                FilterMode::None => nearest_taps(sw, fw),
                _ => bilinear_taps(sw, fw),
            };
            let ys = match mode {
                FilterMode::Bilinear => bilinear_taps(sh, fh),
                _ => nearest_taps(sh, fh),
            };
            dst.for_each_row(dst_row_len, |y, row| {
                let ty = ys[y + oy];
                let r0 = src.row(ty.i0, src_row_len);
                let r1 = src.row(ty.i1, src_row_len);
                for (x, px) in row.chunks_exact_mut(CN).enumerate() {
                    let tx = xs[x + ox];
                    for (c, dst) in px.iter_mut().enumerate() {
                        let a0: u64 = r0[tx.i0 * CN + c].as_();
                        let a1: u64 = r0[tx.i1 * CN + c].as_();
                        let b0: u64 = r1[tx.i0 * CN + c].as_();
                        let b1: u64 = r1[tx.i1 * CN + c].as_();
                        let top = a0 * (256 - tx.frac) + a1 * tx.frac;
                        let bottom = b0 * (256 - tx.frac) + b1 * tx.frac;
                        let v = (top * (256 - ty.frac) + bottom * ty.frac + 0x8000) >> 16;
                        *dst = v.as_();
                    }
                }
            });
        }
    }
}

fn scale_checked<T, const CN: usize>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBufferMut<T>,
    filter: FilterMode,
) -> Result<(), YuvError>
where
    T: Copy + Debug + Send + Sync + AsPrimitive<u64> + 'static,
    u64: AsPrimitive<T>,
{
    if dst.width == 0 || dst.height == 0 {
        return Ok(());
    }
    src.check_constraints(CN)?;
    dst.check_constraints(CN)?;
    scale_channels::<T, CN>(src, dst, filter);
    Ok(())
}

/// Scales a single 8 bit plane.
///
/// A destination with a zero dimension is left alone.
pub fn scale_plane(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    filter: FilterMode,
) -> Result<(), YuvError> {
    scale_checked::<u8, 1>(src, dst, filter)
}

/// Scales a single 16 bit plane, strides in elements.
pub fn scale_plane_16(
    src: &PixelBuffer<u16>,
    dst: &mut PixelBufferMut<u16>,
    filter: FilterMode,
) -> Result<(), YuvError> {
    scale_checked::<u16, 1>(src, dst, filter)
}

/// Scales an interleaved UV plane, widths count chroma pairs.
pub fn scale_uv(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    filter: FilterMode,
) -> Result<(), YuvError> {
    scale_checked::<u8, 2>(src, dst, filter)
}

pub fn argb_scale(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    filter: FilterMode,
) -> Result<(), YuvError> {
    scale_checked::<u8, 4>(src, dst, filter)
}

/// Scales `src` to the size of `dst` but only writes pixels inside `clip`.
pub fn argb_scale_clip(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    clip: CropRect,
    filter: FilterMode,
) -> Result<(), YuvError> {
    if dst.width == 0 || dst.height == 0 {
        return Ok(());
    }
    src.check_constraints(4)?;
    dst.check_constraints(4)?;
    let full = (dst.width, dst.height);
    let mut window = dst.crop_mut(clip.x, clip.y, clip.width, clip.height, 4)?;
    scale_region::<u8, 4>(src, &mut window, full, (clip.x, clip.y), filter);
    Ok(())
}

const THREE_PLANES: &[usize] = &[1, 1, 1];
const BI_PLANAR: &[usize] = &[1, 2];

/// Channels per plane of the formats the frame scaler handles.
pub(crate) fn plane_channels(format: PixelFormat) -> Option<&'static [usize]> {
    match format {
        PixelFormat::I420 | PixelFormat::Yv12 | PixelFormat::I422 | PixelFormat::I444 => {
            Some(THREE_PLANES)
        }
        PixelFormat::I400 => Some(&[1]),
        PixelFormat::Nv12 | PixelFormat::Nv21 => Some(BI_PLANAR),
        PixelFormat::Argb | PixelFormat::Abgr | PixelFormat::Bgra | PixelFormat::Rgba => {
            Some(&[4])
        }
        PixelFormat::Rgb24 | PixelFormat::Raw => Some(&[3]),
        _ => None,
    }
}

/// Scales every plane of an 8 bit frame, chroma sized from the luma dimensions.
pub fn scale_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    filter: FilterMode,
) -> Result<(), YuvError> {
    if src.format != dst.format {
        return Err(YuvError::UnsupportedConversion {
            from: src.format,
            to: dst.format,
        });
    }
    let channels = plane_channels(src.format).ok_or(YuvError::UnsupportedFormat(src.format))?;
    if dst.width == 0 || dst.height == 0 {
        return Ok(());
    }
    src.check_constraints()?;
    dst.check_constraints()?;
    log::trace!(
        "scaling {:?} {}x{} -> {}x{} with {:?}",
        src.format,
        src.width,
        src.height,
        dst.width,
        dst.height,
        filter
    );
    for ((src, dst), &cn) in src.planes.iter().zip(dst.planes.iter_mut()).zip(channels) {
        match cn {
            1 => scale_channels::<u8, 1>(src, dst, filter),
            2 => scale_channels::<u8, 2>(src, dst, filter),
            3 => scale_channels::<u8, 3>(src, dst, filter),
            _ => scale_channels::<u8, 4>(src, dst, filter),
        }
    }
    Ok(())
}

fn expect_format(frame_format: PixelFormat, format: PixelFormat) -> Result<(), YuvError> {
    if frame_format != format {
        return Err(YuvError::UnsupportedFormat(frame_format));
    }
    Ok(())
}

pub fn i420_scale(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    filter: FilterMode,
) -> Result<(), YuvError> {
    expect_format(src.format, PixelFormat::I420)?;
    expect_format(dst.format, PixelFormat::I420)?;
    scale_frame(src, dst, filter)
}

pub fn i444_scale(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    filter: FilterMode,
) -> Result<(), YuvError> {
    expect_format(src.format, PixelFormat::I444)?;
    expect_format(dst.format, PixelFormat::I444)?;
    scale_frame(src, dst, filter)
}

/// Scales a 16 bit 4:2:0 frame given as separate planes, strides in elements.
#[allow(clippy::too_many_arguments)]
pub fn i420_scale_16(
    src_y: &PixelBuffer<u16>,
    src_u: &PixelBuffer<u16>,
    src_v: &PixelBuffer<u16>,
    dst_y: &mut PixelBufferMut<u16>,
    dst_u: &mut PixelBufferMut<u16>,
    dst_v: &mut PixelBufferMut<u16>,
    filter: FilterMode,
) -> Result<(), YuvError> {
    let chroma = |w: u32, h: u32| (w.div_ceil(2), h.div_ceil(2));
    for (y, u, v) in [
        (
            (src_y.width, src_y.height),
            (src_u.width, src_u.height),
            (src_v.width, src_v.height),
        ),
        (
            (dst_y.width, dst_y.height),
            (dst_u.width, dst_u.height),
            (dst_v.width, dst_v.height),
        ),
    ] {
        if chroma(y.0, y.1) != u || u != v {
            return Err(YuvError::ImageDimensionsNotMatch);
        }
    }
    scale_plane_16(src_y, dst_y, filter)?;
    scale_plane_16(src_u, dst_u, filter)?;
    scale_plane_16(src_v, dst_v, filter)
}
