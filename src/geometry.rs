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
use crate::yuv_support::{RotationMode, YuvNVOrder};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::slice::ParallelSliceMut;
use std::fmt::Debug;

/// Tile edge of the blocked transpose, in pixels.
const TILE: usize = 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Turn {
    Copy,
    Transpose,
    Clockwise,
    HalfTurn,
    CounterClockwise,
}

impl From<RotationMode> for Turn {
    fn from(mode: RotationMode) -> Self {
        match mode {
            RotationMode::Rotate0 => Turn::Copy,
            RotationMode::Rotate90 => Turn::Clockwise,
            RotationMode::Rotate180 => Turn::HalfTurn,
            RotationMode::Rotate270 => Turn::CounterClockwise,
        }
    }
}

impl Turn {
    #[inline]
    fn swaps_dimensions(self) -> bool {
        matches!(self, Turn::Transpose | Turn::Clockwise | Turn::CounterClockwise)
    }

    /// Source `(y, x)` of destination pixel `(row, col)` for a `w` x `h` source.
    #[inline(always)]
    fn source_of(self, w: usize, h: usize, row: usize, col: usize) -> (usize, usize) {
        match self {
            Turn::Copy => (row, col),
            Turn::Transpose => (col, row),
            Turn::Clockwise => (h - 1 - col, row),
            Turn::HalfTurn => (h - 1 - row, w - 1 - col),
            Turn::CounterClockwise => (col, w - 1 - row),
        }
    }
}

fn check_turned_dimensions(src: (u32, u32), dst: (u32, u32), turn: Turn) -> Result<(), YuvError> {
    let expected = if turn.swaps_dimensions() {
        (src.1, src.0)
    } else {
        src
    };
    if dst != expected {
        return Err(YuvError::ImageDimensionsNotMatch);
    }
    Ok(())
}

/// Moves `DST_CN` elements of every `SRC_CN` element source pixel, starting at `channel`.
///
/// Destination rows are walked in bands of [TILE] rows and [TILE] columns
/// so a band touches a small square of the source at a time.
fn turn_channels<T, const SRC_CN: usize, const DST_CN: usize>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBufferMut<T>,
    turn: Turn,
    channel: usize,
) where
    T: Copy + Debug + Send + Sync,
{
    let (w, h) = (src.width as usize, src.height as usize);
    let src_row_len = w * SRC_CN;
    let dst_width = dst.width as usize;
    let mut rows = dst.rows_mut(dst_width * DST_CN);
    let bands;
    #[cfg(feature = "rayon")]
    {
        bands = rows.par_chunks_mut(TILE).enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        bands = rows.chunks_mut(TILE).enumerate();
    }
    bands.for_each(|(band, rows)| {
        for c0 in (0..dst_width).step_by(TILE) {
            let c1 = (c0 + TILE).min(dst_width);
            for (i, row) in rows.iter_mut().enumerate() {
                let r = band * TILE + i;
                for c in c0..c1 {
                    let (sy, sx) = turn.source_of(w, h, r, c);
                    let s = sx * SRC_CN + channel;
                    row[c * DST_CN..(c + 1) * DST_CN]
                        .copy_from_slice(&src.row(sy, src_row_len)[s..s + DST_CN]);
                }
            }
        }
    });
}

fn turn_checked<T, const CN: usize>(
    src: &PixelBuffer<T>,
    dst: &mut PixelBufferMut<T>,
    turn: Turn,
) -> Result<(), YuvError>
where
    T: Copy + Debug + Send + Sync,
{
    src.check_constraints(CN)?;
    dst.check_constraints(CN)?;
    check_turned_dimensions((src.width, src.height), (dst.width, dst.height), turn)?;
    turn_channels::<T, CN, CN>(src, dst, turn, 0);
    Ok(())
}

fn split_turn_checked(
    src_uv: &PixelBuffer<u8>,
    dst_u: &mut PixelBufferMut<u8>,
    dst_v: &mut PixelBufferMut<u8>,
    turn: Turn,
) -> Result<(), YuvError> {
    src_uv.check_constraints(2)?;
    let src_size = (src_uv.width, src_uv.height);
    for dst in [&*dst_u, &*dst_v] {
        dst.check_constraints(1)?;
        check_turned_dimensions(src_size, (dst.width, dst.height), turn)?;
    }
    turn_channels::<u8, 2, 1>(src_uv, dst_u, turn, 0);
    turn_channels::<u8, 2, 1>(src_uv, dst_v, turn, 1);
    Ok(())
}

/// Writes rows of `src` as columns of `dst`.
///
/// `dst` must be `src.height` wide and `src.width` tall.
pub fn transpose_plane(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    turn_checked::<u8, 1>(src, dst, Turn::Transpose)
}

/// Transposes an interleaved UV plane into two planes.
pub fn transpose_uv(
    src_uv: &PixelBuffer<u8>,
    dst_a: &mut PixelBufferMut<u8>,
    dst_b: &mut PixelBufferMut<u8>,
) -> Result<(), YuvError> {
    split_turn_checked(src_uv, dst_a, dst_b, Turn::Transpose)
}

/// Rotates a single 8 bit plane.
///
/// # Arguments
///
/// * `src`: Source plane
/// * `dst`: Destination plane, width and height swapped for 90 and 270 degrees
/// * `mode`: Refer to [RotationMode] for mode info
///
/// returns: Result<(), [YuvError]>
///
pub fn rotate_plane(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    mode: RotationMode,
) -> Result<(), YuvError> {
    turn_checked::<u8, 1>(src, dst, mode.into())
}

pub fn rotate_plane_90(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    rotate_plane(src, dst, RotationMode::Rotate90)
}

pub fn rotate_plane_180(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    rotate_plane(src, dst, RotationMode::Rotate180)
}

pub fn rotate_plane_270(src: &PixelBuffer<u8>, dst: &mut PixelBufferMut<u8>) -> Result<(), YuvError> {
    rotate_plane(src, dst, RotationMode::Rotate270)
}

/// Rotates a 16 bit plane, strides in elements.
pub fn rotate_plane_16(
    src: &PixelBuffer<u16>,
    dst: &mut PixelBufferMut<u16>,
    mode: RotationMode,
) -> Result<(), YuvError> {
    turn_checked::<u16, 1>(src, dst, mode.into())
}

/// Rotates an interleaved UV plane and splits it into U and V planes.
pub fn rotate_uv(
    src_uv: &PixelBuffer<u8>,
    dst_u: &mut PixelBufferMut<u8>,
    dst_v: &mut PixelBufferMut<u8>,
    mode: RotationMode,
) -> Result<(), YuvError> {
    split_turn_checked(src_uv, dst_u, dst_v, mode.into())
}

/// Rotates 4 byte pixels, channel order does not matter.
pub fn argb_rotate(
    src: &PixelBuffer<u8>,
    dst: &mut PixelBufferMut<u8>,
    mode: RotationMode,
) -> Result<(), YuvError> {
    turn_checked::<u8, 4>(src, dst, mode.into())
}

/// Rotates every plane of an 8 bit frame of the same format.
pub fn rotate_frame(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    mode: RotationMode,
) -> Result<(), YuvError> {
    if src.format != dst.format {
        return Err(YuvError::UnsupportedConversion {
            from: src.format,
            to: dst.format,
        });
    }
    let channels = plane_channels(src.format).ok_or(YuvError::UnsupportedFormat(src.format))?;
    let turn: Turn = mode.into();
    // A quarter turn of 4:2:2 chroma is not 4:2:2 chroma any more.
    if turn.swaps_dimensions() && src.format.planes().iter().any(|l| l.h_sub != l.v_sub) {
        return Err(YuvError::UnsupportedFormat(src.format));
    }
    check_turned_dimensions((src.width, src.height), (dst.width, dst.height), turn)?;
    src.check_constraints()?;
    dst.check_constraints()?;
    for (src, dst) in src.planes.iter().zip(dst.planes.iter()) {
        check_turned_dimensions((src.width, src.height), (dst.width, dst.height), turn)?;
    }
    for ((src, dst), &cn) in src.planes.iter().zip(dst.planes.iter_mut()).zip(channels) {
        match cn {
            1 => turn_channels::<u8, 1, 1>(src, dst, turn, 0),
            2 => turn_channels::<u8, 2, 2>(src, dst, turn, 0),
            3 => turn_channels::<u8, 3, 3>(src, dst, turn, 0),
            _ => turn_channels::<u8, 4, 4>(src, dst, turn, 0),
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

pub fn i420_rotate(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    mode: RotationMode,
) -> Result<(), YuvError> {
    expect_format(src.format, PixelFormat::I420)?;
    rotate_frame(src, dst, mode)
}

pub fn i444_rotate(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    mode: RotationMode,
) -> Result<(), YuvError> {
    expect_format(src.format, PixelFormat::I444)?;
    rotate_frame(src, dst, mode)
}

/// Rotates an NV12 or NV21 frame into I420.
pub fn nv12_to_i420_rotate(
    src: &PlaneSet,
    dst: &mut PlaneSetMut,
    mode: RotationMode,
) -> Result<(), YuvError> {
    let order = match src.format {
        PixelFormat::Nv12 => YuvNVOrder::UV,
        PixelFormat::Nv21 => YuvNVOrder::VU,
        format => return Err(YuvError::UnsupportedFormat(format)),
    };
    expect_format(dst.format, PixelFormat::I420)?;
    let turn: Turn = mode.into();
    check_turned_dimensions((src.width, src.height), (dst.width, dst.height), turn)?;
    src.check_constraints()?;
    dst.check_constraints()?;
    let plane_count = dst.planes.len();
    let [y_plane, u_plane, v_plane] = &mut dst.planes[..] else {
        return Err(YuvError::PlaneCountMismatch(crate::yuv_error::MismatchedSize {
            expected: 3,
            received: plane_count,
        }));
    };
    turn_channels::<u8, 1, 1>(&src.planes[0], y_plane, turn, 0);
    turn_channels::<u8, 2, 1>(&src.planes[1], u_plane, turn, order.get_u_position());
    turn_channels::<u8, 2, 1>(&src.planes[1], v_plane, turn, order.get_v_position());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn turned(src: &[u8], w: u32, h: u32, mode: RotationMode) -> Vec<u8> {
        let (dw, dh) = if mode.swaps_dimensions() { (h, w) } else { (w, h) };
        let mut dst = PixelBufferMut::<u8>::alloc(dw, dh, 1);
        rotate_plane(&PixelBuffer::new(src, w as i32, w, h), &mut dst, mode).unwrap();
        dst.data.borrow().to_vec()
    }

    #[test]
    fn test_small_rotations() {
        let src = [1u8, 2, 3, 4, 5, 6];
        assert_eq!(turned(&src, 3, 2, RotationMode::Rotate90), [4, 1, 5, 2, 6, 3]);
        assert_eq!(turned(&src, 3, 2, RotationMode::Rotate180), [6, 5, 4, 3, 2, 1]);
        assert_eq!(turned(&src, 3, 2, RotationMode::Rotate270), [3, 6, 2, 5, 1, 4]);
        assert_eq!(turned(&src, 3, 2, RotationMode::Rotate0), src);

        let mut dst = PixelBufferMut::<u8>::alloc(2, 3, 1);
        transpose_plane(&PixelBuffer::new(&src, 3, 3, 2), &mut dst).unwrap();
        assert_eq!(dst.data.borrow(), &[1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let mut rng = StdRng::seed_from_u64(42);
        let (w, h) = (19u32, 11u32);
        let src: Vec<u8> = (0..w * h * 4).map(|_| rng.random()).collect();
        let mut current = src.clone();
        let (mut cw, mut ch) = (w, h);
        for _ in 0..4 {
            let mut dst = PixelBufferMut::<u8>::alloc(ch, cw, 4);
            argb_rotate(
                &PixelBuffer::new(&current, cw as i32 * 4, cw, ch),
                &mut dst,
                RotationMode::CLOCKWISE,
            )
            .unwrap();
            current = dst.data.borrow().to_vec();
            (cw, ch) = (ch, cw);
        }
        assert_eq!(current, src);

        let once = turned(&src[..(w * h) as usize], w, h, RotationMode::Rotate180);
        let twice = turned(&once, w, h, RotationMode::Rotate180);
        assert_eq!(&twice[..], &src[..(w * h) as usize]);
    }

    #[test]
    fn test_rejects_unswapped_destination() {
        let src = [0u8; 6];
        let mut dst = PixelBufferMut::<u8>::alloc(3, 2, 1);
        assert_eq!(
            rotate_plane_90(&PixelBuffer::new(&src, 3, 3, 2), &mut dst),
            Err(YuvError::ImageDimensionsNotMatch)
        );
    }

    #[test]
    fn test_rotate_uv_splits() {
        let uv = [1u8, 10, 2, 20, 3, 30, 4, 40];
        let mut u = PixelBufferMut::<u8>::alloc(2, 2, 1);
        let mut v = PixelBufferMut::<u8>::alloc(2, 2, 1);
        rotate_uv(&PixelBuffer::new(&uv, 4, 2, 2), &mut u, &mut v, RotationMode::Rotate180).unwrap();
        assert_eq!(u.data.borrow(), &[4, 3, 2, 1]);
        assert_eq!(v.data.borrow(), &[40, 30, 20, 10]);
    }

    #[test]
    fn test_i420_odd_rotation_round_trip() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut src = PlaneSetMut::alloc(PixelFormat::I420, 5, 3);
        for plane in src.planes.iter_mut() {
            for b in plane.data.as_mut().iter_mut() {
                *b = rng.random();
            }
        }
        let mut rotated = PlaneSetMut::alloc(PixelFormat::I420, 3, 5);
        i420_rotate(&src.to_fixed(), &mut rotated, RotationMode::Rotate90).unwrap();
        assert_eq!((rotated.planes[1].width, rotated.planes[1].height), (2, 3));
        let mut back = PlaneSetMut::alloc(PixelFormat::I420, 5, 3);
        i420_rotate(&rotated.to_fixed(), &mut back, RotationMode::Rotate270).unwrap();
        for (a, b) in src.planes.iter().zip(back.planes.iter()) {
            assert_eq!(a.data.borrow(), b.data.borrow());
        }
    }

    #[test]
    fn test_i422_quarter_turn_is_rejected() {
        let mut src = PlaneSetMut::alloc(PixelFormat::I422, 4, 2);
        for plane in src.planes.iter_mut() {
            plane.data.as_mut().iter_mut().enumerate().for_each(|(i, v)| *v = i as u8 + 1);
        }
        let mut storage = vec![9u8; 8 + 4 + 4];
        let (y, chroma) = storage.split_at_mut(8);
        let (u, v) = chroma.split_at_mut(4);
        let mut dst = PlaneSetMut::planar(PixelFormat::I422, y, 2, u, 1, v, 1, 2, 4);
        for mode in [RotationMode::Rotate90, RotationMode::Rotate270] {
            assert_eq!(
                rotate_frame(&src.to_fixed(), &mut dst, mode),
                Err(YuvError::UnsupportedFormat(PixelFormat::I422))
            );
        }
        assert!(storage.iter().all(|&v| v == 9));

        let mut half = PlaneSetMut::alloc(PixelFormat::I422, 4, 2);
        rotate_frame(&src.to_fixed(), &mut half, RotationMode::Rotate180).unwrap();
        assert_eq!(half.planes[1].data.borrow(), &[4, 3, 2, 1]);
    }

    #[test]
    fn test_nv12_rotate_into_i420() {
        let y = [1u8, 2, 3, 4];
        let uv = [50u8, 60];
        let src = PlaneSet::bi_planar(PixelFormat::Nv21, &y, 2, &uv, 2, 2, 2);
        let mut dst = PlaneSetMut::alloc(PixelFormat::I420, 2, 2);
        nv12_to_i420_rotate(&src, &mut dst, RotationMode::Rotate90).unwrap();
        assert_eq!(dst.planes[0].data.borrow(), &[3, 1, 4, 2]);
        assert_eq!(dst.planes[1].data.borrow(), &[60]);
        assert_eq!(dst.planes[2].data.borrow(), &[50]);
    }
}
