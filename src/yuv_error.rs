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
use crate::pixel_format::{FourCC, PixelFormat};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Every failure the engine reports.
///
/// All of them are detected before the first destination write, so a failed call
/// leaves the destination untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum YuvError {
    DestinationSizeMismatch(MismatchedSize),
    MinimumDestinationSizeMismatch(MismatchedSize),
    PointerOverflow,
    ZeroBaseSize,
    /// Plane index and the size it needed.
    PlaneSizeMismatch(usize, MismatchedSize),
    /// Plane index and the row length its stride must cover.
    MinimumStrideSizeMismatch(usize, MismatchedSize),
    PlaneCountMismatch(MismatchedSize),
    ImagesSizesNotMatch,
    ImageDimensionsNotMatch,
    InvalidCrop,
    InvalidMatrix,
    UnknownFourcc(FourCC),
    UnsupportedConversion { from: PixelFormat, to: PixelFormat },
    UnsupportedFormat(PixelFormat),
}

/// Status returned for a generic invalid parameter.
pub const STATUS_INVALID_PARAMETER: i32 = -1;
/// Status returned when no implemented path exists for the request.
pub const STATUS_UNSUPPORTED: i32 = -2;

impl YuvError {
    /// Integer status for C-style callers, always negative.
    pub const fn code(&self) -> i32 {
        match self {
            YuvError::UnsupportedConversion { .. } | YuvError::UnsupportedFormat(_) => {
                STATUS_UNSUPPORTED
            }
            _ => STATUS_INVALID_PARAMETER,
        }
    }
}

/// Folds a result into the `0` on success, negative on failure convention.
pub fn status(result: Result<(), YuvError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => err.code(),
    }
}

impl Display for YuvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvError::PlaneSizeMismatch(plane, size) => f.write_fmt(format_args!(
                "Plane {} have invalid size, it must be at least {}, but it was {}",
                plane, size.expected, size.received
            )),
            YuvError::MinimumStrideSizeMismatch(plane, size) => f.write_fmt(format_args!(
                "Plane {} stride must be at least {}, but it was {}",
                plane, size.expected, size.received
            )),
            YuvError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            YuvError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            YuvError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            YuvError::MinimumDestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination must have size at least {} but it is {}",
                size.expected, size.received
            )),
            YuvError::PlaneCountMismatch(size) => f.write_fmt(format_args!(
                "Format expects {} planes, but {} were supplied",
                size.expected, size.received
            )),
            YuvError::ImagesSizesNotMatch => f.write_str("Source and destination sizes do not match"),
            YuvError::ImageDimensionsNotMatch => {
                f.write_str("Destination dimensions do not match the requested operation")
            }
            YuvError::InvalidCrop => f.write_str("Crop rectangle lies outside of the source"),
            YuvError::InvalidMatrix => f.write_str("Matrix coefficients must satisfy 1 - kr - kb != 0"),
            YuvError::UnknownFourcc(fourcc) => {
                f.write_fmt(format_args!("Unknown fourcc {}", fourcc))
            }
            YuvError::UnsupportedConversion { from, to } => f.write_fmt(format_args!(
                "No conversion path from {:?} to {:?}",
                from, to
            )),
            YuvError::UnsupportedFormat(format) => {
                f.write_fmt(format_args!("Format {:?} is not supported here", format))
            }
        }
    }
}

impl Error for YuvError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, YuvError> {
    v0.checked_mul(v1).ok_or(YuvError::PointerOverflow)
}

/// Validates one strided plane: `|stride|` covers a row and `data` covers every row.
#[inline]
pub(crate) fn check_plane<V>(
    data: &[V],
    stride: i32,
    width: u32,
    height: u32,
    elements_per_pixel: usize,
    plane: usize,
) -> Result<(), YuvError> {
    if width == 0 || height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    let row_len = check_overflow_v2(width as usize, elements_per_pixel)?;
    let stride = stride.unsigned_abs() as usize;
    if stride < row_len {
        return Err(YuvError::MinimumStrideSizeMismatch(
            plane,
            MismatchedSize {
                expected: row_len,
                received: stride,
            },
        ));
    }
    let required = check_overflow_v2(stride, height as usize - 1)?
        .checked_add(row_len)
        .ok_or(YuvError::PointerOverflow)?;
    if data.len() < required {
        return Err(YuvError::PlaneSizeMismatch(
            plane,
            MismatchedSize {
                expected: required,
                received: data.len(),
            },
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_validation() {
        let data = vec![0u8; 10 * 3 + 8];
        assert!(check_plane(&data, 10, 8, 4, 1, 0).is_ok());
        assert!(check_plane(&data, -10, 8, 4, 1, 0).is_ok());
        assert_eq!(
            check_plane(&data, 6, 8, 4, 1, 0),
            Err(YuvError::MinimumStrideSizeMismatch(
                0,
                MismatchedSize {
                    expected: 8,
                    received: 6
                }
            ))
        );
        assert_eq!(
            check_plane(&data, 10, 8, 5, 1, 2),
            Err(YuvError::PlaneSizeMismatch(
                2,
                MismatchedSize {
                    expected: 48,
                    received: 38
                }
            ))
        );
        assert_eq!(check_plane(&data, 10, 0, 4, 1, 0), Err(YuvError::ZeroBaseSize));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status(Ok(())), 0);
        assert_eq!(status(Err(YuvError::ZeroBaseSize)), STATUS_INVALID_PARAMETER);
        assert_eq!(
            status(Err(YuvError::UnsupportedFormat(PixelFormat::I010))),
            STATUS_UNSUPPORTED
        );
    }
}
