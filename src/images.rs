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
use crate::pixel_format::PixelFormat;
use crate::yuv_error::{check_plane, MismatchedSize, YuvError};
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn as_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

#[inline]
fn physical_row(stride: i32, height: u32, y: usize) -> usize {
    if stride < 0 {
        height as usize - 1 - y
    } else {
        y
    }
}

#[derive(Debug, Clone, Copy)]
/// Non-mutable view of one strided plane
pub struct PixelBuffer<'a, T>
where
    T: Copy + Debug,
{
    pub data: &'a [T],
    /// Stride here always means Elements per row.
    /// Negative stride walks the rows bottom-up, i.e. the view is vertically flipped.
    pub stride: i32,
    /// Width in plane pixels.
    pub width: u32,
    pub height: u32,
}

impl<'a, T> PixelBuffer<'a, T>
where
    T: Copy + Debug,
{
    pub fn new(data: &'a [T], stride: i32, width: u32, height: u32) -> Self {
        PixelBuffer {
            data,
            stride,
            width,
            height,
        }
    }

    pub fn check_constraints(&self, elements_per_pixel: usize) -> Result<(), YuvError> {
        check_plane(
            self.data,
            self.stride,
            self.width,
            self.height,
            elements_per_pixel,
            0,
        )
    }

    /// Same memory, rows in reverse order.
    pub fn flipped(&self) -> Self {
        PixelBuffer {
            stride: -self.stride,
            ..*self
        }
    }

    /// Logical row `y`, `row_len` elements long.
    #[inline]
    pub fn row(&self, y: usize, row_len: usize) -> &'a [T] {
        let start = physical_row(self.stride, self.height, y) * self.stride.unsigned_abs() as usize;
        &self.data[start..start + row_len]
    }

    /// Sub rectangle in plane pixels, keeping the stride direction.
    pub fn crop(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        elements_per_pixel: usize,
    ) -> Result<PixelBuffer<'a, T>, YuvError> {
        if x.checked_add(width).is_none_or(|r| r > self.width)
            || y.checked_add(height).is_none_or(|b| b > self.height)
        {
            return Err(YuvError::InvalidCrop);
        }
        if width == 0 || height == 0 {
            return Err(YuvError::ZeroBaseSize);
        }
        let first_row = if self.stride < 0 {
            (self.height - y - height) as usize
        } else {
            y as usize
        };
        let start = first_row * self.stride.unsigned_abs() as usize + x as usize * elements_per_pixel;
        if start > self.data.len() {
            return Err(YuvError::InvalidCrop);
        }
        Ok(PixelBuffer {
            data: &self.data[start..],
            stride: self.stride,
            width,
            height,
        })
    }
}

#[derive(Debug)]
/// Mutable view of one strided plane
pub struct PixelBufferMut<'a, T>
where
    T: Copy + Debug,
{
    pub data: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    /// Negative stride walks the rows bottom-up, i.e. the view is vertically flipped.
    pub stride: i32,
    /// Width in plane pixels.
    pub width: u32,
    pub height: u32,
}

impl<'a, T> PixelBufferMut<'a, T>
where
    T: Copy + Debug,
{
    pub fn new(data: &'a mut [T], stride: i32, width: u32, height: u32) -> Self {
        PixelBufferMut {
            data: BufferStoreMut::Borrowed(data),
            stride,
            width,
            height,
        }
    }

    pub fn check_constraints(&self, elements_per_pixel: usize) -> Result<(), YuvError> {
        check_plane(
            self.data.borrow(),
            self.stride,
            self.width,
            self.height,
            elements_per_pixel,
            0,
        )
    }

    pub fn to_fixed(&self) -> PixelBuffer<'_, T> {
        PixelBuffer {
            data: self.data.borrow(),
            stride: self.stride,
            width: self.width,
            height: self.height,
        }
    }

    pub fn flipped(self) -> Self {
        PixelBufferMut {
            stride: -self.stride,
            ..self
        }
    }

    /// Logical rows as disjoint slices of `row_len` elements, top to bottom.
    pub fn rows_mut(&mut self, row_len: usize) -> Vec<&mut [T]> {
        let stride = self.stride.unsigned_abs() as usize;
        let height = self.height as usize;
        if height == 0 || stride == 0 {
            return Vec::new();
        }
        let len = stride * (height - 1) + row_len;
        let data = &mut self.data.as_mut()[..len];
        let mut rows: Vec<&mut [T]> = data
            .chunks_mut(stride)
            .map(|row| &mut row[..row_len])
            .collect();
        if self.stride < 0 {
            rows.reverse();
        }
        rows
    }

    /// Mutable sub rectangle in plane pixels, keeping the stride direction.
    pub fn crop_mut(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        elements_per_pixel: usize,
    ) -> Result<PixelBufferMut<'_, T>, YuvError> {
        if x.checked_add(width).is_none_or(|r| r > self.width)
            || y.checked_add(height).is_none_or(|b| b > self.height)
        {
            return Err(YuvError::InvalidCrop);
        }
        if width == 0 || height == 0 {
            return Err(YuvError::ZeroBaseSize);
        }
        let first_row = if self.stride < 0 {
            (self.height - y - height) as usize
        } else {
            y as usize
        };
        let start = first_row * self.stride.unsigned_abs() as usize + x as usize * elements_per_pixel;
        let stride = self.stride;
        let data = self.data.as_mut();
        if start > data.len() {
            return Err(YuvError::InvalidCrop);
        }
        Ok(PixelBufferMut {
            data: BufferStoreMut::Borrowed(&mut data[start..]),
            stride,
            width,
            height,
        })
    }

    /// Logical row `y` for writing.
    #[inline]
    pub fn row_mut(&mut self, y: usize, row_len: usize) -> &mut [T] {
        let start = physical_row(self.stride, self.height, y) * self.stride.unsigned_abs() as usize;
        &mut self.data.as_mut()[start..start + row_len]
    }
}

impl<T> PixelBufferMut<'_, T>
where
    T: Copy + Debug + Send,
{
    /// Runs `op` on every logical row, rows spread over the pool with `rayon`.
    pub(crate) fn for_each_row<F>(&mut self, row_len: usize, op: F)
    where
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        let mut rows = self.rows_mut(row_len);
        let iter;
        #[cfg(feature = "rayon")]
        {
            iter = rows.par_iter_mut().enumerate();
        }
        #[cfg(not(feature = "rayon"))]
        {
            iter = rows.iter_mut().enumerate();
        }
        iter.for_each(|(y, row)| op(y, row));
    }
}

impl<T> PixelBufferMut<'_, T>
where
    T: Copy + Debug + Default,
{
    /// Allocates a tight plane.
    pub fn alloc(width: u32, height: u32, elements_per_pixel: usize) -> Self {
        let stride = width as usize * elements_per_pixel;
        PixelBufferMut {
            data: BufferStoreMut::Owned(vec![T::default(); stride * height as usize]),
            stride: stride as i32,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Rectangle in image pixels.
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        CropRect {
            x,
            y,
            width,
            height,
        }
    }
}

fn check_plane_set<V>(
    format: PixelFormat,
    width: u32,
    height: u32,
    planes: &[(&[V], i32, u32, u32)],
) -> Result<(), YuvError> {
    if width == 0 || height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    let layouts = format.planes();
    if layouts.len() != planes.len() {
        return Err(YuvError::PlaneCountMismatch(MismatchedSize {
            expected: layouts.len(),
            received: planes.len(),
        }));
    }
    for (index, (layout, &(data, stride, plane_width, plane_height))) in
        layouts.iter().zip(planes.iter()).enumerate()
    {
        if layout.dimensions(width, height) != (plane_width, plane_height) {
            return Err(YuvError::ImageDimensionsNotMatch);
        }
        check_plane(
            data,
            stride,
            plane_width,
            plane_height,
            layout.bytes_per_pixel as usize,
            index,
        )?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
/// Non-mutable image of any catalog format.
///
/// Planes are bytes; multi byte samples are little-endian and strides count bytes.
pub struct PlaneSet<'a> {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    /// Planes in the format's order, `Yv12` keeping V before U.
    pub planes: Vec<PixelBuffer<'a, u8>>,
}

impl<'a> PlaneSet<'a> {
    fn plane(format: PixelFormat, index: usize, data: &'a [u8], stride: i32, w: u32, h: u32) -> PixelBuffer<'a, u8> {
        let (width, height) = format
            .planes()
            .get(index)
            .map(|layout| layout.dimensions(w, h))
            .unwrap_or((0, 0));
        PixelBuffer::new(data, stride, width, height)
    }

    /// Single plane formats: packed RGB, packed YUV and `I400`.
    pub fn packed(format: PixelFormat, data: &'a [u8], stride: i32, width: u32, height: u32) -> Self {
        PlaneSet {
            format,
            width,
            height,
            planes: vec![Self::plane(format, 0, data, stride, width, height)],
        }
    }

    /// Three plane formats, U always given before V.
    #[allow(clippy::too_many_arguments)]
    pub fn planar(
        format: PixelFormat,
        y_plane: &'a [u8],
        y_stride: i32,
        u_plane: &'a [u8],
        u_stride: i32,
        v_plane: &'a [u8],
        v_stride: i32,
        width: u32,
        height: u32,
    ) -> Self {
        let ((p1, s1), (p2, s2)) = if format == PixelFormat::Yv12 {
            ((v_plane, v_stride), (u_plane, u_stride))
        } else {
            ((u_plane, u_stride), (v_plane, v_stride))
        };
        PlaneSet {
            format,
            width,
            height,
            planes: vec![
                Self::plane(format, 0, y_plane, y_stride, width, height),
                Self::plane(format, 1, p1, s1, width, height),
                Self::plane(format, 2, p2, s2, width, height),
            ],
        }
    }

    /// Luma plane plus one interleaved chroma plane.
    pub fn bi_planar(
        format: PixelFormat,
        y_plane: &'a [u8],
        y_stride: i32,
        uv_plane: &'a [u8],
        uv_stride: i32,
        width: u32,
        height: u32,
    ) -> Self {
        PlaneSet {
            format,
            width,
            height,
            planes: vec![
                Self::plane(format, 0, y_plane, y_stride, width, height),
                Self::plane(format, 1, uv_plane, uv_stride, width, height),
            ],
        }
    }

    /// Planes in the format's order given as `(data, stride)`.
    pub fn from_planes(
        format: PixelFormat,
        planes: &[(&'a [u8], i32)],
        width: u32,
        height: u32,
    ) -> Result<Self, YuvError> {
        if planes.len() != format.plane_count() {
            return Err(YuvError::PlaneCountMismatch(MismatchedSize {
                expected: format.plane_count(),
                received: planes.len(),
            }));
        }
        Ok(PlaneSet {
            format,
            width,
            height,
            planes: planes
                .iter()
                .enumerate()
                .map(|(index, &(data, stride))| {
                    Self::plane(format, index, data, stride, width, height)
                })
                .collect(),
        })
    }

    pub fn check_constraints(&self) -> Result<(), YuvError> {
        let planes: Vec<(&[u8], i32, u32, u32)> = self
            .planes
            .iter()
            .map(|p| (p.data, p.stride, p.width, p.height))
            .collect();
        check_plane_set(self.format, self.width, self.height, &planes)
    }

    /// Every plane vertically flipped.
    pub fn flipped(&self) -> Self {
        PlaneSet {
            format: self.format,
            width: self.width,
            height: self.height,
            planes: self.planes.iter().map(|p| p.flipped()).collect(),
        }
    }
}

#[derive(Debug)]
/// Mutable image of any catalog format.
pub struct PlaneSetMut<'a> {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    /// Planes in the format's order, `Yv12` keeping V before U.
    pub planes: Vec<PixelBufferMut<'a, u8>>,
}

impl<'a> PlaneSetMut<'a> {
    fn plane(format: PixelFormat, index: usize, data: &'a mut [u8], stride: i32, w: u32, h: u32) -> PixelBufferMut<'a, u8> {
        let (width, height) = format
            .planes()
            .get(index)
            .map(|layout| layout.dimensions(w, h))
            .unwrap_or((0, 0));
        PixelBufferMut::new(data, stride, width, height)
    }

    /// Allocates a tightly packed frame.
    pub fn alloc(format: PixelFormat, width: u32, height: u32) -> Self {
        PlaneSetMut {
            format,
            width,
            height,
            planes: format
                .planes()
                .iter()
                .map(|layout| {
                    let (w, h) = layout.dimensions(width, height);
                    PixelBufferMut::alloc(w, h, layout.bytes_per_pixel as usize)
                })
                .collect(),
        }
    }

    pub fn packed(format: PixelFormat, data: &'a mut [u8], stride: i32, width: u32, height: u32) -> Self {
        PlaneSetMut {
            format,
            width,
            height,
            planes: vec![Self::plane(format, 0, data, stride, width, height)],
        }
    }

    /// Three plane formats, U always given before V.
    #[allow(clippy::too_many_arguments)]
    pub fn planar(
        format: PixelFormat,
        y_plane: &'a mut [u8],
        y_stride: i32,
        u_plane: &'a mut [u8],
        u_stride: i32,
        v_plane: &'a mut [u8],
        v_stride: i32,
        width: u32,
        height: u32,
    ) -> Self {
        let ((p1, s1), (p2, s2)) = if format == PixelFormat::Yv12 {
            ((v_plane, v_stride), (u_plane, u_stride))
        } else {
            ((u_plane, u_stride), (v_plane, v_stride))
        };
        PlaneSetMut {
            format,
            width,
            height,
            planes: vec![
                Self::plane(format, 0, y_plane, y_stride, width, height),
                Self::plane(format, 1, p1, s1, width, height),
                Self::plane(format, 2, p2, s2, width, height),
            ],
        }
    }

    pub fn bi_planar(
        format: PixelFormat,
        y_plane: &'a mut [u8],
        y_stride: i32,
        uv_plane: &'a mut [u8],
        uv_stride: i32,
        width: u32,
        height: u32,
    ) -> Self {
        PlaneSetMut {
            format,
            width,
            height,
            planes: vec![
                Self::plane(format, 0, y_plane, y_stride, width, height),
                Self::plane(format, 1, uv_plane, uv_stride, width, height),
            ],
        }
    }

    pub fn from_planes(
        format: PixelFormat,
        planes: Vec<(&'a mut [u8], i32)>,
        width: u32,
        height: u32,
    ) -> Result<Self, YuvError> {
        if planes.len() != format.plane_count() {
            return Err(YuvError::PlaneCountMismatch(MismatchedSize {
                expected: format.plane_count(),
                received: planes.len(),
            }));
        }
        Ok(PlaneSetMut {
            format,
            width,
            height,
            planes: planes
                .into_iter()
                .enumerate()
                .map(|(index, (data, stride))| {
                    Self::plane(format, index, data, stride, width, height)
                })
                .collect(),
        })
    }

    pub fn check_constraints(&self) -> Result<(), YuvError> {
        let planes: Vec<(&[u8], i32, u32, u32)> = self
            .planes
            .iter()
            .map(|p| (p.data.borrow(), p.stride, p.width, p.height))
            .collect();
        check_plane_set(self.format, self.width, self.height, &planes)
    }

    pub fn to_fixed(&self) -> PlaneSet<'_> {
        PlaneSet {
            format: self.format,
            width: self.width,
            height: self.height,
            planes: self.planes.iter().map(|p| p.to_fixed()).collect(),
        }
    }

    pub fn flipped(self) -> Self {
        PlaneSetMut {
            format: self.format,
            width: self.width,
            height: self.height,
            planes: self.planes.into_iter().map(|p| p.flipped()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_stride_rows() {
        let mut data: Vec<u8> = (0..12).collect();
        let mut plane = PixelBufferMut::new(&mut data, -4, 3, 3);
        plane.check_constraints(1).unwrap();
        {
            let rows = plane.rows_mut(3);
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0], &[8, 9, 10]);
            assert_eq!(rows[2], &[0, 1, 2]);
        }
        let fixed = plane.to_fixed();
        assert_eq!(fixed.row(0, 3), &[8, 9, 10]);
        assert_eq!(fixed.flipped().row(0, 3), &[0, 1, 2]);
    }

    #[test]
    fn test_crop_follows_stride_direction() {
        let data: Vec<u8> = (0..16).collect();
        let plane = PixelBuffer::new(&data, 4, 4, 4);
        let crop = plane.crop(1, 1, 2, 2, 1).unwrap();
        assert_eq!(crop.row(0, 2), &[5, 6]);
        assert_eq!(crop.row(1, 2), &[9, 10]);

        let flipped = plane.flipped();
        let crop = flipped.crop(1, 0, 2, 2, 1).unwrap();
        assert_eq!(crop.row(0, 2), &[13, 14]);
        assert_eq!(crop.row(1, 2), &[9, 10]);

        assert_eq!(plane.crop(3, 0, 2, 2, 1).err(), Some(YuvError::InvalidCrop));
    }

    #[test]
    fn test_crop_mut_writes_inside_rect() {
        let mut data = vec![0u8; 16];
        let mut plane = PixelBufferMut::new(&mut data, 4, 4, 4);
        {
            let mut crop = plane.crop_mut(2, 1, 2, 2, 1).unwrap();
            crop.for_each_row(2, |y, row| row.fill(y as u8 + 1));
        }
        assert_eq!(&data[4..12], &[0, 0, 1, 1, 0, 0, 2, 2]);
        assert_eq!(data.iter().filter(|&&v| v != 0).count(), 4);
    }

    #[test]
    fn test_plane_set_geometry() {
        let frame = PlaneSetMut::alloc(PixelFormat::I420, 5, 3);
        assert_eq!(frame.planes[0].width, 5);
        assert_eq!(frame.planes[1].width, 3);
        assert_eq!(frame.planes[1].height, 2);
        frame.check_constraints().unwrap();

        let nv = PlaneSetMut::alloc(PixelFormat::P010, 4, 4);
        assert_eq!(nv.planes[1].stride, 8);
        nv.check_constraints().unwrap();
    }

    #[test]
    fn test_plane_set_rejects_short_plane() {
        let y = vec![0u8; 16];
        let uv = vec![0u8; 6];
        let set = PlaneSet::bi_planar(PixelFormat::Nv12, &y, 4, &uv, 4, 4, 4);
        assert_eq!(
            set.check_constraints(),
            Err(YuvError::PlaneSizeMismatch(
                1,
                MismatchedSize {
                    expected: 8,
                    received: 6
                }
            ))
        );
        let wrong = PlaneSet::from_planes(PixelFormat::I420, &[(&y[..], 4)], 4, 4);
        assert!(matches!(wrong, Err(YuvError::PlaneCountMismatch(_))));
    }
}
