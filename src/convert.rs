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
use crate::images::{PlaneSet, PlaneSetMut};
use crate::routes::find_route;
use crate::yuv_error::YuvError;
use crate::yuv_support::ColorMatrix;

/// Converts a frame of any supported format into a frame of any other.
///
/// Every plane of both frames is validated before the first write, a failed call
/// leaves `dst` untouched. When no direct kernel exists the cheapest chain of
/// direct conversions is used, going through temporary frames.
///
/// # Arguments
///
/// * `src`: Source frame
/// * `dst`: Destination frame, must have the same dimensions as the source
/// * `matrix`: Color matrix used by steps that change color model, see [ColorMatrix]
///
/// returns: Result<(), [YuvError]>
///
pub fn convert(src: &PlaneSet, dst: &mut PlaneSetMut, matrix: ColorMatrix) -> Result<(), YuvError> {
    if src.width == 0 || src.height == 0 || dst.width == 0 || dst.height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    if (src.width, src.height) != (dst.width, dst.height) {
        return Err(YuvError::ImagesSizesNotMatch);
    }
    src.check_constraints()?;
    dst.check_constraints()?;
    let route = find_route(src.format, dst.format).ok_or(YuvError::UnsupportedConversion {
        from: src.format,
        to: dst.format,
    })?;
    log::trace!(
        "converting {}x{} frame via {:?}",
        src.width,
        src.height,
        route.formats()
    );
    route.execute(src, dst, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::calc_frame_psnr;
    use crate::images::PixelBuffer;
    use crate::pixel_format::PixelFormat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_frame(format: PixelFormat, width: u32, height: u32, seed: u64) -> PlaneSetMut<'static> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut frame = PlaneSetMut::alloc(format, width, height);
        for plane in frame.planes.iter_mut() {
            plane.data.as_mut().iter_mut().for_each(|v| *v = rng.random());
        }
        frame
    }

    #[test]
    fn test_rgb24_argb_round_trip_is_lossless() {
        for (width, height) in [(1, 1), (5, 3), (17, 2)] {
            let src = random_frame(PixelFormat::Rgb24, width, height, 3);
            let mut argb = PlaneSetMut::alloc(PixelFormat::Argb, width, height);
            convert(&src.to_fixed(), &mut argb, ColorMatrix::BT601).unwrap();
            assert!(argb.planes[0].data.borrow().chunks_exact(4).all(|px| px[3] == 255));
            let mut back = PlaneSetMut::alloc(PixelFormat::Rgb24, width, height);
            convert(&argb.to_fixed(), &mut back, ColorMatrix::BT601).unwrap();
            assert_eq!(src.planes[0].data.borrow(), back.planes[0].data.borrow());
        }
    }

    #[test]
    fn test_white_survives_jpeg_chain() {
        let white = vec![255u8; 4 * 4 * 3];
        let src = PlaneSet::packed(PixelFormat::Rgb24, &white, 12, 4, 4);
        let mut j420 = PlaneSetMut::alloc(PixelFormat::I420, 4, 4);
        convert(&src, &mut j420, ColorMatrix::JPEG).unwrap();
        let mut argb = PlaneSetMut::alloc(PixelFormat::Argb, 4, 4);
        convert(&j420.to_fixed(), &mut argb, ColorMatrix::JPEG).unwrap();
        assert!(argb.planes[0].data.borrow().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_smooth_image_psnr() {
        let (width, height) = (64u32, 48u32);
        let mut argb = vec![0u8; (width * height * 4) as usize];
        for (i, px) in argb.chunks_exact_mut(4).enumerate() {
            let (x, y) = (i as u32 % width, i as u32 / width);
            px.copy_from_slice(&[(x * 3) as u8, (y * 5) as u8, ((x + y) * 2) as u8, 255]);
        }
        let src = PlaneSet::packed(PixelFormat::Argb, &argb, width as i32 * 4, width, height);
        let mut nv12 = PlaneSetMut::alloc(PixelFormat::Nv12, width, height);
        convert(&src, &mut nv12, ColorMatrix::BT709).unwrap();
        let mut back = PlaneSetMut::alloc(PixelFormat::Argb, width, height);
        convert(&nv12.to_fixed(), &mut back, ColorMatrix::BT709).unwrap();
        let psnr = calc_frame_psnr(
            &PixelBuffer::new(&argb, width as i32 * 4, width * 4, height),
            &PixelBuffer::new(back.planes[0].data.borrow(), width as i32 * 4, width * 4, height),
        );
        assert!(psnr > 30.0, "{psnr}");
    }

    #[test]
    fn test_same_format_copies() {
        let src = random_frame(PixelFormat::P010, 7, 5, 4);
        let mut dst = PlaneSetMut::alloc(PixelFormat::P010, 7, 5);
        convert(&src.to_fixed(), &mut dst, ColorMatrix::BT2020).unwrap();
        for (a, b) in src.planes.iter().zip(dst.planes.iter()) {
            assert_eq!(a.data.borrow(), b.data.borrow());
        }
    }

    #[test]
    fn test_lossless_chain_through_intermediates() {
        let src = random_frame(PixelFormat::Yv12, 9, 7, 5);
        let mut nv21 = PlaneSetMut::alloc(PixelFormat::Nv21, 9, 7);
        convert(&src.to_fixed(), &mut nv21, ColorMatrix::BT601).unwrap();
        let mut back = PlaneSetMut::alloc(PixelFormat::Yv12, 9, 7);
        convert(&nv21.to_fixed(), &mut back, ColorMatrix::BT601).unwrap();
        for (a, b) in src.planes.iter().zip(back.planes.iter()) {
            assert_eq!(a.data.borrow(), b.data.borrow());
        }
    }

    #[test]
    fn test_failures_leave_destination_untouched() {
        let src = random_frame(PixelFormat::Argb, 4, 4, 6);
        let mut storage = vec![7u8; 4 * 4 * 3];
        {
            let mut dst = PlaneSetMut::packed(PixelFormat::Rgb24, &mut storage, 12, 4, 3);
            assert_eq!(
                convert(&src.to_fixed(), &mut dst, ColorMatrix::BT601),
                Err(YuvError::ImagesSizesNotMatch)
            );
        }
        {
            let mut dst = PlaneSetMut::packed(PixelFormat::Rgb24, &mut storage[..40], 12, 4, 4);
            assert!(convert(&src.to_fixed(), &mut dst, ColorMatrix::BT601).is_err());
        }
        {
            let mut dst = PlaneSetMut::packed(PixelFormat::Rgb24, &mut storage, 12, 0, 4);
            assert_eq!(
                convert(&src.to_fixed(), &mut dst, ColorMatrix::BT601),
                Err(YuvError::ZeroBaseSize)
            );
        }
        assert!(storage.iter().all(|&v| v == 7));
    }

    #[test]
    fn test_near_singular_matrix_fails_cleanly() {
        use crate::yuv_support::{YuvRange, YuvStandardMatrix};
        let src = random_frame(PixelFormat::I420, 2, 2, 8);
        let matrix = ColorMatrix::new(YuvStandardMatrix::Custom(0.7, 0.2999), YuvRange::Full);
        let mut storage = vec![3u8; 2 * 2 * 4];
        {
            let mut dst = PlaneSetMut::packed(PixelFormat::Argb, &mut storage, 8, 2, 2);
            assert_eq!(
                convert(&src.to_fixed(), &mut dst, matrix),
                Err(YuvError::InvalidMatrix)
            );
        }
        assert!(storage.iter().all(|&v| v == 3));
    }

    #[test]
    fn test_negative_stride_flips() {
        let rgb = [1u8, 2, 3, 4, 5, 6];
        let src = PlaneSet::packed(PixelFormat::Rgb24, &rgb, 3, 1, 2).flipped();
        let mut dst = PlaneSetMut::alloc(PixelFormat::Raw, 1, 2);
        convert(&src, &mut dst, ColorMatrix::BT601).unwrap();
        assert_eq!(dst.planes[0].data.borrow(), &[6, 5, 4, 3, 2, 1]);
    }
}
