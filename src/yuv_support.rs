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
use crate::yuv_error::YuvError;

/// Fixed point precision of every integer color transform.
pub(crate) const PRECISION: i32 = 13;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct CbCrInverseTransform<T> {
    pub y_coef: T,
    pub cr_coef: T,
    pub cb_coef: T,
    pub g_coeff_1: T,
    pub g_coeff_2: T,
}

impl<T> CbCrInverseTransform<T> {
    pub fn new(
        y_coef: T,
        cr_coef: T,
        cb_coef: T,
        g_coeff_1: T,
        g_coeff_2: T,
    ) -> CbCrInverseTransform<T> {
        CbCrInverseTransform {
            y_coef,
            cr_coef,
            cb_coef,
            g_coeff_1,
            g_coeff_2,
        }
    }
}

impl CbCrInverseTransform<f32> {
    /// Integral transformation adds an error not less than 1%
    pub fn to_integers(&self, precision: u32) -> CbCrInverseTransform<i32> {
        let precision_scale: i32 = 1i32 << (precision as i32);
        let cr_coef = (self.cr_coef * precision_scale as f32).round() as i32;
        let cb_coef = (self.cb_coef * precision_scale as f32).round() as i32;
        let y_coef = (self.y_coef * precision_scale as f32).round() as i32;
        let g_coef_1 = (self.g_coeff_1 * precision_scale as f32).round() as i32;
        let g_coef_2 = (self.g_coeff_2 * precision_scale as f32).round() as i32;
        CbCrInverseTransform::<i32> {
            y_coef,
            cr_coef,
            cb_coef,
            g_coeff_1: g_coef_1,
            g_coeff_2: g_coef_2,
        }
    }
}

/// Transformation YUV to RGB with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
pub fn get_inverse_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> Result<CbCrInverseTransform<f32>, YuvError> {
    let kg = 1.0f32 - kr - kb;
    if kg == 0f32 || !kg.is_finite() {
        return Err(YuvError::InvalidMatrix);
    }
    let range_uv = range_rgba as f32 / range_uv as f32;
    let y_coef = range_rgba as f32 / range_y as f32;
    let cr_coeff = (2f32 * (1f32 - kr)) * range_uv;
    let cb_coeff = (2f32 * (1f32 - kb)) * range_uv;
    let g_coeff_1 = (2f32 * ((1f32 - kr) * kr / kg)) * range_uv;
    let g_coeff_2 = (2f32 * ((1f32 - kb) * kb / kg)) * range_uv;
    Ok(CbCrInverseTransform::new(
        y_coef, cr_coeff, cb_coeff, g_coeff_1, g_coeff_2,
    ))
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct CbCrForwardTransform<T> {
    pub yr: T,
    pub yg: T,
    pub yb: T,
    pub cb_r: T,
    pub cb_g: T,
    pub cb_b: T,
    pub cr_r: T,
    pub cr_g: T,
    pub cr_b: T,
}

pub trait ToIntegerTransform {
    fn to_integers(&self, precision: u32) -> CbCrForwardTransform<i32>;
}

impl ToIntegerTransform for CbCrForwardTransform<f32> {
    fn to_integers(&self, precision: u32) -> CbCrForwardTransform<i32> {
        let scale = (1 << precision) as f32;
        CbCrForwardTransform::<i32> {
            yr: (self.yr * scale).round() as i32,
            yg: (self.yg * scale).round() as i32,
            yb: (self.yb * scale).round() as i32,
            cb_r: (self.cb_r * scale).round() as i32,
            cb_g: (self.cb_g * scale).round() as i32,
            cb_b: (self.cb_b * scale).round() as i32,
            cr_r: (self.cr_r * scale).round() as i32,
            cr_g: (self.cr_g * scale).round() as i32,
            cr_b: (self.cr_b * scale).round() as i32,
        }
    }
}

/// Transformation RGB to YUV with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
pub fn get_forward_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> CbCrForwardTransform<f32> {
    let kg = 1.0f32 - kr - kb;

    let yr = kr * range_y as f32 / range_rgba as f32;
    let yg = kg * range_y as f32 / range_rgba as f32;
    let yb = kb * range_y as f32 / range_rgba as f32;

    let cb_r = -0.5f32 * kr / (1f32 - kb) * range_uv as f32 / range_rgba as f32;
    let cb_g = -0.5f32 * kg / (1f32 - kb) * range_uv as f32 / range_rgba as f32;
    let cb_b = 0.5f32 * range_uv as f32 / range_rgba as f32;

    let cr_r = 0.5f32 * range_uv as f32 / range_rgba as f32;
    let cr_g = -0.5f32 * kg / (1f32 - kr) * range_uv as f32 / range_rgba as f32;
    let cr_b = -0.5f32 * kb / (1f32 - kr) * range_uv as f32 / range_rgba as f32;
    CbCrForwardTransform {
        yr,
        yg,
        yb,
        cb_r,
        cb_g,
        cb_b,
        cr_r,
        cr_g,
        cr_b,
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
/// Declares YUV range Limited (TV) or Full
pub enum YuvRange {
    /// Limited range Y ∈ [16 << (depth - 8), 16 << (depth - 8) + 219 << (depth - 8)], UV ∈ [-1 << (depth - 1), -1 << (depth - 1) + 1 << (depth - 1)]
    Limited,
    /// Full range Y ∈ [0, 2^bit_depth - 1], UV ∈ [-1 << (depth - 1), -1 << (depth - 1) + 2^bit_depth - 1]
    Full,
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvChromaRange {
    pub bias_y: u32,
    pub bias_uv: u32,
    pub range_y: u32,
    pub range_uv: u32,
    pub range: YuvRange,
}

pub const fn get_yuv_range(depth: u32, range: YuvRange) -> YuvChromaRange {
    match range {
        YuvRange::Limited => YuvChromaRange {
            bias_y: 16 << (depth - 8),
            bias_uv: 1 << (depth - 1),
            range_y: 219 << (depth - 8),
            range_uv: 224 << (depth - 8),
            range,
        },
        YuvRange::Full => YuvChromaRange {
            bias_y: 0,
            bias_uv: 1 << (depth - 1),
            range_uv: (1 << depth) - 1,
            range_y: (1 << depth) - 1,
            range,
        },
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
/// Declares standard prebuilt YUV conversion matrices, check [ITU-R](https://www.itu.int/rec/T-REC-H.273/en) information for more info
pub enum YuvStandardMatrix {
    Bt601,
    Bt709,
    Bt2020,
    Smpte240,
    Bt470_6,
    /// Custom parameters first goes for kr, second for kb.
    Custom(f32, f32),
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvBias {
    pub kr: f32,
    pub kb: f32,
}

pub const fn get_kr_kb(matrix: YuvStandardMatrix) -> YuvBias {
    match matrix {
        YuvStandardMatrix::Bt601 => YuvBias {
            kr: 0.299f32,
            kb: 0.114f32,
        },
        YuvStandardMatrix::Bt709 => YuvBias {
            kr: 0.2126f32,
            kb: 0.0722f32,
        },
        YuvStandardMatrix::Bt2020 => YuvBias {
            kr: 0.2627f32,
            kb: 0.0593f32,
        },
        YuvStandardMatrix::Smpte240 => YuvBias {
            kr: 0.087f32,
            kb: 0.212f32,
        },
        YuvStandardMatrix::Bt470_6 => YuvBias {
            kr: 0.2220f32,
            kb: 0.0713f32,
        },
        YuvStandardMatrix::Custom(kr, kb) => YuvBias { kr, kb },
    }
}

/// Integer RGB to YUV transform with its rounding biases.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ForwardCoefficients {
    pub transform: CbCrForwardTransform<i32>,
    /// `(bias_y + 0.5) << PRECISION`
    pub bias_y: i32,
    /// `(bias_uv + 0.5) << PRECISION`
    pub bias_uv: i32,
}

/// Integer YUV to RGB transform for a given input depth and output range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InverseCoefficients {
    pub transform: CbCrInverseTransform<i32>,
    pub bias_y: i32,
    pub bias_uv: i32,
    pub max_value: i32,
}

impl Eq for CbCrForwardTransform<i32> {}
impl Eq for CbCrInverseTransform<i32> {}

/// True when every row applied to samples up to `sample_max` keeps half of the i32 range spare.
fn fits_accumulator(rows: &[&[i32]], sample_max: i64) -> bool {
    rows.iter().all(|row| {
        let worst: i64 = row.iter().map(|&c| (c as i64).abs() * sample_max).sum();
        worst < i32::MAX as i64 / 2
    })
}

/// A luma/chroma matrix paired with its quantization range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorMatrix {
    pub matrix: YuvStandardMatrix,
    pub range: YuvRange,
}

impl ColorMatrix {
    /// BT.601 limited range, the `I` family.
    pub const BT601: ColorMatrix = ColorMatrix::new(YuvStandardMatrix::Bt601, YuvRange::Limited);
    /// BT.601 full range, the `J` family.
    pub const JPEG: ColorMatrix = ColorMatrix::new(YuvStandardMatrix::Bt601, YuvRange::Full);
    /// BT.709 limited range, the `H` family.
    pub const BT709: ColorMatrix = ColorMatrix::new(YuvStandardMatrix::Bt709, YuvRange::Limited);
    /// BT.709 full range, the `F` family.
    pub const BT709_FULL: ColorMatrix = ColorMatrix::new(YuvStandardMatrix::Bt709, YuvRange::Full);
    /// BT.2020 limited range, the `U` family.
    pub const BT2020: ColorMatrix = ColorMatrix::new(YuvStandardMatrix::Bt2020, YuvRange::Limited);
    /// BT.2020 full range, the `V` family.
    pub const BT2020_FULL: ColorMatrix =
        ColorMatrix::new(YuvStandardMatrix::Bt2020, YuvRange::Full);

    pub const fn new(matrix: YuvStandardMatrix, range: YuvRange) -> ColorMatrix {
        ColorMatrix { matrix, range }
    }

    /// Matrix from arbitrary Kr and Kb.
    ///
    /// Fails with [YuvError::InvalidMatrix] when the matrix is singular or so close
    /// to it that its fixed point coefficients would overflow on 10 bit input.
    pub fn custom(kr: f32, kb: f32, range: YuvRange) -> Result<ColorMatrix, YuvError> {
        let kg = 1f32 - kr - kb;
        if kg == 0f32 || !kg.is_finite() || kb == 1f32 || kr == 1f32 {
            return Err(YuvError::InvalidMatrix);
        }
        let matrix = ColorMatrix::new(YuvStandardMatrix::Custom(kr, kb), range);
        matrix.forward_coefficients()?;
        matrix.inverse_coefficients(10, 1023)?;
        Ok(matrix)
    }

    fn validated_kr_kb(&self) -> Result<YuvBias, YuvError> {
        let bias = get_kr_kb(self.matrix);
        let kg = 1f32 - bias.kr - bias.kb;
        if kg == 0f32 || !kg.is_finite() || bias.kb == 1f32 || bias.kr == 1f32 {
            return Err(YuvError::InvalidMatrix);
        }
        Ok(bias)
    }

    /// 8 bit RGB to 8 bit YUV coefficients.
    ///
    /// Rows are balanced: the luma row sums to the range gain and chroma rows sum
    /// to zero, so every neutral gray encodes to exactly neutral chroma.
    pub fn forward_coefficients(&self) -> Result<ForwardCoefficients, YuvError> {
        let bias = self.validated_kr_kb()?;
        let range = get_yuv_range(8, self.range);
        let mut transform =
            get_forward_transform(255, range.range_y, range.range_uv, bias.kr, bias.kb)
                .to_integers(PRECISION as u32);
        let gain_y = ((range.range_y as f32 / 255f32) * (1 << PRECISION) as f32).round() as i32;
        transform.yg = gain_y - transform.yr - transform.yb;
        transform.cb_g = -(transform.cb_r + transform.cb_b);
        transform.cr_g = -(transform.cr_r + transform.cr_b);
        let t = &transform;
        let rows: [&[i32]; 3] = [
            &[t.yr, t.yg, t.yb],
            &[t.cb_r, t.cb_g, t.cb_b],
            &[t.cr_r, t.cr_g, t.cr_b],
        ];
        if !fits_accumulator(&rows, 256) {
            return Err(YuvError::InvalidMatrix);
        }
        Ok(ForwardCoefficients {
            transform,
            bias_y: ((range.bias_y as f32 + 0.5f32) * (1 << PRECISION) as f32) as i32,
            bias_uv: ((range.bias_uv as f32 + 0.5f32) * (1 << PRECISION) as f32) as i32,
        })
    }

    /// YUV of `bit_depth` to RGB saturating at `out_max`.
    pub fn inverse_coefficients(
        &self,
        bit_depth: u32,
        out_max: u32,
    ) -> Result<InverseCoefficients, YuvError> {
        let bias = self.validated_kr_kb()?;
        let range = get_yuv_range(bit_depth, self.range);
        let transform =
            get_inverse_transform(out_max, range.range_y, range.range_uv, bias.kr, bias.kb)?
                .to_integers(PRECISION as u32);
        let t = &transform;
        let rows: [&[i32]; 3] = [
            &[t.y_coef, t.cr_coef],
            &[t.y_coef, t.cb_coef],
            &[t.y_coef, t.g_coeff_1, t.g_coeff_2],
        ];
        if !fits_accumulator(&rows, 1i64 << bit_depth) {
            return Err(YuvError::InvalidMatrix);
        }
        Ok(InverseCoefficients {
            transform,
            bias_y: range.bias_y as i32,
            bias_uv: range.bias_uv as i32,
            max_value: out_max as i32,
        })
    }
}

/// Byte order of an 8 bit packed RGB layout, used as const generic parameter.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RgbLayout {
    /// B, G, R, A
    Argb = 0,
    /// R, G, B, A
    Abgr = 1,
    /// A, R, G, B
    Bgra = 2,
    /// A, B, G, R
    Rgba = 3,
    /// B, G, R
    Rgb24 = 4,
    /// R, G, B
    Raw = 5,
}

impl From<u8> for RgbLayout {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => RgbLayout::Argb,
            1 => RgbLayout::Abgr,
            2 => RgbLayout::Bgra,
            3 => RgbLayout::Rgba,
            4 => RgbLayout::Rgb24,
            5 => RgbLayout::Raw,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl RgbLayout {
    #[inline(always)]
    pub(crate) const fn get_channels_count(&self) -> usize {
        match self {
            RgbLayout::Rgb24 | RgbLayout::Raw => 3,
            _ => 4,
        }
    }

    #[inline(always)]
    pub(crate) const fn has_alpha(&self) -> bool {
        self.get_channels_count() == 4
    }

    #[inline(always)]
    pub(crate) const fn get_r_channel_offset(&self) -> usize {
        match self {
            RgbLayout::Argb => 2,
            RgbLayout::Abgr => 0,
            RgbLayout::Bgra => 1,
            RgbLayout::Rgba => 3,
            RgbLayout::Rgb24 => 2,
            RgbLayout::Raw => 0,
        }
    }

    #[inline(always)]
    pub(crate) const fn get_g_channel_offset(&self) -> usize {
        match self {
            RgbLayout::Bgra | RgbLayout::Rgba => 2,
            _ => 1,
        }
    }

    #[inline(always)]
    pub(crate) const fn get_b_channel_offset(&self) -> usize {
        match self {
            RgbLayout::Argb => 0,
            RgbLayout::Abgr => 2,
            RgbLayout::Bgra => 3,
            RgbLayout::Rgba => 1,
            RgbLayout::Rgb24 => 0,
            RgbLayout::Raw => 2,
        }
    }

    #[inline(always)]
    pub(crate) const fn get_a_channel_offset(&self) -> usize {
        match self {
            RgbLayout::Argb | RgbLayout::Abgr => 3,
            _ => 0,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum YuvChromaSubsampling {
    Yuv420 = 0,
    Yuv422 = 1,
    Yuv444 = 2,
}

impl From<u8> for YuvChromaSubsampling {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvChromaSubsampling::Yuv420,
            1 => YuvChromaSubsampling::Yuv422,
            2 => YuvChromaSubsampling::Yuv444,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum YuvNVOrder {
    UV = 0,
    VU = 1,
}

impl From<u8> for YuvNVOrder {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvNVOrder::UV,
            1 => YuvNVOrder::VU,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl YuvNVOrder {
    #[inline(always)]
    pub(crate) const fn get_u_position(&self) -> usize {
        match self {
            YuvNVOrder::UV => 0,
            YuvNVOrder::VU => 1,
        }
    }

    #[inline(always)]
    pub(crate) const fn get_v_position(&self) -> usize {
        match self {
            YuvNVOrder::UV => 1,
            YuvNVOrder::VU => 0,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Yuy2Description {
    YUYV = 0,
    UYVY = 1,
}

impl From<u8> for Yuy2Description {
    fn from(value: u8) -> Self {
        match value {
            0 => Yuy2Description::YUYV,
            1 => Yuy2Description::UYVY,
            _ => {
                panic!("Not supported value {}", value)
            }
        }
    }
}

impl Yuy2Description {
    #[inline]
    pub(crate) const fn get_u_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 1,
            Yuy2Description::UYVY => 0,
        }
    }

    #[inline]
    pub(crate) const fn get_v_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 3,
            Yuy2Description::UYVY => 2,
        }
    }

    #[inline(always)]
    pub(crate) const fn get_first_y_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 0,
            Yuy2Description::UYVY => 1,
        }
    }

    #[inline]
    pub(crate) const fn get_second_y_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 2,
            Yuy2Description::UYVY => 3,
        }
    }
}

/// Resampling filter used by the scaler.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Point sampling.
    #[default]
    None = 0,
    /// Horizontal interpolation only.
    Linear = 1,
    /// Horizontal and vertical interpolation.
    Bilinear = 2,
    /// Area averaging, the highest quality reduction.
    Box = 3,
}

/// Clockwise rotation angle.
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RotationMode {
    #[default]
    Rotate0 = 0,
    Rotate90 = 90,
    Rotate180 = 180,
    Rotate270 = 270,
}

impl RotationMode {
    pub const NONE: RotationMode = RotationMode::Rotate0;
    pub const CLOCKWISE: RotationMode = RotationMode::Rotate90;
    pub const COUNTER_CLOCKWISE: RotationMode = RotationMode::Rotate270;

    /// Accepts any multiple of 90, negative angles counting counter-clockwise.
    pub const fn from_degrees(degrees: i32) -> Option<RotationMode> {
        match degrees.rem_euclid(360) {
            0 => Some(RotationMode::Rotate0),
            90 => Some(RotationMode::Rotate90),
            180 => Some(RotationMode::Rotate180),
            270 => Some(RotationMode::Rotate270),
            _ => None,
        }
    }

    /// True when width and height trade places.
    #[inline]
    pub const fn swaps_dimensions(self) -> bool {
        matches!(self, RotationMode::Rotate90 | RotationMode::Rotate270)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MirrorMode {
    /// Swaps columns.
    Horizontal,
    /// Swaps rows.
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_rows_are_balanced() {
        for matrix in [
            ColorMatrix::BT601,
            ColorMatrix::JPEG,
            ColorMatrix::BT709,
            ColorMatrix::BT709_FULL,
            ColorMatrix::BT2020,
            ColorMatrix::BT2020_FULL,
        ] {
            let coeffs = matrix.forward_coefficients().unwrap();
            let t = coeffs.transform;
            assert_eq!(t.cb_r + t.cb_g + t.cb_b, 0);
            assert_eq!(t.cr_r + t.cr_g + t.cr_b, 0);
            let white = (t.yr + t.yg + t.yb) * 255 + coeffs.bias_y;
            let expected = if matrix.range == YuvRange::Full { 255 } else { 235 };
            assert_eq!(white >> PRECISION, expected);
        }
    }

    #[test]
    fn test_custom_matrix_validation() {
        assert_eq!(
            ColorMatrix::custom(0.5, 0.5, YuvRange::Full),
            Err(YuvError::InvalidMatrix)
        );
        let matrix = ColorMatrix::custom(0.25, 0.1, YuvRange::Limited).unwrap();
        assert!(matrix.inverse_coefficients(8, 255).is_ok());
    }

    #[test]
    fn test_near_singular_matrix_is_rejected() {
        assert_eq!(
            ColorMatrix::custom(0.7, 0.2999, YuvRange::Full),
            Err(YuvError::InvalidMatrix)
        );
        let unchecked = ColorMatrix::new(YuvStandardMatrix::Custom(0.7, 0.2999), YuvRange::Full);
        assert_eq!(unchecked.inverse_coefficients(8, 255), Err(YuvError::InvalidMatrix));
        for matrix in [ColorMatrix::BT601, ColorMatrix::BT709_FULL, ColorMatrix::BT2020] {
            assert!(matrix.forward_coefficients().is_ok());
            assert!(matrix.inverse_coefficients(10, 1023).is_ok());
        }
    }

    #[test]
    fn test_rotation_aliases() {
        assert_eq!(RotationMode::CLOCKWISE, RotationMode::Rotate90);
        assert_eq!(RotationMode::COUNTER_CLOCKWISE, RotationMode::Rotate270);
        assert_eq!(RotationMode::NONE, RotationMode::Rotate0);
        assert_eq!(RotationMode::from_degrees(-90), Some(RotationMode::Rotate270));
        assert_eq!(RotationMode::from_degrees(450), Some(RotationMode::Rotate90));
        assert_eq!(RotationMode::from_degrees(45), None);
    }

    #[test]
    fn test_rgb_layout_offsets_are_distinct() {
        for layout in 0..6u8 {
            let layout: RgbLayout = layout.into();
            let mut seen = [false; 4];
            seen[layout.get_r_channel_offset()] = true;
            seen[layout.get_g_channel_offset()] = true;
            seen[layout.get_b_channel_offset()] = true;
            if layout.has_alpha() {
                seen[layout.get_a_channel_offset()] = true;
            }
            let used = seen.iter().filter(|&&x| x).count();
            assert_eq!(used, layout.get_channels_count());
        }
    }
}
