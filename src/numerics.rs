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
#![forbid(unsafe_code)]

#[inline(always)]
/// Saturating rounding shift right against runtime maximum
pub(crate) fn qrshr_n<const PRECISION: i32>(val: i32, max: i32) -> i32 {
    let rounding: i32 = 1 << (PRECISION - 1);
    ((val + rounding) >> PRECISION).min(max).max(0)
}

#[inline]
/// Integer division by 255 with rounding to nearest
pub(crate) fn div_by_255(v: u16) -> u8 {
    ((((v + 0x80) >> 8) + v + 0x80) >> 8) as u8
}

#[inline(always)]
/// Rounded average of two samples
pub(crate) fn avg2(a: u16, b: u16) -> u16 {
    (a + b + 1) >> 1
}

#[inline(always)]
/// Rounded average of four samples
pub(crate) fn avg4(a: u16, b: u16, c: u16, d: u16) -> u16 {
    (a + b + c + d + 2) >> 2
}

/// Widens a 5 bit channel to 8 bits replicating the high bits
#[inline(always)]
pub(crate) const fn expand5(v: u16) -> u8 {
    let v = (v & 0x1f) as u8;
    (v << 3) | (v >> 2)
}

/// Widens a 6 bit channel to 8 bits replicating the high bits
#[inline(always)]
pub(crate) const fn expand6(v: u16) -> u8 {
    let v = (v & 0x3f) as u8;
    (v << 2) | (v >> 4)
}

/// Widens a 4 bit channel to 8 bits
#[inline(always)]
pub(crate) const fn expand4(v: u16) -> u8 {
    (v & 0x0f) as u8 * 17
}

/// Widens an 8 bit channel to 10 bits replicating the high bits
#[inline(always)]
pub(crate) const fn expand8_to_10(v: u8) -> u32 {
    ((v as u32) << 2) | ((v as u32) >> 6)
}

#[inline(always)]
pub(crate) fn read_u16_le(src: &[u8], index: usize) -> u16 {
    u16::from_le_bytes([src[index * 2], src[index * 2 + 1]])
}

#[inline(always)]
pub(crate) fn write_u16_le(dst: &mut [u8], index: usize, value: u16) {
    let bytes = value.to_le_bytes();
    dst[index * 2] = bytes[0];
    dst[index * 2 + 1] = bytes[1];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_by_255() {
        for a in 0..=255u16 {
            for c in 0..=255u16 {
                let expected = ((c * a) as f32 / 255f32).round() as u8;
                assert_eq!(div_by_255(c * a), expected, "c {} a {}", c, a);
            }
        }
    }

    #[test]
    fn test_expansion_endpoints() {
        assert_eq!(expand5(0), 0);
        assert_eq!(expand5(31), 255);
        assert_eq!(expand6(63), 255);
        assert_eq!(expand4(15), 255);
        assert_eq!(expand4(8), 136);
        assert_eq!(expand8_to_10(255), 1023);
        assert_eq!(expand8_to_10(0), 0);
    }

    #[test]
    fn test_qrshr() {
        assert_eq!(qrshr_n::<13>(255 << 13, 255), 255);
        assert_eq!(qrshr_n::<13>(300 << 13, 255), 255);
        assert_eq!(qrshr_n::<13>(-5 << 13, 255), 0);
        assert_eq!(qrshr_n::<13>((10 << 13) + (1 << 12), 255), 11);
        assert_eq!(qrshr_n::<13>(1500 << 13, 1023), 1023);
    }
}
