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
use crate::packed_rgb::{ar30_swap_frame, pack_frame, unpack_frame, PackedRgb};
use crate::pixel_format::PixelFormat;
use crate::planar::{
    chroma_resample_frame, copy_frame, gray_to_planar_frame, i010_to_i420_frame,
    i010_to_p010_frame, i420_to_i010_frame, nv_swap_frame, nv_to_planar_frame,
    p010_to_i010_frame, planar_to_gray_frame, planar_to_nv_frame, yv12_swap_frame,
};
use crate::rgba_to_yuv::{rgb_to_gray_frame, rgb_to_nv_frame, rgb_to_planar_frame};
use crate::shuffle::shuffle_frame;
use crate::yuv_error::YuvError;
use crate::yuv_support::{ColorMatrix, RgbLayout, YuvChromaSubsampling, YuvNVOrder, Yuy2Description};
use crate::yuv_to_rgba::{
    gray_to_rgb_frame, i010_to_ar30_frame, i010_to_rgb_frame, nv_to_rgb_frame,
    p010_to_rgb_frame, planar_to_rgb_frame,
};
use crate::yuy2::{
    planar_to_yuy2_frame, rgb_to_yuy2_frame, yuy2_swap_frame, yuy2_to_planar_frame,
    yuy2_to_rgb_frame,
};
use std::fmt::{Debug, Formatter};

/// Converts a validated frame into a validated frame of another format.
pub(crate) type EdgeFn = fn(&PlaneSet, &mut PlaneSetMut, ColorMatrix) -> Result<(), YuvError>;

/// Reordering only.
const LOSSLESS: u32 = 1;
/// Resampling or bit depth change.
const RESAMPLE: u32 = 2;
/// Goes through the color matrix.
const COLOR: u32 = 4;

pub(crate) struct Edge {
    pub(crate) from: PixelFormat,
    pub(crate) to: PixelFormat,
    pub(crate) cost: u32,
    pub(crate) convert: EdgeFn,
}

impl Debug for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?} -> {:?} ({})", self.from, self.to, self.cost))
    }
}

const ARGB: u8 = RgbLayout::Argb as u8;
const ABGR: u8 = RgbLayout::Abgr as u8;
const BGRA: u8 = RgbLayout::Bgra as u8;
const RGBA: u8 = RgbLayout::Rgba as u8;
const RGB24: u8 = RgbLayout::Rgb24 as u8;
const RAW: u8 = RgbLayout::Raw as u8;

const YUV420: u8 = YuvChromaSubsampling::Yuv420 as u8;
const YUV422: u8 = YuvChromaSubsampling::Yuv422 as u8;
const YUV444: u8 = YuvChromaSubsampling::Yuv444 as u8;

const UV: u8 = YuvNVOrder::UV as u8;
const VU: u8 = YuvNVOrder::VU as u8;

const YUYV: u8 = Yuy2Description::YUYV as u8;
const UYVY: u8 = Yuy2Description::UYVY as u8;

const RGB565: u8 = PackedRgb::Rgb565 as u8;
const ARGB1555: u8 = PackedRgb::Argb1555 as u8;
const ARGB4444: u8 = PackedRgb::Argb4444 as u8;
const AR30: u8 = PackedRgb::Ar30 as u8;
const AB30: u8 = PackedRgb::Ab30 as u8;

macro_rules! edge {
    ($from:ident -> $to:ident, $cost:expr, $convert:expr) => {
        Edge {
            from: PixelFormat::$from,
            to: PixelFormat::$to,
            cost: $cost,
            convert: $convert,
        }
    };
}

/// Direct conversions, everything else is composed from these.
static EDGES: &[Edge] = &[
    // 8 bit packed RGB reshuffles
    edge!(Argb -> Abgr, LOSSLESS, shuffle_frame::<ARGB, ABGR>),
    edge!(Abgr -> Argb, LOSSLESS, shuffle_frame::<ABGR, ARGB>),
    edge!(Argb -> Bgra, LOSSLESS, shuffle_frame::<ARGB, BGRA>),
    edge!(Bgra -> Argb, LOSSLESS, shuffle_frame::<BGRA, ARGB>),
    edge!(Argb -> Rgba, LOSSLESS, shuffle_frame::<ARGB, RGBA>),
    edge!(Rgba -> Argb, LOSSLESS, shuffle_frame::<RGBA, ARGB>),
    edge!(Argb -> Rgb24, LOSSLESS, shuffle_frame::<ARGB, RGB24>),
    edge!(Rgb24 -> Argb, LOSSLESS, shuffle_frame::<RGB24, ARGB>),
    edge!(Argb -> Raw, LOSSLESS, shuffle_frame::<ARGB, RAW>),
    edge!(Raw -> Argb, LOSSLESS, shuffle_frame::<RAW, ARGB>),
    edge!(Raw -> Rgb24, LOSSLESS, shuffle_frame::<RAW, RGB24>),
    edge!(Rgb24 -> Raw, LOSSLESS, shuffle_frame::<RGB24, RAW>),
    // 16 and 32 bit packed RGB
    edge!(Rgb565 -> Argb, LOSSLESS, unpack_frame::<RGB565>),
    edge!(Argb -> Rgb565, RESAMPLE, pack_frame::<RGB565>),
    edge!(Argb1555 -> Argb, LOSSLESS, unpack_frame::<ARGB1555>),
    edge!(Argb -> Argb1555, RESAMPLE, pack_frame::<ARGB1555>),
    edge!(Argb4444 -> Argb, LOSSLESS, unpack_frame::<ARGB4444>),
    edge!(Argb -> Argb4444, RESAMPLE, pack_frame::<ARGB4444>),
    edge!(Ar30 -> Argb, RESAMPLE, unpack_frame::<AR30>),
    edge!(Argb -> Ar30, RESAMPLE, pack_frame::<AR30>),
    edge!(Ab30 -> Argb, RESAMPLE, unpack_frame::<AB30>),
    edge!(Argb -> Ab30, RESAMPLE, pack_frame::<AB30>),
    edge!(Ar30 -> Ab30, LOSSLESS, ar30_swap_frame),
    edge!(Ab30 -> Ar30, LOSSLESS, ar30_swap_frame),
    // YUV to RGB
    edge!(I420 -> Argb, COLOR, planar_to_rgb_frame::<ARGB, YUV420>),
    edge!(I420 -> Abgr, COLOR, planar_to_rgb_frame::<ABGR, YUV420>),
    edge!(I420 -> Rgb24, COLOR, planar_to_rgb_frame::<RGB24, YUV420>),
    edge!(I420 -> Raw, COLOR, planar_to_rgb_frame::<RAW, YUV420>),
    edge!(Yv12 -> Argb, COLOR, planar_to_rgb_frame::<ARGB, YUV420>),
    edge!(I422 -> Argb, COLOR, planar_to_rgb_frame::<ARGB, YUV422>),
    edge!(I444 -> Argb, COLOR, planar_to_rgb_frame::<ARGB, YUV444>),
    edge!(I400 -> Argb, COLOR, gray_to_rgb_frame::<ARGB>),
    edge!(Nv12 -> Argb, COLOR, nv_to_rgb_frame::<ARGB, UV>),
    edge!(Nv12 -> Rgb24, COLOR, nv_to_rgb_frame::<RGB24, UV>),
    edge!(Nv21 -> Argb, COLOR, nv_to_rgb_frame::<ARGB, VU>),
    edge!(Yuy2 -> Argb, COLOR, yuy2_to_rgb_frame::<ARGB, YUYV>),
    edge!(Uyvy -> Argb, COLOR, yuy2_to_rgb_frame::<ARGB, UYVY>),
    edge!(I010 -> Argb, COLOR, i010_to_rgb_frame::<ARGB>),
    edge!(I010 -> Ar30, COLOR, i010_to_ar30_frame),
    edge!(P010 -> Argb, COLOR, p010_to_rgb_frame::<ARGB>),
    // RGB to YUV
    edge!(Argb -> I420, COLOR, rgb_to_planar_frame::<ARGB, YUV420>),
    edge!(Abgr -> I420, COLOR, rgb_to_planar_frame::<ABGR, YUV420>),
    edge!(Rgb24 -> I420, COLOR, rgb_to_planar_frame::<RGB24, YUV420>),
    edge!(Raw -> I420, COLOR, rgb_to_planar_frame::<RAW, YUV420>),
    edge!(Argb -> Yv12, COLOR, rgb_to_planar_frame::<ARGB, YUV420>),
    edge!(Argb -> I422, COLOR, rgb_to_planar_frame::<ARGB, YUV422>),
    edge!(Argb -> I444, COLOR, rgb_to_planar_frame::<ARGB, YUV444>),
    edge!(Argb -> I400, COLOR, rgb_to_gray_frame::<ARGB>),
    edge!(Argb -> Nv12, COLOR, rgb_to_nv_frame::<ARGB, UV>),
    edge!(Argb -> Nv21, COLOR, rgb_to_nv_frame::<ARGB, VU>),
    edge!(Argb -> Yuy2, COLOR, rgb_to_yuy2_frame::<ARGB, YUYV>),
    edge!(Argb -> Uyvy, COLOR, rgb_to_yuy2_frame::<ARGB, UYVY>),
    // YUV to YUV
    edge!(I420 -> Yv12, LOSSLESS, yv12_swap_frame),
    edge!(Yv12 -> I420, LOSSLESS, yv12_swap_frame),
    edge!(I420 -> I422, RESAMPLE, chroma_resample_frame),
    edge!(I422 -> I420, RESAMPLE, chroma_resample_frame),
    edge!(I420 -> I444, RESAMPLE, chroma_resample_frame),
    edge!(I444 -> I420, RESAMPLE, chroma_resample_frame),
    edge!(I422 -> I444, RESAMPLE, chroma_resample_frame),
    edge!(I444 -> I422, RESAMPLE, chroma_resample_frame),
    edge!(Nv12 -> I420, LOSSLESS, nv_to_planar_frame::<UV>),
    edge!(Nv21 -> I420, LOSSLESS, nv_to_planar_frame::<VU>),
    edge!(I420 -> Nv12, LOSSLESS, planar_to_nv_frame::<UV>),
    edge!(I420 -> Nv21, LOSSLESS, planar_to_nv_frame::<VU>),
    edge!(Nv12 -> Nv21, LOSSLESS, nv_swap_frame),
    edge!(Nv21 -> Nv12, LOSSLESS, nv_swap_frame),
    edge!(I400 -> I420, LOSSLESS, gray_to_planar_frame),
    edge!(I420 -> I400, RESAMPLE, planar_to_gray_frame),
    edge!(I010 -> I420, RESAMPLE, i010_to_i420_frame),
    edge!(I420 -> I010, RESAMPLE, i420_to_i010_frame),
    edge!(I010 -> P010, LOSSLESS, i010_to_p010_frame),
    edge!(P010 -> I010, LOSSLESS, p010_to_i010_frame),
    edge!(Yuy2 -> I422, LOSSLESS, yuy2_to_planar_frame::<YUYV, YUV422>),
    edge!(Uyvy -> I422, LOSSLESS, yuy2_to_planar_frame::<UYVY, YUV422>),
    edge!(Yuy2 -> I420, RESAMPLE, yuy2_to_planar_frame::<YUYV, YUV420>),
    edge!(Uyvy -> I420, RESAMPLE, yuy2_to_planar_frame::<UYVY, YUV420>),
    edge!(I422 -> Yuy2, LOSSLESS, planar_to_yuy2_frame::<YUYV, YUV422>),
    edge!(I422 -> Uyvy, LOSSLESS, planar_to_yuy2_frame::<UYVY, YUV422>),
    edge!(I420 -> Yuy2, RESAMPLE, planar_to_yuy2_frame::<YUYV, YUV420>),
    edge!(I420 -> Uyvy, RESAMPLE, planar_to_yuy2_frame::<UYVY, YUV420>),
    edge!(Yuy2 -> Uyvy, LOSSLESS, yuy2_swap_frame),
    edge!(Uyvy -> Yuy2, LOSSLESS, yuy2_swap_frame),
];

/// Chain of direct conversions between two formats.
#[derive(Debug, Clone)]
pub struct Route {
    from: PixelFormat,
    edges: Vec<&'static Edge>,
}

impl Route {
    /// Formats visited, both ends included.
    pub fn formats(&self) -> Vec<PixelFormat> {
        std::iter::once(self.from)
            .chain(self.edges.iter().map(|edge| edge.to))
            .collect()
    }

    pub fn cost(&self) -> u32 {
        self.edges.iter().map(|edge| edge.cost).sum()
    }

    /// Number of direct conversions, zero for a plain copy.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Runs the chain, intermediate frames are allocated only for composed routes.
    pub(crate) fn execute(
        &self,
        src: &PlaneSet,
        dst: &mut PlaneSetMut,
        matrix: ColorMatrix,
    ) -> Result<(), YuvError> {
        let Some((last, init)) = self.edges.split_last() else {
            return copy_frame(src, dst, matrix);
        };
        let mut current: Option<PlaneSetMut<'static>> = None;
        for edge in init {
            log::trace!(
                "allocating {:?} {}x{} intermediate for {:?}",
                edge.to,
                src.width,
                src.height,
                edge
            );
            let mut next = PlaneSetMut::alloc(edge.to, src.width, src.height);
            match &current {
                None => (edge.convert)(src, &mut next, matrix)?,
                Some(frame) => (edge.convert)(&frame.to_fixed(), &mut next, matrix)?,
            }
            current = Some(next);
        }
        match &current {
            None => (last.convert)(src, dst, matrix),
            Some(frame) => (last.convert)(&frame.to_fixed(), dst, matrix),
        }
    }
}

const FORMAT_COUNT: usize = PixelFormat::ALL.len();

/// Cheapest chain of direct conversions from `from` to `to`.
pub fn find_route(from: PixelFormat, to: PixelFormat) -> Option<Route> {
    let mut dist = [u32::MAX; FORMAT_COUNT];
    let mut via: [Option<&'static Edge>; FORMAT_COUNT] = [None; FORMAT_COUNT];
    let mut done = [false; FORMAT_COUNT];
    dist[from as usize] = 0;

    while let Some(node) = (0..FORMAT_COUNT)
        .filter(|&i| !done[i] && dist[i] != u32::MAX)
        .min_by_key(|&i| dist[i])
    {
        if node == to as usize {
            break;
        }
        done[node] = true;
        for edge in EDGES.iter().filter(|edge| edge.from as usize == node) {
            let candidate = dist[node] + edge.cost;
            let target = edge.to as usize;
            if candidate < dist[target] {
                dist[target] = candidate;
                via[target] = Some(edge);
            }
        }
    }

    let mut edges = Vec::new();
    let mut node = to as usize;
    while node != from as usize {
        let edge = via[node]?;
        edges.push(edge);
        node = edge.from as usize;
    }
    edges.reverse();
    Some(Route { from, edges })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_is_reachable() {
        for from in PixelFormat::ALL {
            for to in PixelFormat::ALL {
                let route = find_route(from, to)
                    .unwrap_or_else(|| panic!("no route from {from:?} to {to:?}"));
                let formats = route.formats();
                assert_eq!(formats.first(), Some(&from));
                assert_eq!(formats.last(), Some(&to));
            }
        }
    }

    #[test]
    fn test_routes_prefer_cheap_paths() {
        let route = find_route(PixelFormat::I420, PixelFormat::Rgb565).unwrap();
        assert_eq!(
            route.formats(),
            vec![PixelFormat::I420, PixelFormat::Argb, PixelFormat::Rgb565]
        );
        let route = find_route(PixelFormat::Yv12, PixelFormat::Nv21).unwrap();
        assert_eq!(route.cost(), 2 * LOSSLESS);
        let route = find_route(PixelFormat::Rgb24, PixelFormat::I420).unwrap();
        assert_eq!(route.len(), 1);
        assert!(find_route(PixelFormat::Nv12, PixelFormat::Nv12).unwrap().is_empty());
    }

    #[test]
    fn test_every_route_runs_on_odd_frames() {
        for from in PixelFormat::ALL {
            let src = PlaneSetMut::alloc(from, 5, 3);
            for to in PixelFormat::ALL {
                let mut dst = PlaneSetMut::alloc(to, 5, 3);
                let route = find_route(from, to).unwrap();
                route
                    .execute(&src.to_fixed(), &mut dst, ColorMatrix::BT601)
                    .unwrap_or_else(|e| panic!("{from:?} -> {to:?}: {e}"));
            }
        }
    }
}
