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
mod blend;
mod color_effects;
mod compare;
mod convert;
mod convert_sample;
mod convert_wrappers;
mod cpu_features;
mod geometry;
mod images;
mod mirroring;
mod numerics;
mod packed_rgb;
mod pixel_format;
mod planar;
mod rgba_to_yuv;
mod routes;
mod scale;
mod shuffle;
mod yuv_error;
mod yuv_support;
mod yuv_to_rgba;
mod yuy2;

pub use images::{BufferStoreMut, CropRect, PixelBuffer, PixelBufferMut, PlaneSet, PlaneSetMut};
pub use pixel_format::{FormatDescriptor, FormatFamily, FourCC, PixelFormat, PlaneLayout};
pub use yuv_error::{status, MismatchedSize, YuvError, STATUS_INVALID_PARAMETER, STATUS_UNSUPPORTED};
pub use yuv_support::{
    get_forward_transform, get_inverse_transform, get_kr_kb, get_yuv_range, CbCrForwardTransform,
    CbCrInverseTransform, ColorMatrix, FilterMode, ForwardCoefficients, InverseCoefficients,
    MirrorMode, RotationMode, YuvBias, YuvChromaRange, YuvRange, YuvStandardMatrix,
};

pub use cpu_features::{
    cpu_flags, init_cpu_flags, mask_cpu_flags, reset_cpu_flags, set_cpu_flags,
    set_use_reference_impl, CpuFlags,
};

pub use convert::convert;
pub use routes::{find_route, Route};

pub use convert_wrappers::*;
pub use convert_sample::{convert_from_i420, convert_to_argb, convert_to_i420};

pub use packed_rgb::DITHER_4X4;
pub use shuffle::argb_shuffle;

pub use planar::{
    argb_copy_alpha, argb_copy_y_to_alpha, argb_extract_alpha, convert_16_to_8_plane,
    convert_8_to_16_plane, copy_plane, copy_plane_16, merge_rgb_plane, merge_uv_plane, set_plane,
    split_rgb_plane, split_uv_plane, swap_uv_plane,
};

pub use blend::{
    argb_add, argb_attenuate, argb_blend, argb_interpolate, argb_multiply, argb_subtract,
    argb_unattenuate, blend_plane,
};
pub use color_effects::{
    argb_color_matrix, argb_color_table, argb_gray, argb_gray_to, argb_quantize, argb_sepia,
    argb_shade, rgb_color_table,
};

pub use scale::{
    argb_scale, argb_scale_clip, i420_scale, i420_scale_16, i444_scale, scale_frame, scale_plane,
    scale_plane_16, scale_uv,
};

pub use geometry::{
    argb_rotate, i420_rotate, i444_rotate, nv12_to_i420_rotate, rotate_frame, rotate_plane,
    rotate_plane_16, rotate_plane_180, rotate_plane_270, rotate_plane_90, rotate_uv,
    transpose_plane, transpose_uv,
};
pub use mirroring::{argb_mirror, i400_mirror, i420_mirror, mirror_frame, mirror_plane};

pub use compare::{
    argb_detect, calc_frame_psnr, calc_frame_ssim, compute_hamming_distance,
    compute_sum_square_error, compute_sum_square_error_plane, hash_djb2, i420_psnr, i420_ssim,
    sum_square_error_to_psnr, DJB2_SEED, MAX_PSNR,
};
