//! 3x3 neighborhood filters over 8-bit luminance planes
//!
//! Every filter reads a row-major `width * height` plane and produces a new one.
//! Neighbors outside the image are mirrored without repeating the edge pixel
//! (reflect-101), so a 1-pixel wide or tall plane still filters cleanly.

/// Gaussian smoothing kernel, weights sum to 16
const GAUSSIAN_3X3: [i32; 9] = [1, 2, 1, 2, 4, 2, 1, 2, 1];

/// Sharpening kernel, weights sum to 1
const SHARPEN_3X3: [i32; 9] = [0, -1, 0, -1, 5, -1, 0, -1, 0];

const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Mirror an out-of-range coordinate back into `0..len`
#[inline]
fn reflect_101(pos: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut p = pos;
    if p < 0 {
        p = -p;
    }
    if p > last {
        p = 2 * last - p;
    }
    p.clamp(0, last) as usize
}

/// Weighted sum of the 3x3 neighborhood around (x, y)
#[inline]
fn convolve_at(plane: &[u8], width: usize, height: usize, x: usize, y: usize, kernel: &[i32; 9]) -> i32 {
    let mut acc = 0i32;
    for ky in 0..3 {
        let ny = reflect_101(y as isize + ky as isize - 1, height);
        let row = ny * width;
        for kx in 0..3 {
            let weight = kernel[ky * 3 + kx];
            if weight == 0 {
                continue;
            }
            let nx = reflect_101(x as isize + kx as isize - 1, width);
            acc += weight * plane[row + nx] as i32;
        }
    }
    acc
}

/// Smooth with the 3x3 Gaussian kernel (rounded to nearest)
pub fn gaussian_blur_3x3(plane: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(plane.len(), width * height);
    let mut output = vec![0u8; plane.len()];
    for (y, row) in output.chunks_mut(width).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let sum = convolve_at(plane, width, height, x, y, &GAUSSIAN_3X3);
            *px = ((sum + 8) >> 4) as u8;
        }
    }
    output
}

/// Gradient magnitude from horizontal and vertical Sobel derivatives
pub fn sobel_magnitude(plane: &[u8], width: usize, height: usize) -> Vec<f64> {
    debug_assert_eq!(plane.len(), width * height);
    let mut output = vec![0f64; plane.len()];
    for (y, row) in output.chunks_mut(width).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let gx = convolve_at(plane, width, height, x, y, &SOBEL_X) as f64;
            let gy = convolve_at(plane, width, height, x, y, &SOBEL_Y) as f64;
            *px = gx.hypot(gy);
        }
    }
    output
}

/// Sharpen with a center-weighted kernel, clamped to the 8-bit range
pub fn sharpen_3x3(plane: &[u8], width: usize, height: usize) -> Vec<u8> {
    debug_assert_eq!(plane.len(), width * height);
    let mut output = vec![0u8; plane.len()];
    for (y, row) in output.chunks_mut(width).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let sum = convolve_at(plane, width, height, x, y, &SHARPEN_3X3);
            *px = sum.clamp(0, 255) as u8;
        }
    }
    output
}

/// Add a constant offset to every pixel, saturating at 255
pub fn brighten(plane: &[u8], offset: u8) -> Vec<u8> {
    plane.iter().map(|&v| v.saturating_add(offset)).collect()
}
