//! Linear to sRGB gamma encoding of color channels.

/// Linear values at or below this use the linear segment of the sRGB curve.
pub const SRGB_LINEAR_THRESHOLD: f64 = 0.0031308;

/// Applies the sRGB transfer function to a linear channel value.
///
/// The input is not clamped: values outside `[0, 1]` map outside `[0, 1]`.
pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= SRGB_LINEAR_THRESHOLD {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Encodes a linear channel value as an 8-bit sRGB component.
///
/// Rounds half to even and clamps to `[0, 255]`. NaN encodes as 0.
pub fn encode_channel(linear: f64) -> u8 {
    let scaled = (linear_to_srgb(linear) * 255.0).round_ties_even();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

/// Encodes the three channels of a color.
pub fn encode_rgb(linear: [f64; 3]) -> [u8; 3] {
    linear.map(encode_channel)
}
