pub mod validators;

pub use validators::{
    InputField, MAX_VALIDITY_MINUTES, ValidationError, is_valid_shortcode, is_valid_url,
    parse_validity_minutes, validate_shortcode, validate_url, validate_validity_minutes,
};

/// Alphabet for generated shortcodes: 26 upper, 26 lower, 10 digits.
pub const SHORTCODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of codes generated when the user does not pick one
pub const DEFAULT_CODE_LENGTH: usize = 6;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 随机选择字母和数字（非加密安全）
    iter::repeat_with(|| {
        SHORTCODE_ALPHABET[rand::random_range(0..SHORTCODE_ALPHABET.len())] as char
    })
    .take(length)
    .collect()
}
