// ==========================================
// Prospect Intake - Tax ID (CPF) Checksum
// ==========================================
// Two mod-11 check digits:
// - digit 10: first 9 digits, weights 10..=2
// - digit 11: first 10 digits, weights 11..=2
// - check = (sum * 10) % 11 % 10
// Repeated-digit IDs (000..., 111..., ...) satisfy the math but are
// not issued, so they are rejected before the checksum.
// ==========================================

use crate::importer::data_cleaner::TAX_ID_LEN;

/// Compute the check digit over `digits`, weights descending from `digits.len() + 1` to 2
fn check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(idx, d)| d * (top_weight - idx as u32))
        .sum();
    (sum * 10) % 11 % 10
}

/// Both check digits for the 9-digit base of a tax ID
pub fn compute_check_digits(base: &[u32; 9]) -> (u32, u32) {
    let first = check_digit(base);
    let mut extended = [0u32; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;
    (first, check_digit(&extended))
}

/// Validate a normalized tax ID (exactly 11 ASCII digits)
///
/// # Returns
/// - false: wrong shape, all digits identical, or check digit mismatch
pub fn is_valid_tax_id(tax_id: &str) -> bool {
    let digits: Vec<u32> = match tax_id.chars().map(|c| c.to_digit(10)).collect() {
        Some(d) => d,
        None => return false,
    };

    if digits.len() != TAX_ID_LEN || !tax_id.is_ascii() {
        return false;
    }

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let mut base = [0u32; 9];
    base.copy_from_slice(&digits[..9]);
    let (first, second) = compute_check_digits(&base);

    first == digits[9] && second == digits[10]
}
