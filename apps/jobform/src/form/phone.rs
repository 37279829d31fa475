/// Phone mask applied on every keystroke.
///
/// Non-digits are stripped, then exactly 10 digits become `(DD) DDDD-DDDD` and
/// exactly 11 become `(DD) DDDDD-DDDD`. Shorter input is shown as bare digits.
/// Input with more than 11 digits is returned untouched.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        n if n < 10 => digits,
        _ => input.to_string(),
    }
}
