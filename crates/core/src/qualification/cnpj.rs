const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Validates a CNPJ, with or without `.` `/` `-` punctuation.
pub fn is_valid_cnpj(raw: &str) -> bool {
    let Some(digits) = cnpj_digits(raw) else {
        return false;
    };
    if digits.iter().all(|digit| *digit == digits[0]) {
        return false;
    }

    check_digit(&digits[..12], &FIRST_WEIGHTS) == digits[12]
        && check_digit(&digits[..13], &SECOND_WEIGHTS) == digits[13]
}

/// Strips punctuation and whitespace, returning the 14 digits if that is
/// exactly what remains.
pub fn cnpj_digits(raw: &str) -> Option<[u32; 14]> {
    let mut digits = [0u32; 14];
    let mut count = 0;

    for ch in raw.chars() {
        match ch {
            '.' | '/' | '-' => continue,
            ch if ch.is_whitespace() => continue,
            ch => {
                let digit = ch.to_digit(10)?;
                if count == digits.len() {
                    return None;
                }
                digits[count] = digit;
                count += 1;
            }
        }
    }

    (count == digits.len()).then_some(digits)
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(digit, weight)| digit * weight).sum();
    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => 11 - remainder,
    }
}

#[cfg(test)]
mod tests {
    use super::{cnpj_digits, is_valid_cnpj};

    #[test]
    fn accepts_valid_cnpj_with_or_without_punctuation() {
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj(" 11 222 333 0001 81 "));
    }

    #[test]
    fn rejects_wrong_check_digits() {
        assert!(!is_valid_cnpj("11.222.333/0001-82"));
        assert!(!is_valid_cnpj("11.222.333/0001-91"));
    }

    #[test]
    fn rejects_wrong_length_and_repeated_digits() {
        assert!(!is_valid_cnpj("1122233300018"));
        assert!(!is_valid_cnpj("112223330001811"));
        assert!(!is_valid_cnpj("00.000.000/0000-00"));
        assert!(!is_valid_cnpj("11111111111111"));
        assert!(!is_valid_cnpj(""));
    }

    #[test]
    fn rejects_letters() {
        assert!(!is_valid_cnpj("11.222.333/0001-8A"));
        assert_eq!(cnpj_digits("AB.222.333/0001-81"), None);
    }
}
