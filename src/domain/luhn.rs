/// Returns true when `number` is non-empty and made of ASCII digits only.
pub fn only_digits(number: &str) -> bool {
    !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())
}

/// Mod-10 check digit validation. Non-numeric input is never valid.
pub fn is_valid(number: &str) -> bool {
    if !only_digits(number) {
        return false;
    }

    let sum: u32 = number
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_numbers() {
        for number in ["5062821234567892", "79927398713", "89920", "2377225624", "0"] {
            assert!(is_valid(number), "{number} should pass the check");
        }
    }

    #[test]
    fn rejects_bad_check_digit() {
        assert!(!is_valid("4147203059780942"));
        assert!(!is_valid("79927398710"));
        assert!(!is_valid("111"));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(!is_valid("123456abcd"));
        assert!(!is_valid(""));
        assert!(!is_valid(" 79927398713"));
        assert!(!only_digits("4499999xxxxx"));
        assert!(only_digits("1234567890"));
    }
}
