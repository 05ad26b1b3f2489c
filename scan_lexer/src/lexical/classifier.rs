//! Byte classification for the automaton
//!
//! ASCII only. Bytes at or above 0x80 are neither letters, digits nor whitespace.

/// `a-z` or `A-Z`
#[inline]
pub fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// `0-9`
#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Space, tab, line feed, vertical tab, form feed or carriage return
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Bytes that may continue a word after its first letter
#[inline]
pub fn is_word_continue(b: u8) -> bool {
    is_letter(b) || is_digit(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert!(is_letter(b'a'));
        assert!(is_letter(b'Z'));
        assert!(!is_letter(b'0'));
        assert!(!is_letter(b'_'));
        assert!(!is_letter(0xC3));
    }

    #[test]
    fn test_digits() {
        assert!((b'0'..=b'9').all(is_digit));
        assert!(!is_digit(b'a'));
        assert!(!is_digit(b'.'));
    }

    #[test]
    fn test_whitespace_includes_vertical_tab_and_form_feed() {
        for b in [b' ', b'\t', b'\n', 0x0B, 0x0C, b'\r'] {
            assert!(is_whitespace(b), "0x{:02X} should be whitespace", b);
        }
        assert!(!is_whitespace(0));
        assert!(!is_whitespace(0xA0));
    }

    #[test]
    fn test_classes_are_disjoint() {
        for b in 0..=u8::MAX {
            let classes = [is_letter(b), is_digit(b), is_whitespace(b)];
            assert!(classes.iter().filter(|c| **c).count() <= 1);
        }
    }

    #[test]
    fn test_word_continue() {
        assert!(is_word_continue(b'x'));
        assert!(is_word_continue(b'9'));
        assert!(!is_word_continue(b';'));
    }
}
