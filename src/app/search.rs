//! Free-text search classification.

use crate::domain::SearchIntent;

/// Longest slot number accepted, in digits.
const MAX_SLOT_DIGITS: usize = 12;

/// Signatures are at least this long.
const SIGNATURE_MIN_LEN: usize = 70;

/// Addresses are at least this long.
const ADDRESS_MIN_LEN: usize = 32;

/// Classify a raw search query into a typed lookup intent.
///
/// Pure and total: every input maps to exactly one variant, with no I/O and
/// no hidden state. Digit classification has priority, so a string that is
/// all digits after separator stripping is always a slot even if it happens
/// to be a valid-length Base58 token.
#[must_use]
pub fn classify(raw: &str) -> SearchIntent {
    let query = raw.trim();

    if query.is_empty() {
        return SearchIntent::Invalid(
            "Enter a transaction signature, wallet address, or slot number.".to_string(),
        );
    }

    // Slot numbers may be entered with grouping separators:
    // 439,928,208 / 439 928 208 / 439.928.208 / 439_928_208
    let cleaned: String = query
        .chars()
        .filter(|c| !matches!(*c, ',' | '.' | '_' | '-') && !c.is_whitespace())
        .collect();

    if !cleaned.is_empty() && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        if cleaned.len() > MAX_SLOT_DIGITS {
            return SearchIntent::Invalid("Slot number is too large.".to_string());
        }
        return match cleaned.parse::<u64>() {
            Ok(slot) => SearchIntent::Slot(slot),
            Err(_) => SearchIntent::Invalid("Slot number is too large.".to_string()),
        };
    }

    // Anything non-numeric must be a Base58 address or signature.
    if bs58::decode(query).into_vec().is_err() {
        return SearchIntent::Invalid(
            "Invalid format. Use a slot number, a Solana address, or a transaction signature."
                .to_string(),
        );
    }

    if query.len() >= SIGNATURE_MIN_LEN {
        return SearchIntent::Signature(query.to_string());
    }
    if query.len() < ADDRESS_MIN_LEN {
        return SearchIntent::Invalid(
            "Input is too short to be a valid Solana address/signature.".to_string(),
        );
    }

    SearchIntent::Address(query.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_digits_classify_as_slot() {
        assert_eq!(classify("439,928,208"), SearchIntent::Slot(439_928_208));
        assert_eq!(classify("439 928 208"), SearchIntent::Slot(439_928_208));
        assert_eq!(classify("439.928.208"), SearchIntent::Slot(439_928_208));
        assert_eq!(classify("439_928_208"), SearchIntent::Slot(439_928_208));
        assert_eq!(classify("0"), SearchIntent::Slot(0));
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(matches!(classify(""), SearchIntent::Invalid(_)));
        assert!(matches!(classify("   "), SearchIntent::Invalid(_)));
    }

    #[test]
    fn oversized_slot_is_rejected() {
        let intent = classify("1234567890123"); // 13 digits
        match intent {
            SearchIntent::Invalid(reason) => assert_eq!(reason, "Slot number is too large."),
            other => panic!("expected Invalid, got {other:?}"),
        }
        // 12 digits is still fine.
        assert_eq!(classify("123456789012"), SearchIntent::Slot(123_456_789_012));
    }

    #[test]
    fn long_base58_token_is_a_signature() {
        let sig = "5VERYLongBase58Signature".repeat(4); // 96 chars, mixed alphabet
        assert_eq!(classify(&sig), SearchIntent::Signature(sig.clone()));
        let sig88 = "A".repeat(88);
        assert_eq!(classify(&sig88), SearchIntent::Signature(sig88.clone()));
        let threshold = "a".repeat(70);
        assert_eq!(classify(&threshold), SearchIntent::Signature(threshold.clone()));
    }

    #[test]
    fn mid_length_base58_token_is_an_address() {
        let addr = "HvwC9QSAzwEXkUkwqNNGhfNHoVqXJYfPvPZfQvJmHWcF"; // 44 chars
        assert_eq!(classify(addr), SearchIntent::Address(addr.to_string()));
        let min = "a".repeat(32);
        assert_eq!(classify(&min), SearchIntent::Address(min.clone()));
    }

    #[test]
    fn short_base58_token_is_too_short() {
        let intent = classify(&"a".repeat(20));
        match intent {
            SearchIntent::Invalid(reason) => assert!(reason.contains("too short")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn ambiguous_alphabet_characters_are_rejected() {
        for bad in ["contains0zero", "containsOcapital", "containsIcapital", "containslletter!"] {
            assert!(
                matches!(classify(bad), SearchIntent::Invalid(_)),
                "{bad} should be invalid"
            );
        }
        // Specifically the four excluded Base58 characters.
        for c in ['0', 'O', 'I', 'l'] {
            let token = format!("{}{}", "a".repeat(40), c);
            match classify(&token) {
                SearchIntent::Invalid(reason) => assert!(reason.contains("Invalid format")),
                other => panic!("expected Invalid for {c}, got {other:?}"),
            }
        }
    }

    #[test]
    fn digit_check_has_priority_over_base58() {
        // All digits and also a plausible Base58 token: always a slot.
        assert_eq!(classify("123456789"), SearchIntent::Slot(123_456_789));
    }

    #[test]
    fn classification_is_idempotent() {
        let inputs = ["439,928,208", "", "abc", &"a".repeat(44)];
        for input in inputs {
            assert_eq!(classify(input), classify(input));
        }
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let addr = format!("  {}  ", "a".repeat(44));
        assert_eq!(classify(&addr), SearchIntent::Address("a".repeat(44)));
    }
}
