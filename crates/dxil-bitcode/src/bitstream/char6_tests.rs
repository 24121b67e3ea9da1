use super::char6::{ALPHABET, decode, encode, is_char6};

#[test]
fn encode_follows_alphabet_order() {
    assert_eq!(encode('a'), Some(0));
    assert_eq!(encode('z'), Some(25));
    assert_eq!(encode('A'), Some(26));
    assert_eq!(encode('Z'), Some(51));
    assert_eq!(encode('0'), Some(52));
    assert_eq!(encode('9'), Some(61));
    assert_eq!(encode('.'), Some(62));
    assert_eq!(encode('_'), Some(63));
}

#[test]
fn encode_rejects_outside_alphabet() {
    assert_eq!(encode('-'), None);
    assert_eq!(encode(' '), None);
    assert_eq!(encode('$'), None);
    assert_eq!(encode('é'), None);
}

#[test]
fn decode_inverts_encode() {
    for (code, &byte) in ALPHABET.iter().enumerate() {
        let ch = byte as char;
        assert_eq!(encode(ch), Some(code as u8));
        assert_eq!(decode(code as u8), ch);
    }
}

#[test]
fn is_char6_checks_every_char() {
    assert!(is_char6("main"));
    assert!(is_char6("dx.op.loadInput_f32"));
    assert!(is_char6(""));
    assert!(!is_char6("llvm-ident"));
    assert!(!is_char6("a b"));
}
