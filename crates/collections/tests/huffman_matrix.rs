use algolab_collections::Huffman;
use proptest::prelude::*;

#[test]
fn huffman_round_trip_matrix() {
    for text in ["aaab", "a", "abracadabra", "mississippi river", "ğüşiöç", "  \n\t"] {
        let mut huffman = Huffman::new();
        assert!(!huffman.build_tree(text).is_rejected());
        let bits = huffman.encode(text);
        assert_eq!(huffman.decode(&bits), text, "{text:?}");
        assert_eq!(huffman.encode_checked(text).as_deref(), Ok(bits.as_str()));
    }
}

#[test]
fn huffman_frequencies_keep_first_occurrence_order_matrix() {
    let mut huffman = Huffman::new();
    huffman.build_tree("banana");
    let freqs: Vec<(char, usize)> = huffman.frequencies().iter().map(|(c, f)| (*c, *f)).collect();
    assert_eq!(freqs, vec![('b', 1), ('a', 3), ('n', 2)]);
    assert_eq!(huffman.root().unwrap().frequency(), 6);
}

#[test]
fn huffman_codes_are_prefix_free_matrix() {
    let mut huffman = Huffman::new();
    huffman.build_tree("the quick brown fox jumps over the lazy dog");
    let codes: Vec<&String> = huffman.codes().values().collect();
    for (i, a) in codes.iter().enumerate() {
        for (j, b) in codes.iter().enumerate() {
            if i != j {
                assert!(!b.starts_with(a.as_str()), "{a} prefixes {b}");
            }
        }
    }
}

#[test]
fn huffman_rebuild_discards_previous_tree_matrix() {
    let mut huffman = Huffman::new();
    huffman.build_tree("xyz");
    huffman.build_tree("aab");
    assert!(!huffman.codes().contains_key(&'x'));
    assert_eq!(huffman.encode("xyz"), "");
}

#[test]
fn huffman_decode_without_tree_matrix() {
    let huffman = Huffman::new();
    assert_eq!(huffman.decode("0101"), "");
    assert_eq!(huffman.encode("abc"), "");
}

proptest! {
    #[test]
    fn huffman_round_trips(text in "[a-f ]{1,64}") {
        let mut huffman = Huffman::new();
        huffman.build_tree(&text);
        let bits = huffman.encode(&text);
        prop_assert!(bits.chars().all(|b| b == '0' || b == '1'));
        prop_assert_eq!(huffman.decode(&bits), text.clone());
        let stats = huffman.stats().unwrap();
        prop_assert_eq!(stats.huffman_bits, bits.len());
        prop_assert_eq!(stats.original_bits, text.chars().count() * 8);
    }
}
