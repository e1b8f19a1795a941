use proptest::prelude::*;
use quickslides::{offset_to_slide_index, segment, slide_index_to_selection, SEPARATOR};

fn document() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just(SEPARATOR.to_string()),
        Just("\n".to_string()),
        Just("  ".to_string()),
        Just("---".to_string()),
        "[a-z# ]{1,12}",
        "![a-z]{0,3}\\]\\([a-z.]{1,6}\\)".prop_map(|s| s.replacen('!', "![", 1)),
    ];
    prop::collection::vec(piece, 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn index_survives_selection_round_trip(doc in document()) {
        let spans = segment(&doc);
        for i in 0..spans.len() {
            let selection = slide_index_to_selection(i, &doc).unwrap();
            prop_assert!(selection.start <= selection.end);
            prop_assert_eq!(offset_to_slide_index(selection.start, &spans), i);
            prop_assert!((0.0..=1.0).contains(&selection.scroll_hint));
        }
    }

    #[test]
    fn slides_are_never_blank(doc in document()) {
        for span in segment(&doc) {
            prop_assert!(!span.text.is_empty());
            prop_assert!(span.start <= span.end && span.end <= doc.len());
            prop_assert_eq!(doc[span.start..span.end].trim(), span.text.as_str());
        }
    }

    #[test]
    fn every_offset_maps_into_range(doc in document(), offset in 0usize..400) {
        let spans = segment(&doc);
        let index = offset_to_slide_index(offset, &spans);
        prop_assert!(index < spans.len().max(1));
    }
}
