#![no_main]

use arbitrary::Arbitrary;
use feather_docs::content::{Page, apply_highlights, clear_highlights};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    markdown: &'a str,
    query: &'a str,
}

fuzz_target!(|input: Input| {
    // Arbitrary markdown and queries; marks must stay on char boundaries
    // and clearing must restore the original text
    let mut page = Page::from_markdown("/fuzz", "Fuzz", input.markdown);
    let before = page.region.text_content();

    apply_highlights(&mut page.region, input.query);
    for mark in page.region.marks() {
        let leaf = page.region.leaf(mark.leaf).unwrap();
        assert!(leaf.text.is_char_boundary(mark.range.start));
        assert!(leaf.text.is_char_boundary(mark.range.end));
    }

    clear_highlights(&mut page.region);
    assert_eq!(page.region.text_content(), before);
});
