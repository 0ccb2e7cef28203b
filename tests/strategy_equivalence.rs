use std::io::Write;

use proptest::prelude::*;
use readbench::strategy::{BufferedCopy, MappedView, ReadStrategy, SourceFile};
use tempfile::NamedTempFile;

fn create_test_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write test content");
    file.flush().expect("Failed to flush test file");
    file
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn buffered_and_mapped_yield_identical_bytes(
        content in proptest::collection::vec(any::<u8>(), 1..16 * 1024)
    ) {
        let file = create_test_file(&content);
        let source = SourceFile::probe(file.path()).unwrap();

        let buffered = BufferedCopy::new().acquire(&source).unwrap();
        let mapped = MappedView::new().acquire(&source).unwrap();

        prop_assert_eq!(buffered.as_bytes(), mapped.as_bytes());
        prop_assert_eq!(buffered.as_bytes(), &content[..]);
        prop_assert_eq!(buffered.terminated().map(|b| b.len()), Some(content.len() + 1));
    }
}

#[test]
fn embedded_nul_bytes_survive_both_strategies() {
    let content = b"before\0after\0\0end";
    let file = create_test_file(content);
    let source = SourceFile::probe(file.path()).unwrap();

    let buffered = BufferedCopy::new().acquire(&source).unwrap();
    let mapped = MappedView::new().acquire(&source).unwrap();

    assert_eq!(buffered.as_bytes(), content);
    assert_eq!(mapped.as_bytes(), content);
}

#[test]
fn page_boundary_sizes_match() {
    for len in [4095usize, 4096, 4097, 8192 + 1] {
        let content: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let file = create_test_file(&content);
        let source = SourceFile::probe(file.path()).unwrap();

        let buffered = BufferedCopy::new().acquire(&source).unwrap();
        let mapped = MappedView::new().acquire(&source).unwrap();

        assert_eq!(buffered.len(), len);
        assert_eq!(mapped.len(), len);
        assert_eq!(&buffered[..], &mapped[..]);
    }
}
