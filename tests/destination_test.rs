// 归档地址构造的性质测试：任意输入下清洗与拼接都保持约定
use page_uploader::uploader::destination::{FORBIDDEN_SEGMENT_CHARS, page_url, sanitize_segment};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sanitized_segment_never_contains_forbidden_chars(raw in ".{0,64}") {
        let cleaned = sanitize_segment(&raw);

        prop_assert!(cleaned.chars().all(|c| !FORBIDDEN_SEGMENT_CHARS.contains(&c)));
    }

    #[test]
    fn sanitize_is_idempotent(raw in ".{0,64}") {
        let once = sanitize_segment(&raw);
        let twice = sanitize_segment(&once);

        prop_assert_eq!(twice, once.clone());
    }

    #[test]
    fn page_url_appends_exactly_two_segments(
        album in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,19}",
        page in "[a-zA-Z0-9]{1,12}",
    ) {
        let url = page_url("http://localhost:8000", &album, &page);
        prop_assert!(url.is_ok());
        let url = url.unwrap();

        prop_assert!(url.as_str().starts_with("http://localhost:8000/"));

        let segments: Vec<_> = url.path_segments().expect("url should have segments").collect();
        prop_assert_eq!(segments.len(), 2);
        // 页号限定为字母数字，转义后保持原样
        prop_assert_eq!(segments[1], page.as_str());
    }

    #[test]
    fn page_url_never_panics_on_arbitrary_segments(
        album in ".{0,32}",
        page in ".{0,32}",
    ) {
        // 任意输入只允许产生 Ok 或显式错误，不允许 panic
        let _ = page_url("http://localhost:8000", &album, &page);
    }
}
