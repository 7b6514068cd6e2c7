/// Pick the keyword that best represents why an entry matched.
///
/// Precedence, first hit wins:
/// 1. a keyword equal to the whole query
/// 2. a keyword containing the whole query
/// 3. for each term in order, the first keyword containing it
/// 4. the first keyword, or `""` when there are none
///
/// Comparisons are case-insensitive; the keyword is returned as authored.
pub fn pick_keyword<'a>(keywords: &'a [String], normalized: &str, terms: &[String]) -> &'a str {
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    if let Some(i) = lowered.iter().position(|k| k == normalized) {
        return &keywords[i];
    }

    if let Some(i) = lowered.iter().position(|k| k.contains(normalized)) {
        return &keywords[i];
    }

    for term in terms {
        if let Some(i) = lowered.iter().position(|k| k.contains(term.as_str())) {
            return &keywords[i];
        }
    }

    keywords.first().map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn terms(q: &str) -> Vec<String> {
        q.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_exact_beats_substring() {
        let keywords = kws(&["async search", "async"]);
        assert_eq!(pick_keyword(&keywords, "async", &terms("async")), "async");
    }

    #[test]
    fn test_substring_beats_term() {
        let keywords = kws(&["search", "web search"]);
        assert_eq!(
            pick_keyword(&keywords, "web search", &terms("web search")),
            "web search"
        );

        let keywords = kws(&["web", "google_search"]);
        assert_eq!(pick_keyword(&keywords, "search", &terms("search")), "google_search");
    }

    #[test]
    fn test_terms_scanned_in_query_order() {
        // "crawl" is the first term, so its keyword wins even though "website"
        // appears earlier in the keyword list
        let keywords = kws(&["website", "crawl"]);
        assert_eq!(
            pick_keyword(&keywords, "crawl website", &terms("crawl website")),
            "crawl"
        );
    }

    #[test]
    fn test_fallback_first_keyword() {
        let keywords = kws(&["pydantic", "schema"]);
        assert_eq!(pick_keyword(&keywords, "zzz", &terms("zzz")), "pydantic");
        assert_eq!(pick_keyword(&[], "zzz", &terms("zzz")), "");
    }

    #[test]
    fn test_case_insensitive_returns_authored() {
        let keywords = kws(&["BaseModel"]);
        assert_eq!(pick_keyword(&keywords, "basemodel", &terms("basemodel")), "BaseModel");
    }
}
