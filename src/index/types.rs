use serde::{Deserialize, Serialize};

/// One searchable unit of documentation: a whole page or a named section of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
    /// Sub-heading within the page; `None` for page-level entries
    #[serde(default)]
    pub section: Option<String>,
    /// Route of the owning page, e.g. `/native-tools`
    pub path: String,
    /// Fragment including the leading `#`, empty when targeting the page top
    #[serde(default, alias = "hash")]
    pub anchor: String,
    pub category: String,
    /// Ordered; the first keyword is the fallback display term
    pub keywords: Vec<String>,
    #[serde(default)]
    pub searchable_text: String,
}

impl IndexEntry {
    /// Navigation target for this entry (`path` + `anchor`)
    pub fn target(&self) -> String {
        format!("{}{}", self.path, self.anchor)
    }
}

/// An index entry ranked against a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    #[serde(flatten)]
    pub entry: IndexEntry,
    pub score: u32,
    /// Representative keyword for display; may be empty
    pub matched_keyword: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_hash_alias() {
        let json = r##"{
            "id": "crawl-tool",
            "title": "crawl",
            "section": "crawl function",
            "path": "/native-tools",
            "hash": "#crawl",
            "category": "Tools",
            "keywords": ["crawl"],
            "searchableText": "crawl function website subpages"
        }"##;

        let entry: IndexEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.anchor, "#crawl");
        assert_eq!(entry.target(), "/native-tools#crawl");
        assert_eq!(entry.searchable_text, "crawl function website subpages");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "id": "featured",
            "title": "Featured Projects",
            "path": "/featured-projects",
            "category": "Community",
            "keywords": ["projects"]
        }"#;

        let entry: IndexEntry = serde_json::from_str(json).unwrap();
        assert!(entry.section.is_none());
        assert!(entry.anchor.is_empty());
        assert_eq!(entry.target(), "/featured-projects");
    }
}
