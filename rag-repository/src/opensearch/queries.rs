//! OpenSearch query builders and response parsing for k-NN retrieval.

use serde_json::Value;

use rag_shared::ScoredDocument;

/// Build a k-NN query body for the given vector.
///
/// Nearest neighbors are ranked under the similarity space the index was
/// created with (cosine), so no metric appears in the query itself.
pub fn build_knn_query(vector: &[f32], k: usize) -> Value {
    serde_json::json!({
        "size": k,
        "query": {
            "knn": {
                "vector_field": {
                    "vector": vector,
                    "k": k
                }
            }
        }
    })
}

/// Parse a single search hit into a `ScoredDocument`.
///
/// Returns `None` if the hit has no `text` field in its source.
pub fn parse_hit(hit: &Value) -> Option<ScoredDocument> {
    let text = hit["_source"]["text"].as_str()?.to_string();
    let score = hit["_score"].as_f64().unwrap_or(0.0);

    Some(ScoredDocument { text, score })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_knn_query() {
        let query = build_knn_query(&[0.1, 0.2], 4);

        assert_eq!(query["size"], 4);
        assert_eq!(query["query"]["knn"]["vector_field"]["k"], 4);
        assert_eq!(
            query["query"]["knn"]["vector_field"]["vector"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_parse_hit() {
        let hit = json!({
            "_source": { "text": "Can we combine life and car insurance?" },
            "_score": 0.87
        });

        let doc = parse_hit(&hit).unwrap();
        assert_eq!(doc.text, "Can we combine life and car insurance?");
        assert_eq!(doc.score, 0.87);
    }

    #[test]
    fn test_parse_hit_missing_text() {
        let hit = json!({
            "_source": { "vector_field": [0.1, 0.2] },
            "_score": 0.5
        });

        assert!(parse_hit(&hit).is_none());
    }

    #[test]
    fn test_parse_hit_missing_score_defaults_to_zero() {
        let hit = json!({
            "_source": { "text": "no score" }
        });

        let doc = parse_hit(&hit).unwrap();
        assert_eq!(doc.score, 0.0);
    }
}
