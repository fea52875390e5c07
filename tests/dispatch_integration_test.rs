//! 调度集成测试

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use maimai::actions::ActionRegistry;
    use maimai::catalog::{ItemDetail, ItemSummary, MockCatalogClient};
    use maimai::dispatch::Dispatcher;
    use maimai::intent::IntentClassifier;
    use maimai::llm::MockLlmClient;
    use maimai::rank::LlmReranker;

    fn sample_item(asin: &str, title: &str, price: &str) -> ItemSummary {
        ItemSummary {
            asin: asin.to_string(),
            product_title: title.to_string(),
            product_price: Some(price.to_string()),
            product_star_rating: Some("4.2".to_string()),
            ..ItemSummary::default()
        }
    }

    fn dispatcher(catalog: Arc<MockCatalogClient>) -> Dispatcher {
        Dispatcher::new(
            ActionRegistry::standard("IN"),
            IntentClassifier::new("IN"),
            catalog,
        )
    }

    #[tokio::test]
    async fn test_search_envelope_round_trip() {
        let items = vec![
            sample_item("B0AAAAAA01", "Wireless Earbuds", "₹1,299"),
            sample_item("B0AAAAAA02", "Earbuds Case", "₹349"),
        ];
        let catalog = Arc::new(MockCatalogClient::with_items(items.clone()));

        let result = dispatcher(catalog).dispatch("wireless earbuds").await;
        let envelope = result.to_json();

        assert_eq!(envelope["success"], json!(true));
        assert_eq!(envelope["data"], serde_json::to_value(&items).unwrap());
        assert!(envelope["requestId"].as_str().unwrap().starts_with("req_"));
        assert!(envelope.get("error").is_none());
    }

    #[tokio::test]
    async fn test_detail_envelope_round_trip() {
        let detail = ItemDetail {
            asin: "B0ABCDEFGH".to_string(),
            product_title: "Wireless Earbuds".to_string(),
            product_price: Some("₹1,299".to_string()),
            about_product: vec!["40h battery".to_string()],
            ..ItemDetail::default()
        };
        let catalog = Arc::new(MockCatalogClient::with_detail(detail.clone()));

        let result = dispatcher(catalog.clone())
            .dispatch("tell me more about B0ABCDEFGH")
            .await;
        let envelope = result.to_json();

        assert_eq!(envelope["success"], json!(true));
        assert_eq!(envelope["data"], serde_json::to_value(&detail).unwrap());
        assert_eq!(catalog.detail_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_catalog() {
        let catalog = Arc::new(MockCatalogClient::default());

        let result = dispatcher(catalog.clone()).dispatch("   ").await;
        let envelope = result.to_json();

        assert_eq!(envelope["success"], json!(false));
        assert_eq!(envelope["error"], json!("could not understand the request"));
        assert_eq!(catalog.call_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_yields_error_envelope() {
        let catalog = Arc::new(MockCatalogClient::failing());

        let result = dispatcher(catalog).dispatch("red shoes").await;
        let envelope = result.to_json();

        assert_eq!(envelope["success"], json!(false));
        assert!(envelope["error"].as_str().is_some());
        assert!(!envelope["error"].as_str().unwrap().contains("simulated"));
    }

    #[tokio::test]
    async fn test_llm_reranker_end_to_end() {
        let items = vec![
            sample_item("A1", "Budget Earbuds", "₹499"),
            sample_item("A2", "Pro Earbuds", "₹2,999"),
            sample_item("A3", "Earbuds Case", "₹349"),
        ];
        let catalog = Arc::new(MockCatalogClient::with_items(items));

        // Mock LLM 带围栏回复，A2 应排到最前
        let reply = "```json\n[\
            {\"index\": 0, \"score\": 55, \"reason\": \"budget option\"},\
            {\"index\": 1, \"score\": 92, \"reason\": \"best match\"},\
            {\"index\": 2, \"score\": 20, \"reason\": \"accessory\"}\
        ]\n```";
        let reranker = LlmReranker::new(Arc::new(MockLlmClient::with_response(reply)));

        let result = dispatcher(catalog)
            .with_reranker(Arc::new(reranker))
            .dispatch("pro earbuds")
            .await;

        let data = result.data().unwrap().as_array().unwrap().clone();
        assert_eq!(data[0]["asin"], json!("A2"));
        assert_eq!(data[0]["relevance_score"], json!(92.0));
        assert_eq!(data[0]["relevance_reason"], json!("best match"));
        assert_eq!(data[2]["asin"], json!("A3"));
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_correlate_by_request_id() {
        let catalog = Arc::new(MockCatalogClient::with_items(vec![sample_item(
            "A1",
            "Earbuds",
            "₹499",
        )]));
        let dispatcher = dispatcher(catalog);

        let (a, b) = tokio::join!(
            dispatcher.dispatch("red shoes"),
            dispatcher.dispatch("blue shoes"),
        );

        assert!(a.is_success());
        assert!(b.is_success());
        assert_ne!(a.request_id, b.request_id);
    }
}
