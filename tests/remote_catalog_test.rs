use fraudshield::{MemoryHistory, RemoteCatalog, RuleScanner, ScanEngine, ShieldError};
use httpmock::prelude::*;

fn catalog_json() -> serde_json::Value {
    let default = serde_json::json!({
        "category": "legitimate",
        "reason": "No suspicious patterns detected",
        "recommendation": "Stay vigilant"
    });
    serde_json::json!({
        "call": {
            "default": default.clone(),
            "rules": [{
                "patterns": ["+92"],
                "risk_level": "high",
                "category": "international_spoof",
                "reason": "Spoof-heavy prefix",
                "recommendation": "Block the number"
            }]
        },
        "sms": {
            "default": default.clone(),
            "rules": [{
                "patterns": ["kyc"],
                "risk_level": "critical",
                "category": "kyc_fraud",
                "reason": "Fake KYC notice",
                "recommendation": "Do not click the link"
            }]
        },
        "link": {
            "default": default.clone(),
            "rules": [{
                "patterns": ["bit.ly"],
                "risk_level": "high",
                "category": "shortened_url",
                "reason": "Hidden destination",
                "recommendation": "Do not click"
            }]
        },
        "qr": {
            "default": default.clone(),
            "rules": [{
                "patterns": ["refund"],
                "risk_level": "critical",
                "category": "upi_collect_fraud",
                "reason": "Refund bait",
                "recommendation": "Never scan to receive money"
            }]
        }
    })
}

#[tokio::test]
async fn scans_with_a_catalog_served_over_http() {
    let server = MockServer::start();
    let rules_mock = server.mock(|when, then| {
        when.method(GET).path("/rules");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(catalog_json());
    });

    let scanner = RuleScanner::new(RemoteCatalog::new(server.url("/rules")));
    let engine = ScanEngine::new(scanner, MemoryHistory::new());

    let record = engine
        .analyze_sms("Your KYC will expire, click http://bit.ly/xyz", None)
        .await
        .unwrap();
    assert!(record.verdict.matched);
    assert_eq!(record.verdict.category, "kyc_fraud");

    // A second scan reuses the cached catalogue.
    engine.analyze_link("https://example.com").await.unwrap();
    rules_mock.assert_hits(1);
}

#[tokio::test]
async fn server_error_fails_the_scan_instead_of_defaulting_to_safe() {
    let server = MockServer::start();
    let rules_mock = server.mock(|when, then| {
        when.method(GET).path("/rules");
        then.status(500);
    });

    let scanner = RuleScanner::new(RemoteCatalog::new(server.url("/rules")));
    let engine = ScanEngine::new(scanner, MemoryHistory::new());

    let err = engine
        .analyze_sms("totally harmless message", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ShieldError::CatalogUnavailable { .. }));
    rules_mock.assert();
}

#[tokio::test]
async fn malformed_catalog_body_is_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rules");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{\"call\": \"not a rule set\"}");
    });

    let scanner = RuleScanner::new(RemoteCatalog::new(server.url("/rules")));
    let engine = ScanEngine::new(scanner, MemoryHistory::new());

    let err = engine.analyze_qr("upi://pay").await.unwrap_err();
    assert!(matches!(err, ShieldError::ApiError(_)));
}

#[tokio::test]
async fn remote_catalog_with_empty_rules_is_rejected_on_load() {
    let mut body = catalog_json();
    body["qr"]["rules"] = serde_json::json!([]);

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rules");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    });

    let scanner = RuleScanner::new(RemoteCatalog::new(server.url("/rules")));
    let engine = ScanEngine::new(scanner, MemoryHistory::new());

    // Even a call scan fails: the catalogue as a whole is invalid.
    let err = engine.analyze_call("+14155550100", None).await.unwrap_err();
    assert!(matches!(err, ShieldError::EmptyCatalog { ref kind } if kind == "qr"));
}
