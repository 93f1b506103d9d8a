use httpmock::Method::GET;
use qtquote_rs::{Market, QtError, StockQuote, quote};

use crate::common::{client_for, envelope, join, sample_a_share, sample_hk, setup_server};

#[tokio::test]
async fn single_fetch_builds_the_prefixed_key_and_parses() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).query_param("q", "sh600000");
        then.status(200)
            .body(envelope("sh600000", &join(&sample_a_share())));
    });

    let client = client_for(&server);
    let q = quote::fetch_quote(&client, "600000", Market::Sh).await.unwrap();

    mock.assert();
    match q {
        StockQuote::AShare(q) => {
            assert_eq!(q.code, "600000");
            assert_eq!(q.current_price, 12.34);
        }
        other => panic!("expected A-share record, got {other:?}"),
    }
}

#[tokio::test]
async fn hk_fetch_uses_the_r_hk_prefix() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).query_param("q", "r_hk00700");
        then.status(200)
            .body(envelope("r_hk00700", &join(&sample_hk())));
    });

    let client = client_for(&server);
    let q = quote::fetch_quote(&client, "00700", Market::Hk).await.unwrap();

    mock.assert();
    assert!(matches!(q, StockQuote::Hk(_)));
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET);
        then.status(502);
    });

    let client = client_for(&server);
    let err = quote::fetch_quote(&client, "600000", Market::Sh).await.unwrap_err();

    match err {
        QtError::Status { status, .. } => assert_eq!(status, 502),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn body_without_assignment_is_a_no_data_error() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("pong");
    });

    let client = client_for(&server);
    let err = quote::fetch_quote(&client, "600000", Market::Sh).await.unwrap_err();

    match err {
        QtError::NoData(key) => assert_eq!(key, "sh600000"),
        other => panic!("expected NoData, got {other:?}"),
    }
    assert!(
        quote::fetch_quote(&client_for(&server), "600000", Market::Sh)
            .await
            .unwrap_err()
            .to_string()
            .contains("no data returned for sh600000")
    );
}

#[tokio::test]
async fn batch_fetch_isolates_failures_and_preserves_input_order() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET).query_param("q", "sh600000");
        then.status(200)
            .body(envelope("sh600000", &join(&sample_a_share())));
    });
    server.mock(|when, then| {
        when.method(GET).query_param("q", "r_hkBOGUS");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).query_param("q", "r_hk00700");
        then.status(200)
            .body(envelope("r_hk00700", &join(&sample_hk())));
    });

    let client = client_for(&server);
    let items = vec![
        ("600000".to_string(), Market::Sh),
        ("BOGUS".to_string(), Market::Hk),
        ("00700".to_string(), Market::Hk),
    ];
    let quotes = quote::fetch_quotes(&client, &items).await;

    // the failed middle item is logged and omitted; order of the rest holds
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].code(), "600000");
    assert_eq!(quotes[1].code(), "00700");
}

#[tokio::test]
async fn batch_fetch_with_all_failures_is_empty_not_an_error() {
    let server = setup_server();
    server.mock(|when, then| {
        when.method(GET);
        then.status(500);
    });

    let client = client_for(&server);
    let items = vec![("600000".to_string(), Market::Sh)];
    assert!(quote::fetch_quotes(&client, &items).await.is_empty());
}
