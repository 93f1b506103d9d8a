#![allow(dead_code)]

use httpmock::MockServer;
use qtquote_rs::QtClient;
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// A client pointed at a mock server instead of the real endpoint.
pub fn client_for(server: &MockServer) -> QtClient {
    QtClient::builder()
        .base_quote(Url::parse(&server.base_url()).unwrap())
        .build()
        .unwrap()
}

/// Wrap a payload in the endpoint's assignment envelope.
pub fn envelope(key: &str, payload: &str) -> String {
    format!("v_{key}=\"{payload}\"")
}

pub fn blank_fields(n: usize) -> Vec<String> {
    vec![String::new(); n]
}

pub fn join(fields: &[String]) -> String {
    fields.join("~")
}

/// A full 83-field A-share record with known values at the documented
/// positions. Field 82 (currency) is left empty so parsing exercises the
/// CNY default; the order book carries all five levels per side.
pub fn sample_a_share() -> Vec<String> {
    let mut f = blank_fields(83);
    f[0] = "1".into();
    f[1] = "浦发银行".into();
    f[2] = "600000".into();
    f[3] = "12.34".into();
    f[4] = "12.10".into();
    f[5] = "12.20".into();
    f[6] = "1234567".into();
    f[7] = "7000".into();
    f[8] = "5600".into();
    // asks (ask5..ask1), then bids (bid1..bid5), price/volume pairs
    let asks = [
        ("12.39", "110"),
        ("12.38", "120"),
        ("12.37", "130"),
        ("12.36", "140"),
        ("12.35", "150"),
    ];
    let bids = [
        ("12.33", "210"),
        ("12.32", "220"),
        ("12.31", "230"),
        ("12.30", "240"),
        ("12.29", "250"),
    ];
    for (slot, (price, volume)) in asks.iter().enumerate() {
        f[9 + slot * 2] = (*price).into();
        f[10 + slot * 2] = (*volume).into();
    }
    for (slot, (price, volume)) in bids.iter().enumerate() {
        f[19 + slot * 2] = (*price).into();
        f[20 + slot * 2] = (*volume).into();
    }
    f[30] = "20260807161403".into();
    f[31] = "0.24".into();
    f[32] = "1.98".into();
    f[33] = "12.50".into();
    f[34] = "12.01".into();
    f[37] = "152345.67".into();
    f[38] = "0.45".into();
    f[39] = "5.67".into();
    f[43] = "4.05".into();
    f[44] = "3621.22".into();
    f[45] = "3599.10".into();
    f[49] = "0.98".into();
    f[51] = "12.28".into();
    f[52] = "5.70".into();
    f[53] = "5.50".into();
    f[72] = "293.52".into();
    f[73] = "293.52".into();
    f
}

/// A Hong Kong record (76 fields) with currency left empty for the HKD default.
pub fn sample_hk() -> Vec<String> {
    let mut f = blank_fields(76);
    f[0] = "100".into();
    f[1] = "腾讯控股".into();
    f[2] = "00700".into();
    f[3] = "612.50".into();
    f[4] = "608.00".into();
    f[5] = "610.00".into();
    f[6] = "12345678".into();
    f[30] = "2026/08/07 16:08:11".into();
    f[31] = "4.50".into();
    f[32] = "0.74".into();
    f[33] = "615.00".into();
    f[34] = "605.50".into();
    f[37] = "7512345678.9".into();
    f[39] = "22.30".into();
    f[69] = "9.60".into();
    f[70] = "9.60".into();
    f
}

/// A United States record (12 fields).
pub fn sample_us() -> Vec<String> {
    let mut f = blank_fields(12);
    f[0] = "200".into();
    f[1] = "Apple Inc".into();
    f[2] = "AAPL".into();
    f[3] = "229.35".into();
    f[4] = "-1.25".into();
    f[5] = "-0.54".into();
    f[6] = "55123456".into();
    f[7] = "12634567890".into();
    f[8] = "3456789000000".into();
    f
}
