use alloy_primitives::U256;
use skilldao_client::controller::ADDRESS_LOOKUP_UNAVAILABLE;
use skilldao_client::Verification;
use skilldao_common::error::CertError;
use skilldao_common::format::format_address;
use skilldao_common::notification::Severity;
use skilldao_lifecycle_integration::harness::TestHarness;
use skilldao_lifecycle_integration::make_dummy_certification;

#[tokio::test]
async fn verify_projects_the_stored_record() {
    let mut h = TestHarness::connected().await;
    let mut cert = make_dummy_certification(h.bob, "Distributed Systems", 4);
    cert.endorsements = U256::from(12u64);
    h.node.seed_certification(cert);

    let outcome = h.dao.verify("1").await.unwrap();

    let Verification::Found(found) = outcome else {
        panic!("expected a certification");
    };
    assert_eq!(found.id, U256::from(1u64));
    assert_eq!(found.owner, h.bob);
    assert_eq!(found.level_name(), "Expert");
    assert_eq!(found.endorsement_count, U256::from(12u64));
    assert_eq!(found.created_at.format("%Y-%m-%d").to_string(), "2023-11-14");
    assert_eq!(h.screen().certification.as_ref(), Some(&found));

    let rows = found.detail_rows();
    assert!(rows.contains(&("Level", "Expert".to_string())));
    assert!(rows.contains(&("Certification ID", "#1".to_string())));
    assert!(!format_address(&found.owner).is_empty());
}

#[tokio::test]
async fn out_of_range_levels_render_unknown() {
    let mut h = TestHarness::connected().await;
    for level in [0u64, 5, 200] {
        h.node
            .seed_certification(make_dummy_certification(h.bob, "Legacy", level));
    }

    for id in ["1", "2", "3"] {
        let Verification::Found(found) = h.dao.verify(id).await.unwrap() else {
            panic!("expected a certification");
        };
        assert_eq!(found.level_name(), "Unknown");
    }
}

#[tokio::test]
async fn unknown_id_reports_generic_not_found() {
    let mut h = TestHarness::connected().await;

    let err = h.dao.verify("42").await.unwrap_err();

    assert!(matches!(err, CertError::ReadNotFound(_)));
    assert_eq!(
        h.screen().last_notification(),
        Some(("Certification not found or invalid", Severity::Error))
    );
    assert!(h.screen().certification.is_none());
}

#[tokio::test]
async fn address_key_reports_unavailable_without_network() {
    let mut h = TestHarness::connected().await;
    let baseline = h.request_count();

    let outcome = h
        .dao
        .verify("0xABCDEF0123456789ABCDEF0123456789ABCDEF01")
        .await
        .unwrap();

    assert!(matches!(outcome, Verification::AddressLookupUnavailable(_)));
    assert_eq!(h.request_count(), baseline);
    assert_eq!(
        h.screen().last_notification(),
        Some((ADDRESS_LOOKUP_UNAVAILABLE, Severity::Info))
    );
}

#[tokio::test]
async fn malformed_key_fails_once_without_network() {
    let mut h = TestHarness::connected().await;
    let baseline = h.request_count();
    let notified = h.screen().notifications.len();

    let err = h.dao.verify("abc123").await.unwrap_err();

    assert_eq!(err, CertError::InvalidKeyFormat("abc123".into()));
    assert_eq!(h.request_count(), baseline);
    assert_eq!(h.screen().notifications.len(), notified + 1);
    assert_eq!(
        h.screen().last_notification(),
        Some(("Invalid certification ID or address format", Severity::Error))
    );
}

#[tokio::test]
async fn numeric_lookup_needs_a_connection() {
    let mut h = TestHarness::setup();

    let err = h.dao.verify("1").await.unwrap_err();

    assert_eq!(err, CertError::NotConnected);
    assert_eq!(h.request_count(), 0);
}
