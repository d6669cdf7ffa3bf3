use anyhow::Result;
use fundraise_engine::contributions::{
    aggregate, contribution_stats, recent_contributors, wallet_totals, RawContributionRecord,
};
use rust_decimal_macros::dec;
use test_log::test;

const ACTIVITY_PAGE: &str = r#"[
    {"id": "1", "user": "0xAlice", "type": "CONTRIBUTION", "amount": "10000000000000000000", "timestamp": "1704067200", "txHash": "0x01"},
    {"id": "2", "user": "0xbob",   "type": "CONTRIBUTION", "amount": "20000000000000000000", "timestamp": "1704070800", "txHash": "0x02"},
    {"id": "3", "user": "0xcarol", "type": "CONTRIBUTION", "amount": "30000000000000000000", "timestamp": "1704074400", "txHash": "0x03"},
    {"id": "4", "user": "0xbob",   "type": "REFUND",       "amount": "20000000000000000000", "timestamp": "1704078000", "txHash": "0x04"},
    {"id": "5", "user": "0xdave",  "type": "BONDING_CURVE_BUY", "amount": "99000000000000000000", "timestamp": "1704081600", "txHash": "0x05"},
    {"id": "6", "user": "0xerin",  "type": "DAO_CLAIMED",  "amount": "1000000000000000000", "timestamp": "1704085200", "txHash": "0x06"},
    {"id": "7", "user": "0xfrank", "type": "CONTRIBUTION", "amount": "not-a-number", "timestamp": "1704088800", "txHash": "0x07"}
]"#;

fn page() -> Vec<RawContributionRecord> {
    serde_json::from_str(ACTIVITY_PAGE).expect("fixture parses")
}

#[test]
fn test_ledger_shares() -> Result<()> {
    let ledger = aggregate(&page(), "AWE");

    assert_eq!(ledger.total_amount, dec!(60));
    assert_eq!(ledger.total_participants, 3);

    let rows: Vec<(&str, f64)> = ledger
        .participants
        .iter()
        .map(|p| (p.wallet_address.as_str(), p.percentage_of_total))
        .collect();
    assert_eq!(rows[0].0, "0xcarol");
    assert_eq!(rows[1].0, "0xbob");
    assert_eq!(rows[2].0, "0xAlice");
    assert!((rows[0].1 - 50.0).abs() < 0.01);
    assert!((rows[1].1 - 33.33).abs() < 0.01);
    assert!((rows[2].1 - 16.67).abs() < 0.01);

    let share_sum: f64 = rows.iter().map(|(_, pct)| pct).sum();
    assert!((share_sum - 100.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_pages_can_be_combined_by_the_caller() -> Result<()> {
    let records = page();
    let (first, second) = records.split_at(3);

    let a = contribution_stats(first);
    let b = contribution_stats(second);
    let whole = contribution_stats(&records);

    assert_eq!(a.total_contributions + b.total_contributions, whole.total_contributions);
    assert_eq!(a.total_raised + b.total_raised, whole.total_raised);
    assert_eq!(a.total_refunds + b.total_refunds, whole.total_refunds);
    Ok(())
}

#[test]
fn test_stats() -> Result<()> {
    let stats = contribution_stats(&page());
    assert_eq!(stats.total_contributions, 3);
    assert_eq!(stats.total_refunds, 1);
    assert_eq!(stats.unique_contributors, 3);
    assert_eq!(stats.total_raised, dec!(60));
    assert_eq!(stats.average_contribution, dec!(20));
    Ok(())
}

#[test]
fn test_recent_view() -> Result<()> {
    let recent = recent_contributors(&page(), 2);
    let ids: Vec<&str> = recent.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2"]);
    assert!(recent.iter().all(|p| p.percentage_of_total == 0.0));
    Ok(())
}

#[test]
fn test_wallet_totals() -> Result<()> {
    let mut records = page();
    records.push(RawContributionRecord {
        id: "8".to_string(),
        contributor: "0xALICE".to_string(),
        kind: "CONTRIBUTION".to_string(),
        amount: "25000000000000000000".to_string(),
        timestamp: "1704092400".to_string(),
        tx_hash: "0x08".to_string(),
    });

    let totals = wallet_totals(&records);
    assert_eq!(totals[0].wallet_address, "0xAlice");
    assert_eq!(totals[0].amount, dec!(35));
    assert_eq!(totals[0].contributions, 2);
    assert_eq!(totals.len(), 3);
    Ok(())
}

#[test]
fn test_oversized_row_is_skipped_by_every_view() -> Result<()> {
    let oversized = RawContributionRecord {
        id: "9".to_string(),
        contributor: "0xwhale".to_string(),
        kind: "CONTRIBUTION".to_string(),
        amount: ethers_core::types::U256::MAX.to_string(),
        timestamp: "1704096000".to_string(),
        tx_hash: "0x09".to_string(),
    };
    let mut records: Vec<RawContributionRecord> = page().into_iter().take(1).collect();
    records.push(oversized);

    let ledger = aggregate(&records, "AWE");
    let stats = contribution_stats(&records);

    assert_eq!(ledger.total_participants, 1);
    assert_eq!(ledger.total_amount, dec!(10));
    assert!((ledger.participants[0].percentage_of_total - 100.0).abs() < 1e-9);

    assert_eq!(stats.total_contributions, ledger.total_participants);
    assert_eq!(stats.total_raised, ledger.total_amount);
    assert_eq!(stats.unique_contributors, 1);

    assert!(recent_contributors(&records, 10).iter().all(|p| p.id != "9"));
    assert!(wallet_totals(&records).iter().all(|w| w.wallet_address != "0xwhale"));
    Ok(())
}
