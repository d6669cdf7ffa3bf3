//! Participant ledger for fixed-price campaigns.
//!
//! Only `Contribution` rows count towards the ledger. Refunds, DAO claims and
//! bonding-curve trades arrive on the same feed but belong to other accounting
//! categories.

pub mod types;

use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::amount::{AmountError, FixedAmount};
use crate::metrics::record_contribution_skipped;

pub use types::{
    ContributionEvent, ContributionKind, ContributionRejection, ContributionStats, LedgerSummary,
    Participant, RawContributionRecord, WalletTotal,
};

/// Parse a page, dropping rows that do not decode.
pub fn parse_page(page: &[RawContributionRecord]) -> Vec<ContributionEvent> {
    page.iter()
        .filter_map(|raw| match ContributionEvent::try_from(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Skipping contribution {}: {}", raw.id, e);
                record_contribution_skipped(e.reason());
                None
            }
        })
        .collect()
}

/// Contribution events paired with their decimal amount, and their total.
/// A row is dropped like any other malformed row when its amount, or the
/// running total including it, does not fit a `Decimal`.
fn ledger_rows(events: Vec<ContributionEvent>) -> (Vec<(ContributionEvent, Decimal)>, Decimal) {
    let mut rows = Vec::new();
    // summed in wei, converted per row
    let mut total = FixedAmount::zero();
    let mut total_decimal = Decimal::ZERO;

    for event in events.into_iter().filter(|e| e.kind == ContributionKind::Contribution) {
        let checked = event.amount.to_decimal().and_then(|amount| {
            let next = total.checked_add(event.amount).ok_or(AmountError::Overflow)?;
            Ok((amount, next, next.to_decimal()?))
        });
        match checked {
            Ok((amount, next, next_decimal)) => {
                total = next;
                total_decimal = next_decimal;
                rows.push((event, amount));
            }
            Err(e) => {
                debug!("Skipping contribution {}: {}", event.id, e);
                record_contribution_skipped("invalid_amount");
            }
        }
    }

    (rows, total_decimal)
}

fn participant(event: ContributionEvent, amount: Decimal, percentage_of_total: f64) -> Participant {
    Participant {
        id: event.id,
        wallet_address: event.contributor,
        amount,
        percentage_of_total,
        timestamp: event.timestamp,
        tx_hash: event.tx_hash,
    }
}

fn share_of(amount: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (amount / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

/// Ledger table sorted by amount, largest first. Equal amounts keep page order.
pub fn aggregate(page: &[RawContributionRecord], currency: &str) -> LedgerSummary {
    let (rows, total_amount) = ledger_rows(parse_page(page));

    let mut participants: Vec<Participant> = rows
        .into_iter()
        .map(|(event, amount)| participant(event, amount, share_of(amount, total_amount)))
        .collect();
    participants.sort_by(|a, b| b.amount.cmp(&a.amount));

    debug!(
        "Aggregated {} contributions totalling {} {}",
        participants.len(),
        total_amount,
        currency
    );

    LedgerSummary {
        total_participants: participants.len(),
        participants,
        total_amount,
        currency: currency.to_string(),
    }
}

/// Most recent contributions first, at most `limit` rows. Shares are left at
/// zero since this view has no running total.
pub fn recent_contributors(page: &[RawContributionRecord], limit: usize) -> Vec<Participant> {
    ledger_rows(parse_page(page))
        .0
        .into_iter()
        .sorted_by(|(a, _), (b, _)| b.timestamp.cmp(&a.timestamp))
        .take(limit)
        .map(|(event, amount)| participant(event, amount, 0.0))
        .collect()
}

pub fn contribution_stats(page: &[RawContributionRecord]) -> ContributionStats {
    let events = parse_page(page);
    let total_refunds = events.iter().filter(|e| e.kind == ContributionKind::Refund).count();

    let (rows, total_raised) = ledger_rows(events);
    let unique_contributors = rows
        .iter()
        .map(|(e, _)| e.contributor.to_ascii_lowercase())
        .unique()
        .count();
    let average_contribution = if rows.is_empty() {
        Decimal::ZERO
    } else {
        total_raised / Decimal::from(rows.len())
    };

    ContributionStats {
        total_contributions: rows.len(),
        total_refunds,
        unique_contributors,
        total_raised,
        average_contribution,
    }
}

/// Contributions summed per wallet (addresses compared case-insensitively),
/// largest first. The address is reported as first seen.
pub fn wallet_totals(page: &[RawContributionRecord]) -> Vec<WalletTotal> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<(String, FixedAmount, usize)> = Vec::new();

    for (event, _) in ledger_rows(parse_page(page)).0 {
        let key = event.contributor.to_ascii_lowercase();
        let slot = *index.entry(key).or_insert_with(|| {
            totals.push((event.contributor.clone(), FixedAmount::zero(), 0));
            totals.len() - 1
        });
        let entry = &mut totals[slot];
        entry.1 = entry.1.saturating_add(event.amount);
        entry.2 += 1;
    }

    totals
        .into_iter()
        .filter_map(|(wallet_address, amount, contributions)| {
            let amount = amount.to_decimal().ok()?;
            Some(WalletTotal { wallet_address, amount, contributions })
        })
        .sorted_by(|a, b| b.amount.cmp(&a.amount))
        .collect()
}
