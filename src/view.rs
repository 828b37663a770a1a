//! Pure view transforms over one market snapshot.
//!
//! The table the UI shows is always `filter → sort → paginate` applied to
//! the latest snapshot.

use serde::Serialize;

use crate::types::{MarketEntry, MarketSnapshot, Signal};

/// Which entries survive the filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalFilter {
    #[default]
    All,
    Only(Signal),
}

impl SignalFilter {
    /// `ALL` or a wire-spelled signal; anything else falls back to `All`.
    pub fn parse(s: &str) -> Self {
        Signal::from_wire(s).map(Self::Only).unwrap_or(Self::All)
    }

    fn keeps(&self, entry: &MarketEntry) -> bool {
        match self {
            Self::All => true,
            Self::Only(signal) => entry.signal == *signal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Symbol A-Z.
    #[default]
    Symbol,
    /// Strongest buy first, strongest sell last.
    Signal,
    /// Highest score first.
    Score,
    /// Biggest 24h gain first.
    Change,
}

impl SortKey {
    /// Unknown keys fall back to the symbol sort.
    pub fn parse(s: &str) -> Self {
        match s {
            "signal" => Self::Signal,
            "score" => Self::Score,
            "change" => Self::Change,
            _ => Self::Symbol,
        }
    }
}

/// Immutable description of what the table shows. Rebuilt from the request
/// on every change; individual fields are never mutated in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState {
    pub filter: SignalFilter,
    pub sort: SortKey,
    /// 1-based; 0 is treated as 1 and overshoot clamps to the last page.
    pub page: usize,
}

/// One row of the rendered table.
#[derive(Debug, Clone, Serialize)]
pub struct ViewRow {
    pub symbol: String,
    #[serde(flatten)]
    pub entry: MarketEntry,
}

/// One page of the view plus totals for the pagination controls.
#[derive(Debug, Clone, Serialize)]
pub struct ViewPage {
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub entries: Vec<ViewRow>,
}

/// filter → sort → paginate, in that order.
pub fn apply(snapshot: &MarketSnapshot, state: ViewState, page_size: usize) -> ViewPage {
    let mut rows: Vec<ViewRow> = snapshot
        .iter()
        .filter(|(_, entry)| state.filter.keeps(entry))
        .map(|(symbol, entry)| ViewRow {
            symbol: symbol.clone(),
            entry: entry.clone(),
        })
        .collect();

    match state.sort {
        // BTreeMap iteration is already symbol A-Z.
        SortKey::Symbol => {}
        SortKey::Signal => rows.sort_by(|a, b| {
            a.entry
                .signal
                .cmp(&b.entry.signal)
                .then_with(|| a.symbol.cmp(&b.symbol))
        }),
        SortKey::Score => rows.sort_by(|a, b| b.entry.score.total_cmp(&a.entry.score)),
        SortKey::Change => rows.sort_by(|a, b| b.entry.change_24h.total_cmp(&a.entry.change_24h)),
    }

    let total = rows.len();
    let page_size = page_size.max(1);
    let total_pages = total.div_ceil(page_size);
    let page = state.page.max(1).min(total_pages.max(1));
    let start = (page - 1) * page_size;
    let entries = if start < total {
        rows.into_iter().skip(start).take(page_size).collect()
    } else {
        Vec::new()
    };

    ViewPage {
        page,
        total_pages,
        total,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MarketSnapshot;

    fn entry(signal: Signal, score: f64, change_24h: f64) -> MarketEntry {
        MarketEntry {
            signal,
            score,
            price: 1.0,
            change_24h,
            rsi: 50.0,
            volume_24h: None,
            market_cap: None,
        }
    }

    fn snapshot(items: &[(&str, Signal, f64, f64)]) -> MarketSnapshot {
        items
            .iter()
            .map(|(sym, sig, score, chg)| (sym.to_string(), entry(*sig, *score, *chg)))
            .collect()
    }

    fn symbols(page: &ViewPage) -> Vec<&str> {
        page.entries.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn score_sort_is_descending() {
        let snap = snapshot(&[
            ("A", Signal::Neutral, 0.5, 0.0),
            ("B", Signal::Neutral, 0.9, 0.0),
        ]);
        let state = ViewState {
            sort: SortKey::Score,
            ..Default::default()
        };
        let page = apply(&snap, state, 12);
        assert_eq!(symbols(&page), ["B", "A"]);
    }

    #[test]
    fn filter_keeps_only_matching_signal() {
        let snap = snapshot(&[
            ("A", Signal::StrongBuy, 0.9, 0.0),
            ("B", Signal::Neutral, 0.5, 0.0),
        ]);
        let state = ViewState {
            filter: SignalFilter::Only(Signal::StrongBuy),
            ..Default::default()
        };
        let page = apply(&snap, state, 12);
        assert_eq!(symbols(&page), ["A"]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn pagination_splits_25_entries_into_3_pages_of_12() {
        let items: Vec<(String, MarketEntry)> = (0..25)
            .map(|i| (format!("SYM{i:02}"), entry(Signal::Neutral, 0.0, 0.0)))
            .collect();
        let snap: MarketSnapshot = items.into_iter().collect();

        let first = apply(&snap, ViewState { page: 1, ..Default::default() }, 12);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total, 25);
        assert_eq!(first.entries.len(), 12);
        assert_eq!(first.entries[0].symbol, "SYM00");
        assert_eq!(first.entries[11].symbol, "SYM11");

        let last = apply(&snap, ViewState { page: 3, ..Default::default() }, 12);
        assert_eq!(last.entries.len(), 1);
        assert_eq!(last.entries[0].symbol, "SYM24");
    }

    #[test]
    fn page_overshoot_clamps_to_last_page() {
        let snap = snapshot(&[("A", Signal::Buy, 0.1, 0.0)]);
        let page = apply(&snap, ViewState { page: 99, ..Default::default() }, 12);
        assert_eq!(page.page, 1);
        assert_eq!(symbols(&page), ["A"]);
    }

    #[test]
    fn empty_snapshot_yields_empty_first_page() {
        let snap = MarketSnapshot::new();
        let page = apply(&snap, ViewState::default(), 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn signal_sort_puts_strong_buy_first() {
        let snap = snapshot(&[
            ("A", Signal::Sell, 0.0, 0.0),
            ("B", Signal::StrongBuy, 0.0, 0.0),
            ("C", Signal::Neutral, 0.0, 0.0),
            ("D", Signal::StrongSell, 0.0, 0.0),
        ]);
        let state = ViewState {
            sort: SortKey::Signal,
            ..Default::default()
        };
        let page = apply(&snap, state, 12);
        assert_eq!(symbols(&page), ["B", "C", "A", "D"]);
    }

    #[test]
    fn change_sort_is_descending() {
        let snap = snapshot(&[
            ("A", Signal::Neutral, 0.0, -3.2),
            ("B", Signal::Neutral, 0.0, 5.5),
            ("C", Signal::Neutral, 0.0, 0.1),
        ]);
        let state = ViewState {
            sort: SortKey::Change,
            ..Default::default()
        };
        let page = apply(&snap, state, 12);
        assert_eq!(symbols(&page), ["B", "C", "A"]);
    }

    #[test]
    fn filter_parse_falls_back_to_all() {
        assert_eq!(SignalFilter::parse("ALL"), SignalFilter::All);
        assert_eq!(SignalFilter::parse("nonsense"), SignalFilter::All);
        assert_eq!(
            SignalFilter::parse("SELL"),
            SignalFilter::Only(Signal::Sell)
        );
        assert_eq!(SortKey::parse("score"), SortKey::Score);
        assert_eq!(SortKey::parse(""), SortKey::Symbol);
    }
}
