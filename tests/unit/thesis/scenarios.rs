//! End-to-end market scenarios through the engine

use yodha::models::{
    Bias, Confidence, DarkPoolStats, Direction, FlowStats, Levels, MarketSession, MarketSnapshot,
    MlPrediction, NewsItem, RelativeStrengthStats, RsRegime, SignalStrength, ThesisBias,
};
use yodha::signals::ConfluenceEngine;

fn gamma_levels() -> Levels {
    Levels {
        call_wall: Some(105.0),
        put_wall: Some(95.0),
        gex_flip: Some(100.0),
        max_pain: None,
        vwap: None,
    }
}

fn strong_bullish_open() -> MarketSnapshot {
    MarketSnapshot::new("AAPL", 102.0, MarketSession::Open)
        .with_flow(FlowStats {
            call_ratio: Some(70.0),
            put_ratio: Some(30.0),
            trade_count: Some(60.0),
            ..FlowStats::default()
        })
        .with_dark_pool(DarkPoolStats {
            print_count: Some(12.0),
            bullish_pct: Some(65.0),
            bearish_pct: Some(35.0),
            ..DarkPoolStats::default()
        })
        .with_levels(gamma_levels())
}

#[test]
fn scenario_open_strong_bullish() {
    let engine = ConfluenceEngine::default();
    let snapshot = strong_bullish_open();
    let signals = engine.build_signals(&snapshot);

    assert_eq!(signals.flow.bias, Bias::Bullish);
    assert_eq!(signals.flow.confidence, Confidence::High);
    assert_eq!(signals.dark_pool.bias, Bias::Bullish);
    assert_eq!(signals.dark_pool.confidence, Confidence::High);
    assert_eq!(signals.bullish_count(), 2);
    assert_eq!(signals.bearish_count(), 0);

    let thesis = engine.evaluate(&snapshot).thesis;
    assert_eq!(thesis.bias, ThesisBias::Bullish);
}

#[test]
fn scenario_pre_market_big_gap_up() {
    let snapshot = MarketSnapshot::new("AAPL", 102.0, MarketSession::PreMarket)
        .with_change_percent(3.2)
        .with_levels(gamma_levels());
    let thesis = ConfluenceEngine::default().evaluate(&snapshot).thesis;

    assert_eq!(thesis.bias, ThesisBias::Bullish);
    assert!(thesis.setup.targets.contains(&"$105.00 (Call Wall)".to_string()));
    assert_eq!(thesis.setup.stop.as_deref(), Some("$95.00 (Put Wall)"));
    let risk = thesis.risk.unwrap_or_default();
    assert!(risk.contains("Invalidated below $95.00"), "{}", risk);
    assert!(risk.starts_with("Big gap"));
    assert_eq!(
        thesis.one_liner,
        "Bullish pre-market lean: AAPL gapping up +3.20%"
    );
    assert!(thesis.body.starts_with("AAPL is gapping up sharply (+3.20%)"));
}

#[test]
fn scenario_closed_market() {
    let mut snapshot = strong_bullish_open().with_change_percent(-1.5);
    snapshot.market_session = Some(MarketSession::Closed);
    let report = ConfluenceEngine::default().evaluate(&snapshot);
    let thesis = report.thesis;

    assert_eq!(thesis.bias, ThesisBias::Neutral);
    assert!(thesis.setup.entry.is_none());
    assert!(thesis.setup.targets.is_empty());
    assert!(thesis.setup.stop.is_none());
    assert!(thesis.risk.is_none());
    assert_eq!(thesis.one_liner, "Market closed: AAPL -1.50% on the day");
}

#[test]
fn scenario_no_news() {
    let snapshot = MarketSnapshot::new("TSLA", 250.0, MarketSession::Open);
    let signals = ConfluenceEngine::default().build_signals(&snapshot);

    assert_eq!(signals.news.bias, Bias::Neutral);
    assert_eq!(signals.news.confidence, Confidence::Low);
    assert_eq!(signals.news.summary, "No recent news for TSLA.");
}

#[test]
fn scenario_ml_overrides_majority() {
    let snapshot = strong_bullish_open()
        .with_relative_strength(RelativeStrengthStats {
            rs_vs_spy: Some(1.5),
            regime: Some(RsRegime::Outperform),
            ticker_change: Some(1.0),
            spy_change: Some(-0.5),
            ..RelativeStrengthStats::default()
        })
        .with_ml_prediction(MlPrediction {
            has_signal: true,
            direction: Direction::Bearish,
            move_probability: 0.85,
            direction_confidence: 0.55,
            signal_strength: SignalStrength::Strong,
        });
    let engine = ConfluenceEngine::default();
    let signals = engine.build_signals(&snapshot);
    assert_eq!(signals.bullish_count(), 3);
    assert_eq!(signals.bearish_count(), 0);

    let thesis = engine.evaluate(&snapshot).thesis;
    assert_eq!(thesis.bias, ThesisBias::Bearish);
    assert_eq!(thesis.one_liner, "Bearish bias | High move probability");
}

#[test]
fn evaluation_is_idempotent() {
    let engine = ConfluenceEngine::default();
    let snapshot = strong_bullish_open()
        .with_news(vec![NewsItem::new("AAPL rally continues")])
        .with_change_percent(1.1);

    assert_eq!(engine.evaluate(&snapshot), engine.evaluate(&snapshot));
}

#[test]
fn targets_always_sit_on_the_profitable_side() {
    let engine = ConfluenceEngine::default();
    let sessions = [MarketSession::PreMarket, MarketSession::Open];
    let prices = [90.0, 96.0, 99.0, 100.0, 101.0, 104.0, 106.0, 110.0];
    let changes = [-3.0, -1.0, 0.0, 1.0, 3.0];
    let flows = [(80.0, 20.0), (20.0, 80.0), (50.0, 50.0)];

    for session in sessions {
        for price in prices {
            for change in changes {
                for (calls, puts) in flows {
                    let snapshot = MarketSnapshot::new("SPY", price, session)
                        .with_change_percent(change)
                        .with_flow(FlowStats {
                            call_ratio: Some(calls),
                            put_ratio: Some(puts),
                            trade_count: Some(30.0),
                            ..FlowStats::default()
                        })
                        .with_dark_pool(DarkPoolStats {
                            print_count: Some(5.0),
                            bullish_pct: Some(calls),
                            bearish_pct: Some(puts),
                            ..DarkPoolStats::default()
                        })
                        .with_levels(gamma_levels());
                    let thesis = engine.evaluate(&snapshot).thesis;
                    let level_prices = [(105.0, "$105.00"), (95.0, "$95.00"), (100.0, "$100.00")];

                    for target in &thesis.setup.targets {
                        let (level, _) = level_prices
                            .iter()
                            .find(|(_, label)| target.starts_with(label))
                            .copied()
                            .unwrap();
                        match thesis.bias {
                            ThesisBias::Bullish => {
                                assert!(level > price, "{} at {}", target, price)
                            }
                            ThesisBias::Bearish => {
                                assert!(level < price, "{} at {}", target, price)
                            }
                            _ => panic!("non-directional thesis with targets"),
                        }
                    }
                    if !thesis.bias.is_directional() {
                        assert!(thesis.setup.is_empty());
                    }
                }
            }
        }
    }
}

#[test]
fn flow_and_dark_pool_are_gated_outside_regular_hours() {
    let engine = ConfluenceEngine::default();
    for session in [
        MarketSession::PreMarket,
        MarketSession::AfterHours,
        MarketSession::Closed,
    ] {
        let mut snapshot = strong_bullish_open();
        snapshot.market_session = Some(session);
        let signals = engine.build_signals(&snapshot);

        assert_eq!(signals.flow.bias, Bias::NoData);
        assert_eq!(signals.dark_pool.bias, Bias::NoData);
        for signal in signals.iter() {
            if signal.bias == Bias::NoData {
                assert_eq!(signal.confidence, Confidence::None);
            }
        }
    }
}

#[test]
fn degenerate_inputs_still_produce_a_thesis() {
    let engine = ConfluenceEngine::default();
    for session in [
        MarketSession::PreMarket,
        MarketSession::Open,
        MarketSession::AfterHours,
        MarketSession::Closed,
    ] {
        let snapshot = MarketSnapshot::new("", f64::NAN, session)
            .with_change_percent(f64::INFINITY)
            .with_flow(FlowStats {
                call_ratio: Some(f64::NAN),
                trade_count: Some(3.0),
                ..FlowStats::default()
            })
            .with_levels(Levels {
                call_wall: Some(f64::NAN),
                put_wall: Some(-1.0),
                gex_flip: Some(0.0),
                max_pain: None,
                vwap: Some(f64::NEG_INFINITY),
            })
            .with_news(vec![NewsItem::default()])
            .with_relative_strength(RelativeStrengthStats::default());

        let report = engine.evaluate(&snapshot);
        assert_eq!(report.signals.len(), 4);
        assert!(!report.thesis.one_liner.is_empty());
        assert!(!report.thesis.body.is_empty());
        assert!(report.thesis.setup.targets.is_empty());
        assert!(report.thesis.setup.stop.is_none());
    }
}
