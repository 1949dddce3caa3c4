use yodha::models::{
    DarkPoolRegime, DarkPoolStats, Direction, FlowStats, Levels, MarketSession, MarketSnapshot,
    MlPrediction, RelativeStrengthStats, RsRegime, SignalStrength,
};

#[test]
fn flow_stats_default_to_even_ratios() {
    let metrics = FlowStats::default().normalize();
    assert_eq!(metrics.call_ratio, 50.0);
    assert_eq!(metrics.put_ratio, 50.0);
    assert_eq!(metrics.trade_count, 0);
    assert_eq!(metrics.unusual_count, 0);
}

#[test]
fn non_finite_values_fall_back_to_defaults() {
    let stats = DarkPoolStats {
        print_count: Some(4.0),
        bullish_pct: Some(f64::NAN),
        bearish_pct: Some(f64::INFINITY),
        total_value: Some(f64::NAN),
        regime: None,
    };
    let metrics = stats.normalize();
    assert_eq!(metrics.bullish_pct, 50.0);
    assert_eq!(metrics.bearish_pct, 50.0);
    assert_eq!(metrics.total_value, 0.0);
}

#[test]
fn unusable_levels_are_ignored() {
    let levels = Levels {
        call_wall: Some(0.0),
        put_wall: Some(-5.0),
        gex_flip: Some(f64::NAN),
        max_pain: Some(100.0),
        vwap: None,
    };
    assert_eq!(levels.call_wall(), None);
    assert_eq!(levels.put_wall(), None);
    assert_eq!(levels.gex_flip(), None);
    assert_eq!(levels.max_pain(), Some(100.0));
    assert_eq!(levels.vwap(), None);
}

#[test]
fn snapshot_without_session_is_closed() {
    let mut snapshot = MarketSnapshot::new("AAPL", 100.0, MarketSession::Open);
    snapshot.market_session = None;
    assert_eq!(snapshot.session(), MarketSession::Closed);
}

#[test]
fn snapshot_deserializes_from_camel_case() {
    let raw = r#"{
        "ticker": "AAPL",
        "price": 102.0,
        "changePercent": 3.2,
        "flowStats": {"callRatio": 70, "tradeCount": 60},
        "darkPoolStats": {"printCount": 12, "bullishPct": 65, "regime": "ACCUMULATION"},
        "newsItems": [{"title": "Apple beats", "sentiment": "positive"}],
        "relativeStrength": {"rsVsSpy": 1.2, "regime": "OUTPERFORM"},
        "levels": {"callWall": 105, "putWall": 95, "gexFlip": 100},
        "marketSession": "pre-market",
        "mlPrediction": {
            "has_signal": true,
            "direction": "BULLISH",
            "move_probability": 0.82,
            "direction_confidence": 0.7,
            "signal_strength": "STRONG"
        }
    }"#;
    let snapshot: MarketSnapshot = serde_json::from_str(raw).unwrap();

    assert_eq!(snapshot.session(), MarketSession::PreMarket);
    assert_eq!(snapshot.flow_stats.call_ratio, Some(70.0));
    assert_eq!(snapshot.flow_stats.trade_count, Some(60.0));
    assert_eq!(snapshot.dark_pool_stats.regime, Some(DarkPoolRegime::Accumulation));
    assert_eq!(snapshot.news_items[0].title(), "Apple beats");
    let rs = snapshot.relative_strength.as_ref().unwrap();
    assert_eq!(rs.regime, Some(RsRegime::Outperform));
    assert_eq!(snapshot.levels.call_wall(), Some(105.0));
    let ml = snapshot.ml_prediction.as_ref().unwrap();
    assert_eq!(ml.direction, Direction::Bullish);
    assert_eq!(ml.signal_strength, SignalStrength::Strong);
}

#[test]
fn unknown_enum_values_fall_back() {
    let rs: RelativeStrengthStats = serde_json::from_str(r#"{"regime": "SIDEWAYS"}"#).unwrap();
    assert_eq!(rs.regime, Some(RsRegime::Inline));

    let dp: DarkPoolStats = serde_json::from_str(r#"{"regime": "CHURN"}"#).unwrap();
    assert_eq!(dp.regime, Some(DarkPoolRegime::Unknown));
}

#[test]
fn ml_probabilities_are_clamped() {
    let ml = MlPrediction {
        has_signal: true,
        direction: Direction::Bullish,
        move_probability: 1.7,
        direction_confidence: f64::NAN,
        signal_strength: SignalStrength::Weak,
    };
    assert_eq!(ml.move_probability(), 1.0);
    assert_eq!(ml.direction_confidence(), 0.0);
}

#[test]
fn counts_accept_any_json_number() {
    let stats: FlowStats =
        serde_json::from_str(r#"{"tradeCount": 60.0, "unusualCount": -2}"#).unwrap();
    let metrics = stats.normalize();
    assert_eq!(metrics.trade_count, 60);
    assert_eq!(metrics.unusual_count, 0);

    let prints: DarkPoolStats = serde_json::from_str(r#"{"printCount": 12.7}"#).unwrap();
    assert_eq!(prints.normalize().print_count, 12);
}

#[test]
fn partial_ml_prediction_fills_defaults() {
    let ml: MlPrediction =
        serde_json::from_str(r#"{"has_signal": true, "direction": "BEARISH"}"#).unwrap();
    assert!(ml.has_signal);
    assert_eq!(ml.direction, Direction::Bearish);
    assert_eq!(ml.signal_strength, SignalStrength::None);
    assert_eq!(ml.move_probability(), 0.0);

    let empty: MlPrediction = serde_json::from_str("{}").unwrap();
    assert!(!empty.has_signal);
    assert_eq!(empty.direction, Direction::Neutral);
}
