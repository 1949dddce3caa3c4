use std::env;
use std::fs;

use yodha::config::ConfluenceConfig;
use yodha::logging;
use yodha::models::{
    DarkPoolRegime, DarkPoolStats, FlowStats, Levels, MarketSession, MarketSnapshot, NewsItem,
    RelativeStrengthStats, RsRegime,
};
use yodha::signals::{ConfluenceEngine, ConfluenceReport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let engine = ConfluenceEngine::new(ConfluenceConfig::from_env()?);

    if let Some(path) = env::args().nth(1) {
        let raw = fs::read_to_string(&path)?;
        let snapshot: MarketSnapshot = serde_json::from_str(&raw)?;
        print_report(&engine.evaluate(&snapshot));
        return Ok(());
    }

    for (i, snapshot) in demo_snapshots().iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("Snapshot {} ({}, {}):", i + 1, snapshot.ticker, snapshot.session());
        print_report(&engine.evaluate(snapshot));
    }

    Ok(())
}

fn demo_snapshots() -> Vec<MarketSnapshot> {
    let levels = Levels {
        call_wall: Some(105.0),
        put_wall: Some(95.0),
        gex_flip: Some(100.0),
        max_pain: Some(100.0),
        vwap: None,
    };

    let open = MarketSnapshot::new("AAPL", 102.0, MarketSession::Open)
        .with_change_percent(1.1)
        .with_flow(FlowStats {
            call_ratio: Some(70.0),
            put_ratio: Some(30.0),
            net_delta_adjusted_flow: Some(1_200_000.0),
            sweep_ratio: Some(18.0),
            trade_count: Some(60.0),
            unusual_count: Some(3.0),
        })
        .with_dark_pool(DarkPoolStats {
            print_count: Some(12.0),
            bullish_pct: Some(68.0),
            bearish_pct: Some(32.0),
            total_value: Some(45_000_000.0),
            regime: Some(DarkPoolRegime::Accumulation),
        })
        .with_news(vec![
            NewsItem::new("AAPL shares surge after earnings beat"),
            NewsItem::new("Analysts upgrade Apple on services growth"),
        ])
        .with_relative_strength(RelativeStrengthStats {
            rs_vs_spy: Some(1.4),
            rs_vs_qqq: Some(0.9),
            regime: Some(RsRegime::Outperform),
            ticker_change: Some(1.1),
            spy_change: Some(-0.3),
            qqq_change: Some(0.2),
            session: None,
        })
        .with_levels(levels.clone());

    let pre_market = MarketSnapshot::new("NVDA", 103.2, MarketSession::PreMarket)
        .with_change_percent(3.2)
        .with_news(vec![NewsItem::new("NVDA shares jump on record data center demand")])
        .with_levels(levels.clone());

    let closed = MarketSnapshot::new("TSLA", 98.5, MarketSession::Closed)
        .with_change_percent(-1.5)
        .with_levels(levels);

    vec![open, pre_market, closed]
}

fn print_report(report: &ConfluenceReport) {
    let thesis = &report.thesis;
    println!("  Bias: {}", thesis.bias);
    println!("  {}", thesis.one_liner);
    println!("  Confluence: {}", report.confluence.label());
    println!("  Signals:");
    for (i, signal) in report.signals.iter().enumerate() {
        println!(
            "    {}. {} [{}] {}",
            i + 1,
            signal.label,
            signal.bias.as_str(),
            signal.summary
        );
    }
    println!("  Thesis: {}", thesis.body);
    if let Some(entry) = &thesis.setup.entry {
        println!("  Entry: {}", entry);
    }
    if !thesis.setup.targets.is_empty() {
        println!("  Targets: {}", thesis.setup.targets.join(", "));
    }
    if let Some(stop) = &thesis.setup.stop {
        println!("  Stop: {}", stop);
    }
    if let Some(risk) = &thesis.risk {
        println!("  Risk: {}", risk);
    }
}
