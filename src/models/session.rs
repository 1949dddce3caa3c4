//! Wall-clock session detection for US equities (New York time).
//!
//! Holidays and half days are not modelled.

use chrono::{DateTime, Datelike, NaiveTime, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;

use crate::models::market::MarketSession;

const PRE_MARKET_OPEN: (u32, u32) = (4, 0);
const REGULAR_OPEN: (u32, u32) = (9, 30);
const REGULAR_CLOSE: (u32, u32) = (16, 0);
const AFTER_HOURS_CLOSE: (u32, u32) = (20, 0);

fn minutes((hour, minute): (u32, u32)) -> u32 {
    hour * 60 + minute
}

impl MarketSession {
    /// Session in effect at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        let local = now.with_timezone(&New_York);
        Self::at_local(local.weekday(), local.time())
    }

    /// Session for a New York local weekday and time.
    pub fn at_local(weekday: Weekday, time: NaiveTime) -> Self {
        if matches!(weekday, Weekday::Sat | Weekday::Sun) {
            return MarketSession::Closed;
        }
        let now = time.hour() * 60 + time.minute();
        if now < minutes(PRE_MARKET_OPEN) {
            MarketSession::Closed
        } else if now < minutes(REGULAR_OPEN) {
            MarketSession::PreMarket
        } else if now < minutes(REGULAR_CLOSE) {
            MarketSession::Open
        } else if now < minutes(AFTER_HOURS_CLOSE) {
            MarketSession::AfterHours
        } else {
            MarketSession::Closed
        }
    }
}
