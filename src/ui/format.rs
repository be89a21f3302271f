use crate::inbox::projector::SearchMatcher;
use chrono::{DateTime, TimeDelta, TimeZone};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub is_match: bool,
}

/// Splits `text` into runs that do and don't match `query`, using the same
/// matcher as the search filter.
pub fn highlight_segments<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let Some(matcher) = SearchMatcher::new(query) else {
        return vec![Segment {
            text,
            is_match: false,
        }];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for range in matcher.find_ranges(text) {
        if range.start > last {
            segments.push(Segment {
                text: &text[last..range.start],
                is_match: false,
            });
        }
        segments.push(Segment {
            text: &text[range.clone()],
            is_match: true,
        });
        last = range.end;
    }
    if last < text.len() {
        segments.push(Segment {
            text: &text[last..],
            is_match: false,
        });
    }
    segments
}

/// Short date for the list: time of day within 24h, weekday within a week,
/// otherwise month and day. Unparseable dates are shown as-is.
pub fn list_date<Tz>(date: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Ok(parsed) = DateTime::parse_from_rfc3339(date) else {
        return date.to_string();
    };
    let local = parsed.with_timezone(&now.timezone());
    let age = now.clone().signed_duration_since(local.clone());

    if age < TimeDelta::hours(24) {
        local.format("%-I:%M %p").to_string()
    } else if age < TimeDelta::days(7) {
        local.format("%a").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}

pub fn full_date<Tz>(date: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed
            .with_timezone(tz)
            .format("%A, %B %-d, %Y at %-I:%M %p")
            .to_string(),
        Err(_) => date.to_string(),
    }
}
