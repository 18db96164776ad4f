/*
 * C2 - Filter Parser. Translates a peer's request filters into a
 * normalized `FilterSet`. Pure, synchronous, no failure modes -
 * malformed values are normalized away rather than rejected, matching
 * the source's tolerant parsing (bounds sanitization is the
 * persistence layer's job).
 */

use crate::models::{FilterSet, RequestFilter};

pub struct FilterParser;

impl FilterParser {
    pub fn parse(request_filters: &[RequestFilter]) -> FilterSet {
        let mut filter_set = FilterSet::default();

        for filter in request_filters {
            match filter.type_.as_str() {
                "fingerprint" => {
                    filter_set
                        .fingerprints
                        .extend(filter.values.iter().cloned().map(Into::into));
                }
                "embed" => {
                    filter_set.embeds.extend(filter.values.iter().cloned());
                }
                "timestamp" => {
                    let start = filter
                        .values
                        .first()
                        .and_then(|v| v.parse::<i64>().ok())
                        .unwrap_or(0);
                    let end = filter
                        .values
                        .get(1)
                        .and_then(|v| v.parse::<i64>().ok())
                        .unwrap_or(0);

                    if start > 0 || end > 0 {
                        filter_set.time_start = start;
                        filter_set.time_end = end;
                    }
                }
                _ => {}
            }
        }

        filter_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Fingerprint;

    fn filter(type_: &str, values: &[&str]) -> RequestFilter {
        RequestFilter {
            type_: type_.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn collects_fingerprints_and_embeds() {
        let filters = vec![
            filter("fingerprint", &["abc", "def"]),
            filter("embed", &["youtube.com/x"]),
        ];

        let parsed = FilterParser::parse(&filters);

        assert_eq!(
            parsed.fingerprints,
            vec![Fingerprint::from("abc"), Fingerprint::from("def")]
        );
        assert_eq!(parsed.embeds, vec!["youtube.com/x".to_string()]);
    }

    #[test]
    fn timestamp_filter_sets_range() {
        let filters = vec![filter("timestamp", &["100", "200"])];
        let parsed = FilterParser::parse(&filters);
        assert_eq!(parsed.time_start, 100);
        assert_eq!(parsed.time_end, 200);
    }

    #[test]
    fn malformed_timestamp_values_are_treated_as_zero() {
        let filters = vec![filter("timestamp", &["not-a-number", "50"])];
        let parsed = FilterParser::parse(&filters);
        assert_eq!(parsed.time_start, 0);
        assert_eq!(parsed.time_end, 50);
    }

    #[test]
    fn unknown_filter_type_is_ignored() {
        let filters = vec![filter("bogus", &["x"])];
        let parsed = FilterParser::parse(&filters);
        assert_eq!(parsed, FilterSet::default());
    }

    #[test]
    fn all_zero_timestamp_values_leave_range_untouched() {
        let filters = vec![filter("timestamp", &["0", "0"])];
        let parsed = FilterParser::parse(&filters);
        assert_eq!(parsed.time_start, 0);
        assert_eq!(parsed.time_end, 0);
    }
}
