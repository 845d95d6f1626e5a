//! Comparison deep link: the selected ids travel as one comma-joined
//! `compare` query parameter on the comparison view's address.

use url::form_urlencoded;

pub const COMPARE_PATH: &str = "/compare";
pub const COMPARE_PARAM: &str = "compare";

/// Address for the comparison view with the given selection.
///
/// An empty selection yields the bare path, clearing the parameter.
pub fn compare_href<S: AsRef<str>>(ids: &[S]) -> String {
    if ids.is_empty() {
        return COMPARE_PATH.to_string();
    }
    let joined = ids
        .iter()
        .map(|id| form_urlencoded::byte_serialize(id.as_ref().as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join(",");
    format!("{COMPARE_PATH}?{COMPARE_PARAM}={joined}")
}

/// Ids carried by the `compare` parameter.
///
/// Accepts a full href (`/compare?compare=1,2`), a query string with or
/// without the leading `?`, and returns ids in the order written. Only the
/// first `compare` parameter counts. The raw value is split on `,` before
/// each id is decoded, so an encoded comma (`%2C`) stays inside its id.
pub fn parse_compare_param(input: &str) -> Vec<String> {
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    };
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == COMPARE_PARAM)
        .map(|(_, raw)| {
            raw.split(',')
                .map(decode_component)
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Form-url-decode one raw component (`+` and `%XX` escapes).
fn decode_component(raw: &str) -> String {
    let pair = format!("_={raw}");
    form_urlencoded::parse(pair.as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_joins_ids_with_commas() {
        assert_eq!(compare_href(&["1", "4", "9"]), "/compare?compare=1,4,9");
    }

    #[test]
    fn empty_selection_clears_the_parameter() {
        let none: [&str; 0] = [];
        assert_eq!(compare_href(&none), "/compare");
    }

    #[test]
    fn parses_href_and_bare_query() {
        assert_eq!(parse_compare_param("/compare?compare=1,2"), vec!["1", "2"]);
        assert_eq!(parse_compare_param("?compare=3"), vec!["3"]);
        assert_eq!(parse_compare_param("compare=5,6"), vec!["5", "6"]);
    }

    #[test]
    fn only_the_first_compare_parameter_counts() {
        assert_eq!(
            parse_compare_param("/compare?other=x&compare=2,3&compare=4#top"),
            vec!["2", "3"]
        );
    }

    #[test]
    fn missing_or_empty_parameter_yields_nothing() {
        assert!(parse_compare_param("/compare").is_empty());
        assert!(parse_compare_param("/compare?compare=").is_empty());
        assert!(parse_compare_param("/compare?other=1").is_empty());
    }

    #[test]
    fn encoded_ids_survive_the_round_trip() {
        let href = compare_href(&["a b", "c&d", "e,f", "g=h"]);
        assert_eq!(href, "/compare?compare=a+b,c%26d,e%2Cf,g%3Dh");
        assert_eq!(parse_compare_param(&href), vec!["a b", "c&d", "e,f", "g=h"]);
    }
}
