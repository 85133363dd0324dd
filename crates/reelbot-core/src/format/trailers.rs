//! The trailer search-results block.

use crate::markup;
use crate::model::VideoResult;

/// Search hits requested from the video-search collaborator.
pub const TRAILER_RESULT_LIMIT: usize = 10;

/// Builds the video-search query for a title.
pub fn trailer_query(title: &str, year: Option<i32>) -> String {
    match year {
        Some(year) => format!("{title} ({year}) trailer"),
        None => format!("{title} trailer"),
    }
}

/// Formats trailer search results as a numbered list of links.
///
/// Formats whatever arrived, up to [`TRAILER_RESULT_LIMIT`] entries; the
/// disclaimer always quotes the query that was searched.
pub fn format_trailers(query: &str, results: &[VideoResult]) -> String {
    let mut out = format!("{}:\n\n", markup::bold("Trailers"));
    for (index, video) in results.iter().take(TRAILER_RESULT_LIMIT).enumerate() {
        out.push_str(&format!(
            "{}) {}\n",
            index + 1,
            markup::link(&video.title, &video.link)
        ));
    }
    let warning = format!(
        "These are the top {TRAILER_RESULT_LIMIT} search results for \"{}\" on YouTube. \
         We apologize if the trailer you were looking for is not among them.",
        markup::escape(query)
    );
    out.push_str(&format!("\n{}", markup::italic(&warning)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(count: usize) -> Vec<VideoResult> {
        (1..=count)
            .map(|i| VideoResult {
                title: format!("Trailer {i}"),
                link: format!("https://youtube.example/watch?v={i}"),
            })
            .collect()
    }

    #[test]
    fn query_includes_year_when_resolved() {
        assert_eq!(trailer_query("Inception", Some(2010)), "Inception (2010) trailer");
        assert_eq!(trailer_query("Inception", None), "Inception trailer");
    }

    #[test]
    fn formats_a_numbered_linked_list() {
        let out = format_trailers("Inception (2010) trailer", &results(10));
        assert!(out.starts_with("<b>Trailers</b>:\n\n"));
        assert!(out.contains(
            "1) <a href=\"https://youtube.example/watch?v=1\">Trailer 1</a>\n"
        ));
        assert!(out.contains(
            "10) <a href=\"https://youtube.example/watch?v=10\">Trailer 10</a>\n"
        ));
        assert!(out.contains("<i>These are the top 10 search results for \"Inception (2010) trailer\" on YouTube."));
    }

    #[test]
    fn fails_open_when_fewer_results_arrive() {
        let out = format_trailers("Obscure trailer", &results(3));
        assert!(out.contains("3) "));
        assert!(!out.contains("4) "));
        assert!(out.contains("on YouTube"));
    }

    #[test]
    fn extra_results_beyond_the_limit_are_dropped() {
        let out = format_trailers("Busy trailer", &results(12));
        assert!(out.contains("10) "));
        assert!(!out.contains("11) "));
    }
}
