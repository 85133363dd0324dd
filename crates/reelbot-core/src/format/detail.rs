//! The movie detail block.

use crate::chunk::MAX_MESSAGE_LEN;
use crate::markup;
use crate::model::MovieDetail;

/// Characters kept free under the message limit before the plot is pushed
/// out to a link instead of inlined.
const PLOT_INLINE_MARGIN: usize = 196;

/// Formats the detail block for one movie.
///
/// Field lines appear only when the source provided a value. When the plot
/// would bring the block within [`PLOT_INLINE_MARGIN`] characters of the
/// message limit it is replaced by a link to the full plot-summaries page.
pub fn format_detail(detail: &MovieDetail, id: &str) -> String {
    let mut out = String::new();
    if let Some(url) = &detail.cover_url {
        out.push_str(&markup::hidden_link(url));
    }
    out.push_str(&format!(
        "{}: {}\n",
        markup::bold("Title"),
        markup::escape(detail.primary_title())
    ));
    if let Some(original) = detail.original_title() {
        out.push_str(&format!(
            "{}: {}\n",
            markup::bold("Original title"),
            markup::escape(original)
        ));
    }
    out.push('\n');
    if let Some(year) = detail.year {
        out.push_str(&format!("{}: {year}\n", markup::bold("Release year")));
    }
    if let Some(countries) = &detail.countries {
        out.push_str(&format!(
            "{}: {}\n",
            markup::bold("Countries"),
            markup::escape(countries)
        ));
    }
    if let Some(directors) = &detail.directors {
        out.push_str(&format!(
            "{}: {}\n",
            markup::bold("Directors"),
            markup::escape(directors)
        ));
    }
    if let Some(genres) = &detail.genres {
        out.push_str(&format!(
            "{}: {}\n",
            markup::bold("Genres"),
            markup::escape(genres)
        ));
    }
    if let Some(rating) = detail.rating {
        out.push_str(&format!("{}: {rating}\n", markup::bold("IMDb rating")));
    }
    if let Some(plot) = &detail.plot {
        if out.chars().count() + plot.chars().count() >= MAX_MESSAGE_LEN - PLOT_INLINE_MARGIN {
            let url = format!("https://www.imdb.com/title/tt{id}/plotsummary");
            out.push_str(&format!(
                "\nYou can read plot summaries {}.",
                markup::link("here", &url)
            ));
        } else {
            out.push_str(&format!(
                "\n{}:\n{}",
                markup::bold("Plot summary"),
                markup::escape(plot)
            ));
        }
    }
    out
}
