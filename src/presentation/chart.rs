//! Plain-terminal horizontal bar chart
//!
//! One line per city, most expensive first. Bar length is proportional to the
//! predicted price and the formatted price is the only magnitude indicator
//! (there is no numeric axis).

use colored::Colorize;

use super::{bar_length, Presentation};
use crate::ranking::RankedResultSet;

const FILL: char = '█';

/// Render the chart with bars at most `width` cells long
///
/// With `color` set, bars are drawn as colored backgrounds with the price
/// inside; otherwise as block characters followed by the price.
pub fn render_chart(
    ranked: &RankedResultSet,
    presentation: &Presentation,
    width: usize,
    color: bool,
) -> String {
    let Some(max_price) = ranked.max_price() else {
        return String::new();
    };

    let name_width = ranked
        .iter()
        .map(|r| r.city_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for result in ranked.iter() {
        let label = presentation.format_price(result.predicted_price);
        let len = bar_length(result.predicted_price, max_price, width);
        let pad = name_width - result.city_name.chars().count();

        out.push_str(&" ".repeat(pad));
        out.push_str(&result.city_name);
        out.push_str(" │");

        if color {
            let fill = presentation.palette.fill(result.is_highlighted);
            let label_cells = label.chars().count() + 2;
            if len >= label_cells {
                let text = format!(" {}{}", label, " ".repeat(len - label_cells + 1));
                out.push_str(
                    &text
                        .black()
                        .bold()
                        .on_truecolor(fill.0, fill.1, fill.2)
                        .to_string(),
                );
            } else {
                let bar = " ".repeat(len);
                out.push_str(&bar.on_truecolor(fill.0, fill.1, fill.2).to_string());
                out.push(' ');
                out.push_str(&label);
            }
        } else {
            out.push_str(&FILL.to_string().repeat(len));
            out.push(' ');
            out.push_str(&label);
            if result.is_highlighted {
                out.push_str(" *");
            }
        }
        out.push('\n');
    }

    out
}
