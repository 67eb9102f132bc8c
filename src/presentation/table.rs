//! Plain-terminal price table

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::Presentation;
use crate::ranking::RankedResultSet;

/// Build the ranked price table; an empty result set gives a header-only table
pub fn render_table(ranked: &RankedResultSet, presentation: &Presentation) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("CITY").fg(Color::Cyan),
            Cell::new(format!("PREDICTED PRICE ({})", presentation.currency)).fg(Color::Cyan),
        ]);

    for (idx, result) in ranked.iter().enumerate() {
        let mut city = Cell::new(&result.city_name);
        if result.is_highlighted {
            let fill = presentation.palette.highlight;
            city = city.fg(Color::Rgb {
                r: fill.0,
                g: fill.1,
                b: fill.2,
            });
        }

        table.add_row(vec![
            Cell::new(idx + 1),
            city,
            Cell::new(presentation.format_price(result.predicted_price))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::PredictionResult;
    use crate::ranking::rank;

    #[test]
    fn test_table_lists_cities_in_rank_order() {
        let ranked = rank(
            vec![
                PredictionResult {
                    city_code: 0,
                    city_name: "Białystok".to_string(),
                    predicted_price: 420_000.0,
                    is_highlighted: false,
                },
                PredictionResult {
                    city_code: 6,
                    city_name: "Kraków".to_string(),
                    predicted_price: 1_234_567.891,
                    is_highlighted: false,
                },
            ],
            Some("Kraków"),
        );

        let table = render_table(&ranked, &Presentation::default());
        assert_eq!(table.row_iter().count(), 2);

        let output = table.to_string();
        assert!(output.contains("1,234,567.89 PLN"));
        assert!(output.contains("420,000.00 PLN"));
        let krakow = output.find("Kraków").unwrap();
        let bialystok = output.find("Białystok").unwrap();
        assert!(krakow < bialystok);
    }

    #[test]
    fn test_empty_table() {
        let table = render_table(&RankedResultSet::default(), &Presentation::default());
        assert_eq!(table.row_iter().count(), 0);
        assert!(table.to_string().contains("CITY"));
    }
}
