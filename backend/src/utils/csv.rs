use csv::{QuoteStyle, WriterBuilder};

fn needs_formula_guard(value: &str) -> bool {
    matches!(value.chars().next(), Some('=' | '+' | '-' | '@'))
}

/// Prefixes cells a spreadsheet would evaluate as a formula.
fn guard_cell(value: &str) -> String {
    if needs_formula_guard(value) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

/// Renders a header row plus records as a fully quoted CSV document.
pub fn render_csv<I>(headers: &[&str], rows: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.iter().map(|cell| guard_cell(cell)))?;
    }
    let bytes = writer.into_inner().map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_csv_quotes_and_escapes() {
        let out = render_csv(
            &["name", "reason"],
            vec![vec!["Ann".to_string(), "said \"hi\", left".to_string()]],
        )
        .expect("render");
        assert_eq!(out, "\"name\",\"reason\"\n\"Ann\",\"said \"\"hi\"\", left\"\n");
    }

    #[test]
    fn formula_like_cells_are_neutralised() {
        let out = render_csv(&["reason"], vec![vec!["=SUM(A1:A2)".to_string()]]).expect("render");
        assert_eq!(out, "\"reason\"\n\"'=SUM(A1:A2)\"\n");
    }
}
