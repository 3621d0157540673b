use crate::models::ScoredTransaction;
use std::io;
use std::io::Write;

/// Columns shown in the transaction review table, in display order.
const REPORT_COLUMNS: [&str; 7] = [
    "trans_date_trans_time",
    "cc_num",
    "merchant",
    "category",
    "amt",
    "trans_num",
    "is_fraud"
];

const FRAUD_MARKER: &str =
    r#"<span style="font-size: 25px; text-align: right; color: orange;">&#10071</span>"#;
const CLEAR_MARKER: &str =
    r#"<span style="font-size: 25px; text-align: right; color: green;">&#x2713</span>"#;

/// Renders the scored transactions as an HTML table fragment.
///
/// Rows are ordered by fraud flag descending so flagged transactions surface
/// first; the sort is stable, so input order is kept within each group. Cell
/// text is escaped; only the marker span is emitted as raw markup.
pub fn render_table<W: Write>(output: &mut W, scored: &[ScoredTransaction]) -> io::Result<()> {
    let mut ordered: Vec<&ScoredTransaction> = scored.iter().collect();
    ordered.sort_by(|left, right| right.is_fraud.cmp(&left.is_fraud));

    writeln!(output, "<table border=\"1\" class=\"dataframe\">")?;
    writeln!(output, "  <thead>")?;
    writeln!(output, "    <tr style=\"text-align: right;\">")?;

    for column in REPORT_COLUMNS {
        writeln!(output, "      <th>{column}</th>")?;
    }

    writeln!(output, "    </tr>")?;
    writeln!(output, "  </thead>")?;
    writeln!(output, "  <tbody>")?;

    for row in ordered {
        let transaction = &row.transaction;

        writeln!(output, "    <tr>")?;
        writeln!(output, "      <td>{}</td>", escape(&transaction.timestamp.to_string()))?;
        writeln!(output, "      <td>{}</td>", escape(&transaction.card_number))?;
        writeln!(output, "      <td>{}</td>", escape(&transaction.merchant))?;
        writeln!(output, "      <td>{}</td>", escape(&transaction.category))?;
        writeln!(output, "      <td>{}</td>", transaction.amount)?;
        writeln!(output, "      <td>{}</td>", escape(&transaction.transaction_id))?;
        writeln!(output, "      <td>{}</td>", marker(row.is_fraud))?;
        writeln!(output, "    </tr>")?;
    }

    writeln!(output, "  </tbody>")?;
    writeln!(output, "</table>")?;

    Ok(())
}

fn marker(is_fraud: u8) -> &'static str {
    if is_fraud == 1 { FRAUD_MARKER } else { CLEAR_MARKER }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
