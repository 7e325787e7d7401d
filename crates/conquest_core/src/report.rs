use crate::error::ReportError;

/// A CSV table as exchanged with the import endpoints: a header row followed by
/// data rows.
///
/// In the error CSV of a failed batch each data row describes one failure. The
/// column set is whatever the server sends and is never reshaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    rows: Vec<Vec<String>>,
}

impl ErrorReport {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut all = Vec::with_capacity(rows.len() + 1);
        all.push(header);
        all.extend(rows);
        Self { rows: all }
    }

    /// Parses CSV text, honouring quoted fields with embedded commas, quotes and line breaks.
    /// Blank lines are skipped. A closing quote must end its field.
    pub fn parse(text: &str) -> Result<Self, ReportError> {
        let mut rows = Vec::new();
        let mut record: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut touched = false;
        let mut in_quotes = false;
        let mut closed = false;
        let mut quote_line = 0;
        let mut line = 1;
        let mut column = 0;

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            column += 1;

            if in_quotes {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => {
                        in_quotes = false;
                        closed = true;
                    }
                    '\n' => {
                        line += 1;
                        column = 0;
                        field.push(c);
                    }
                    _ => field.push(c),
                }
                continue;
            }

            if closed && !matches!(c, ',' | '\r' | '\n') {
                return Err(ReportError::TextAfterQuote { line, column });
            }

            match c {
                ',' => {
                    record.push(std::mem::take(&mut field));
                    touched = true;
                    closed = false;
                }
                '"' if field.is_empty() => {
                    in_quotes = true;
                    touched = true;
                    quote_line = line;
                }
                '"' => return Err(ReportError::StrayQuote { line, column }),
                '\r' | '\n' => {
                    if c == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    if touched || !field.is_empty() {
                        record.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut record));
                    }
                    touched = false;
                    closed = false;
                    line += 1;
                    column = 0;
                }
                _ => field.push(c),
            }
        }

        if in_quotes {
            return Err(ReportError::UnterminatedQuote(quote_line));
        }
        if touched || !field.is_empty() {
            record.push(field);
            rows.push(record);
        }

        Ok(Self { rows })
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header.
    pub fn rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the report as CSV with `\r\n` line endings.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        for row in &self.rows {
            let line = row
                .iter()
                .map(|f| escape_csv_field(f))
                .collect::<Vec<_>>()
                .join(",");
            csv.push_str(&line);
            csv.push_str("\r\n");
        }
        csv
    }
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_commas_inside_quotes() {
        let text = "Row,Field,Message\r\n2,TypeID,\"Value 'X' is not valid, expected a number\"\r\n";
        let report = ErrorReport::parse(text).unwrap();

        assert_eq!(
            report.header().unwrap(),
            &["Row".to_string(), "Field".to_string(), "Message".to_string()]
        );
        assert_eq!(report.row_count(), 1);
        assert_eq!(
            report.rows()[0][2],
            "Value 'X' is not valid, expected a number"
        );
    }

    #[test]
    fn handles_escaped_quotes_and_embedded_newlines() {
        let text = "A,B\n\"say \"\"hi\"\"\",\"two\nlines\"\n";
        let report = ErrorReport::parse(text).unwrap();
        assert_eq!(report.rows()[0], vec!["say \"hi\"", "two\nlines"]);
    }

    #[test]
    fn skips_blank_lines_but_keeps_empty_fields() {
        let text = "A,B,C\r\n\r\n1,,3\r\n,,\r\n";
        let report = ErrorReport::parse(text).unwrap();
        assert_eq!(report.row_count(), 2);
        assert_eq!(report.rows()[0], vec!["1", "", "3"]);
        assert_eq!(report.rows()[1], vec!["", "", ""]);
    }

    #[test]
    fn last_line_without_terminator() {
        let report = ErrorReport::parse("A\n1").unwrap();
        assert_eq!(report.rows(), &[vec!["1".to_string()]]);
    }

    #[test]
    fn rejects_unterminated_quote() {
        let err = ErrorReport::parse("A,B\n1,\"open\n").unwrap_err();
        assert_eq!(err, ReportError::UnterminatedQuote(2));
    }

    #[test]
    fn rejects_stray_quote() {
        let err = ErrorReport::parse("A,B\n1,ab\"c\n").unwrap_err();
        assert_eq!(err, ReportError::StrayQuote { line: 2, column: 5 });
    }

    #[test]
    fn rejects_text_after_closing_quote() {
        let err = ErrorReport::parse("A,B\n1,\"ab\"cd\n").unwrap_err();
        assert_eq!(err, ReportError::TextAfterQuote { line: 2, column: 7 });

        let report = ErrorReport::parse("A,B\n\"ab\",cd\n").unwrap();
        assert_eq!(report.rows()[0], vec!["ab", "cd"]);
    }

    #[test]
    fn writes_escaped_csv() {
        let report = ErrorReport::new(
            vec!["Row".into(), "Message".into()],
            vec![vec!["3".into(), "bad \"value\", see docs".into()]],
        );
        assert_eq!(
            report.to_csv(),
            "Row,Message\r\n3,\"bad \"\"value\"\", see docs\"\r\n"
        );
        assert_eq!(ErrorReport::parse(&report.to_csv()).unwrap(), report);
    }

    #[test]
    fn empty_payload() {
        let report = ErrorReport::parse("").unwrap();
        assert!(report.is_empty());
        assert_eq!(report.header(), None);
        assert_eq!(report.row_count(), 0);
    }
}
