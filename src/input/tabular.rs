//! Tables, queries, points and transactions

use csv::{ReaderBuilder, Trim};

use super::{lines, parse_number, split_assignment};
use crate::{
    Error, Result,
    learning::{Dataset, Query},
    point::Point,
};

/// CSV table with a header row; the last column is the class label.
///
/// # Examples
///
/// ```
/// use algoviz::input::parse_table;
///
/// let data = parse_table("Outlook, Play\nSunny, No\nRain, Yes\n")?;
/// assert_eq!(data.class_label(), "Play");
/// assert_eq!(data.len(), 2);
/// # Ok::<(), algoviz::Error>(())
/// ```
pub fn parse_table(text: &str) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let records = reader
        .records()
        .map(|record| -> Result<Vec<String>> { Ok(record?.iter().map(str::to_string).collect()) })
        .filter(|record: &Result<Vec<String>>| {
            !matches!(record, Ok(values) if values.iter().all(String::is_empty))
        })
        .collect::<Result<Vec<_>>>()?;
    Dataset::new(header, records)
}

/// Query lines `feature=value`.
pub fn parse_query(text: &str) -> Result<Query> {
    let mut query = Query::new();
    for (line_no, line) in lines(text) {
        let (feature, value) = split_assignment(line_no, line)?;
        query.insert(feature, value);
    }
    Ok(query)
}

/// Point lines `x,y`.
pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    lines(text)
        .map(|(line_no, line)| {
            let (x, y) = line
                .split_once(',')
                .ok_or_else(|| Error::malformed(line_no, format!("expected x,y, got '{line}'")))?;
            Ok(Point::new(parse_number(line_no, x)?, parse_number(line_no, y)?))
        })
        .collect()
}

/// One transaction per line, items separated by commas.
pub fn parse_transactions(text: &str) -> Vec<Vec<String>> {
    lines(text)
        .map(|(_, line)| {
            line.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|items| !items.is_empty())
        .collect()
}
