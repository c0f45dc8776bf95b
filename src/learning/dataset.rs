//! Categorical training tables and query records

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One training example: feature values aligned with the header, plus its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<String>,
    pub class: String,
}

impl Row {
    pub fn value(&self, feature: usize) -> &str {
        &self.values[feature]
    }
}

/// A categorical dataset. The header lists the features followed by the
/// class-label column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    features: Vec<String>,
    class_label: String,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from a header and records of the same width.
    ///
    /// # Examples
    ///
    /// ```
    /// use algoviz::learning::Dataset;
    ///
    /// let data = Dataset::new(
    ///     vec!["Outlook".into(), "Play".into()],
    ///     vec![vec!["Sunny".into(), "No".into()]],
    /// )?;
    /// assert_eq!(data.features(), ["Outlook"]);
    /// assert_eq!(data.class_label(), "Play");
    /// # Ok::<(), algoviz::Error>(())
    /// ```
    pub fn new(header: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        if header.len() < 2 {
            return Err(Error::InvalidHeader {
                columns: header.len(),
            });
        }
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut features = header;
        let class_label = features.pop().unwrap_or_default();
        let width = features.len() + 1;

        let rows = records
            .into_iter()
            .enumerate()
            .map(|(idx, mut values)| {
                if values.len() != width {
                    return Err(Error::RowWidthMismatch {
                        row: idx + 1,
                        expected: width,
                        got: values.len(),
                    });
                }
                let class = values.pop().unwrap_or_default();
                Ok(Row { values, class })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            features,
            class_label,
            rows,
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn class_label(&self) -> &str {
        &self.class_label
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn feature_index(&self, feature: &str) -> Option<usize> {
        self.features.iter().position(|f| f == feature)
    }
}

/// Frequency of each class among `rows`, in first-seen order.
pub fn class_counts<'a, I>(rows: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Row>,
{
    tally(rows.into_iter().map(|row| row.class.as_str()))
}

/// Frequency of each distinct string, in first-seen order.
pub(crate) fn tally<'a, I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item.to_string(), 1)),
        }
    }
    counts
}

/// Feature assignments to classify, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature; a repeated feature keeps its first position and takes
    /// the new value.
    pub fn with(mut self, feature: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(feature, value);
        self
    }

    pub fn insert(&mut self, feature: impl Into<String>, value: impl Into<String>) {
        let feature = feature.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(f, _)| *f == feature) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((feature, value)),
        }
    }

    pub fn get(&self, feature: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(f, _)| f == feature)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut query = Query::new();
        for (feature, value) in iter {
            query.insert(feature, value);
        }
        query
    }
}
