//! Shared helpers for the tab-separated replies (`LIST_NETWORKS`,
//! `SCAN_RESULTS`).

/// Separator between column names in a tabular header line.
const HEADER_SEPARATOR: &str = " / ";
/// Separator between fields in a tabular body line.
pub(crate) const FIELD_SEPARATOR: char = '\t';

/// Column positions discovered from a header line.
///
/// The daemon's column order has changed across releases, so decoders look
/// fields up by name rather than by fixed position.
#[derive(Debug)]
pub(crate) struct Header<'a> {
    columns: Vec<&'a str>,
}

impl<'a> Header<'a> {
    pub(crate) fn parse(line: &'a str) -> Self {
        Self {
            columns: line.split(HEADER_SEPARATOR).collect(),
        }
    }

    /// Index of the named column, if the header has it.
    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }

    pub(crate) fn len(&self) -> usize {
        self.columns.len()
    }
}

/// Field at `col` of an already length-checked row, or `""` when the header
/// lacks that column.
pub(crate) fn field<'a>(fields: &[&'a str], col: Option<usize>) -> &'a str {
    col.and_then(|c| fields.get(c).copied()).unwrap_or("")
}

/// Unwrap a `[A][B][C]` bracket run into its tokens.
///
/// Anything not wrapped in brackets yields no flags.
pub(crate) fn parse_flags(field: &str) -> Vec<String> {
    field
        .strip_prefix('[')
        .and_then(|f| f.strip_suffix(']'))
        .map(|inner| inner.split("][").map(str::to_string).collect())
        .unwrap_or_default()
}
