use std::fmt;

/// Which upload a file carries. Decides the required key columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    RecordTypes,
    RecordFields,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::RecordTypes => "record_types",
            FileKind::RecordFields => "record_fields",
        }
    }

    /// Columns every row of this kind must carry.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            FileKind::RecordTypes => &["RowKey"],
            FileKind::RecordFields => &["RowKey", "PartitionKey"],
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
