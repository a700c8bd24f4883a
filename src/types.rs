/// Column header as it appears in the input table.
/// Examples: `text`, `target`, `source_url`
pub type ColumnName = String;
/// Position of a row in the table it was loaded from (stable across filtering).
/// Example: `0`, `17`, `501`
pub type RowId = usize;
/// Dense integer code assigned to a target label.
/// Example: `0` for `ham`, `1` for `spam`
pub type LabelCode = i64;
/// Component name attached to diagnostic events.
/// Examples: `textprep::normalize`, `textprep::preprocess`
pub type Component = &'static str;
/// Diagnostic message text.
/// Examples: `duplicates removed`, `transformed 500 rows...`
pub type LogMessage = String;
/// Normalized token string produced for one text cell.
/// Example: `free entri wkli comp`
pub type NormalizedText = String;
