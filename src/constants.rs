/// Constants used when reading cell values from delimited text.
pub mod data {
    /// Cell literals read as missing values (matches common dataframe readers).
    pub const NULL_LITERALS: &[&str] = &[
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
        "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ];
}

/// Constants used by the text normalizer.
pub mod normalize {
    /// Component name for normalizer diagnostics.
    pub const COMPONENT: &str = "textprep::normalize";
    /// ASCII punctuation characters; a token made only of a run of these is dropped.
    pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
    /// Contraction suffixes split off a word, checked after the apostrophe.
    pub const CLITIC_SUFFIXES: &[&str] = &["s", "m", "d", "re", "ve", "ll"];
    /// Apostrophe characters recognized when splitting contractions.
    pub const APOSTROPHES: &[char] = &['\'', '\u{2019}'];
    /// Separators that join two alphanumeric runs into one token (`e-mail`, `and/or`).
    pub const WORD_JOINERS: &[char] = &['-', '/'];
    /// Separators that join two digit runs into one token (`12:30`).
    pub const NUMBER_JOINERS: &[char] = &[':'];
    /// Currency signs kept attached to a following number (`£1000`); `$` is split off.
    pub const CURRENCY_PREFIXES: &[char] = &['£', '€', '¥', '₹'];
}

/// Constants used by the dataset preprocessor.
pub mod preprocess {
    /// Component name for preprocessor diagnostics.
    pub const COMPONENT: &str = "textprep::preprocess";
    /// Default text column name.
    pub const DEFAULT_TEXT_COLUMN: &str = "text";
    /// Default target column name.
    pub const DEFAULT_TARGET_COLUMN: &str = "target";
    /// Row-id interval between progress events while transforming text.
    pub const DEFAULT_PROGRESS_INTERVAL: usize = 500;
}

/// Constants used by the train/test pipeline and its on-disk layout.
pub mod pipeline {
    /// Component name for pipeline diagnostics.
    pub const COMPONENT: &str = "textprep::pipeline";
    /// Directory holding the raw input tables.
    pub const DEFAULT_RAW_DIR: &str = "./data/raw";
    /// Directory receiving the processed tables.
    pub const DEFAULT_INTERIM_DIR: &str = "./data/interim";
    /// Raw train table filename.
    pub const TRAIN_INPUT_FILENAME: &str = "train.csv";
    /// Raw test table filename.
    pub const TEST_INPUT_FILENAME: &str = "test.csv";
    /// Processed train table filename.
    pub const TRAIN_OUTPUT_FILENAME: &str = "train_processed.csv";
    /// Processed test table filename.
    pub const TEST_OUTPUT_FILENAME: &str = "test_processed.csv";
    /// Directory receiving the debug log file.
    pub const DEFAULT_LOG_DIR: &str = "logs";
    /// Debug log filename.
    pub const DEFAULT_LOG_FILENAME: &str = "data_preprocessing.log";
}
