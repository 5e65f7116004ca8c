pub mod aggregate;
pub mod cache;
pub mod columns;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod views;

pub use aggregate::{
    round_summaries, summarize_rounds, summarize_rounds_cached, HitMiss, RoundSummary,
};
pub use cache::{fingerprint, CacheKey, CacheStatus, SummaryCache};
pub use enrich::{enrich, ingest_workbook, unmatched_holes};
pub use error::{PipelineError, Result};
pub use filter::{ensure_rows, filter_table, DateBounds, DateWindow, FilterParams};
pub use foreboard_parser::{parse_date, ParsedWorkbook};
pub use views::{
    accuracy_counts, regulation_breakdown, score_to_par_by_par, AccuracyCategory,
    AccuracyColumn, AccuracyCount, FilterOptions, RegulationCount,
};
