pub use foreboard_parser::columns::*;

pub const SCORE_TO_PAR: &str = "ScoreToPar";
pub const PUTTS_TO_PAR: &str = "PuttsToPar";
pub const GIR: &str = "GIR";
pub const FIR: &str = "FIR";

pub const NUM_HOLES: &str = "NumHoles";
pub const GREENS_HIT: &str = "GreensHit";
pub const NUM_FAIRWAYS: &str = "NumFairways";
pub const FAIRWAYS_HIT: &str = "FairwaysHit";

/// One round is one golfer on one course/tee set on one day.
pub const ROUND_KEYS: [&str; 4] = [GOLFER, DATE, COURSE, TEE];
