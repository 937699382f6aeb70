pub mod dashas;
pub mod dignity;
pub mod nakshatra;
pub mod sublord;
pub mod types;

pub use dashas::{
    vimshottari_timeline, DashaBounds, DashaLookup, DashaPeriod, DashaTimeline, DASHA_YEAR_DAYS,
    DEFAULT_DASHA_BOUNDS, MAX_DASHA_HORIZON_YEARS,
};
pub use dignity::{classify, Dignity};
pub use nakshatra::{
    decompose, nakshatra_index, pada, segment, Nakshatra, Placement, BOUNDARY_EPSILON,
    NAKSHATRAS, NAKSHATRA_COUNT, NAKSHATRA_WIDTH, PADA_WIDTH,
};
pub use sublord::{sub_lord, sub_lord_segments, SubLordSegment};
pub use types::{
    Body, Lord, Point, Sign, CHART_POINTS, QUERIED_BODIES, SIGNS, VIMSHOTTARI,
    VIMSHOTTARI_TOTAL_YEARS,
};
