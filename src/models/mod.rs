pub mod calendar;
pub mod direction;
pub mod trade;

pub use calendar::{
    CalendarMatrix, DailyAggregates, DayAggregate, DayCell, TargetMonth, WeekRow,
    WEEKDAY_COLUMNS, WEEKDAY_LABELS,
};
pub use direction::*;
pub use trade::{Columns, NormalizedTrade, TradeDetail, TradeRecord};
