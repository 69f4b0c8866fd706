mod common;
pub use self::common::{Filters, Query};

mod bill;
pub use self::bill::BillQuery;

mod legislator;
pub use self::legislator::{GeoQuery, LegislatorQuery};

mod committee;
pub use self::committee::CommitteeQuery;

mod event;
pub use self::event::EventQuery;
