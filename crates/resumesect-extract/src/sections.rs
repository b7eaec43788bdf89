//! Section discovery: keyword anchors, then greedy boundary expansion.

pub mod expander;
pub mod locator;

pub use expander::{BoundaryExpander, ExpanderSettings, ExtractedSection, StopReason};
pub use locator::{locate, Anchor, SectionSpan};
