//! # inglish-etymology
//!
//! Turns hand-written etymology stanzas into structured word records.
//!
//! ```text
//! aquarius [L]
//! aiguiere, eviere [OF]
//! ewer [ME]
//! euar -s (m n)
//! https://example.com/word/ewer
//! ```
//!
//! Each line is tagged with its language ([`tagger`]), lines are grouped
//! into entries ([`grouper`]), each entry gets a headword ([`headword`]) and
//! is turned into a record ([`transform`]). [`pipeline`] wires the stages
//! into one `text -> records` call; [`stanza`] extracts per-word history
//! files from the same primitives.

pub mod error;
pub mod grouper;
pub mod headword;
pub mod output;
pub mod parallel;
pub mod pipeline;
pub mod stanza;
pub mod tables;
pub mod tagger;
pub mod transform;

pub use error::{EtymError, Result};
pub use grouper::{EntryGroup, GroupingStrategy};
pub use pipeline::{convert, Pipeline, PipelineConfig, PipelineOutput, TransformerSet};
pub use stanza::{extract_histories, HistoryFile, Stanza};
pub use tagger::{tag_line, RawLine, TaggedLine};
pub use transform::{OutputRecord, Transformer, WordEntry};
