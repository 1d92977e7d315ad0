//! Tool surface for the conversational orchestrator.
//!
//! The orchestrator (an LLM team) extracts lead attributes from the chat and
//! calls these tools by name with JSON arguments. Every decision is made by
//! the deterministic rules in `steelqual-core`; the LLM only translates
//! between the customer and the tools.
//!
//! # Tools
//!
//! - `qualify_lead` - score + disqualification verdict for extracted attributes
//! - `parse_volume` - free-text quantity to kilograms
//! - `region_minimum` - minimum order weight for a region code
//! - `lead_completeness` - required fields still missing before quoting
//!
//! A `qualify_lead` verdict of "not disqualified" only covers the attributes
//! that were passed in. Inspect `verdict.skipped_rules` before treating a lead
//! as fully vetted.

pub mod tools;

pub use tools::{Tool, ToolRegistry};
