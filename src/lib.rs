//! Data preparation utilities for sentence segmentation pipelines
//!
//! Sentence lists are stored as tagged text (`<t> sentence </t>` pairs on a single
//! line) and large lists are split into contiguous work chunks.
//!
//! ```
//! use sentence_prep::text::{decode, encode, partition};
//!
//! let tagged = encode(&["Hello world.", "Goodbye."]);
//! assert_eq!(tagged, " <t> Hello world. </t>  <t> Goodbye. </t> ");
//! assert_eq!(decode(&tagged).unwrap(), vec!["Hello world.", "Goodbye."]);
//!
//! let items = [0, 1, 2, 3, 4, 5];
//! let chunks = partition(&items, 3).unwrap();
//! assert_eq!(chunks, vec![&items[0..2], &items[2..4], &items[4..6]]);
//! ```

pub mod config;
pub mod corpus;
pub mod text;
pub mod util;
