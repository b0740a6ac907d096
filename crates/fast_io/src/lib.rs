//! File transfer strategies for `tcp`.
//!
//! This crate owns the byte-moving half of a copy: given an already opened
//! source and target descriptor, a [`CopyStrategy`] transfers every byte of the
//! source into the target. Two strategies are provided:
//!
//! - [`BufferedCopy`] streams through a heap buffer sized from the source's
//!   preferred I/O block size, clamped to a sane range
//! - [`MmapCopy`] resizes the target up front and copies one page-sized chunk
//!   at a time through paired memory mappings
//!
//! Exactly one of them is compiled in as [`DefaultStrategy`], selected by the
//! `mmap` cargo feature. The driver is generic over [`CopyStrategy`], so further
//! strategies can be added without touching it.
//!
//! # Errors
//!
//! Every failed system call surfaces as a [`TransferError`] naming the
//! operation that failed. Nothing is retried and a partially written target is
//! left in place.

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

pub mod buffered;
pub mod close;
pub mod error;
pub mod mmap;
pub mod strategy;

pub use buffered::{BufferedCopy, MAX_BUFFER_SIZE, MIN_BUFFER_SIZE, clamp_buffer_len};
pub use close::close_file;
pub use error::{TransferError, TransferOperation};
pub use mmap::{MmapCopy, page_size};
pub use strategy::{CopyStrategy, DefaultStrategy, SourceInfo};
